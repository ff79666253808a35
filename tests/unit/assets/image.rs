use super::*;
use crate::foundation::core::Rgba8;

fn temp_dir(name: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("memepen_{name}_{}_{nanos}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_png(path: &std::path::Path, w: u32, h: u32, px: [u8; 4]) {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    img.save(path).unwrap();
}

#[test]
fn local_repository_decodes_and_hands_out_fresh_canvases() {
    let dir = temp_dir("local_images");
    write_png(&dir.join("bg.png"), 4, 3, [10, 20, 30, 255]);

    let mut paths = BTreeMap::new();
    paths.insert("bg".to_string(), PathBuf::from("bg.png"));
    let repo = LocalImageRepository::new(&dir, paths);

    let mut first = repo.background("bg").unwrap();
    assert_eq!((first.width(), first.height()), (4, 3));
    assert_eq!(first.pixel(0, 0), Some([10, 20, 30, 255]));

    // Mutating one canvas must not leak into the next lookup.
    first
        .draw_layer(|ctx| {
            ctx.set_paint(Rgba8::WHITE.to_paint());
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, 4.0, 3.0));
            Ok(())
        })
        .unwrap();
    let second = repo.background("bg").unwrap();
    assert_eq!(second.pixel(0, 0), Some([10, 20, 30, 255]));

    // Cached: removing the file does not break later lookups.
    std::fs::remove_file(dir.join("bg.png")).unwrap();
    assert!(repo.background("bg").is_ok());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn local_repository_missing_entries_are_not_found() {
    let dir = temp_dir("missing_images");
    let mut paths = BTreeMap::new();
    paths.insert("ghost".to_string(), PathBuf::from("ghost.png"));
    let repo = LocalImageRepository::new(&dir, paths);

    assert!(matches!(
        repo.background("ghost").unwrap_err(),
        MemeError::ImageNotFound { id } if id == "ghost"
    ));
    assert!(matches!(
        repo.background("unknown").unwrap_err(),
        MemeError::ImageNotFound { .. }
    ));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn concurrent_first_decodes_agree() {
    let dir = temp_dir("concurrent_images");
    write_png(&dir.join("a.png"), 8, 6, [200, 10, 10, 255]);
    write_png(&dir.join("b.png"), 5, 5, [10, 10, 200, 255]);

    let mut paths = BTreeMap::new();
    paths.insert("a".to_string(), PathBuf::from("a.png"));
    paths.insert("b".to_string(), PathBuf::from("b.png"));
    let repo = LocalImageRepository::new(&dir, paths);

    std::thread::scope(|s| {
        for i in 0..8 {
            let repo = &repo;
            s.spawn(move || {
                let (id, dims, px) = if i % 2 == 0 {
                    ("a", (8, 6), [200, 10, 10, 255])
                } else {
                    ("b", (5, 5), [10, 10, 200, 255])
                };
                let canvas = repo.background(id).unwrap();
                assert_eq!((canvas.width(), canvas.height()), dims);
                assert_eq!(canvas.pixel(0, 0), Some(px));
            });
        }
    });
}

#[test]
fn in_memory_repository_clones_backgrounds() {
    let repo = InMemoryImageRepository::new()
        .with_image("gray", Canvas::solid(2, 2, Rgba8::rgb(128, 128, 128)).unwrap());
    let canvas = repo.background("gray").unwrap();
    assert_eq!(canvas.pixel(1, 1), Some([128, 128, 128, 255]));
    assert!(repo.background("missing").is_err());
}
