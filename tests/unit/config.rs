use super::*;
use crate::{assets::font::FontProvider, template::repository::TemplateRepository};

fn temp_dir(name: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("memepen_{name}_{}_{nanos}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn empty_object_is_default_config() {
    let cfg = Config::from_json_str("{}").unwrap();
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.memes_dir, "assets/memes");
    assert_eq!(cfg.public_base_url, "http://localhost:8080/");
    assert_eq!(cfg.uploader, UploaderKind::Local);
    assert!(cfg.fonts.contains_key("Impact"));
    assert!(cfg.images.contains_key("two-buttons"));
}

#[test]
fn unknown_keys_and_bad_values_are_serde_errors() {
    assert!(matches!(
        Config::from_json_str(r#"{"nope": 1}"#).unwrap_err(),
        MemeError::Serde(_)
    ));
    assert!(matches!(
        Config::from_json_str(r#"{"uploader": "s3"}"#).unwrap_err(),
        MemeError::Serde(_)
    ));
}

#[test]
fn load_env_reads_named_file() {
    let dir = temp_dir("config_env");
    std::fs::write(
        dir.join("local.json"),
        r#"{"uploader": "noop", "memes_dir": "out", "fonts": {"Impact": "tests/data/fonts/DejaVuSans-Bold.ttf"}}"#,
    )
    .unwrap();

    let cfg = Config::load_env(&dir, "local").unwrap();
    assert_eq!(cfg.uploader, UploaderKind::Noop);
    assert_eq!(cfg.publish_settings().memes_dir, "out");
    assert_eq!(cfg.fonts.len(), 1);

    assert!(Config::load_env(&dir, "prod").is_err());
    assert!(matches!(
        Config::load_env(&dir, "../etc").unwrap_err(),
        MemeError::Validation(_)
    ));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn factories_build_collaborators() {
    let cfg = Config {
        fonts: BTreeMap::from([(
            "Impact".to_string(),
            PathBuf::from("tests/data/fonts/DejaVuSans-Bold.ttf"),
        )]),
        ..Config::default()
    };

    assert_eq!(cfg.font_repository().font("Impact").unwrap().family(), "Impact");
    assert!(cfg.font_repository().font("Arial").is_err());

    let templates = cfg.template_repository().unwrap();
    assert!(templates.template("two-buttons").is_ok());
    assert_eq!(templates.len(), 2);
}

#[test]
fn templates_path_overrides_builtin_table() {
    let dir = temp_dir("config_templates");
    let one: Vec<_> = default_templates().into_iter().take(1).collect();
    std::fs::write(dir.join("templates.json"), serde_json::to_vec(&one).unwrap()).unwrap();

    let cfg = Config {
        assets_root: dir.clone(),
        templates_path: Some(PathBuf::from("templates.json")),
        ..Config::default()
    };
    let repo = cfg.template_repository().unwrap();
    assert_eq!(repo.len(), 1);
    assert_eq!(repo.templates()[0].id, one[0].id);
    let _ = std::fs::remove_dir_all(&dir);
}
