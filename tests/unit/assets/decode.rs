use super::*;

fn png_of(pixels: Vec<u8>, w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(w, h, pixels).unwrap();
    encode_png(&img).unwrap()
}

#[test]
fn decode_png_dimensions_and_premul() {
    let prepared = decode_image(&png_of(vec![100, 50, 200, 128], 1, 1)).unwrap();
    assert_eq!((prepared.width, prepared.height), (1, 1));
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn transparent_pixels_premultiply_to_zero() {
    let prepared = decode_image(&png_of(vec![255, 255, 255, 0, 9, 8, 7, 255], 2, 1)).unwrap();
    assert_eq!(prepared.rgba8_premul.as_slice(), &[0, 0, 0, 0, 9, 8, 7, 255]);
}

#[test]
fn garbage_bytes_fail_to_decode() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, crate::MemeError::Other(_)));
}

#[test]
fn encode_png_writes_signature() {
    let bytes = png_of(vec![0; 4 * 4], 2, 2);
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}
