use serde_json::json;

use super::*;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Rgba8 = serde_json::from_value(json!("#FFFFFF")).unwrap();
    assert_eq!(c, Rgba8::WHITE);

    let c: Rgba8 = serde_json::from_value(json!("0000ff80")).unwrap();
    assert_eq!(c, Rgba8::rgba(0, 0, 255, 128));
}

#[test]
fn parses_byte_arrays() {
    let c: Rgba8 = serde_json::from_value(json!([10, 20, 30])).unwrap();
    assert_eq!(c, Rgba8::rgb(10, 20, 30));

    let c: Rgba8 = serde_json::from_value(json!([10, 20, 30, 40])).unwrap();
    assert_eq!(c, Rgba8::rgba(10, 20, 30, 40));

    assert!(serde_json::from_value::<Rgba8>(json!([1, 2])).is_err());
}

#[test]
fn rejects_malformed_hex() {
    assert!(Rgba8::from_hex("#fff").is_err());
    assert!(Rgba8::from_hex("#gg0000").is_err());
    assert!(Rgba8::from_hex("#ééé").is_err());
}

#[test]
fn hex_serialization_is_stable() {
    assert_eq!(serde_json::to_value(Rgba8::BLACK).unwrap(), json!("#000000"));
    assert_eq!(Rgba8::rgba(1, 2, 3, 4).to_hex(), "#01020304");
}

#[test]
fn premultiplies_with_rounding() {
    assert_eq!(Rgba8::WHITE.to_premul(), [255, 255, 255, 255]);
    assert_eq!(
        Rgba8::rgba(100, 50, 200, 128).to_premul(),
        [
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
}
