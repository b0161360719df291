use super::*;
use serde_json::json;

#[test]
fn parses_hex_forms() {
    let c: ColorDef = "#ff0000".parse().unwrap();
    assert_eq!(c.to_rgba8(), [255, 0, 0, 255]);

    let c: ColorDef = "#0000ff80".parse().unwrap();
    assert_eq!(c.to_rgba8(), [0, 0, 255, 128]);

    let c: ColorDef = "#fff".parse().unwrap();
    assert_eq!(c.to_rgba8(), [255, 255, 255, 255]);

    assert!("#12345".parse::<ColorDef>().is_err());
    assert!("#zzzzzz".parse::<ColorDef>().is_err());
}

#[test]
fn parses_named_colors_case_insensitively() {
    let c: ColorDef = "White".parse().unwrap();
    assert_eq!(c, ColorDef::WHITE);
    let c: ColorDef = "transparent".parse().unwrap();
    assert_eq!(c.to_rgba8()[3], 0);
    assert!("not-a-color".parse::<ColorDef>().is_err());
}

#[test]
fn deserializes_object_array_and_string() {
    let c: ColorDef = serde_json::from_value(json!({"r": 0.25, "g": 0.5, "b": 0.75})).unwrap();
    assert_eq!(c, ColorDef::rgba(0.25, 0.5, 0.75, 1.0));

    let c: ColorDef = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.9])).unwrap();
    assert_eq!(c, ColorDef::rgba(0.25, 0.5, 0.75, 0.9));

    let c: ColorDef = serde_json::from_value(json!("#36393f")).unwrap();
    assert_eq!(c.to_rgba8(), [0x36, 0x39, 0x3f, 255]);

    assert!(serde_json::from_value::<ColorDef>(json!([1.0, 2.0])).is_err());
}

#[test]
fn display_is_lowercase_hex() {
    assert_eq!(ColorDef::from_rgba8(0x2f, 0x31, 0x36, 255).to_string(), "#2f3136");
    assert_eq!(ColorDef::from_rgba8(0, 0, 0, 200).to_string(), "#000000c8");
}

#[test]
fn premul_conversion_scales_channels() {
    let c = ColorDef::from_rgba8(255, 255, 255, 50).to_rgba8_premul();
    assert_eq!(c.to_array(), [50, 50, 50, 50]);
}
