use std::io::Cursor;

use super::*;

#[test]
fn normalize_path_slash_normalization() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn missing_asset_is_invalid_asset() {
    let store = AssetStore::new("/definitely/not/here");
    let err = store.font("levelfont.otf").unwrap_err();
    assert!(matches!(err, RankCardError::InvalidAsset(_)));
    let err = store.image("mask_circle.png").unwrap_err();
    assert!(matches!(err, RankCardError::InvalidAsset(_)));
}

#[test]
fn registered_bytes_shadow_files() {
    let store = AssetStore::new(".")
        .with_asset("fonts/x.ttf", vec![0u8; 64])
        .unwrap();
    assert_eq!(store.font("fonts/x.ttf").unwrap().len(), 64);
    assert_eq!(store.bytes("./fonts/x.ttf").unwrap().len(), 64);
}

#[test]
fn truncated_font_is_rejected() {
    let store = AssetStore::new(".").with_asset("tiny.ttf", vec![1, 2]).unwrap();
    assert!(matches!(
        store.font("tiny.ttf").unwrap_err(),
        RankCardError::InvalidAsset(_)
    ));
}

#[test]
fn image_asset_decodes_and_bad_bytes_are_invalid_asset() {
    let img = image::GrayImage::from_pixel(4, 4, image::Luma([200]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageLuma8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let store = AssetStore::new(".")
        .with_asset("mask.png", buf)
        .unwrap()
        .with_asset("broken.png", b"nope".to_vec())
        .unwrap();

    let mask = store.image("mask.png").unwrap();
    assert_eq!((mask.width, mask.height), (4, 4));
    assert!(matches!(
        store.image("broken.png").unwrap_err(),
        RankCardError::InvalidAsset(_)
    ));
}
