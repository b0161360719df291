use super::*;

fn solid(w: u32, h: u32, px: [u8; 4]) -> FrameRGBA {
    let mut f = FrameRGBA::new(w, h);
    f.fill(Rgba8Premul {
        r: px[0],
        g: px[1],
        b: px[2],
        a: px[3],
    });
    f
}

#[test]
fn new_frame_is_transparent() {
    let f = FrameRGBA::new(3, 2);
    assert_eq!(f.data.len(), 24);
    assert!(f.data.iter().all(|&b| b == 0));
    assert_eq!(f.pixel(3, 0), None);
}

#[test]
fn paste_replace_clips_to_bounds() {
    let mut dst = solid(4, 4, [0, 0, 0, 255]);
    let src = solid(3, 3, [255, 0, 0, 255]);
    dst.paste(&src, 2, -1, Blend::Replace).unwrap();

    assert_eq!(dst.pixel(2, 0).unwrap().to_array(), [255, 0, 0, 255]);
    assert_eq!(dst.pixel(3, 1).unwrap().to_array(), [255, 0, 0, 255]);
    assert_eq!(dst.pixel(2, 2).unwrap().to_array(), [0, 0, 0, 255]);
    assert_eq!(dst.pixel(1, 0).unwrap().to_array(), [0, 0, 0, 255]);
}

#[test]
fn paste_fully_outside_is_noop() {
    let mut dst = solid(2, 2, [1, 2, 3, 255]);
    let before = dst.clone();
    dst.paste(&solid(2, 2, [9, 9, 9, 255]), 5, 5, Blend::Replace)
        .unwrap();
    assert_eq!(dst, before);
}

#[test]
fn paste_over_respects_source_alpha() {
    let mut dst = solid(1, 1, [0, 0, 0, 255]);
    dst.paste(&solid(1, 1, [0, 0, 0, 0]), 0, 0, Blend::Over)
        .unwrap();
    assert_eq!(dst.pixel(0, 0).unwrap().to_array(), [0, 0, 0, 255]);

    let mut dst = solid(1, 1, [0, 0, 0, 255]);
    dst.paste(&solid(1, 1, [50, 50, 50, 50]), 0, 0, Blend::Over)
        .unwrap();
    let p = dst.pixel(0, 0).unwrap();
    assert_eq!(p.a, 255);
    assert_eq!(p.r, 50);
}

#[test]
fn paste_lerp_uses_mask_weights() {
    let mut dst = solid(2, 1, [0, 0, 0, 255]);
    let src = solid(2, 1, [255, 255, 255, 255]);
    let mask = MaskPlane {
        width: 2,
        height: 1,
        weights: vec![0, 255],
    };
    dst.paste(&src, 0, 0, Blend::Lerp(&mask)).unwrap();
    assert_eq!(dst.pixel(0, 0).unwrap().to_array(), [0, 0, 0, 255]);
    assert_eq!(dst.pixel(1, 0).unwrap().to_array(), [255, 255, 255, 255]);

    let bad = MaskPlane {
        width: 1,
        height: 1,
        weights: vec![255],
    };
    assert!(dst.paste(&src, 0, 0, Blend::Lerp(&bad)).is_err());
}

#[test]
fn flatten_onto_black_makes_opaque() {
    let mut f = solid(1, 1, [100, 0, 0, 128]);
    f.flatten_onto(Rgba8Premul::opaque_black());
    assert_eq!(f.pixel(0, 0).unwrap().to_array(), [100, 0, 0, 255]);
}

#[test]
fn recolor_replaces_exact_matches_only() {
    let mut f = FrameRGBA::from_premul_bytes(2, 1, vec![0, 0, 0, 255, 1, 0, 0, 255]).unwrap();
    let red = Rgba8Premul::from_straight_rgba(255, 0, 0, 255);
    f.recolor(Rgba8Premul::opaque_black(), red);
    assert_eq!(f.pixel(0, 0).unwrap(), red);
    assert_eq!(f.pixel(1, 0).unwrap().to_array(), [1, 0, 0, 255]);
}

#[test]
fn apply_mask_scales_all_channels() {
    let mut f = solid(2, 1, [200, 100, 50, 200]);
    let mask = MaskPlane {
        width: 2,
        height: 1,
        weights: vec![255, 0],
    };
    f.apply_mask(&mask).unwrap();
    assert_eq!(f.pixel(0, 0).unwrap().to_array(), [200, 100, 50, 200]);
    assert_eq!(f.pixel(1, 0).unwrap().to_array(), [0, 0, 0, 0]);
}

#[test]
fn resize_keeps_constant_color_and_premul_invariant() {
    let f = solid(8, 4, [40, 40, 40, 80]);
    let r = f.resized(3, 5).unwrap();
    assert_eq!((r.width, r.height), (3, 5));
    for px in r.data.chunks_exact(4) {
        assert!(px[0] <= px[3] && px[1] <= px[3] && px[2] <= px[3]);
    }
    assert_eq!(r.pixel(1, 2).unwrap().to_array(), [40, 40, 40, 80]);
}

#[test]
fn luma_mask_ignores_alpha_and_alpha_mask_reads_coverage() {
    let f = FrameRGBA::from_premul_bytes(2, 1, vec![255, 255, 255, 255, 0, 0, 0, 255]).unwrap();
    let luma = MaskPlane::from_luma(&f);
    assert_eq!(luma.weights, vec![255, 0]);
    let alpha = MaskPlane::from_alpha(&f);
    assert_eq!(alpha.weights, vec![255, 255]);
}

#[test]
fn straight_conversion_unpremultiplies() {
    let f = FrameRGBA::from_premul_bytes(1, 1, vec![50, 50, 50, 50]).unwrap();
    assert_eq!(f.to_straight_rgba8(), vec![255, 255, 255, 50]);
}
