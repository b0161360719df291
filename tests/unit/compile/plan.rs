use super::*;
use crate::card::layout::CardStyle;

fn card(current_exp: u64, max_exp: u64) -> RankCard {
    RankCard {
        username: "krishsharma0413".to_string(),
        level: 10,
        current_exp,
        max_exp,
        rank: Some(1),
    }
}

fn compile(style: CardStyle, current: u64, max: u64) -> CardPlan {
    compile_card(
        &card(current, max),
        &CardSettings::default(),
        &LayoutConfig::preset(style),
        RenderOpts::default(),
    )
    .unwrap()
}

#[test]
fn zero_exp_never_draws_fill() {
    for style in CardStyle::ALL {
        let plan = compile(style, 0, 400);
        assert!(plan.draws(DrawRole::BarTrack));
        assert!(!plan.draws(DrawRole::BarFill), "{style:?} drew a fill");
        assert_eq!(plan.bar_fill_width(), None);
    }
}

#[test]
fn small_progress_floors_at_fifty_pixels() {
    let plan = compile(CardStyle::Classic, 1, 400);
    assert_eq!(plan.bar_fill_width(), Some(50.0));
}

#[test]
fn fill_width_is_monotonic_across_styles() {
    for style in CardStyle::ALL {
        let mut prev = 0.0;
        for current in (1..=500).step_by(7) {
            let w = compile(style, current, 400).bar_fill_width().unwrap();
            assert!(w >= prev);
            assert!(w >= 50.0);
            prev = w;
        }
    }
}

#[test]
fn over_full_classic_bar_is_not_capped_at_the_track() {
    let plan = compile(CardStyle::Classic, 460, 400);
    let w = plan.bar_fill_width().unwrap();
    assert!((w - 483.0).abs() < 1e-9, "{w}");
}

#[test]
fn zero_max_exp_is_validation_error() {
    let err = compile_card(
        &card(1, 0),
        &CardSettings::default(),
        &LayoutConfig::classic(),
        RenderOpts::default(),
    )
    .unwrap_err();
    assert!(matches!(err, RankCardError::Validation(_)));
}

#[test]
fn classic_plan_clips_and_downscales() {
    let plan = compile(CardStyle::Classic, 100, 400);
    assert!(plan.passes.iter().any(|p| matches!(p, Pass::Clip { .. })));
    assert_eq!(
        plan.output_canvas().unwrap(),
        Canvas {
            width: 505,
            height: 259
        }
    );
}

#[test]
fn solid_plan_starts_with_background_clear_and_needs_no_background_input() {
    let plan = compile(CardStyle::Solid, 100, 400);
    assert!(matches!(
        plan.passes.first(),
        Some(Pass::Clear {
            target: SurfaceId(0),
            ..
        })
    ));
    let uses_background = plan.passes.iter().any(|p| {
        matches!(
            p,
            Pass::Paste(PastePass {
                source: PasteSource::Input(ImageInput::Background),
                ..
            })
        )
    });
    assert!(!uses_background);
}

#[test]
fn resize_percent_adds_a_final_surface() {
    let plan = compile_card(
        &card(100, 400),
        &CardSettings::default(),
        &LayoutConfig::solid(),
        RenderOpts { resize_percent: 50 },
    )
    .unwrap();
    assert_eq!(
        plan.output_canvas().unwrap(),
        Canvas {
            width: 500,
            height: 166
        }
    );

    let err = compile_card(
        &card(100, 400),
        &CardSettings::default(),
        &LayoutConfig::solid(),
        RenderOpts { resize_percent: 0 },
    )
    .unwrap_err();
    assert!(matches!(err, RankCardError::Validation(_)));
}

#[test]
fn labels_follow_layout_wording() {
    let texts = |style| -> Vec<String> {
        compile(style, 1_500, 400_000)
            .draw_ops()
            .filter_map(|op| match op {
                DrawOp::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect()
    };
    assert_eq!(
        texts(CardStyle::Classic),
        vec!["krishsharma0413", "LEVEL - 10", "1.5K/400.0K"]
    );
    assert_eq!(
        texts(CardStyle::Solid),
        vec!["krishsharma0413", "LEVEL: 10       RANK: 1", "1.5K/400.0K"]
    );
}

#[test]
fn avatar_paste_flattens_onto_black_through_mask() {
    let plan = compile(CardStyle::Classic, 10, 400);
    let avatar = plan
        .passes
        .iter()
        .find_map(|p| match p {
            Pass::Paste(p) if p.source == PasteSource::Input(ImageInput::Avatar) => Some(p),
            _ => None,
        })
        .unwrap();
    assert_eq!((avatar.x, avatar.y, avatar.width), (13, 65, 170));
    assert_eq!(avatar.flatten, Some(Rgba8Premul::opaque_black()));
    assert_eq!(avatar.mode, PasteMode::Mask(MaskSource::ellipse()));
}

#[test]
fn avatar_is_pasted_over_the_labels() {
    for style in CardStyle::ALL {
        let plan = compile(style, 10, 400);
        let text_at = plan
            .passes
            .iter()
            .position(|p| matches!(p, Pass::Scene(s) if s.ops.iter().any(|op| op.role() == DrawRole::Level)))
            .unwrap();
        let avatar_at = plan
            .passes
            .iter()
            .position(|p| matches!(p, Pass::Paste(p) if p.source == PasteSource::Input(ImageInput::Avatar)))
            .unwrap();
        assert!(avatar_at > text_at, "{style:?}");
    }
}

#[test]
fn compile_is_deterministic() {
    let a = format!("{:?}", compile(CardStyle::Shade, 123, 456).passes);
    let b = format!("{:?}", compile(CardStyle::Shade, 123, 456).passes);
    assert_eq!(a, b);
}
