use super::*;

#[test]
fn presets_are_valid() {
    for style in CardStyle::ALL {
        LayoutConfig::preset(style).validate().unwrap();
    }
}

#[test]
fn style_parses_case_insensitively() {
    assert_eq!("Classic".parse::<CardStyle>().unwrap(), CardStyle::Classic);
    assert_eq!(" shade ".parse::<CardStyle>().unwrap(), CardStyle::Shade);
    assert!("card4".parse::<CardStyle>().is_err());
}

#[test]
fn classic_outputs_framed_size() {
    let l = LayoutConfig::classic();
    assert_eq!(
        l.output_canvas(),
        Canvas {
            width: 505,
            height: 259
        }
    );
    assert!(l.needs_background());
    assert!(!LayoutConfig::solid().needs_background());
    assert_eq!(LayoutConfig::solid().output_canvas(), LayoutConfig::solid().canvas);
}

#[test]
fn shade_differs_from_solid_only_in_backdrop_panel_and_bar() {
    let solid = LayoutConfig::solid();
    let shade = LayoutConfig::shade();
    assert_eq!(solid.avatar, shade.avatar);
    assert_eq!(solid.username, shade.username);
    assert_eq!(shade.bar.composite, BarComposite::SourceAlpha);
    assert_eq!(shade.bar.backing, Fill::Transparent);
}

#[test]
fn layout_round_trips_through_json() {
    let l = LayoutConfig::classic();
    let s = serde_json::to_string(&l).unwrap();
    let back: LayoutConfig = serde_json::from_str(&s).unwrap();
    assert_eq!(back.avatar, l.avatar);
    assert_eq!(back.frame, l.frame);
    assert_eq!(back.bar.surface, l.bar.surface);
}

#[test]
fn validate_rejects_degenerate_values() {
    let mut l = LayoutConfig::solid();
    l.avatar.size = 0;
    assert!(l.validate().is_err());

    let mut l = LayoutConfig::solid();
    l.exp.size_px = 0.0;
    assert!(l.validate().is_err());

    let mut l = LayoutConfig::classic();
    l.font = " ".to_string();
    assert!(l.validate().is_err());

    let mut l = LayoutConfig::classic();
    l.bar.track_width = 0.0;
    assert!(l.validate().is_err());
}
