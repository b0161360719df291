use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert_eq!(Canvas::new(4, 3).unwrap().rgba8_len(), 48);
}

#[test]
fn canvas_scaled_percent_truncates() {
    let c = Canvas::new(505, 259).unwrap();
    assert_eq!(c.scaled_percent(100).unwrap(), c);
    assert_eq!(
        c.scaled_percent(50).unwrap(),
        Canvas {
            width: 252,
            height: 129
        }
    );
    assert!(c.scaled_percent(0).is_err());
}

#[test]
fn canvas_scaled_percent_rejects_overflow() {
    let c = Canvas::new(1000, 333).unwrap();
    assert!(matches!(
        c.scaled_percent(429_496_830).unwrap_err(),
        RankCardError::Validation(_)
    ));
    assert!(matches!(
        c.scaled_percent(u32::MAX).unwrap_err(),
        RankCardError::Validation(_)
    ));
}

#[test]
fn premul_round_trips_opaque_and_transparent() {
    let c = Rgba8Premul::from_straight_rgba(10, 20, 30, 255);
    assert_eq!(c.to_array(), [10, 20, 30, 255]);
    assert_eq!(c.to_straight_rgba(), [10, 20, 30, 255]);

    let t = Rgba8Premul::from_straight_rgba(200, 200, 200, 0);
    assert_eq!(t, Rgba8Premul::transparent());
    assert_eq!(t.to_straight_rgba(), [0, 0, 0, 0]);
}

#[test]
fn premul_half_alpha() {
    let c = Rgba8Premul::from_straight_rgba(255, 255, 255, 50);
    assert_eq!(c.to_array(), [50, 50, 50, 50]);
}
