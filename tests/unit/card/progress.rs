use super::*;

#[test]
fn zero_max_is_rejected() {
    assert!(matches!(
        ProgressFraction::new(1, 0).unwrap_err(),
        RankCardError::Validation(_)
    ));
}

#[test]
fn fill_width_floors_at_min() {
    let p = ProgressFraction::new(1, 400).unwrap();
    assert_eq!(p.fill_width(420.0, MIN_FILL_PX), MIN_FILL_PX);

    let p = ProgressFraction::new(0, 400).unwrap();
    assert!(p.is_empty());
    assert_eq!(p.fill_width(420.0, MIN_FILL_PX), MIN_FILL_PX);
}

#[test]
fn fill_width_scales_with_fraction() {
    let p = ProgressFraction::new(100, 400).unwrap();
    assert!((p.fill_width(420.0, MIN_FILL_PX) - 105.0).abs() < 1e-9);

    let p = ProgressFraction::new(400, 400).unwrap();
    assert!((p.fill_width(619.0, MIN_FILL_PX) - 619.0).abs() < 1e-9);
}

#[test]
fn over_full_progress_runs_past_the_track() {
    let p = ProgressFraction::new(460, 400).unwrap();
    assert!(p.fraction() > 1.0);
    assert!((p.fill_width(420.0, MIN_FILL_PX) - 483.0).abs() < 1e-9);
}

#[test]
fn fill_width_is_monotonic_in_current() {
    let max = 1_337;
    let mut prev = 0.0;
    for current in 0..=2 * max {
        let w = ProgressFraction::new(current, max)
            .unwrap()
            .fill_width(420.0, MIN_FILL_PX);
        assert!(w >= prev, "width decreased at current={current}");
        assert!(w >= MIN_FILL_PX);
        prev = w;
    }
}
