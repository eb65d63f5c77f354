use super::*;

#[test]
fn curve_is_anchored_at_both_ends() {
    for (slope, position) in [(0.01, 0.5), (10.0, 0.5), (10.0, 0.1), (25.0, 0.9)] {
        let start = ease_preview(0.0, slope, position);
        let end = ease_preview(1.0, slope, position);
        assert!(start.abs() < 1e-9, "start {start} for {slope}/{position}");
        assert!((end - 1.0).abs() < 1e-9, "end {end} for {slope}/{position}");
    }
}

#[test]
fn centered_curve_is_symmetric() {
    let slope = 12.0;
    for x in [0.1, 0.25, 0.4] {
        let a = ease_preview(x, slope, 0.5);
        let b = ease_preview(1.0 - x, slope, 0.5);
        assert!((a + b - 1.0).abs() < 1e-9);
    }
}

#[test]
fn degenerate_slope_falls_back_to_linear() {
    assert_eq!(ease_preview(0.3, 0.0, 0.5), 0.3);
}

#[test]
fn preview_curve_samples_unit_interval() {
    let record = BurstRecord::default();
    let curve = preview_curve(&record, 5);
    assert_eq!(curve.len(), 5);
    assert_eq!(curve[0].0, 0.0);
    assert_eq!(curve[4].0, 1.0);
    assert!(curve.windows(2).all(|w| w[0].1 <= w[1].1 + 1e-12));
}
