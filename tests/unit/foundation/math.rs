use super::*;

#[test]
fn non_negative_or_zero_clamps_unusable_values() {
    assert_eq!(non_negative_or_zero(f64::NAN), 0.0);
    assert_eq!(non_negative_or_zero(f64::INFINITY), 0.0);
    assert_eq!(non_negative_or_zero(-3.0), 0.0);
    assert_eq!(non_negative_or_zero(12.5), 12.5);
}

#[test]
fn round_to_decimals_matches_fixed_point() {
    assert_eq!(round_to_decimals(0.01, 4), 0.01);
    assert_eq!(round_to_decimals(1.0 / 3.0, 4), 0.3333);
    assert_eq!(round_to_decimals(2.71828, 2), 2.72);
    assert!(round_to_decimals(f64::NAN, 4).is_nan());
}

#[test]
fn positivity_checks() {
    assert!(is_positive(0.5));
    assert!(!is_positive(0.0));
    assert!(!is_positive(f64::NAN));
    assert!(is_positive_integer(30.0));
    assert!(!is_positive_integer(30.5));
    assert!(!is_positive_integer(-2.0));
}

#[test]
fn unpremultiply_restores_straight_channels() {
    let mut px = vec![128u8, 0, 0, 128, 10, 20, 30, 255, 0, 0, 0, 0];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &[255, 0, 0, 128]);
    assert_eq!(&px[4..8], &[10, 20, 30, 255]);
    assert_eq!(&px[8..12], &[0, 0, 0, 0]);
}
