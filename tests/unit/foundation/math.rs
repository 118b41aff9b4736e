use super::*;

#[test]
fn approx_eq_is_relative_for_large_values() {
    assert!(approx_eq(1.0, 1.0 + 1e-9));
    assert!(approx_eq(1e9, 1e9 + 1.0));
    assert!(!approx_eq(1.0, 1.001));
}

#[test]
fn fit_factor_takes_the_tighter_axis() {
    assert_eq!(fit_factor((4.0, 2.0), (8.0, 1.0)).unwrap(), 0.5);
    assert_eq!(fit_factor((4.0, 2.0), (1.0, 4.0)).unwrap(), 0.5);
}

#[test]
fn centre_offset_never_goes_negative() {
    assert_eq!(centre_offset(6.0, 5.0), 0.5);
    assert_eq!(centre_offset(2.0, 5.0), 0.0);
}

#[test]
fn fit_factor_rejects_degenerate_extents() {
    assert!(fit_factor((0.0, 2.0), (1.0, 1.0)).is_err());
    assert!(fit_factor((1.0, 2.0), (1.0, f64::NAN)).is_err());
    assert!(fit_factor((1.0, -2.0), (1.0, 1.0)).is_err());
}
