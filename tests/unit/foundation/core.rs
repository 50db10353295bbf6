use super::*;

#[test]
fn zero_and_negative_heights_are_not_measurable() {
    assert!(TrackedRect::new(10.0, 400.0).is_measurable());
    assert!(!TrackedRect::new(10.0, 0.0).is_measurable());
    assert!(!TrackedRect::new(10.0, -5.0).is_measurable());
}

#[test]
fn non_finite_rects_are_not_measurable() {
    assert!(!TrackedRect::new(f64::NAN, 400.0).is_measurable());
    assert!(!TrackedRect::new(0.0, f64::INFINITY).is_measurable());
}

#[test]
fn scroll_ratio_reports_degenerate_geometry() {
    let ok = TrackedLayout::new(TrackedRect::new(200.0, 400.0), 800.0);
    assert_eq!(ok.scroll_ratio().unwrap(), 1.5);

    let flat = TrackedLayout::new(TrackedRect::new(200.0, 0.0), 800.0);
    assert!(matches!(flat.scroll_ratio(), Err(TraceError::Geometry(_))));
}

#[test]
fn overflowing_ratio_saturates_instead_of_failing() {
    let past = TrackedLayout::new(TrackedRect::new(-1e308, 1e-10), 1e308);
    assert_eq!(past.scroll_ratio().unwrap(), f64::MAX);

    let below = TrackedLayout::new(TrackedRect::new(f64::MAX, f64::MIN_POSITIVE), -f64::MAX);
    assert_eq!(below.scroll_ratio().unwrap(), -f64::MAX);
}
