use super::*;
use crate::foundation::core::CubicBez;
use kurbo::{ParamCurve, ParamCurveArclen};

const FLIGHT_PATH: &str =
    "M 150 50 C 450 50, 650 200, 650 400 C 650 600, 250 700, 150 800 C 50 900, 150 1100, 350 1200";

fn flight_path() -> CurveModel {
    CurveModel::from_svg(FLIGHT_PATH, Vec::new()).unwrap()
}

/// Arc length between two progress values, measured independently of the sampler.
fn arc_between(curve: &CurveModel, a: f64, b: f64) -> f64 {
    let (ia, ta) = curve.locate(a * curve.length());
    let (ib, tb) = curve.locate(b * curve.length());
    let segs = curve.segments();
    if ia == ib {
        return segs[ia].subsegment(ta..tb).arclen(1e-9);
    }
    let mut total = segs[ia].subsegment(ta..1.0).arclen(1e-9);
    for s in &segs[ia + 1..ib] {
        total += s.arclen(1e-9);
    }
    total + segs[ib].subsegment(0.0..tb).arclen(1e-9)
}

#[test]
fn endpoints_are_exact() {
    let curve = flight_path();
    let sampler = CurveSampler::default();
    assert_eq!(sampler.sample_at(&curve, 0.0).unwrap().point, curve.start());
    assert_eq!(sampler.sample_at(&curve, 1.0).unwrap().point, curve.end());
}

#[test]
fn headings_at_the_ends_follow_the_end_tangents() {
    let curve = flight_path();
    let sampler = CurveSampler::default();

    // First segment leaves (150, 50) toward (450, 50): heading east.
    let start = sampler.sample_at(&curve, 0.0).unwrap();
    assert!(start.angle_deg.abs() < 1.0, "{}", start.angle_deg);

    // Last segment arrives from control point (150, 1100) into (350, 1200).
    let end = sampler.sample_at(&curve, 1.0).unwrap();
    let expected = 100.0_f64.atan2(200.0).to_degrees();
    assert!((end.angle_deg - expected).abs() < 1.0, "{}", end.angle_deg);
}

#[test]
fn quarter_steps_cover_equal_arc_lengths() {
    let curve = flight_path();
    let first = arc_between(&curve, 0.25, 0.5);
    let second = arc_between(&curve, 0.5, 0.75);
    let quarter = curve.length() / 4.0;
    assert!((first - second).abs() < 1e-2, "{first} vs {second}");
    assert!((first - quarter).abs() < 1e-2);
}

#[test]
fn fine_sweep_has_equal_chords() {
    let curve = flight_path();
    let sampler = CurveSampler::default();
    let steps = 200;
    let expected = curve.length() / steps as f64;

    let mut prev = sampler.sample_at(&curve, 0.0).unwrap().point;
    for i in 1..=steps {
        let p = sampler.sample_at(&curve, i as f64 / steps as f64).unwrap().point;
        let chord = prev.distance(p);
        assert!(
            (chord - expected).abs() < expected * 0.01,
            "step {i}: chord {chord}, expected {expected}"
        );
        prev = p;
    }
}

#[test]
fn sampling_is_not_parametric() {
    // x(t) = 100 t^3: the parametric midpoint sits at x = 12.5, the arc midpoint at x = 50.
    let seg = CubicBez::new((0.0, 0.0), (0.0, 0.0), (0.0, 0.0), (100.0, 0.0));
    let curve = CurveModel::new(vec![seg], Vec::new()).unwrap();
    assert!((seg.eval(0.5).x - 12.5).abs() < 1e-9);

    let mid = CurveSampler::default().sample_at(&curve, 0.5).unwrap();
    assert!((mid.x() - 50.0).abs() < 1e-3, "{}", mid.x());
    assert_eq!(mid.angle_deg, 0.0);
}

#[test]
fn curves_shorter_than_the_lookahead_keep_a_heading() {
    let curve = CurveModel::from_svg("M 0 0 L 0 1", Vec::new()).unwrap();
    let sampler = CurveSampler::default();
    for progress in [0.0, 0.5, 1.0] {
        let s = sampler.sample_at(&curve, progress).unwrap();
        assert!((s.angle_deg - 90.0).abs() < 1e-9, "{progress}: {}", s.angle_deg);
    }
}

#[test]
fn invalid_progress_is_refused() {
    let curve = flight_path();
    let sampler = CurveSampler::default();
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -0.01, 1.01] {
        assert!(matches!(
            sampler.sample_at(&curve, bad),
            Err(TraceError::Sampling(_))
        ));
    }
}

#[test]
fn zero_length_curve_is_refused() {
    let curve = CurveModel::from_svg("M 5 5 L 5 5", Vec::new()).unwrap();
    assert!(matches!(
        CurveSampler::default().sample_at(&curve, 0.5),
        Err(TraceError::Sampling(_))
    ));
}

#[test]
fn lookahead_must_be_positive() {
    assert!(CurveSampler::new(0.0).is_err());
    assert!(CurveSampler::new(f64::NAN).is_err());
    assert_eq!(CurveSampler::new(4.0).unwrap().lookahead(), 4.0);
}

#[test]
fn repeated_samples_are_identical() {
    let curve = flight_path();
    let a = curve.sample_at(0.4321).unwrap();
    let b = curve.sample_at(0.4321).unwrap();
    assert_eq!(a.point.x.to_bits(), b.point.x.to_bits());
    assert_eq!(a.point.y.to_bits(), b.point.y.to_bits());
    assert_eq!(a.angle_deg.to_bits(), b.angle_deg.to_bits());
}
