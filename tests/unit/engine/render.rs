use super::*;
use crate::{
    curve::model::Threshold, curve::sampler::SamplePoint, progress::tracker::ProgressState,
    reveal::policy::RevealPolicy,
};

fn milestones() -> CurveModel {
    CurveModel::from_svg(
        crate::config::JOURNEY_PATH,
        vec![
            Threshold::new("First Solo", 0.18, 0.15),
            Threshold::new("Private Pilot License", 0.26, 0.23),
            Threshold::reversed("Commercial License", 0.22, 0.75),
            Threshold::reversed("IFR Rated", 0.16, 0.82),
        ],
    )
    .unwrap()
}

fn state_at(curve: &CurveModel, progress: f64) -> AnimationState {
    AnimationState {
        progress: ProgressState {
            raw_progress: progress,
            progress,
        },
        sample: curve.sample_at(progress).unwrap(),
        reveal: RevealPolicy::resolve(curve, progress),
    }
}

#[test]
fn marker_is_centered_on_the_sample_point() {
    let state = AnimationState {
        progress: ProgressState {
            raw_progress: 0.5,
            progress: 0.5,
        },
        sample: SamplePoint {
            point: Point::new(300.0, 400.0),
            angle_deg: 90.0,
        },
        reveal: Default::default(),
    };
    let attrs = RenderAttributes::from_state(&state, &RenderStyle::default());

    let center = attrs.marker_transform * Point::new(25.0, 25.0);
    assert!(center.distance(Point::new(300.0, 400.0)) < 1e-9);

    // Rotated a quarter turn: the marker's local +x axis now points down the screen.
    let nose = attrs.marker_transform * Point::new(50.0, 25.0);
    assert!(nose.distance(Point::new(300.0, 425.0)) < 1e-9);
}

#[test]
fn dash_offset_and_parallax_track_progress() {
    let curve = milestones();
    let attrs = RenderAttributes::from_state(&state_at(&curve, 0.25), &RenderStyle::default());
    assert_eq!(attrs.dash_offset, 0.75);
    assert_eq!(attrs.background_offset_percent, 25.0);
    assert_eq!(attrs.marker_opacity, 1.0);
}

#[test]
fn marker_is_hidden_before_travel() {
    let curve = milestones();
    let attrs = RenderAttributes::from_state(&state_at(&curve, 0.0), &RenderStyle::default());
    assert_eq!(attrs.marker_opacity, 0.0);
    assert_eq!(attrs.dash_offset, 1.0);
}

#[test]
fn revealed_labels_use_the_style_opacity() {
    let curve = milestones();
    let attrs = RenderAttributes::from_state(&state_at(&curve, 0.8), &RenderStyle::default());
    assert_eq!(attrs.label_opacity, vec![0.7, 0.7, 0.7, 0.0]);
}

#[test]
fn style_validation_rejects_bad_values() {
    assert!(RenderStyle::default().validate().is_ok());
    let bad = RenderStyle {
        label_opacity: 1.5,
        ..RenderStyle::default()
    };
    assert!(bad.validate().is_err());
    let bad = RenderStyle {
        marker_size: f64::NAN,
        ..RenderStyle::default()
    };
    assert!(bad.validate().is_err());
}

#[test]
fn reversed_labels_are_flipped() {
    let curve = milestones();
    let sampler = CurveSampler::default();
    let placements = label_placements(&curve, &sampler).unwrap();
    assert_eq!(placements.len(), 4);

    let forward = &placements[0];
    let along = curve.sample_at(0.18).unwrap();
    assert_eq!(forward.anchor, along.point);
    assert_eq!(forward.angle_deg, along.angle_deg);

    let reversed = &placements[2];
    let along = curve.sample_at(1.0 - 0.22).unwrap();
    let turned = (reversed.angle_deg - along.angle_deg).rem_euclid(360.0);
    assert!((turned - 180.0).abs() < 1e-9);
    assert!(reversed.angle_deg > -180.0 && reversed.angle_deg <= 180.0);
}

#[test]
fn angles_wrap_into_half_open_range() {
    assert_eq!(normalize_deg(190.0), -170.0);
    assert_eq!(normalize_deg(180.0), 180.0);
    assert_eq!(normalize_deg(-190.0), 170.0);
}
