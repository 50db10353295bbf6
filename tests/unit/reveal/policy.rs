use super::*;

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

#[test]
fn threshold_comparison_is_strict() {
    let curve = milestones();
    assert_eq!(RevealPolicy::resolve(&curve, 0.15).count_visible(), 0);
    assert_eq!(RevealPolicy::resolve(&curve, 0.1500001).count_visible(), 1);
    assert_eq!(RevealPolicy::resolve(&curve, 1.0).count_visible(), 4);
}

#[test]
fn labels_follow_threshold_order() {
    let curve = milestones();
    let set = RevealPolicy::resolve(&curve, 0.8);
    let labels: Vec<&str> = set.labels(&curve).collect();
    assert_eq!(
        labels,
        ["First Solo", "Private Pilot License", "Commercial License"]
    );
    assert!(set.is_visible(2));
    assert!(!set.is_visible(3));
    assert!(!set.is_visible(99));
}

#[test]
fn forward_sweep_only_grows() {
    let curve = milestones();
    let mut prev = RevealPolicy::resolve(&curve, 0.0);
    for i in 1..=100 {
        let next = RevealPolicy::resolve(&curve, i as f64 / 100.0);
        assert!(prev.is_subset_of(&next), "step {i}");
        prev = next;
    }
}

#[test]
fn scrolling_back_hides_labels_again() {
    let curve = milestones();
    let early = RevealPolicy::resolve(&curve, 0.2);
    let _late = RevealPolicy::resolve(&curve, 0.9);
    assert_eq!(RevealPolicy::resolve(&curve, 0.2), early);
    assert_eq!(early.flags(), &[true, false, false, false]);
}

#[test]
fn nan_progress_reveals_nothing() {
    let curve = milestones();
    assert_eq!(RevealPolicy::resolve(&curve, f64::NAN), RevealSet::hidden(4));
}

#[test]
fn curve_without_thresholds_yields_empty_set() {
    let curve = CurveModel::from_svg("M 0 0 L 10 0", Vec::new()).unwrap();
    let set = RevealPolicy::resolve(&curve, 1.0);
    assert!(set.is_empty());
    assert_eq!(set.labels(&curve).count(), 0);
}
