use crate::{
    curve::model::CurveModel,
    curve::sampler::{CurveSampler, SamplePoint},
    foundation::core::Point,
    progress::tracker::ProgressState,
    reveal::policy::{RevealPolicy, RevealSet},
};

/// One published frame of the animation: progress, marker pose and label visibility.
///
/// Produced only by [`crate::AnimationEngine`]; consumers read it and never write back.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationState {
    /// Raw and effective progress.
    pub progress: ProgressState,
    /// Marker position and heading.
    pub sample: SamplePoint,
    /// Label visibility, one flag per threshold.
    pub reveal: RevealSet,
}

impl AnimationState {
    /// State before any measurable layout: zero progress, marker at the curve start.
    pub fn initial(curve: &CurveModel, sampler: &CurveSampler) -> Self {
        let sample = sampler
            .sample_at(curve, 0.0)
            .unwrap_or_else(|_| SamplePoint {
                point: curve.start(),
                angle_deg: 0.0,
            });
        Self {
            progress: ProgressState::default(),
            sample,
            reveal: RevealPolicy::resolve(curve, 0.0),
        }
    }

    /// Effective progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress.progress
    }

    /// Marker position.
    pub fn point(&self) -> Point {
        self.sample.point
    }

    /// Marker heading in degrees.
    pub fn angle_deg(&self) -> f64 {
        self.sample.angle_deg
    }

    /// Stroke dash offset for the traced line, with the path length normalized to `1`.
    pub fn dash_offset(&self) -> f64 {
        1.0 - self.progress.progress
    }
}
