use crate::{
    curve::model::{CurveModel, LabelDirection},
    curve::sampler::CurveSampler,
    engine::state::AnimationState,
    foundation::core::{Affine, Point, Vec2},
    foundation::error::{TraceError, TraceResult},
    foundation::math::is_unit,
};

/// Presentation constants shared by the rendering collaborators.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Edge length of the square marker glyph, in curve units.
    pub marker_size: f64,
    /// Opacity of a revealed label.
    pub label_opacity: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            marker_size: 50.0,
            label_opacity: 0.7,
        }
    }
}

impl RenderStyle {
    /// Reject a negative or non-finite marker size, or an opacity outside `[0, 1]`.
    pub fn validate(&self) -> TraceResult<()> {
        if !(self.marker_size.is_finite() && self.marker_size >= 0.0) {
            return Err(TraceError::validation(
                "marker_size must be finite and >= 0",
            ));
        }
        if !is_unit(self.label_opacity) {
            return Err(TraceError::validation("label_opacity must be in [0, 1]"));
        }
        Ok(())
    }
}

/// Visual attributes derived from one [`AnimationState`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderAttributes {
    /// Maps marker-local coordinates (`0..size` square) onto the curve: centered on the sample
    /// point and rotated about the marker's own center.
    pub marker_transform: Affine,
    /// `1` once the marker has started travelling.
    pub marker_opacity: f64,
    /// Stroke dash offset of the traced line (normalized path length of `1`).
    pub dash_offset: f64,
    /// Opacity per threshold, in threshold order.
    pub label_opacity: Vec<f64>,
    /// Vertical background position for the parallax layer, in percent.
    pub background_offset_percent: f64,
}

impl RenderAttributes {
    /// Derive render attributes from a published state.
    pub fn from_state(state: &AnimationState, style: &RenderStyle) -> Self {
        let half = style.marker_size / 2.0;
        let marker_transform = Affine::translate(state.point().to_vec2())
            * Affine::rotate(state.angle_deg().to_radians())
            * Affine::translate(Vec2::new(-half, -half));
        let progress = state.progress();
        Self {
            marker_transform,
            marker_opacity: if progress > 0.0 { 1.0 } else { 0.0 },
            dash_offset: state.dash_offset(),
            label_opacity: state
                .reveal
                .flags()
                .iter()
                .map(|&v| if v { style.label_opacity } else { 0.0 })
                .collect(),
            background_offset_percent: progress * 100.0,
        }
    }
}

/// Where a threshold's label text sits on the curve.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LabelPlacement {
    /// Label text.
    pub label: String,
    /// Point on the curve at the threshold's offset.
    pub anchor: Point,
    /// Text baseline angle; reversed labels are turned by 180° so they read upright.
    pub angle_deg: f64,
    /// Reading direction along the curve.
    pub direction: LabelDirection,
}

/// Anchor every threshold label on `curve`. Fails only for curves that cannot be sampled.
pub fn label_placements(
    curve: &CurveModel,
    sampler: &CurveSampler,
) -> TraceResult<Vec<LabelPlacement>> {
    curve
        .thresholds()
        .iter()
        .map(|th| {
            let sample = sampler.sample_at(curve, th.offset_percent)?;
            let angle_deg = match th.direction {
                LabelDirection::Forward => sample.angle_deg,
                LabelDirection::Reversed => normalize_deg(sample.angle_deg + 180.0),
            };
            Ok(LabelPlacement {
                label: th.label.clone(),
                anchor: sample.point,
                angle_deg,
                direction: th.direction,
            })
        })
        .collect()
}

// Wrap into (-180, 180].
fn normalize_deg(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/render.rs"]
mod tests;
