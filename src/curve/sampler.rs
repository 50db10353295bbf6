use crate::{
    curve::model::CurveModel,
    foundation::core::Point,
    foundation::error::{TraceError, TraceResult},
    foundation::math::{JOIN_EPSILON, heading_deg},
};

/// Default lookahead distance for the tangent chord, in curve units.
pub const DEFAULT_LOOKAHEAD: f64 = 2.0;

/// A point on the curve plus the local heading.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SamplePoint {
    /// Position on the curve.
    pub point: Point,
    /// Heading in degrees; `0` points along +x, positive angles turn toward +y.
    pub angle_deg: f64,
}

impl SamplePoint {
    /// Horizontal coordinate.
    pub fn x(&self) -> f64 {
        self.point.x
    }

    /// Vertical coordinate.
    pub fn y(&self) -> f64 {
        self.point.y
    }
}

/// Arc-length-uniform sampler over a [`CurveModel`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveSampler {
    lookahead: f64,
}

impl Default for CurveSampler {
    fn default() -> Self {
        Self {
            lookahead: DEFAULT_LOOKAHEAD,
        }
    }
}

impl CurveSampler {
    /// A sampler looking `lookahead` curve units ahead; must be finite and positive.
    pub fn new(lookahead: f64) -> TraceResult<Self> {
        if !(lookahead.is_finite() && lookahead > 0.0) {
            return Err(TraceError::validation("lookahead must be finite and > 0"));
        }
        Ok(Self { lookahead })
    }

    /// Lookahead distance for the tangent chord, in curve units.
    pub fn lookahead(&self) -> f64 {
        self.lookahead
    }

    /// Sample the point at `progress` (fraction of arc length) and its heading.
    ///
    /// `progress` must be finite and already clamped to `[0, 1]`; anything else is refused
    /// before the curve is queried.
    pub fn sample_at(&self, curve: &CurveModel, progress: f64) -> TraceResult<SamplePoint> {
        if !progress.is_finite() {
            return Err(TraceError::sampling(format!(
                "progress must be finite, got {progress}"
            )));
        }
        if !(0.0..=1.0).contains(&progress) {
            return Err(TraceError::sampling(format!(
                "progress {progress} is outside [0, 1]"
            )));
        }
        let length = curve.length();
        if !(length.is_finite() && length > 0.0) {
            return Err(TraceError::sampling(format!(
                "curve length {length} cannot be sampled"
            )));
        }

        let distance = progress * length;
        let (idx, t) = curve.locate(distance);
        let point = if progress == 0.0 {
            curve.start()
        } else if progress == 1.0 {
            curve.end()
        } else {
            curve.point_at(idx, t)
        };

        let ahead = distance + self.lookahead;
        let delta = if ahead <= length {
            curve.point_at_distance(ahead) - point
        } else {
            point - curve.point_at_distance((distance - self.lookahead).max(0.0))
        };
        let direction = if delta.hypot2() > JOIN_EPSILON * JOIN_EPSILON {
            delta
        } else {
            curve.direction_at(idx, t)
        };
        let angle_deg = heading_deg(direction);

        if !(point.is_finite() && angle_deg.is_finite()) {
            return Err(TraceError::sampling(format!(
                "non-finite sample at progress {progress}"
            )));
        }
        Ok(SamplePoint { point, angle_deg })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/curve/sampler.rs"]
mod tests;
