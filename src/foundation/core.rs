use crate::foundation::error::{TraceError, TraceResult};

pub use kurbo::{Affine, BezPath, CubicBez, Point, Vec2};

/// Bounding box of the tracked container, in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackedRect {
    /// Distance from the top of the viewport to the top of the container (negative once the
    /// container has scrolled past the top edge).
    pub top: f64,
    /// Height of the container; must be positive to be measured.
    pub height: f64,
}

impl TrackedRect {
    /// Rectangle at `top` with the given `height`.
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// `true` when the rectangle can produce a progress ratio.
    pub fn is_measurable(self) -> bool {
        self.top.is_finite() && self.height.is_finite() && self.height > 0.0
    }
}

/// One layout query: the tracked rectangle plus the viewport it was measured in.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackedLayout {
    /// The tracked container.
    pub rect: TrackedRect,
    /// Height of the viewport the rectangle was measured in.
    pub viewport_height: f64,
}

impl TrackedLayout {
    /// Pair a rectangle with its viewport height.
    pub fn new(rect: TrackedRect, viewport_height: f64) -> Self {
        Self {
            rect,
            viewport_height,
        }
    }

    /// Unclamped `(viewport_height - top) / height`: `0` while the container's top edge sits
    /// at the bottom of the viewport, `1` once it has risen by its own height.
    ///
    /// A ratio that overflows on finite input saturates to `±f64::MAX`, so a container scrolled
    /// arbitrarily far still reads as fully before or fully past.
    pub fn scroll_ratio(&self) -> TraceResult<f64> {
        if !self.rect.is_measurable() {
            return Err(TraceError::geometry(format!(
                "tracked rect (top {}, height {}) cannot be measured",
                self.rect.top, self.rect.height
            )));
        }
        if !self.viewport_height.is_finite() {
            return Err(TraceError::geometry("viewport height must be finite"));
        }
        let ratio = (self.viewport_height - self.rect.top) / self.rect.height;
        Ok(ratio.clamp(-f64::MAX, f64::MAX))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
