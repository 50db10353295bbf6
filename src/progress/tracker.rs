use crate::{
    foundation::core::{TrackedLayout, TrackedRect},
    foundation::error::{TraceError, TraceResult},
    foundation::math::clamp01,
};

/// Default multiplier applied to the clamped scroll ratio.
///
/// Values above `1` finish the traversal before the tracked section has fully scrolled past;
/// tunings in use range from `1.5` to `2.25`.
pub const DEFAULT_SPEED_MULTIPLIER: f64 = 1.5;

/// Progress derived from one layout measurement.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProgressState {
    /// Unclamped `(viewport_height - top) / height`.
    pub raw_progress: f64,
    /// Clamped, speed-multiplied and clamped again; always in `[0, 1]`.
    pub progress: f64,
}

/// Maps the tracked container's viewport position to normalized progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressTracker {
    speed_multiplier: f64,
    last: ProgressState,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self {
            speed_multiplier: DEFAULT_SPEED_MULTIPLIER,
            last: ProgressState::default(),
        }
    }
}

impl ProgressTracker {
    /// A tracker with the given multiplier; must be finite and positive.
    pub fn new(speed_multiplier: f64) -> TraceResult<Self> {
        if !(speed_multiplier.is_finite() && speed_multiplier > 0.0) {
            return Err(TraceError::validation(
                "speed multiplier must be finite and > 0",
            ));
        }
        Ok(Self {
            speed_multiplier,
            last: ProgressState::default(),
        })
    }

    /// Multiplier applied after clamping the scroll ratio.
    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    /// The most recently computed state (zero before the first measurable update).
    pub fn last(&self) -> ProgressState {
        self.last
    }

    /// Compute progress, keeping the previous state when the geometry is degenerate.
    pub fn update(&mut self, rect: TrackedRect, viewport_height: f64) -> ProgressState {
        self.try_update(rect, viewport_height).unwrap_or(self.last)
    }

    /// Like [`ProgressTracker::update`], but reports degenerate geometry as `None`.
    pub fn try_update(&mut self, rect: TrackedRect, viewport_height: f64) -> Option<ProgressState> {
        let state = self.measure(rect, viewport_height)?;
        self.commit(state);
        Some(state)
    }

    pub(crate) fn commit(&mut self, state: ProgressState) {
        self.last = state;
    }

    /// Pure progress computation; `None` for a zero-height, negative-height or non-finite
    /// measurement.
    pub fn measure(&self, rect: TrackedRect, viewport_height: f64) -> Option<ProgressState> {
        let raw_progress = TrackedLayout::new(rect, viewport_height)
            .scroll_ratio()
            .ok()?;
        let progress = clamp01(clamp01(raw_progress) * self.speed_multiplier);
        Some(ProgressState {
            raw_progress,
            progress,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/progress/tracker.rs"]
mod tests;
