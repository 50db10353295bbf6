//! scrolltrace drives a scroll-synchronized path animation.
//!
//! As the page scrolls, a marker travels along a fixed cubic Bézier curve, a traced line
//! reveals the same curve, and labels anchored along it fade in at progress thresholds.
//!
//! # Pipeline overview
//!
//! 1. **Track**: `TrackedRect + viewport height -> ProgressState` ([`ProgressTracker`])
//! 2. **Sample**: `CurveModel + progress -> SamplePoint` (arc-length uniform, [`CurveSampler`])
//! 3. **Reveal**: `thresholds + progress -> RevealSet` ([`RevealPolicy`])
//! 4. **Publish**: one [`AnimationState`] replaced atomically by [`AnimationEngine`]
//!
//! Rendering collaborators read the published state, or the [`RenderAttributes`] derived from
//! it, and never write back.
//!
//! Degenerate input (a detached or zero-height container, a zero-length curve) never produces
//! NaN: the engine skips the update and keeps the last published state.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod curve;
mod engine;
mod foundation;
mod progress;
mod reveal;

pub mod config;

pub use config::{EngineConfig, JOURNEY_PATH};
pub use curve::model::{CurveModel, DEFAULT_ARCLEN_ACCURACY, LabelDirection, Threshold};
pub use curve::sampler::{CurveSampler, DEFAULT_LOOKAHEAD, SamplePoint};
pub use engine::coalesce::FrameCoalescer;
pub use engine::orchestrator::{
    AnimationEngine, EventSource, LayoutProvider, Outcome, SkipReason, SubscriptionId,
    ViewportEvent,
};
pub use engine::render::{LabelPlacement, RenderAttributes, RenderStyle, label_placements};
pub use engine::simulate::{CountingEvents, StaticLayout, scroll_sweep};
pub use engine::state::AnimationState;
pub use foundation::core::{Affine, BezPath, CubicBez, Point, TrackedLayout, TrackedRect, Vec2};
pub use foundation::error::{TraceError, TraceResult};
pub use progress::tracker::{DEFAULT_SPEED_MULTIPLIER, ProgressState, ProgressTracker};
pub use reveal::policy::{RevealPolicy, RevealSet};
