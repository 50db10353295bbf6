use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::{
    curve::model::CurveModel,
    curve::sampler::CurveSampler,
    engine::state::AnimationState,
    foundation::core::TrackedLayout,
    foundation::error::TraceError,
    progress::tracker::ProgressTracker,
    reveal::policy::RevealPolicy,
};

/// Supplies the tracked container's geometry on demand.
pub trait LayoutProvider {
    /// Current layout, or `None` while the container is not mounted or has been detached.
    fn tracked_layout(&self) -> Option<TrackedLayout>;
}

impl<T: LayoutProvider + ?Sized> LayoutProvider for &T {
    fn tracked_layout(&self) -> Option<TrackedLayout> {
        (**self).tracked_layout()
    }
}

/// Notifications that can move the tracked container relative to the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewportEvent {
    /// The page scrolled.
    Scroll,
    /// The viewport changed size.
    Resize,
}

/// Handle returned by [`EventSource::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Delivers scroll and resize notifications to a subscriber.
///
/// Sources are shared with the engines subscribed to them, so both methods take `&self`.
pub trait EventSource {
    /// Register a listener for scroll and resize events.
    fn subscribe(&self) -> SubscriptionId;
    /// Remove a listener registered by [`EventSource::subscribe`]. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}

/// A live subscription; unsubscribes from its source when dropped.
struct Subscription {
    source: Rc<dyn EventSource>,
    id: SubscriptionId,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.source.unsubscribe(self.id);
        tracing::debug!(subscription = self.id.0, "engine unsubscribed");
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Subscription").field(&self.id).finish()
    }
}

/// Why a recompute published nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The engine is not subscribed to an event source.
    NotMounted,
    /// The layout provider has no container to measure.
    Detached,
    /// Zero-height container or zero-length curve.
    DegenerateGeometry,
    /// The sampler refused the request.
    SamplingRefused,
}

/// Result of handling one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// A new state was published.
    Published,
    /// The recomputed state equals the published one.
    Unchanged,
    /// Nothing was computed; the previous state remains published.
    Skipped(SkipReason),
}

impl Outcome {
    /// `true` for [`Outcome::Published`].
    pub fn is_published(self) -> bool {
        matches!(self, Self::Published)
    }
}

/// Owns the curve and the single published [`AnimationState`].
///
/// Every recompute runs tracker, sampler and reveal policy in that order and replaces the
/// published state in one assignment, so readers never see a partially updated frame.
///
/// Dropping a mounted engine releases its subscription, same as [`AnimationEngine::unmount`].
#[derive(Debug)]
pub struct AnimationEngine {
    curve: Arc<CurveModel>,
    sampler: CurveSampler,
    tracker: ProgressTracker,
    state: AnimationState,
    subscription: Option<Subscription>,
    publications: u64,
}

impl AnimationEngine {
    /// Engine with the default sampler and speed multiplier.
    pub fn new(curve: impl Into<Arc<CurveModel>>) -> Self {
        Self::with_parts(curve, CurveSampler::default(), ProgressTracker::default())
    }

    /// Engine with an explicit sampler and tracker.
    pub fn with_parts(
        curve: impl Into<Arc<CurveModel>>,
        sampler: CurveSampler,
        tracker: ProgressTracker,
    ) -> Self {
        let curve = curve.into();
        let state = AnimationState::initial(&curve, &sampler);
        Self {
            curve,
            sampler,
            tracker,
            state,
            subscription: None,
            publications: 0,
        }
    }

    /// The shared, immutable curve.
    pub fn curve(&self) -> &Arc<CurveModel> {
        &self.curve
    }

    /// The sampler used for every recompute.
    pub fn sampler(&self) -> &CurveSampler {
        &self.sampler
    }

    /// The progress tracker, including the last committed measurement.
    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    /// The currently published state.
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// An owned copy of the published state.
    pub fn snapshot(&self) -> AnimationState {
        self.state.clone()
    }

    /// Number of states published since construction.
    pub fn publications(&self) -> u64 {
        self.publications
    }

    /// Whether the engine holds a subscription.
    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Subscribe to `events` (once) and compute the initial state from `layout`.
    ///
    /// The engine keeps a handle to `events` so the subscription can be released on
    /// [`AnimationEngine::unmount`] or when the engine is dropped.
    #[tracing::instrument(skip_all)]
    pub fn mount<E, L>(&mut self, events: &Rc<E>, layout: &L) -> Outcome
    where
        E: EventSource + 'static,
        L: LayoutProvider + ?Sized,
    {
        if let Some(sub) = &self.subscription {
            tracing::debug!(subscription = sub.id.0, "engine already mounted");
        } else {
            let id = events.subscribe();
            tracing::debug!(subscription = id.0, "engine mounted");
            let source: Rc<dyn EventSource> = events.clone();
            self.subscription = Some(Subscription { source, id });
        }
        self.refresh(layout)
    }

    /// Release the subscription taken in [`AnimationEngine::mount`]. Returns `false` when the
    /// engine was not mounted.
    pub fn unmount(&mut self) -> bool {
        self.subscription.take().is_some()
    }

    /// Recompute in response to a viewport event.
    pub fn handle_event<L: LayoutProvider + ?Sized>(
        &mut self,
        event: ViewportEvent,
        layout: &L,
    ) -> Outcome {
        if !self.is_mounted() {
            tracing::trace!(?event, "event ignored while unmounted");
            return Outcome::Skipped(SkipReason::NotMounted);
        }
        self.refresh(layout)
    }

    fn refresh<L: LayoutProvider + ?Sized>(&mut self, layout: &L) -> Outcome {
        match layout.tracked_layout() {
            Some(layout) => self.recompute(layout),
            None => Outcome::Skipped(SkipReason::Detached),
        }
    }

    /// Run the pipeline for one layout measurement and publish the result.
    pub fn recompute(&mut self, layout: TrackedLayout) -> Outcome {
        let next = match self.compute(layout) {
            Ok(next) => next,
            Err(reason) => {
                tracing::trace!(?reason, "recompute skipped");
                return Outcome::Skipped(reason);
            }
        };
        self.tracker.commit(next.progress);
        if next == self.state {
            return Outcome::Unchanged;
        }
        tracing::trace!(
            progress = next.progress.progress,
            x = next.sample.point.x,
            y = next.sample.point.y,
            angle = next.sample.angle_deg,
            "state published"
        );
        self.state = next;
        self.publications += 1;
        Outcome::Published
    }

    /// Compute the state for `layout` without publishing it.
    pub fn compute(&self, layout: TrackedLayout) -> Result<AnimationState, SkipReason> {
        let progress = self
            .tracker
            .measure(layout.rect, layout.viewport_height)
            .ok_or(SkipReason::DegenerateGeometry)?;
        if !(self.curve.length().is_finite() && self.curve.length() > 0.0) {
            return Err(SkipReason::DegenerateGeometry);
        }
        let sample = self
            .sampler
            .sample_at(&self.curve, progress.progress)
            .map_err(|err: TraceError| {
                tracing::warn!(%err, progress = progress.progress, "sampler refused request");
                SkipReason::SamplingRefused
            })?;
        let reveal = RevealPolicy::resolve(&self.curve, progress.progress);
        Ok(AnimationState {
            progress,
            sample,
            reveal,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/orchestrator.rs"]
mod tests;
