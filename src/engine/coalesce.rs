use crate::engine::orchestrator::{AnimationEngine, LayoutProvider, Outcome, ViewportEvent};

/// Collapses bursts of viewport events into at most one recompute per frame.
///
/// Call [`FrameCoalescer::request`] from the event handler and [`FrameCoalescer::flush`] once
/// per animation frame. The layout is read at flush time, so the published state is the one a
/// direct recompute of the last event would have produced.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameCoalescer {
    pending: Option<ViewportEvent>,
    coalesced: u64,
    flushed: u64,
}

impl FrameCoalescer {
    /// Record an event for the next frame. A resize supersedes a pending scroll.
    pub fn request(&mut self, event: ViewportEvent) {
        if self.pending.is_some() {
            self.coalesced += 1;
        }
        // resize wins so the frame is attributed to the layout change
        self.pending = match (self.pending, event) {
            (Some(ViewportEvent::Resize), _) => Some(ViewportEvent::Resize),
            _ => Some(event),
        };
    }

    /// Whether a recompute is waiting for the next frame.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Events absorbed into an already pending frame.
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }

    /// Frames that ran a recompute.
    pub fn flushed(&self) -> u64 {
        self.flushed
    }

    /// Run the pending recompute, if any.
    pub fn flush<L: LayoutProvider + ?Sized>(
        &mut self,
        engine: &mut AnimationEngine,
        layout: &L,
    ) -> Option<Outcome> {
        let event = self.pending.take()?;
        self.flushed += 1;
        Some(engine.handle_event(event, layout))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/coalesce.rs"]
mod tests;
