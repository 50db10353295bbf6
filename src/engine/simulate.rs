use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;

use crate::{
    engine::orchestrator::{EventSource, LayoutProvider, SubscriptionId},
    foundation::core::{TrackedLayout, TrackedRect},
};

/// A layout provider whose measurement is set by hand.
#[derive(Debug, Default)]
pub struct StaticLayout {
    layout: Cell<Option<TrackedLayout>>,
}

impl StaticLayout {
    /// A provider reporting `rect` inside a viewport of `viewport_height`.
    pub fn new(rect: TrackedRect, viewport_height: f64) -> Self {
        Self {
            layout: Cell::new(Some(TrackedLayout::new(rect, viewport_height))),
        }
    }

    /// A provider with no container attached.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Replace the measurement.
    pub fn set(&self, layout: TrackedLayout) {
        self.layout.set(Some(layout));
    }

    /// Move the container to `top`, keeping height and viewport.
    pub fn scroll_to(&self, top: f64) {
        if let Some(mut layout) = self.layout.get() {
            layout.rect.top = top;
            self.layout.set(Some(layout));
        }
    }

    /// Remove the container; later queries return `None`.
    pub fn detach(&self) {
        self.layout.set(None);
    }
}

impl LayoutProvider for StaticLayout {
    fn tracked_layout(&self) -> Option<TrackedLayout> {
        self.layout.get()
    }
}

/// An event source that only records subscriptions.
#[derive(Debug, Default)]
pub struct CountingEvents {
    next_id: Cell<u64>,
    active: RefCell<BTreeSet<u64>>,
    subscribed: Cell<u64>,
    unsubscribed: Cell<u64>,
}

impl CountingEvents {
    /// Subscriptions not yet released.
    pub fn active(&self) -> usize {
        self.active.borrow().len()
    }

    /// Total calls to [`EventSource::subscribe`].
    pub fn subscribed(&self) -> u64 {
        self.subscribed.get()
    }

    /// Subscriptions released, counting each id once.
    pub fn unsubscribed(&self) -> u64 {
        self.unsubscribed.get()
    }
}

impl EventSource for CountingEvents {
    fn subscribe(&self) -> SubscriptionId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.active.borrow_mut().insert(id);
        self.subscribed.set(self.subscribed.get() + 1);
        SubscriptionId(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        if self.active.borrow_mut().remove(&id.0) {
            self.unsubscribed.set(self.unsubscribed.get() + 1);
        }
    }
}

/// Evenly spaced layouts moving a container of `container_height` from just below the
/// viewport (`top == viewport_height`) to fully above it (`top == -container_height`).
///
/// Yields `steps + 1` layouts including both ends; `steps == 0` yields only the start.
pub fn scroll_sweep(
    viewport_height: f64,
    container_height: f64,
    steps: usize,
) -> Vec<TrackedLayout> {
    let start = viewport_height;
    let end = -container_height;
    (0..=steps)
        .map(|i| {
            let t = if steps == 0 {
                0.0
            } else {
                i as f64 / steps as f64
            };
            let top = start + (end - start) * t;
            TrackedLayout::new(TrackedRect::new(top, container_height), viewport_height)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/engine/simulate.rs"]
mod tests;
