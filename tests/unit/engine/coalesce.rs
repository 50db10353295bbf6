use std::rc::Rc;

use super::*;
use crate::{
    curve::model::{CurveModel, Threshold},
    engine::simulate::{CountingEvents, StaticLayout},
    foundation::core::TrackedRect,
};

fn engine() -> AnimationEngine {
    AnimationEngine::new(
        CurveModel::from_svg(
            "M 150 50 C 650 300, -150 900, 350 1200",
            vec![Threshold::new("only", 0.5, 0.5)],
        )
        .unwrap(),
    )
}

#[test]
fn burst_of_events_runs_one_recompute() {
    let layout = StaticLayout::new(TrackedRect::new(800.0, 1000.0), 800.0);
    let mut engine = engine();
    let events = Rc::new(CountingEvents::default());
    engine.mount(&events, &layout);
    let before = engine.publications();

    let mut frames = FrameCoalescer::default();
    for top in [700.0, 600.0, 500.0, 400.0] {
        layout.scroll_to(top);
        frames.request(ViewportEvent::Scroll);
    }
    assert!(frames.is_pending());
    assert_eq!(frames.coalesced(), 3);

    assert_eq!(frames.flush(&mut engine, &layout), Some(Outcome::Published));
    assert_eq!(engine.publications(), before + 1);
    assert!(frames.flush(&mut engine, &layout).is_none());
    assert_eq!(frames.flushed(), 1);
}

#[test]
fn coalesced_state_matches_direct_recompute() {
    let layout = StaticLayout::new(TrackedRect::new(800.0, 1000.0), 800.0);
    let events = Rc::new(CountingEvents::default());

    let mut direct = engine();
    direct.mount(&events, &layout);
    let mut framed = engine();
    framed.mount(&events, &layout);
    let mut frames = FrameCoalescer::default();

    for top in [650.0, 420.0, 130.0] {
        layout.scroll_to(top);
        direct.handle_event(ViewportEvent::Scroll, &layout);
        frames.request(ViewportEvent::Scroll);
    }
    frames.flush(&mut framed, &layout);
    assert_eq!(framed.snapshot(), direct.snapshot());
}

#[test]
fn resize_is_kept_when_mixed_with_scrolls() {
    let mut frames = FrameCoalescer::default();
    frames.request(ViewportEvent::Resize);
    frames.request(ViewportEvent::Scroll);
    assert_eq!(frames.pending, Some(ViewportEvent::Resize));
}
