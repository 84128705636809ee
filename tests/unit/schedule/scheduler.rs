use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::*;
use crate::{
    animation::{
        sink::RecordingSink,
        timeline::{Timeline, TimelineEntry},
        value::{Property, Value},
    },
    foundation::core::Rgba8,
    pointer::overlay::PointerOverlay,
    schedule::effect::{PinDriver, PinEffect, ScrubEffect},
    scroll::{
        binding::{Anchor, Distance, Extent, Scrub, TriggerSpec},
        sections::{SectionMarker, SectionTracker},
        source::ScrollRequest,
    },
};

const A: TargetId = TargetId(1);
const B: TargetId = TargetId(2);

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn vp() -> Viewport {
    Viewport::new(1440.0, 800.0).unwrap()
}

fn scrub(target: TargetId, top: f64) -> ScrubEffect {
    let timeline = Timeline::builder()
        .entry(TimelineEntry::new(
            target,
            Property::Opacity,
            Value::Scalar(0.0),
            Value::Scalar(1.0),
        ))
        .build()
        .unwrap();
    ScrubEffect::new(
        TriggerSpec::new(Anchor::TOP_BOTTOM, Extent::Anchor(Anchor::TOP_TOP)),
        Region::new(top, 400.0),
        vp(),
        timeline,
        Scrub::Immediate,
    )
}

/// Records what each frame looked like to it.
#[derive(Default)]
struct Observer {
    seen: Vec<(f64, bool)>,
    measured: Vec<f64>,
    request: Option<f64>,
}

impl ScrollEffect for Observer {
    fn measure(&mut self, viewport: Viewport) {
        self.measured.push(viewport.width);
    }

    fn update(
        &mut self,
        ctx: &FrameCtx<'_>,
        _sink: &mut dyn PropertySink,
    ) -> Option<ScrollRequest> {
        self.seen
            .push((ctx.snapshot.scroll_y, ctx.snapshot.resized));
        self.request.map(|to_y| ScrollRequest { to_y })
    }
}

#[test]
fn every_effect_sees_the_same_coalesced_snapshot() {
    let scheduler = FrameScheduler::new(vp());
    let first = Rc::new(RefCell::new(Observer::default()));
    let second = Rc::new(RefCell::new(Observer::default()));
    let _a = scheduler.register(first.clone());
    let _b = scheduler.register(second.clone());
    let mut sink = RecordingSink::new();

    for (i, y) in [10.0, 40.0, 75.0, 120.0].into_iter().enumerate() {
        scheduler.push_scroll(y, ms(i as u64));
    }
    let out = scheduler.tick(ms(16), &mut sink);
    assert_eq!(out.frame, 1);
    assert_eq!(out.effects, 2);
    assert_eq!(first.borrow().seen, vec![(120.0, false)]);
    assert_eq!(second.borrow().seen, first.borrow().seen);
}

#[test]
fn resize_measures_before_update() {
    let scheduler = FrameScheduler::new(vp());
    let observer = Rc::new(RefCell::new(Observer::default()));
    let _reg = scheduler.register(observer.clone());
    assert_eq!(observer.borrow().measured, vec![1440.0], "measured on register");

    scheduler.push_resize(Viewport::new(390.0, 844.0).unwrap());
    let mut sink = RecordingSink::new();
    scheduler.tick(ms(16), &mut sink);
    assert_eq!(observer.borrow().measured, vec![1440.0, 390.0]);
    assert_eq!(observer.borrow().seen, vec![(0.0, true)]);
    assert_eq!(scheduler.viewport_class(), ViewportClass::Compact);
}

#[test]
fn dropping_a_registration_stops_all_writes() {
    let scheduler = FrameScheduler::new(vp());
    let keep = scheduler.register(scrub(A, 1000.0));
    let gone = scheduler.register(scrub(B, 1000.0));
    let mut sink = RecordingSink::new();

    scheduler.push_scroll(400.0, ms(0));
    scheduler.tick(ms(16), &mut sink);
    assert_eq!(sink.writes_to(B), 1);

    drop(gone);
    assert_eq!(scheduler.effect_count(), 1);
    sink.clear_log();
    for i in 2..10 {
        scheduler.push_scroll(400.0 + 50.0 * i as f64, ms(16 * i));
        scheduler.tick(ms(16 * i + 1), &mut sink);
    }
    assert_eq!(sink.writes_to(B), 0);
    assert!(sink.writes_to(A) > 0);
    assert!(keep.is_active());
}

#[test]
fn release_during_tick_stops_the_effect_within_the_frame() {
    struct Dropper {
        victim: Rc<RefCell<Option<Registration>>>,
    }
    impl ScrollEffect for Dropper {
        fn update(
            &mut self,
            _ctx: &FrameCtx<'_>,
            _sink: &mut dyn PropertySink,
        ) -> Option<ScrollRequest> {
            self.victim.borrow_mut().take();
            None
        }
    }

    let scheduler = FrameScheduler::new(vp());
    let victim = Rc::new(RefCell::new(None));
    let _dropper = scheduler.register(Dropper {
        victim: victim.clone(),
    });
    *victim.borrow_mut() = Some(scheduler.register(scrub(B, 1000.0)));
    assert_eq!(scheduler.effect_count(), 2);

    let mut sink = RecordingSink::new();
    scheduler.tick(ms(16), &mut sink);
    assert!(victim.borrow().is_none());
    assert_eq!(scheduler.effect_count(), 1);

    sink.clear_log();
    scheduler.push_scroll(500.0, ms(20));
    scheduler.tick(ms(32), &mut sink);
    assert_eq!(sink.writes_to(B), 0);
}

#[test]
fn registration_outliving_scheduler_is_inert() {
    let scheduler = FrameScheduler::new(vp());
    let reg = scheduler.register(scrub(A, 1000.0));
    drop(scheduler);
    assert!(!reg.is_active());
    assert!(!reg.relayout(Region::new(0.0, 10.0)));
    reg.dispose();
}

#[test]
fn relayout_rebinds_the_effect() {
    let scheduler = FrameScheduler::new(vp());
    let reg = scheduler.register(scrub(A, 1000.0));
    let mut sink = RecordingSink::new();
    scheduler.push_scroll(600.0, ms(0));
    scheduler.tick(ms(16), &mut sink);
    assert_eq!(sink.latest_scalar(A, Property::Opacity), Some(0.5));

    assert!(reg.relayout(Region::new(1200.0, 400.0)));
    scheduler.tick(ms(32), &mut sink);
    assert_eq!(sink.latest_scalar(A, Property::Opacity), Some(0.25));
}

#[test]
fn navigation_drives_scroll_until_the_user_takes_over() {
    let scheduler = FrameScheduler::new(vp());
    let mut sink = RecordingSink::new();
    scheduler.navigate_to(Region::new(2000.0, 800.0), ms(0));

    let mid = scheduler.tick(ms(500), &mut sink);
    let y = mid.scroll_to.unwrap();
    assert!(y > 0.0 && y < 2000.0);
    scheduler.push_scroll(y, ms(510));
    let next = scheduler.tick(ms(520), &mut sink);
    assert!(next.scroll_to.unwrap() > y, "echo does not cancel navigation");

    scheduler.push_scroll(300.0, ms(530));
    let out = scheduler.tick(ms(540), &mut sink);
    assert_eq!(out.scroll_to, None);
}

#[test]
fn navigation_lands_on_the_section_top() {
    let scheduler = FrameScheduler::new(vp());
    let mut sink = RecordingSink::new();
    scheduler.navigate_to(Region::new(2000.0, 800.0), ms(0));
    let out = scheduler.tick(ms(1200), &mut sink);
    assert_eq!(out.scroll_to, Some(2000.0));
    assert_eq!(scheduler.tick(ms(1216), &mut sink).scroll_to, None);
}

#[test]
fn effect_requests_are_reported() {
    let scheduler = FrameScheduler::new(vp());
    let _reg = scheduler.register(Observer {
        request: Some(640.0),
        ..Observer::default()
    });
    let mut sink = RecordingSink::new();
    assert_eq!(scheduler.tick(ms(16), &mut sink).scroll_to, Some(640.0));
}

#[test]
fn shared_pointer_overlay_is_ticked_and_stays_reachable() {
    let cursor = TargetId(99);
    let tracker = SectionTracker::new(vec![SectionMarker {
        id: "hero".into(),
        region: Region::new(0.0, 800.0),
        color: Rgba8::rgb(255, 0, 0),
    }]);
    let overlay = Rc::new(RefCell::new(PointerOverlay::new(
        cursor,
        tracker,
        ViewportClass::Regular,
    )));
    let scheduler = FrameScheduler::new(vp());
    let _reg = scheduler.register(overlay.clone());
    let mut sink = RecordingSink::new();

    overlay.borrow_mut().pointer_move(kurbo::Point::new(200.0, 100.0));
    scheduler.tick(ms(0), &mut sink);
    scheduler.tick(ms(16), &mut sink);
    assert!(sink.writes_to(cursor) > 0);
    assert_eq!(
        sink.latest(cursor, Property::Color),
        Some(Value::Color(Rgba8::rgb(255, 0, 0)))
    );
}

#[test]
fn effects_can_call_back_into_the_scheduler_mid_frame() {
    let scheduler = FrameScheduler::new(vp());
    let handle = scheduler.clone();
    let late = Rc::new(RefCell::new(Observer::default()));
    let joined: Rc<RefCell<Vec<Registration>>> = Rc::new(RefCell::new(Vec::new()));
    let seen_y: Rc<RefCell<Vec<f64>>> = Rc::new(RefCell::new(Vec::new()));

    let (late_in, joined_in, seen_in) = (late.clone(), joined.clone(), seen_y.clone());
    let _pin = scheduler.register(PinEffect::new(
        A,
        Region::new(1000.0, 800.0),
        Distance::Px(800.0),
        vp(),
        PinDriver::Callback(Box::new(move |p: f64, _sink: &mut dyn PropertySink| {
            if p < 1.0 || !joined_in.borrow().is_empty() {
                return;
            }
            seen_in.borrow_mut().push(handle.scroll_y());
            assert_eq!(handle.viewport().width, 1440.0);
            handle.navigate_to(Region::new(0.0, 800.0), ms(16));
            handle.push_scroll(1990.0, ms(16));
            joined_in.borrow_mut().push(handle.register(late_in.clone()));
        })),
    ));
    let mut sink = RecordingSink::new();

    scheduler.push_scroll(2000.0, ms(16));
    let out = scheduler.tick(ms(16), &mut sink);
    assert_eq!(*seen_y.borrow(), vec![2000.0]);
    assert_eq!(out.effects, 2);
    assert!(late.borrow().seen.is_empty(), "joins from the next frame");
    assert_eq!(scheduler.scroll_y(), 1990.0);

    let next = scheduler.tick(ms(32), &mut sink);
    let y = next.scroll_to.unwrap();
    assert!(y < 2000.0 && y > 0.0, "{y}");
    assert_eq!(late.borrow().seen.len(), 1);
}
