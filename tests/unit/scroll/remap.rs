use super::*;
use crate::{animation::sink::RecordingSink, scroll::source::ScrollSource};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn desktop() -> Viewport {
    Viewport::new(1440.0, 900.0).unwrap()
}

fn phone() -> Viewport {
    Viewport::new(390.0, 844.0).unwrap()
}

const SECTION: TargetId = TargetId(1);
const STRIP: TargetId = TargetId(2);

fn strip(width: f64) -> StripConfig {
    StripConfig::new(SECTION, STRIP, Region::new(1000.0, 900.0), width)
}

fn frame(
    source: &mut ScrollSource,
    strategy: &mut dyn HorizontalScrollStrategy,
    sink: &mut RecordingSink,
    now: Duration,
) -> Option<ScrollRequest> {
    let snapshot = source.snapshot(now);
    let ctx = FrameCtx {
        snapshot,
        source: &*source,
        dt: ms(16),
    };
    strategy.update(&ctx, sink)
}

/// Host side of a scroll request: apply it and let the echo come back.
fn apply(source: &mut ScrollSource, request: Option<ScrollRequest>, now: Duration) {
    if let Some(r) = request {
        source.note_programmatic(r.to_y);
        source.push_scroll(r.to_y, now);
    }
}

#[test]
fn translate_spans_exactly_the_overflow() {
    let mut source = ScrollSource::new(desktop());
    let mut sink = RecordingSink::new();
    let mut hijack = PinnedHijack::new(strip(4000.0), desktop());

    frame(&mut source, &mut hijack, &mut sink, ms(0));
    assert_eq!(hijack.content_offset(), 0.0);
    assert_eq!(sink.latest_scalar(STRIP, Property::TranslateX), Some(0.0));

    source.push_scroll(1000.0 + 1280.0, ms(10));
    frame(&mut source, &mut hijack, &mut sink, ms(16));
    assert_eq!(hijack.content_offset(), -1280.0);
    assert_eq!(
        sink.latest(SECTION, Property::PinLayout),
        Some(Value::Layout(PinLayout::Fixed { top: 0.0 }))
    );

    source.push_scroll(1000.0 + 2560.0, ms(20));
    frame(&mut source, &mut hijack, &mut sink, ms(32));
    assert_eq!(hijack.progress(), 1.0);
    assert_eq!(hijack.content_offset(), -(4000.0 - 1440.0));
    assert_eq!(sink.latest_scalar(STRIP, Property::TranslateX), Some(-2560.0));
}

#[test]
fn quiet_frames_do_not_rewrite() {
    let mut source = ScrollSource::new(desktop());
    let mut sink = RecordingSink::new();
    let mut hijack = PinnedHijack::new(strip(4000.0), desktop());
    frame(&mut source, &mut hijack, &mut sink, ms(0));
    let before = sink.writes().len();
    frame(&mut source, &mut hijack, &mut sink, ms(16));
    frame(&mut source, &mut hijack, &mut sink, ms(32));
    assert_eq!(sink.writes().len(), before);
}

#[test]
fn gesture_end_settles_to_nearest_card() {
    let mut source = ScrollSource::new(desktop());
    let mut sink = RecordingSink::new();
    let mut hijack = PinnedHijack::new(strip(4000.0).snap_cards(5), desktop());

    source.push_scroll(1000.0 + 0.3 * 2560.0, ms(0));
    assert_eq!(frame(&mut source, &mut hijack, &mut sink, ms(0)), None);
    assert_eq!(frame(&mut source, &mut hijack, &mut sink, ms(100)), None);

    let first = frame(&mut source, &mut hijack, &mut sink, ms(160));
    assert!(hijack.is_settling());
    assert_eq!(first.map(|r| r.to_y), Some(1768.0));

    let mut now = 160;
    let mut last = first;
    while hijack.is_settling() {
        apply(&mut source, last, ms(now));
        now += 16;
        last = frame(&mut source, &mut hijack, &mut sink, ms(now));
    }
    assert_eq!(last.map(|r| r.to_y), Some(1640.0));
    apply(&mut source, last, ms(now));
    frame(&mut source, &mut hijack, &mut sink, ms(now + 16));
    assert_eq!(hijack.progress(), 0.25);
    assert_eq!(hijack.content_offset(), -640.0);
}

#[test]
fn user_scroll_cancels_settle() {
    let mut source = ScrollSource::new(desktop());
    let mut sink = RecordingSink::new();
    let mut hijack = PinnedHijack::new(strip(4000.0).snap_cards(5), desktop());

    source.push_scroll(1768.0, ms(0));
    frame(&mut source, &mut hijack, &mut sink, ms(0));
    frame(&mut source, &mut hijack, &mut sink, ms(160));
    assert!(hijack.is_settling());

    source.push_scroll(2100.0, ms(170));
    assert_eq!(frame(&mut source, &mut hijack, &mut sink, ms(176)), None);
    assert!(!hijack.is_settling());
}

#[test]
fn no_snap_outside_the_pin() {
    let mut source = ScrollSource::new(desktop());
    let mut sink = RecordingSink::new();
    let mut hijack = PinnedHijack::new(strip(4000.0).snap_cards(5), desktop());
    source.push_scroll(200.0, ms(0));
    frame(&mut source, &mut hijack, &mut sink, ms(0));
    assert_eq!(frame(&mut source, &mut hijack, &mut sink, ms(200)), None);
}

#[test]
fn strip_narrower_than_viewport_never_pins() {
    let mut source = ScrollSource::new(desktop());
    let mut sink = RecordingSink::new();
    let mut hijack = PinnedHijack::new(strip(1200.0), desktop());
    for (i, y) in [0.0, 1000.0, 1500.0, 4000.0].into_iter().enumerate() {
        source.push_scroll(y, ms(i as u64 * 16));
        frame(&mut source, &mut hijack, &mut sink, ms(i as u64 * 16 + 8));
        assert_eq!(hijack.pin().state(), PinState::Unpinned);
        assert_eq!(hijack.content_offset(), 0.0);
    }
}

#[test]
fn strategy_is_chosen_by_viewport_class() {
    let cfg = strip(4000.0);
    assert_eq!(
        select_strategy(ViewportClass::Regular, cfg, desktop()).kind(),
        StrategyKind::PinnedHijack
    );
    assert_eq!(
        select_strategy(ViewportClass::Compact, cfg, phone()).kind(),
        StrategyKind::NativeSwipe
    );
}

#[test]
fn native_swipe_settles_to_card_boundary() {
    let mut source = ScrollSource::new(phone());
    let mut sink = RecordingSink::new();
    let mut swipe = NativeSwipe::new(strip(1600.0).snap_cards(5), phone());

    source.push_native_scroll(STRIP, 400.0, ms(0));
    frame(&mut source, &mut swipe, &mut sink, ms(0));
    assert_eq!(swipe.content_offset(), -400.0);
    assert!(sink.writes().is_empty(), "the browser owns the scroll mid-gesture");

    frame(&mut source, &mut swipe, &mut sink, ms(200));
    assert!(swipe.is_settling());
    let mut now = 200;
    while swipe.is_settling() {
        now += 16;
        let left = swipe.content_offset().abs();
        source.push_native_scroll(STRIP, left, ms(now - 8));
        frame(&mut source, &mut swipe, &mut sink, ms(now));
    }
    assert_eq!(sink.latest_scalar(STRIP, Property::ScrollLeft), Some(302.5));
    assert_eq!(swipe.progress(), 0.25);
    assert_eq!(swipe.content_offset(), -302.5);
}

#[test]
fn native_swipe_reaches_the_same_end_offset() {
    let mut source = ScrollSource::new(phone());
    let mut sink = RecordingSink::new();
    let mut swipe = NativeSwipe::new(strip(1600.0), phone());
    source.push_native_scroll(STRIP, 5000.0, ms(0));
    frame(&mut source, &mut swipe, &mut sink, ms(0));
    assert_eq!(swipe.progress(), 1.0);
    assert_eq!(swipe.content_offset(), -(1600.0 - 390.0));
}

#[test]
fn snap_rounds_to_nearest_increment() {
    assert_eq!(snap_to_increment(0.3, 0.25), 0.25);
    assert_eq!(snap_to_increment(0.4, 0.25), 0.5);
    assert_eq!(snap_to_increment(1.2, 0.25), 1.0);
    assert_eq!(snap_to_increment(0.4, 0.0), 0.4);
}

#[test]
fn gesture_end_fires_once_after_quiet_period() {
    let mut g = GestureTracker::default();
    assert!(!g.observe(false, ms(0)));
    assert!(!g.observe(true, ms(10)));
    assert!(g.in_gesture());
    assert!(!g.observe(false, ms(100)));
    assert!(g.observe(false, ms(160)));
    assert!(!g.observe(false, ms(400)));
}

#[test]
fn strip_config_validation() {
    assert!(strip(4000.0).validate().is_ok());
    assert!(strip(-1.0).validate().is_err());
    assert!(strip(4000.0).snap_increment(0.0).validate().is_err());
    assert!(strip(4000.0).snap_increment(1.5).validate().is_err());
    let mut cfg = strip(4000.0);
    cfg.distance_scale = 0.0;
    assert!(cfg.validate().is_err());
}
