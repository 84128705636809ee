use super::*;
use crate::{
    animation::sink::RecordingSink,
    foundation::core::Viewport,
    scroll::source::ScrollSource,
};

const STRIP: TargetId = TargetId(5);

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn wrap_keeps_position_in_one_strip() {
    assert_eq!(wrap_strip(0.0, 300.0), 0.0);
    assert!(approx(wrap_strip(-310.0, 300.0), -10.0));
    assert!(approx(wrap_strip(10.0, 300.0), -290.0));
    assert_eq!(wrap_strip(-300.0, 300.0), 0.0);
    assert_eq!(wrap_strip(5.0, 0.0), 0.0);
}

#[test]
fn cruises_left_at_base_speed() {
    let mut m = Marquee::new(STRIP, 300.0, false);
    let mut sink = RecordingSink::new();
    m.advance(ms(1000), ms(1000), &mut sink);
    assert!(approx(m.position(), -50.0));
    m.advance(ms(6000), ms(7000), &mut sink);
    assert!(approx(m.position(), -50.0), "wraps after a full strip");
    assert_eq!(sink.latest_scalar(STRIP, Property::TranslateX), Some(m.position()));
}

#[test]
fn reverse_marquee_runs_the_other_way() {
    let mut m = Marquee::new(STRIP, 300.0, true);
    let mut sink = RecordingSink::new();
    m.advance(ms(1000), ms(1000), &mut sink);
    assert!(approx(m.position(), -250.0));
}

#[test]
fn scroll_boost_ramps_holds_and_decays() {
    let mut m = Marquee::new(STRIP, 300.0, false);
    m.observe_scroll(12.0, ms(0));
    assert!(approx(m.time_scale(ms(0)), 1.0));
    assert!(approx(m.time_scale(ms(100)), 1.0 + (6.25 - 1.0) * 0.5));
    assert!(approx(m.time_scale(ms(200)), 6.25));
    assert!(approx(m.time_scale(ms(450)), 6.25));
    assert!(approx(m.time_scale(ms(1000)), 6.25 + (1.0 - 6.25) * 0.5));
    assert!(approx(m.time_scale(ms(1500)), 1.0));
}

#[test]
fn scrolling_up_runs_backwards() {
    let mut m = Marquee::new(STRIP, 300.0, false);
    let mut sink = RecordingSink::new();
    m.observe_scroll(-12.0, ms(0));
    m.advance(ms(2000), ms(2000), &mut sink);
    assert!(approx(m.time_scale(ms(2000)), -1.0));
    m.advance(ms(1000), ms(3000), &mut sink);
    let before = m.position();
    m.advance(ms(100), ms(3100), &mut sink);
    assert!(approx(wrap_strip(m.position() - before, 300.0), wrap_strip(5.0, 300.0)));
}

#[test]
fn zero_width_strip_never_writes() {
    let mut m = Marquee::new(STRIP, 0.0, false);
    let mut sink = RecordingSink::new();
    m.advance(ms(16), ms(16), &mut sink);
    assert!(sink.writes().is_empty());
}

#[test]
fn only_user_scrolling_boosts() {
    let mut source = ScrollSource::new(Viewport::new(1440.0, 900.0).unwrap());
    let mut m = Marquee::new(STRIP, 300.0, false);
    let mut sink = RecordingSink::new();
    let mut frame = |source: &mut ScrollSource, m: &mut Marquee, now: Duration| {
        let snapshot = source.snapshot(now);
        let ctx = FrameCtx {
            snapshot,
            source: &*source,
            dt: ms(16),
        };
        m.update(&ctx, &mut sink);
    };

    source.note_programmatic(800.0);
    source.push_scroll(800.0, ms(0));
    frame(&mut source, &mut m, ms(0));
    assert!(approx(m.time_scale(ms(200)), 1.0), "navigation echo");

    source.push_scroll(760.0, ms(300));
    frame(&mut source, &mut m, ms(300));
    assert!(approx(m.time_scale(ms(500)), -6.25));
}
