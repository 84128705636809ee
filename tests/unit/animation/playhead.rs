use super::*;
use crate::animation::sink::RecordingSink;
use crate::animation::timeline::{TimedBuilder, TimelineEntry};
use crate::animation::value::{Property, Value};
use crate::foundation::core::TargetId;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn zero_duration_is_rejected() {
    assert!(Playhead::new(Duration::ZERO).is_err());
    assert!(
        Playhead::new(ms(10))
            .unwrap()
            .with_repeat(Repeat::Times(0))
            .is_err()
    );
}

#[test]
fn once_runs_to_end_and_finishes() {
    let mut ph = Playhead::new(ms(1000)).unwrap();
    assert_eq!(ph.advance(ms(100)), 0.0, "paused clock does not move");

    ph.play();
    assert!(approx(ph.advance(ms(250)), 0.25));
    assert_eq!(ph.advance(ms(2000)), 1.0);
    assert!(ph.is_finished());

    ph.play();
    assert!(ph.is_finished(), "play at the end of a single run is a no-op");
}

#[test]
fn reverse_continues_from_current_position() {
    let mut ph = Playhead::new(ms(1000)).unwrap();
    ph.play();
    ph.advance(ms(600));

    ph.reverse();
    assert_eq!(ph.direction(), Direction::Backward);
    assert!(approx(ph.progress(), 0.6), "no jump on reverse");
    assert!(approx(ph.advance(ms(100)), 0.5));
    assert_eq!(ph.advance(ms(900)), 0.0);
    assert!(ph.is_finished());
}

#[test]
fn infinite_repeat_wraps() {
    let mut ph = Playhead::new(ms(1000))
        .unwrap()
        .with_repeat(Repeat::Infinite)
        .unwrap();
    ph.play();
    assert!(approx(ph.advance(ms(2500)), 0.5));
    assert_eq!(ph.iteration(), 2);
    assert!(ph.is_playing());

    ph.set_time_scale(-1.0).unwrap();
    assert!(approx(ph.advance(ms(700)), 0.8));
    assert!(ph.is_playing());
}

#[test]
fn counted_repeat_stops_after_last_play() {
    let mut ph = Playhead::new(ms(100))
        .unwrap()
        .with_repeat(Repeat::Times(2))
        .unwrap();
    ph.play();
    assert!(approx(ph.advance(ms(150)), 0.5));
    assert!(ph.is_playing());
    assert_eq!(ph.advance(ms(100)), 1.0);
    assert!(ph.is_finished());
}

#[test]
fn time_scale_must_be_finite() {
    let mut ph = Playhead::new(ms(100)).unwrap();
    assert!(ph.set_time_scale(f64::INFINITY).is_err());
    ph.set_time_scale(2.0).unwrap();
    ph.play();
    assert!(approx(ph.advance(ms(25)), 0.5));
}

fn slide(target: TargetId) -> Autoplay {
    let timed = TimedBuilder::new()
        .tween(
            TimelineEntry::new(
                target,
                Property::XPercent,
                Value::Scalar(100.0),
                Value::Scalar(0.0),
            ),
            ms(0),
            ms(1000),
        )
        .build()
        .unwrap();
    Autoplay::new(timed).unwrap()
}

#[test]
fn autoplay_writes_initial_frame_then_only_while_playing() {
    let target = TargetId(7);
    let mut part = slide(target);
    let mut sink = RecordingSink::new();

    part.tick(ms(16), &mut sink);
    assert_eq!(sink.latest_scalar(target, Property::XPercent), Some(100.0));
    part.tick(ms(16), &mut sink);
    assert_eq!(sink.writes().len(), 1, "paused and clean: no writes");

    part.playhead.play();
    part.tick(ms(500), &mut sink);
    assert_eq!(sink.latest_scalar(target, Property::XPercent), Some(50.0));
}

#[test]
fn toggle_reverses_mid_flight_without_jump() {
    let target = TargetId(1);
    let mut menu = Toggle::new(vec![slide(target)]);
    let mut sink = RecordingSink::new();

    assert!(menu.toggle());
    menu.tick(ms(300), &mut sink);
    let open_x = sink.latest_scalar(target, Property::XPercent).unwrap();
    assert!(approx(open_x, 70.0));

    assert!(!menu.toggle());
    menu.tick(ms(0), &mut sink);
    let x = sink.latest_scalar(target, Property::XPercent).unwrap();
    assert!(approx(x, open_x), "closing starts from the current value");

    menu.tick(ms(300), &mut sink);
    assert_eq!(sink.latest_scalar(target, Property::XPercent), Some(100.0));
    assert!(menu.parts()[0].playhead.is_finished());
}
