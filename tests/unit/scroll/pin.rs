use super::*;

fn vp() -> Viewport {
    Viewport::new(1440.0, 900.0).unwrap()
}

fn pin() -> Pin {
    Pin::new(
        Region::new(1000.0, 900.0),
        Distance::ViewportPct(200.0),
        vp(),
    )
}

#[test]
fn walks_through_every_state_going_down() {
    let mut p = pin();
    let seen: Vec<PinState> = [0.0, 998.0, 1000.0, 1900.0, 2801.0, 3000.0]
        .into_iter()
        .map(|y| p.update(y).state)
        .collect();
    assert_eq!(
        seen,
        vec![
            PinState::Unpinned,
            PinState::Pinning,
            PinState::Pinned,
            PinState::Pinned,
            PinState::Releasing,
            PinState::Unpinned,
        ]
    );
    assert_eq!(p.layout(), PinLayout::InFlow { offset: 1800.0 });
    assert_eq!(p.progress(), 1.0);
}

#[test]
fn pinned_region_stays_put_while_progress_moves() {
    let mut p = pin();
    let a = p.update(1000.0);
    let b = p.update(1450.0);
    assert_eq!(a.layout, PinLayout::Fixed { top: 0.0 });
    assert_eq!(b.layout, PinLayout::Fixed { top: 0.0 });
    assert_eq!(a.progress, 0.0);
    assert_eq!(b.progress, 0.25);
}

#[test]
fn anticipation_bands_match_flow_position() {
    let mut p = pin();
    for y in [996.5, 999.0, 2800.0, 2803.0] {
        let frame = p.update(y);
        let flow = if y < 1000.0 {
            PinLayout::NATURAL
        } else {
            PinLayout::InFlow { offset: 1800.0 }
        };
        assert!(matches!(frame.layout, PinLayout::Fixed { .. }), "y={y}");
        assert_eq!(
            frame.layout.screen_top(1000.0, y),
            flow.screen_top(1000.0, y),
            "no pop at y={y}"
        );
    }
}

#[test]
fn scrolling_back_restores_natural_layout() {
    let mut p = pin();
    for y in [0.0, 500.0, 1200.0, 2400.0, 4000.0, 2400.0, 1200.0, 999.0, 0.0] {
        p.update(y);
    }
    assert_eq!(p.state(), PinState::Unpinned);
    assert_eq!(p.layout(), PinLayout::NATURAL);
    assert_eq!(p.progress(), 0.0);
}

#[test]
fn upward_entry_uses_the_same_band() {
    let mut p = pin();
    p.update(5000.0);
    let back = p.update(2802.0);
    assert_eq!(back.state, PinState::Releasing);
    assert!(back.changed);
    let pinned = p.update(2799.0);
    assert_eq!(pinned.state, PinState::Pinned);
    assert_eq!(pinned.layout, PinLayout::Fixed { top: 0.0 });
}

#[test]
fn zero_size_region_never_pins() {
    let mut p = Pin::new(Region::new(1000.0, 0.0), Distance::Px(800.0), vp());
    for y in [0.0, 1000.0, 1400.0, 9000.0] {
        let f = p.update(y);
        assert_eq!(f.state, PinState::Unpinned);
        assert_eq!(f.layout, PinLayout::NATURAL);
        assert_eq!(f.progress, 0.0);
    }
    assert_eq!(p.spacer(), 0.0);
}

#[test]
fn resize_recomputes_before_next_update() {
    let mut p = pin();
    assert_eq!(p.update(2000.0).progress, 1000.0 / 1800.0);
    p.measure(Region::new(800.0, 700.0), Viewport::new(390.0, 700.0).unwrap());
    let f = p.update(2000.0);
    assert_eq!(f.progress, 1200.0 / 1400.0);
    assert_eq!(f.state, PinState::Pinned);
}

#[test]
fn unchanged_frames_report_no_change() {
    let mut p = pin();
    p.update(1200.0);
    assert!(!p.update(1300.0).changed);
}
