use super::*;

fn vp() -> Viewport {
    Viewport::new(1440.0, 800.0).unwrap()
}

fn page() -> SectionTracker {
    let mk = |id: &str, top: f64, height: f64, hex: &str| SectionMarker {
        id: id.to_owned(),
        region: Region::new(top, height),
        color: Rgba8::from_hex(hex).unwrap(),
    };
    SectionTracker::new(vec![
        mk("home", 0.0, 800.0, "#00ff88"),
        mk("services", 800.0, 1200.0, "#00d4ff"),
        mk("hidden", 1500.0, 0.0, "#ffffff"),
        mk("about", 2000.0, 900.0, "#b77bff"),
    ])
}

fn ids(t: &mut SectionTracker, ys: &[f64]) -> Vec<String> {
    ys.iter()
        .filter_map(|&y| t.update(y, vp()).map(|s| s.id.clone()))
        .collect()
}

#[test]
fn activates_when_top_reaches_center() {
    let mut t = page();
    assert_eq!(ids(&mut t, &[0.0, 399.0, 400.0, 1000.0]), vec!["home", "services"]);
    assert_eq!(t.active().map(|s| s.color), Rgba8::from_hex("#00d4ff").ok());
}

#[test]
fn crossing_back_up_reactivates_previous() {
    let mut t = page();
    ids(&mut t, &[0.0, 1700.0]);
    assert_eq!(t.active().map(|s| s.id.as_str()), Some("about"));
    assert_eq!(ids(&mut t, &[1599.0, 0.0]), vec!["services", "home"]);
}

#[test]
fn degenerate_sections_never_activate() {
    let mut t = page();
    let seen = ids(&mut t, &(0..30).map(|i| f64::from(i) * 100.0).collect::<Vec<_>>());
    assert!(!seen.iter().any(|id| id == "hidden"));
}

#[test]
fn gaps_keep_previous_section() {
    let mut t = page();
    ids(&mut t, &[0.0]);
    assert!(t.update(10_000.0, vp()).is_none());
    assert_eq!(t.active().map(|s| s.id.as_str()), Some("home"));
    assert!(t.set_region("about", Region::new(9_000.0, 3_000.0)));
    assert!(!t.set_region("nope", Region::default()));
    assert_eq!(t.update(10_000.0, vp()).map(|s| s.id.as_str()), Some("about"));
}
