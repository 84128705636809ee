use super::*;

const SCENE: &str = r##"{
  "viewport": { "width": 1440, "height": 800 },
  "sections": [
    { "id": "home", "top": 0, "height": 800 },
    { "id": "services", "top": 800, "height": 800, "color": "#00d4ff" },
    { "id": "work", "top": 1600, "height": 800 }
  ],
  "effects": [
    {
      "kind": "scrub",
      "section": "services",
      "trigger": { "start": { "edge": "top", "viewport": 1.0 }, "end": { "anchor": { "edge": "top", "viewport": 0.0 } } },
      "timeline": [
        { "target": 1, "property": "opacity", "from": { "scalar": 0 }, "to": { "scalar": 1 } }
      ]
    },
    { "kind": "pin", "section": "services", "target": 2, "distance": { "viewport_pct": 100 } },
    { "kind": "remap", "section": "work", "target": 3, "content": 4, "scroll_width": 4000, "cards": 4 },
    {
      "kind": "reveal",
      "section": "work",
      "start": { "edge": "top", "viewport": 0.8 },
      "tweens": [
        { "target": 5, "property": "y_percent", "from": { "scalar": 100 }, "to": { "scalar": 0 }, "ease": "OutCubic", "duration_ms": 800 }
      ]
    },
    { "kind": "marquee", "target": 6, "strip_width": 900 }
  ],
  "pointer": { "cursor": 99 }
}"##;

fn scene() -> SceneSpec {
    SceneSpec::from_json(SCENE).unwrap()
}

#[test]
fn parses_and_validates() {
    let spec = scene();
    spec.validate().unwrap();
    assert_eq!(spec.effects.len(), 5);
    let kinds: Vec<&str> = spec.effects.iter().map(EffectSpec::kind).collect();
    assert_eq!(kinds, ["scrub", "pin", "remap", "reveal", "marquee"]);
    match &spec.effects[0] {
        EffectSpec::Scrub { timeline, scrub, .. } => {
            assert_eq!(timeline[0].start, 0.0);
            assert_eq!(timeline[0].end, 1.0);
            assert_eq!(*scrub, Scrub::Immediate);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn section_colors_default_to_palette() {
    let spec = scene();
    assert_eq!(spec.section("home").unwrap().color().unwrap(), catalog::ACCENT);
    assert_eq!(
        spec.section("services").unwrap().color().unwrap(),
        Rgba8::rgb(0x00, 0xd4, 0xff)
    );
}

#[test]
fn json_roundtrip_preserves_effects() {
    let spec = scene();
    let back = SceneSpec::from_json(&spec.to_json_pretty().unwrap()).unwrap();
    assert_eq!(back.effects.len(), spec.effects.len());
    back.validate().unwrap();
}

#[test]
fn rejects_unknown_section_reference() {
    let mut spec = scene();
    spec.sections.retain(|s| s.id != "work");
    let err = spec.validate().unwrap_err().to_string();
    assert!(err.contains("unknown section 'work'"), "{err}");
}

#[test]
fn rejects_duplicate_sections_and_bad_values() {
    let mut dup = scene();
    dup.sections.push(dup.sections[0].clone());
    assert!(dup.validate().is_err());

    let mut bad_color = scene();
    bad_color.sections[0].color = Some("green".into());
    assert!(bad_color.validate().is_err());

    let mut bad_pin = scene();
    bad_pin.effects[1] = EffectSpec::Pin {
        section: "services".into(),
        target: TargetId(2),
        distance: Distance::Px(0.0),
        scrub: Scrub::Immediate,
        timeline: Vec::new(),
    };
    assert!(bad_pin.validate().is_err());

    let mut bad_viewport = scene();
    bad_viewport.viewport.width = 0.0;
    assert!(bad_viewport.validate().is_err());
}

#[test]
fn preview_card_must_stand_apart_from_its_rows() {
    let mut spec = scene();
    spec.effects.push(
        serde_json::from_str(r#"{ "kind": "preview", "target": 45, "overlays": [46, 47] }"#)
            .unwrap(),
    );
    spec.validate().unwrap();

    spec.effects.push(EffectSpec::Preview {
        target: TargetId(46),
        overlays: vec![TargetId(46)],
    });
    let err = spec.validate().unwrap_err().to_string();
    assert!(err.contains("row overlay"), "{err}");
}

#[test]
fn pin_layout_cannot_be_tweened_from_json() {
    let json = SCENE.replace("\"property\": \"opacity\"", "\"property\": \"pin_layout\"");
    let spec = SceneSpec::from_json(&json).unwrap();
    assert!(spec.validate().is_err());
}

#[test]
fn strategy_follows_viewport_class() {
    let mut spec = scene();
    assert_eq!(spec.strategies().unwrap(), [StrategyKind::PinnedHijack]);
    spec.viewport = Viewport::new(390.0, 844.0).unwrap();
    assert_eq!(spec.strategies().unwrap(), [StrategyKind::NativeSwipe]);
}

#[test]
fn trace_must_be_time_ordered() {
    let ok = ScrollTrace::from_json(r#"{"frames":[{"at_ms":0,"scroll_y":0},{"at_ms":16}]}"#);
    assert_eq!(ok.unwrap().frames.len(), 2);
    let bad = ScrollTrace::from_json(r#"{"frames":[{"at_ms":16},{"at_ms":0}]}"#);
    assert!(bad.is_err());
    assert!(ScrollTrace::from_json("not json").is_err());
}
