use super::*;

#[test]
fn viewport_class_threshold() {
    assert_eq!(ViewportClass::from_width(767.9), ViewportClass::Compact);
    assert_eq!(ViewportClass::from_width(768.0), ViewportClass::Regular);
    assert_eq!(
        Viewport::new(390.0, 844.0).unwrap().class(),
        ViewportClass::Compact
    );
}

#[test]
fn viewport_rejects_non_finite() {
    assert!(Viewport::new(f64::NAN, 10.0).is_err());
    assert!(Viewport::new(10.0, -1.0).is_err());
}

#[test]
fn zero_height_region_is_degenerate() {
    assert!(Region::new(100.0, 0.0).is_degenerate());
    assert!(Region::new(f64::INFINITY, 10.0).is_degenerate());
    assert!(!Region::new(100.0, 1.0).is_degenerate());
    assert_eq!(Region::new(100.0, 50.0).bottom(), 150.0);
}

#[test]
fn hex_colors_parse_and_print() {
    let c = Rgba8::from_hex("#00ff88").unwrap();
    assert_eq!(c, Rgba8::rgb(0x00, 0xff, 0x88));
    assert_eq!(c.to_hex(), "#00ff88");

    let c = Rgba8::from_hex("b77bff80").unwrap();
    assert_eq!(c.a, 0x80);
    assert_eq!(c.to_hex(), "#b77bff80");

    assert!(Rgba8::from_hex("#12345").is_err());
    assert!(Rgba8::from_hex("#gg0000").is_err());
}
