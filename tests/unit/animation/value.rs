use super::*;

#[test]
fn scalar_and_offset_interpolate() {
    let v = Value::lerp(&Value::Scalar(0.0), &Value::Scalar(10.0), 0.25);
    assert_eq!(v, Value::Scalar(2.5));

    let v = Value::lerp(
        &Value::Offset(Vec2::new(0.0, 100.0)),
        &Value::Offset(Vec2::new(50.0, 0.0)),
        0.5,
    );
    assert_eq!(v, Value::Offset(Vec2::new(25.0, 50.0)));
}

#[test]
fn quad_clip_reveal_interpolates_per_corner() {
    let mid = Value::lerp(
        &Value::Clip(ClipShape::COLLAPSED_BOTTOM),
        &Value::Clip(ClipShape::FULL),
        0.5,
    );
    let Value::Clip(ClipShape::Quad(pts)) = mid else {
        panic!("expected quad clip");
    };
    assert_eq!(pts[0], Point::new(0.0, 50.0));
    assert_eq!(pts[1], Point::new(100.0, 50.0));
    assert_eq!(pts[2], Point::new(100.0, 100.0));
}

#[test]
fn circle_clip_shrinks() {
    let from = ClipShape::Circle {
        radius_pct: 100.0,
        center: Point::new(50.0, 50.0),
    };
    let to = ClipShape::Circle {
        radius_pct: 0.0,
        center: Point::new(50.0, 50.0),
    };
    let ClipShape::Circle { radius_pct, .. } = ClipShape::lerp(&from, &to, 0.75) else {
        panic!("expected circle");
    };
    assert_eq!(radius_pct, 25.0);
}

#[test]
fn color_rounds_and_clamps() {
    let a = Rgba8::rgb(0, 0, 0);
    let b = Rgba8::rgb(255, 255, 255);
    assert_eq!(Rgba8::lerp(&a, &b, 0.5), Rgba8::rgb(128, 128, 128));
    assert_eq!(Rgba8::lerp(&a, &b, 1.2), b);
}

#[test]
fn kind_checks() {
    assert!(Value::Scalar(1.0).same_kind(&Value::Scalar(2.0)));
    assert!(!Value::Scalar(1.0).same_kind(&Value::Offset(Vec2::ZERO)));
    assert!(
        !Value::Clip(ClipShape::FULL).same_kind(&Value::Clip(ClipShape::Circle {
            radius_pct: 1.0,
            center: Point::ORIGIN,
        }))
    );
    assert!(Property::Opacity.accepts(&Value::Scalar(1.0)));
    assert!(!Property::ClipPath.accepts(&Value::Scalar(1.0)));
    assert!(Property::Color.accepts(&Value::Color(Rgba8::rgb(1, 2, 3))));
}
