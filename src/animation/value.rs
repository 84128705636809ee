use crate::{
    foundation::core::{Point, Rgba8, Vec2},
    scroll::pin::PinLayout,
};

/// Interpolation contract for animation value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with eased factor `t` (may leave `[0, 1]` for overshooting curves).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// Clip geometry in element-relative percent units (`0..=100`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipShape {
    /// `circle(radius% at cx% cy%)`.
    Circle { radius_pct: f64, center: Point },
    /// Four-point polygon, corners in drawing order.
    Quad([Point; 4]),
}

impl ClipShape {
    /// Fully visible rectangle.
    pub const FULL: Self = Self::Quad([
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(100.0, 100.0),
        Point::new(0.0, 100.0),
    ]);

    /// Rectangle collapsed onto its bottom edge; used for bottom-up wipes.
    pub const COLLAPSED_BOTTOM: Self = Self::Quad([
        Point::new(0.0, 100.0),
        Point::new(100.0, 100.0),
        Point::new(100.0, 100.0),
        Point::new(0.0, 100.0),
    ]);

    fn same_kind(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Circle { .. }, Self::Circle { .. }) | (Self::Quad(_), Self::Quad(_))
        )
    }

    fn is_finite(&self) -> bool {
        match self {
            Self::Circle { radius_pct, center } => {
                radius_pct.is_finite() && center.x.is_finite() && center.y.is_finite()
            }
            Self::Quad(pts) => pts.iter().all(|p| p.x.is_finite() && p.y.is_finite()),
        }
    }
}

impl Lerp for ClipShape {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (
                Self::Circle {
                    radius_pct: ra,
                    center: ca,
                },
                Self::Circle {
                    radius_pct: rb,
                    center: cb,
                },
            ) => Self::Circle {
                radius_pct: <f64 as Lerp>::lerp(ra, rb, t),
                center: <Point as Lerp>::lerp(ca, cb, t),
            },
            (Self::Quad(pa), Self::Quad(pb)) => {
                Self::Quad(std::array::from_fn(|i| <Point as Lerp>::lerp(&pa[i], &pb[i], t)))
            }
            // Rejected by timeline validation; hold the nearer endpoint.
            _ => {
                if t < 1.0 {
                    *a
                } else {
                    *b
                }
            }
        }
    }
}

/// A value written to a target property. `Copy`, so evaluation never allocates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Scalar(f64),
    Offset(Vec2),
    Clip(ClipShape),
    Color(Rgba8),
    /// Pin layout decided by the pin controller. Written, never interpolated.
    Layout(PinLayout),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ValueKind {
    Scalar,
    Offset,
    CircleClip,
    QuadClip,
    Color,
    Layout,
}

impl Value {
    pub(crate) fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Offset(_) => ValueKind::Offset,
            Self::Clip(ClipShape::Circle { .. }) => ValueKind::CircleClip,
            Self::Clip(ClipShape::Quad(_)) => ValueKind::QuadClip,
            Self::Color(_) => ValueKind::Color,
            Self::Layout(_) => ValueKind::Layout,
        }
    }

    pub(crate) fn same_kind(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Clip(a), Self::Clip(b)) => a.same_kind(b),
            _ => self.kind() == other.kind(),
        }
    }

    pub(crate) fn is_finite(&self) -> bool {
        match self {
            Self::Scalar(v) => v.is_finite(),
            Self::Offset(v) => v.x.is_finite() && v.y.is_finite(),
            Self::Clip(c) => c.is_finite(),
            Self::Color(_) => true,
            Self::Layout(l) => l.is_finite(),
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }
}

impl Lerp for Value {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (Self::Scalar(x), Self::Scalar(y)) => Self::Scalar(<f64 as Lerp>::lerp(x, y, t)),
            (Self::Offset(x), Self::Offset(y)) => Self::Offset(<Vec2 as Lerp>::lerp(x, y, t)),
            (Self::Clip(x), Self::Clip(y)) => Self::Clip(ClipShape::lerp(x, y, t)),
            (Self::Color(x), Self::Color(y)) => Self::Color(Rgba8::lerp(x, y, t)),
            _ => {
                if t < 1.0 {
                    *a
                } else {
                    *b
                }
            }
        }
    }
}

/// Visual property slots the engine knows how to drive.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Opacity,
    /// Pixel translation along x.
    TranslateX,
    /// Pixel translation along y.
    TranslateY,
    /// Pixel translation as one 2D offset.
    Translate,
    /// Translation along x as a percent of the element's own width.
    XPercent,
    /// Translation along y as a percent of the element's own height.
    YPercent,
    Scale,
    ScaleX,
    RotateDeg,
    BorderRadius,
    ClipPath,
    Color,
    /// Native horizontal scroll offset of a scroll container.
    ScrollLeft,
    /// In-flow vs fixed placement of a pinned element.
    PinLayout,
}

impl Property {
    /// Whether timelines may tween this property.
    pub(crate) fn is_animatable(self) -> bool {
        !matches!(self, Self::PinLayout)
    }

    /// Value kind accepted by this property.
    pub(crate) fn accepts(self, value: &Value) -> bool {
        match self {
            Self::ClipPath => matches!(value, Value::Clip(_)),
            Self::Color => matches!(value, Value::Color(_)),
            Self::Translate => matches!(value, Value::Offset(_)),
            Self::PinLayout => matches!(value, Value::Layout(_)),
            _ => matches!(value, Value::Scalar(_)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/value.rs"]
mod tests;
