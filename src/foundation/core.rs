use crate::foundation::error::{ScrollworkError, ScrollworkResult};

pub use kurbo::{Point, Rect, Vec2};

/// Widths strictly below this are [`ViewportClass::Compact`].
pub const COMPACT_MAX_WIDTH_PX: f64 = 768.0;

/// Identifies one animatable element known to the host.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TargetId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> ScrollworkResult<Self> {
        if !width.is_finite() || !height.is_finite() {
            return Err(ScrollworkError::validation("viewport size must be finite"));
        }
        if width < 0.0 || height < 0.0 {
            return Err(ScrollworkError::validation("viewport size must be >= 0"));
        }
        Ok(Self { width, height })
    }

    pub fn class(self) -> ViewportClass {
        ViewportClass::from_width(self.width)
    }
}

/// Coarse device class, derived once per resize and shared by every controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewportClass {
    Compact,
    #[default]
    Regular,
}

impl ViewportClass {
    pub fn from_width(width: f64) -> Self {
        if width < COMPACT_MAX_WIDTH_PX {
            Self::Compact
        } else {
            Self::Regular
        }
    }
}

/// Vertical extent of an element in document coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Region {
    pub top: f64,
    pub height: f64,
}

impl Region {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// Hidden or collapsed elements measure as zero height; they never trigger.
    pub fn is_degenerate(self) -> bool {
        !self.top.is_finite() || !self.height.is_finite() || self.height <= 0.0
    }
}

/// Straight (non-premultiplied) RGBA8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> ScrollworkResult<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(ScrollworkError::validation(format!(
                "color '{s}' must be #rrggbb or #rrggbbaa"
            )));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| ScrollworkError::validation(format!("color '{s}' is not hex")))
        };
        let a = if hex.len() == 8 { byte(6)? } else { 255 };
        Ok(Self {
            r: byte(0)?,
            g: byte(2)?,
            b: byte(4)?,
            a,
        })
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
