use std::time::Duration;

use kurbo::Vec2;

use crate::foundation::{core::Rgba8, math::frame_corrected_alpha};

/// Load state of one externally loaded asset.
///
/// A failed load always becomes `Fallback`; it is recovered locally and never reported to the
/// visitor as an error.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AssetSlot<T> {
    #[default]
    Loading,
    Ready(T),
    Fallback,
}

impl<T> AssetSlot<T> {
    /// Settle a loading slot with the loader's outcome. Settled slots ignore later outcomes.
    pub fn settle<E: std::fmt::Display>(&mut self, path: &str, outcome: Result<T, E>) {
        if !self.is_loading() {
            return;
        }
        *self = match outcome {
            Ok(asset) => Self::Ready(asset),
            Err(err) => {
                tracing::warn!(path, error = %err, "asset failed to load; using fallback");
                Self::Fallback
            }
        };
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(asset) => Some(asset),
            _ => None,
        }
    }
}

/// Initials of up to the first two words, uppercased.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Replacement for a profile image that failed to load.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TextAvatar {
    pub initials: String,
    pub foreground: Rgba8,
    pub gradient: [Rgba8; 2],
}

impl TextAvatar {
    pub fn for_name(name: &str, accent: Rgba8, accent_alt: Rgba8) -> Self {
        Self {
            initials: initials(name),
            foreground: accent,
            gradient: [accent, accent_alt],
        }
    }
}

/// What the profile frame shows.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProfileVisual {
    Image { path: String },
    Avatar(TextAvatar),
    /// Still loading; the frame keeps its size.
    Blank,
}

pub fn profile_visual<T>(slot: &AssetSlot<T>, path: &str, avatar: &TextAvatar) -> ProfileVisual {
    match slot {
        AssetSlot::Loading => ProfileVisual::Blank,
        AssetSlot::Ready(_) => ProfileVisual::Image {
            path: path.to_owned(),
        },
        AssetSlot::Fallback => ProfileVisual::Avatar(avatar.clone()),
    }
}

/// Procedural stand-in for the hero model.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PlaceholderShape {
    /// Subdivision level of the wireframe icosphere.
    pub detail: u32,
    pub radius: f64,
    pub color: Rgba8,
    pub wireframe: bool,
}

impl PlaceholderShape {
    pub const fn new(color: Rgba8) -> Self {
        Self {
            detail: 1,
            radius: 1.5,
            color,
            wireframe: true,
        }
    }
}

/// Rotation easing per frame at 60 fps toward the pointer-driven target.
pub const MODEL_FOLLOW_K: f64 = 0.05;
/// Continuous yaw added per 60 fps frame.
pub const MODEL_SPIN_PER_FRAME: f64 = 0.003;
pub const MODEL_REST_Y: f64 = 0.5;
pub const MODEL_BOB_AMPLITUDE: f64 = 0.15;

/// Pose shared by the loaded model and its placeholder: eased pointer tilt, slow spin,
/// vertical bob.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct ModelPose {
    /// Pitch (x) and yaw (y) in radians.
    pub rotation: Vec2,
    pub lift: f64,
    target: Vec2,
}

impl ModelPose {
    /// Aim at a pointer given in normalized device coordinates (`-1..=1`, y up).
    pub fn aim(&mut self, pointer_ndc: Vec2) {
        if pointer_ndc.is_finite() {
            self.target = Vec2::new(pointer_ndc.y * 0.3, pointer_ndc.x * 0.5);
        }
    }

    pub fn step(&mut self, dt: Duration, now: Duration) {
        let alpha = frame_corrected_alpha(MODEL_FOLLOW_K, dt);
        self.rotation += (self.target - self.rotation) * alpha;
        self.rotation.y += MODEL_SPIN_PER_FRAME * dt.as_secs_f64() * 60.0;
        self.lift = MODEL_REST_Y + now.as_secs_f64().sin() * MODEL_BOB_AMPLITUDE;
    }
}

/// What the hero canvas shows.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelVisual {
    Model { path: String },
    Placeholder(PlaceholderShape),
    /// Not rendered at all (compact viewports, or still loading).
    None,
}

pub fn model_visual<T>(
    slot: &AssetSlot<T>,
    path: &str,
    placeholder: PlaceholderShape,
) -> ModelVisual {
    match slot {
        AssetSlot::Loading => ModelVisual::None,
        AssetSlot::Ready(_) => ModelVisual::Model {
            path: path.to_owned(),
        },
        AssetSlot::Fallback => ModelVisual::Placeholder(placeholder),
    }
}

/// Aggregate load progress over a set of assets, suitable as the load gate's asset signal.
///
/// Failed loads count as settled so a broken asset never holds the page back.
#[derive(Clone, Debug, Default)]
pub struct AssetTracker {
    total: usize,
    ready: usize,
    failed: usize,
}

impl AssetTracker {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn note_ready(&mut self) {
        if self.settled() < self.total {
            self.ready += 1;
        }
    }

    pub fn note_failed(&mut self) {
        if self.settled() < self.total {
            self.failed += 1;
        }
    }

    pub fn settled(&self) -> usize {
        self.ready + self.failed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Percent settled, `0..=100`. An empty set is complete.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.settled() as f64 / self.total as f64 * 100.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fallback.rs"]
mod tests;
