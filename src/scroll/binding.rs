use std::time::Duration;

use crate::{
    foundation::core::{Region, Viewport},
    foundation::error::{ScrollworkError, ScrollworkResult},
    foundation::math::{clamp_unit, settle_alpha},
};

/// Edge of the trigger element an [`Anchor`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Top,
    Center,
    Bottom,
}

/// "Element edge meets viewport fraction", e.g. `top 80%` is `{ edge: Top, viewport: 0.8 }`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    pub edge: Edge,
    /// Fraction of the viewport height measured from its top.
    pub viewport: f64,
}

impl Anchor {
    pub const TOP_TOP: Self = Self::new(Edge::Top, 0.0);
    pub const TOP_CENTER: Self = Self::new(Edge::Top, 0.5);
    pub const TOP_BOTTOM: Self = Self::new(Edge::Top, 1.0);
    pub const BOTTOM_TOP: Self = Self::new(Edge::Bottom, 0.0);
    pub const BOTTOM_CENTER: Self = Self::new(Edge::Bottom, 0.5);

    pub const fn new(edge: Edge, viewport: f64) -> Self {
        Self { edge, viewport }
    }

    /// Document scroll position at which this anchor is met.
    pub fn resolve(self, region: Region, viewport: Viewport) -> f64 {
        let edge = match self.edge {
            Edge::Top => region.top,
            Edge::Center => region.top + region.height * 0.5,
            Edge::Bottom => region.bottom(),
        };
        edge - viewport.height * self.viewport
    }
}

/// A scroll length, absolute or relative to the viewport height (`+=200%` is `ViewportPct(200.0)`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distance {
    Px(f64),
    ViewportPct(f64),
}

impl Distance {
    pub fn resolve(self, viewport: Viewport) -> f64 {
        match self {
            Self::Px(px) => px,
            Self::ViewportPct(pct) => viewport.height * pct / 100.0,
        }
    }
}

/// Where a binding's progress reaches 1.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extent {
    Anchor(Anchor),
    Distance(Distance),
}

/// Unresolved trigger description; layout-independent.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerSpec {
    pub start: Anchor,
    pub end: Extent,
}

impl TriggerSpec {
    pub fn new(start: Anchor, end: Extent) -> Self {
        Self { start, end }
    }

    /// Pin-style trigger: starts at `top top` and runs for `distance`.
    pub fn pinned(distance: Distance) -> Self {
        Self::new(Anchor::TOP_TOP, Extent::Distance(distance))
    }

    pub fn validate(&self) -> ScrollworkResult<()> {
        if !self.start.viewport.is_finite() {
            return Err(ScrollworkError::validation("trigger start must be finite"));
        }
        match self.end {
            Extent::Anchor(a) if !a.viewport.is_finite() => {
                Err(ScrollworkError::validation("trigger end must be finite"))
            }
            Extent::Distance(Distance::Px(v) | Distance::ViewportPct(v))
                if v.is_nan() || v <= 0.0 =>
            {
                Err(ScrollworkError::validation(format!(
                    "virtual distance must be > 0 (got {v})"
                )))
            }
            _ => Ok(()),
        }
    }
}

/// How a bound timeline follows its binding's progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scrub {
    #[default]
    Immediate,
    /// Catch up with the scroll over roughly this many seconds.
    Smoothed(f64),
}

impl Scrub {
    /// Step `shown` toward `target` for a frame of length `dt`.
    pub fn follow(self, shown: f64, target: f64, dt: Duration) -> f64 {
        match self {
            Self::Immediate => target,
            Self::Smoothed(lag) => {
                let lag = Duration::try_from_secs_f64(lag).unwrap_or(Duration::ZERO);
                let next = shown + (target - shown) * settle_alpha(lag, dt);
                if (target - next).abs() < 1e-4 { target } else { next }
            }
        }
    }
}

/// One scroll-to-progress mapping with measured, layout-dependent geometry.
///
/// Progress is always clamped to `[0, 1]`. A degenerate region, or a non-positive distance,
/// never triggers and reports progress 0.
#[derive(Clone, Debug)]
pub struct ProgressBinding {
    spec: TriggerSpec,
    region: Region,
    start_px: f64,
    distance_px: f64,
    progress: f64,
}

impl ProgressBinding {
    pub fn new(spec: TriggerSpec, region: Region, viewport: Viewport) -> Self {
        let mut binding = Self {
            spec,
            region,
            start_px: 0.0,
            distance_px: 0.0,
            progress: 0.0,
        };
        binding.measure(region, viewport);
        binding
    }

    pub fn spec(&self) -> TriggerSpec {
        self.spec
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Re-resolve start and distance against fresh layout. Call after every resize.
    pub fn measure(&mut self, region: Region, viewport: Viewport) {
        self.region = region;
        self.start_px = self.spec.start.resolve(region, viewport);
        let end = match self.spec.end {
            Extent::Anchor(a) => a.resolve(region, viewport),
            Extent::Distance(d) => self.start_px + d.resolve(viewport),
        };
        self.distance_px = end - self.start_px;
        if self.is_degenerate() {
            self.progress = 0.0;
        }
        tracing::trace!(
            start = self.start_px,
            distance = self.distance_px,
            "binding measured"
        );
    }

    /// Swap in a new element region; takes effect at the next [`ProgressBinding::measure`].
    pub fn set_region(&mut self, region: Region) {
        self.region = region;
    }

    /// Override the measured distance, keeping the start.
    pub fn set_distance(&mut self, distance_px: f64) {
        self.distance_px = distance_px;
    }

    pub fn is_degenerate(&self) -> bool {
        self.region.is_degenerate()
            || !self.start_px.is_finite()
            || !self.distance_px.is_finite()
            || self.distance_px <= 0.0
    }

    /// Map a scroll position to clamped progress and remember it.
    pub fn update(&mut self, scroll_y: f64) -> f64 {
        self.progress = self.progress_at(scroll_y);
        self.progress
    }

    pub fn progress_at(&self, scroll_y: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        clamp_unit((scroll_y - self.start_px) / self.distance_px)
    }

    pub fn has_started(&self, scroll_y: f64) -> bool {
        !self.is_degenerate() && scroll_y >= self.start_px
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn start(&self) -> f64 {
        self.start_px
    }

    pub fn end(&self) -> f64 {
        self.start_px + self.distance_px
    }

    pub fn distance(&self) -> f64 {
        self.distance_px
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/binding.rs"]
mod tests;
