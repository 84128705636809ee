use std::time::Duration;

use crate::{
    animation::{ease::Ease, sink::PropertySink, tween::Tween, value::Property, value::Value},
    foundation::core::{Region, TargetId, Viewport, ViewportClass},
    foundation::error::{ScrollworkError, ScrollworkResult},
    foundation::math::clamp_unit,
    scroll::binding::Distance,
    scroll::pin::{Pin, PinLayout, PinState},
    scroll::source::{FrameCtx, ScrollRequest},
};

/// Quiet time after the last scroll input that counts as the end of a gesture.
pub const GESTURE_END_DEBOUNCE: Duration = Duration::from_millis(150);
/// Length of the settle tween toward the nearest snap point.
pub const SNAP_SETTLE: Duration = Duration::from_millis(400);

/// Horizontal strip driven by vertical scroll.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StripConfig {
    /// Element that gets pinned.
    pub section: TargetId,
    /// Element translated (or natively scrolled) horizontally.
    pub content: TargetId,
    pub region: Region,
    /// Full scrollable width of the content strip.
    pub scroll_width: f64,
    /// Snap step in progress units, e.g. `1 / (n - 1)` for `n` cards.
    #[serde(default)]
    pub snap_increment: Option<f64>,
    /// Vertical px scrolled per horizontal px moved.
    #[serde(default = "unit_scale")]
    pub distance_scale: f64,
}

fn unit_scale() -> f64 {
    1.0
}

impl StripConfig {
    pub fn new(section: TargetId, content: TargetId, region: Region, scroll_width: f64) -> Self {
        Self {
            section,
            content,
            region,
            scroll_width,
            snap_increment: None,
            distance_scale: 1.0,
        }
    }

    pub fn snap_increment(mut self, increment: f64) -> Self {
        self.snap_increment = Some(increment);
        self
    }

    /// Snap step for `cards` evenly spaced cards.
    pub fn snap_cards(self, cards: usize) -> Self {
        if cards < 2 {
            return self;
        }
        self.snap_increment(1.0 / (cards - 1) as f64)
    }

    pub fn validate(&self) -> ScrollworkResult<()> {
        if !self.scroll_width.is_finite() || self.scroll_width < 0.0 {
            return Err(ScrollworkError::validation(
                "strip scroll_width must be finite and >= 0",
            ));
        }
        if !self.distance_scale.is_finite() || self.distance_scale <= 0.0 {
            return Err(ScrollworkError::validation("strip distance_scale must be > 0"));
        }
        if let Some(inc) = self.snap_increment
            && (inc.is_nan() || inc <= 0.0 || inc > 1.0)
        {
            return Err(ScrollworkError::validation(format!(
                "snap increment must be in (0, 1] (got {inc})"
            )));
        }
        Ok(())
    }

    fn overflow(&self, viewport: Viewport) -> f64 {
        (self.scroll_width - viewport.width).max(0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    PinnedHijack,
    NativeSwipe,
}

/// Two interchangeable ways of presenting the same horizontal strip.
pub trait HorizontalScrollStrategy {
    fn kind(&self) -> StrategyKind;

    /// Re-resolve geometry after a resize.
    fn measure(&mut self, viewport: Viewport);

    /// Replace the section region; takes effect at the next `measure`.
    fn set_region(&mut self, region: Region);

    /// Advance one frame; may ask the host to move the document scroll.
    fn update(&mut self, ctx: &FrameCtx<'_>, sink: &mut dyn PropertySink)
    -> Option<ScrollRequest>;

    /// Strip progress in `[0, 1]`.
    fn progress(&self) -> f64;

    /// Horizontal offset of the strip's content relative to its container.
    fn content_offset(&self) -> f64;
}

/// Pick the strategy for a viewport class. Called once at mount.
pub fn select_strategy(
    class: ViewportClass,
    config: StripConfig,
    viewport: Viewport,
) -> Box<dyn HorizontalScrollStrategy> {
    match class {
        ViewportClass::Regular => Box::new(PinnedHijack::new(config, viewport)),
        ViewportClass::Compact => Box::new(NativeSwipe::new(config, viewport)),
    }
}

/// Round `progress` to the nearest multiple of `increment`.
pub fn snap_to_increment(progress: f64, increment: f64) -> f64 {
    if increment.is_nan() || increment <= 0.0 {
        return clamp_unit(progress);
    }
    clamp_unit((progress / increment).round() * increment)
}

/// Trailing-edge debounce over scroll input.
#[derive(Clone, Copy, Debug)]
pub struct GestureTracker {
    debounce: Duration,
    last_input: Option<Duration>,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(GESTURE_END_DEBOUNCE)
    }
}

impl GestureTracker {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            last_input: None,
        }
    }

    pub fn in_gesture(&self) -> bool {
        self.last_input.is_some()
    }

    /// Returns `true` once, on the first quiet frame `debounce` after the last input.
    pub fn observe(&mut self, input: bool, now: Duration) -> bool {
        if input {
            self.last_input = Some(now);
            return false;
        }
        match self.last_input {
            Some(t) if now.saturating_sub(t) >= self.debounce => {
                self.last_input = None;
                true
            }
            _ => false,
        }
    }
}

/// Pins the section and translates the strip by `-progress * (scroll_width - viewport_width)`.
#[derive(Clone, Debug)]
pub struct PinnedHijack {
    config: StripConfig,
    pin: Pin,
    overflow: f64,
    gesture: GestureTracker,
    settle: Option<Tween>,
    offset: f64,
    written: Option<(PinLayout, f64)>,
}

impl PinnedHijack {
    pub fn new(config: StripConfig, viewport: Viewport) -> Self {
        let mut hijack = Self {
            config,
            pin: Pin::new(config.region, Distance::Px(0.0), viewport),
            overflow: 0.0,
            gesture: GestureTracker::default(),
            settle: None,
            offset: 0.0,
            written: None,
        };
        hijack.measure(viewport);
        hijack
    }

    pub fn pin(&self) -> &Pin {
        &self.pin
    }

    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    fn begin_settle(&mut self, state: PinState, progress: f64, y: f64, now: Duration) {
        let Some(inc) = self.config.snap_increment else {
            return;
        };
        if state != PinState::Pinned {
            return;
        }
        let target = snap_to_increment(progress, inc);
        let binding = self.pin.binding();
        let to_y = binding.start() + target * binding.distance();
        if (to_y - y).abs() <= 0.5 {
            return;
        }
        tracing::debug!(progress, target, "strip snap settle");
        self.settle = Some(Tween::new(y, to_y, now, SNAP_SETTLE, Ease::OutCubic));
    }
}

impl HorizontalScrollStrategy for PinnedHijack {
    fn kind(&self) -> StrategyKind {
        StrategyKind::PinnedHijack
    }

    fn measure(&mut self, viewport: Viewport) {
        self.overflow = self.config.overflow(viewport);
        self.pin.measure(self.config.region, viewport);
        self.pin.set_distance_px(self.overflow * self.config.distance_scale);
        self.settle = None;
        self.written = None;
    }

    fn set_region(&mut self, region: Region) {
        self.config.region = region;
    }

    fn update(
        &mut self,
        ctx: &FrameCtx<'_>,
        sink: &mut dyn PropertySink,
    ) -> Option<ScrollRequest> {
        let snap = ctx.snapshot;
        let now = ctx.now();
        if snap.user_scrolled {
            self.settle = None;
        }
        let frame = self.pin.update(snap.scroll_y);
        if self.gesture.observe(snap.user_scrolled, now) {
            self.begin_settle(frame.state, frame.progress, snap.scroll_y, now);
        }

        self.offset = -frame.progress * self.overflow;
        if self.written != Some((frame.layout, self.offset)) {
            if sink.is_attached(self.config.section) {
                sink.write(
                    self.config.section,
                    Property::PinLayout,
                    Value::Layout(frame.layout),
                );
            }
            if sink.is_attached(self.config.content) {
                sink.write(
                    self.config.content,
                    Property::TranslateX,
                    Value::Scalar(self.offset),
                );
            }
            self.written = Some((frame.layout, self.offset));
        }

        let tween = self.settle?;
        if tween.is_done(now) {
            self.settle = None;
        }
        Some(ScrollRequest {
            to_y: tween.sample(now),
        })
    }

    fn progress(&self) -> f64 {
        self.pin.progress()
    }

    fn content_offset(&self) -> f64 {
        self.offset
    }
}

/// Native horizontal touch scrolling with scroll-snap semantics. Nothing is pinned.
#[derive(Clone, Debug)]
pub struct NativeSwipe {
    config: StripConfig,
    overflow: f64,
    left: f64,
    seen_input: Option<Duration>,
    gesture: GestureTracker,
    settle: Option<Tween>,
    last_written: Option<f64>,
}

impl NativeSwipe {
    pub fn new(config: StripConfig, viewport: Viewport) -> Self {
        let mut swipe = Self {
            config,
            overflow: 0.0,
            left: 0.0,
            seen_input: None,
            gesture: GestureTracker::default(),
            settle: None,
            last_written: None,
        };
        swipe.measure(viewport);
        swipe
    }

    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    fn is_echo(&self, left: f64) -> bool {
        self.last_written.is_some_and(|w| (w - left).abs() <= 0.5)
    }

    fn begin_settle(&mut self, now: Duration) {
        let Some(inc) = self.config.snap_increment else {
            return;
        };
        if self.overflow <= 0.0 {
            return;
        }
        let target = snap_to_increment(self.left / self.overflow, inc) * self.overflow;
        if (target - self.left).abs() <= 0.5 {
            return;
        }
        tracing::debug!(left = self.left, target, "native strip snap settle");
        self.settle = Some(Tween::new(self.left, target, now, SNAP_SETTLE, Ease::OutCubic));
    }
}

impl HorizontalScrollStrategy for NativeSwipe {
    fn kind(&self) -> StrategyKind {
        StrategyKind::NativeSwipe
    }

    fn measure(&mut self, viewport: Viewport) {
        self.overflow = self.config.overflow(viewport);
        self.left = self.left.min(self.overflow);
        self.settle = None;
    }

    fn set_region(&mut self, region: Region) {
        self.config.region = region;
    }

    fn update(
        &mut self,
        ctx: &FrameCtx<'_>,
        sink: &mut dyn PropertySink,
    ) -> Option<ScrollRequest> {
        let now = ctx.now();
        let content = self.config.content;
        let pushed_at = ctx.source.native_input_at(content);
        let mut input = false;
        if pushed_at != self.seen_input {
            self.seen_input = pushed_at;
            if let Some(raw) = ctx.source.native_left(content) {
                let raw = raw.min(self.overflow);
                input = !self.is_echo(raw);
                self.left = raw;
            }
        }
        if input {
            self.settle = None;
            self.last_written = None;
        }
        if self.gesture.observe(input, now) {
            self.begin_settle(now);
        }

        if let Some(tween) = self.settle {
            self.left = tween.sample(now);
            if sink.is_attached(content) {
                sink.write(content, Property::ScrollLeft, Value::Scalar(self.left));
            }
            self.last_written = Some(self.left);
            if tween.is_done(now) {
                self.settle = None;
            }
        }
        None
    }

    fn progress(&self) -> f64 {
        if self.overflow <= 0.0 {
            0.0
        } else {
            clamp_unit(self.left / self.overflow)
        }
    }

    fn content_offset(&self) -> f64 {
        -self.left
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/remap.rs"]
mod tests;
