use std::collections::BTreeMap;
use std::time::Duration;

use crate::foundation::core::{TargetId, Viewport, ViewportClass};

/// Programmatic scroll echoes within this distance of a request are not user input.
const PROGRAMMATIC_ECHO_PX: f64 = 0.5;

/// The one consistent view of scroll and viewport state handed to every effect in a frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollSnapshot {
    pub scroll_y: f64,
    /// Change since the previous snapshot.
    pub delta_y: f64,
    pub viewport: Viewport,
    pub viewport_class: ViewportClass,
    /// The viewport changed since the previous snapshot; layout must be re-measured.
    pub resized: bool,
    /// At least one scroll event that was not an echo of a programmatic request arrived.
    pub user_scrolled: bool,
    pub at: Duration,
}

/// Per-frame view handed to effects: the shared snapshot plus read access to the source.
#[derive(Clone, Copy, Debug)]
pub struct FrameCtx<'a> {
    pub snapshot: ScrollSnapshot,
    pub source: &'a ScrollSource,
    /// Time since the previous frame; zero on the first.
    pub dt: Duration,
}

impl FrameCtx<'_> {
    pub fn now(&self) -> Duration {
        self.snapshot.at
    }
}

/// Document scroll position an effect wants the host to apply this frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollRequest {
    pub to_y: f64,
}

#[derive(Clone, Copy, Debug)]
struct NativeScroll {
    left: f64,
    last_input: Duration,
}

/// Single-writer scroll/viewport state. The host pushes raw events at any rate; effects read
/// one coalesced [`ScrollSnapshot`] per frame.
#[derive(Clone, Debug)]
pub struct ScrollSource {
    scroll_y: f64,
    published_y: f64,
    viewport: Viewport,
    class: ViewportClass,
    resized: bool,
    user_scrolled: bool,
    last_user_scroll: Option<Duration>,
    requested_y: Option<f64>,
    coalesced: u32,
    native: BTreeMap<TargetId, NativeScroll>,
}

impl ScrollSource {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            scroll_y: 0.0,
            published_y: 0.0,
            viewport,
            class: viewport.class(),
            resized: true,
            user_scrolled: false,
            last_user_scroll: None,
            requested_y: None,
            coalesced: 0,
            native: BTreeMap::new(),
        }
    }

    /// Record a document scroll position. Non-finite values are dropped; overscroll clamps to 0.
    pub fn push_scroll(&mut self, y: f64, at: Duration) {
        if !y.is_finite() {
            return;
        }
        let y = y.max(0.0);
        let echo = self
            .requested_y
            .is_some_and(|r| (r - y).abs() <= PROGRAMMATIC_ECHO_PX);
        if !echo {
            self.requested_y = None;
            self.user_scrolled = true;
            self.last_user_scroll = Some(at);
        }
        self.scroll_y = y;
        self.coalesced += 1;
    }

    pub fn push_resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        let class = viewport.class();
        if class != self.class {
            tracing::debug!(?class, "viewport class changed");
        }
        self.class = class;
        self.resized = true;
    }

    /// Record a native horizontal scroll offset for a scroll container.
    pub fn push_native_scroll(&mut self, container: TargetId, left: f64, at: Duration) {
        if !left.is_finite() {
            return;
        }
        self.native.insert(
            container,
            NativeScroll {
                left: left.max(0.0),
                last_input: at,
            },
        );
    }

    /// Mark `y` as an engine-issued scroll so its echo is not treated as a user gesture.
    pub fn note_programmatic(&mut self, y: f64) {
        self.requested_y = Some(y);
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn viewport_class(&self) -> ViewportClass {
        self.class
    }

    /// Raw scroll events folded into the next snapshot.
    pub fn pending_events(&self) -> u32 {
        self.coalesced
    }

    /// Host time of the last user scroll input.
    pub fn last_user_scroll(&self) -> Option<Duration> {
        self.last_user_scroll
    }

    /// Time since the last user scroll input, if there was one.
    pub fn idle_for(&self, now: Duration) -> Option<Duration> {
        self.last_user_scroll.map(|t| now.saturating_sub(t))
    }

    pub fn native_left(&self, container: TargetId) -> Option<f64> {
        self.native.get(&container).map(|n| n.left)
    }

    /// Host time of the latest native scroll push for `container`.
    pub fn native_input_at(&self, container: TargetId) -> Option<Duration> {
        self.native.get(&container).map(|n| n.last_input)
    }

    pub fn native_idle_for(&self, container: TargetId, now: Duration) -> Option<Duration> {
        self.native
            .get(&container)
            .map(|n| now.saturating_sub(n.last_input))
    }

    /// Publish the frame's snapshot and reset per-frame flags. Call once per frame.
    pub fn snapshot(&mut self, now: Duration) -> ScrollSnapshot {
        let snap = ScrollSnapshot {
            scroll_y: self.scroll_y,
            delta_y: self.scroll_y - self.published_y,
            viewport: self.viewport,
            viewport_class: self.class,
            resized: self.resized,
            user_scrolled: self.user_scrolled,
            at: now,
        };
        self.published_y = self.scroll_y;
        self.resized = false;
        self.user_scrolled = false;
        self.coalesced = 0;
        snap
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/source.rs"]
mod tests;
