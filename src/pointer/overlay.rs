use std::time::Duration;

use crate::{
    animation::{ease::Ease, sink::PropertySink, tween::Tween, value::Property, value::Value},
    foundation::core::{Point, Rgba8, TargetId, Vec2, Viewport, ViewportClass},
    foundation::math::frame_corrected_alpha,
    schedule::effect::ScrollEffect,
    scroll::sections::SectionTracker,
    scroll::source::{FrameCtx, ScrollRequest},
};

/// Share of the remaining distance covered per reference (60 Hz) frame.
pub const FOLLOW_K: f64 = 0.2;
pub const HOVER_SCALE: f64 = 1.5;
pub const HOVER_EASE: Duration = Duration::from_millis(300);
pub const HOVER_OPACITY: f64 = 1.0;
pub const IDLE_OPACITY: f64 = 0.9;
pub const DEFAULT_COLOR: Rgba8 = Rgba8::rgb(0x00, 0xff, 0x88);

/// Ancestor walks stop here; protects against cyclic host trees.
const MAX_ANCESTOR_DEPTH: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Link,
    Button,
    Other,
}

/// Read-only view of the host's element tree, used for hover detection.
pub trait ElementTree {
    fn kind(&self, id: TargetId) -> ElementKind;
    fn parent(&self, id: TargetId) -> Option<TargetId>;
    /// Explicit "treat as interactive" marker.
    fn opted_in(&self, _id: TargetId) -> bool {
        false
    }
}

/// Why the pointer counts as hovering something interactive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverTag {
    Link,
    Button,
    OptIn,
}

/// Classify `element`: itself a link or button, inside one, or explicitly opted in.
pub fn interactive_tag(tree: &dyn ElementTree, element: TargetId) -> Option<HoverTag> {
    if tree.opted_in(element) {
        return Some(HoverTag::OptIn);
    }
    let mut cursor = Some(element);
    for _ in 0..MAX_ANCESTOR_DEPTH {
        let id = cursor?;
        match tree.kind(id) {
            ElementKind::Link => return Some(HoverTag::Link),
            ElementKind::Button => return Some(HoverTag::Button),
            ElementKind::Other => cursor = tree.parent(id),
        }
    }
    None
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PointerState {
    pub raw: Point,
    pub eased: Point,
    pub hover: Option<HoverTag>,
    pub color: Rgba8,
}

/// Trailing custom cursor: eased follow, hover scale ring, per-section color.
///
/// Disabled on compact viewports. After [`PointerOverlay::dispose`] every input and frame is
/// ignored and nothing is written.
pub struct PointerOverlay {
    cursor: TargetId,
    state: PointerState,
    hover_element: Option<TargetId>,
    scale: Tween,
    sections: SectionTracker,
    enabled: bool,
    disposed: bool,
    color_dirty: bool,
    style_dirty: bool,
}

impl PointerOverlay {
    pub fn new(cursor: TargetId, sections: SectionTracker, class: ViewportClass) -> Self {
        let enabled = class == ViewportClass::Regular;
        if !enabled {
            tracing::debug!("pointer overlay disabled on compact viewport");
        }
        Self {
            cursor,
            state: PointerState {
                raw: Point::ZERO,
                eased: Point::ZERO,
                hover: None,
                color: DEFAULT_COLOR,
            },
            hover_element: None,
            scale: Tween::new(1.0, 1.0, Duration::ZERO, Duration::ZERO, Ease::OutQuad),
            sections,
            enabled,
            disposed: false,
            color_dirty: true,
            style_dirty: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.enabled && !self.disposed
    }

    pub fn state(&self) -> &PointerState {
        &self.state
    }

    pub fn scale(&self, now: Duration) -> f64 {
        self.scale.sample(now)
    }

    pub fn pointer_move(&mut self, position: Point) {
        if self.is_active() && position.x.is_finite() && position.y.is_finite() {
            self.state.raw = position;
        }
    }

    pub fn pointer_enter(&mut self, tree: &dyn ElementTree, element: TargetId, now: Duration) {
        if !self.is_active() {
            return;
        }
        if let Some(tag) = interactive_tag(tree, element) {
            self.hover_element = Some(element);
            self.set_hover(Some(tag), now);
        }
    }

    /// Leaving the element that started the hover clears it.
    pub fn pointer_leave(&mut self, element: TargetId, now: Duration) {
        if !self.is_active() || self.hover_element != Some(element) {
            return;
        }
        self.hover_element = None;
        self.set_hover(None, now);
    }

    /// Stop for good. Idempotent.
    pub fn dispose(&mut self) {
        if !self.disposed {
            tracing::debug!("pointer overlay disposed");
        }
        self.disposed = true;
    }

    fn set_hover(&mut self, hover: Option<HoverTag>, now: Duration) {
        if self.state.hover.is_some() == hover.is_some() {
            self.state.hover = hover;
            return;
        }
        self.state.hover = hover;
        let target = if hover.is_some() { HOVER_SCALE } else { 1.0 };
        self.scale = Tween::new(self.scale.sample(now), target, now, HOVER_EASE, Ease::OutQuad);
        self.style_dirty = true;
    }

    /// Ease toward the raw position and write the cursor's visual state.
    pub fn frame(
        &mut self,
        dt: Duration,
        now: Duration,
        scroll_y: f64,
        viewport: Viewport,
        sink: &mut dyn PropertySink,
    ) {
        if !self.is_active() {
            return;
        }
        let alpha = frame_corrected_alpha(FOLLOW_K, dt);
        let step = (self.state.raw - self.state.eased) * alpha;
        self.state.eased += step;

        if let Some(section) = self.sections.update(scroll_y, viewport)
            && section.color != self.state.color
        {
            self.state.color = section.color;
            self.color_dirty = true;
        }

        if !sink.is_attached(self.cursor) {
            return;
        }
        sink.write(
            self.cursor,
            Property::Translate,
            Value::Offset(Vec2::new(self.state.eased.x, self.state.eased.y)),
        );
        let scaling = !self.scale.is_done(now);
        if scaling || self.style_dirty {
            sink.write(self.cursor, Property::Scale, Value::Scalar(self.scale.sample(now)));
        }
        if self.style_dirty {
            let opacity = if self.state.hover.is_some() {
                HOVER_OPACITY
            } else {
                IDLE_OPACITY
            };
            sink.write(self.cursor, Property::Opacity, Value::Scalar(opacity));
        }
        if self.color_dirty {
            sink.write(self.cursor, Property::Color, Value::Color(self.state.color));
            self.color_dirty = false;
        }
        self.style_dirty = scaling;
    }
}

impl ScrollEffect for PointerOverlay {
    fn update(
        &mut self,
        ctx: &FrameCtx<'_>,
        sink: &mut dyn PropertySink,
    ) -> Option<ScrollRequest> {
        let snap = ctx.snapshot;
        self.frame(ctx.dt, ctx.now(), snap.scroll_y, snap.viewport, sink);
        None
    }

    fn label(&self) -> &'static str {
        "pointer"
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pointer/overlay.rs"]
mod tests;
