use std::time::Duration;

use crate::{
    animation::{
        ease::Ease,
        sink::PropertySink,
        tween::Tween,
        value::{ClipShape, Lerp, Property, Value},
    },
    foundation::core::{Point, TargetId, Vec2, Viewport, ViewportClass},
    schedule::effect::ScrollEffect,
    scroll::source::{FrameCtx, ScrollRequest},
};

/// Preview anchor relative to the pointer.
pub const PREVIEW_OFFSET: Vec2 = Vec2::new(20.0, -125.0);
pub const PREVIEW_FOLLOW_X: Duration = Duration::from_millis(1500);
pub const PREVIEW_FOLLOW_Y: Duration = Duration::from_millis(2000);
pub const WIPE_IN: Duration = Duration::from_millis(150);
pub const WIPE_OUT: Duration = Duration::from_millis(200);
pub const PREVIEW_FADE: Duration = Duration::from_millis(300);
/// Scale of the hidden preview; it grows to 1 as it fades in.
pub const PREVIEW_REST_SCALE: f64 = 0.95;

/// Pointer event on a project row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowHover {
    Enter(usize),
    Leave(usize),
}

/// Hover treatment for a list of project rows and their floating preview card.
///
/// Entering a row wipes its overlay up from the bottom edge and fades the preview in; leaving
/// wipes it back down and fades the preview out. The preview trails the pointer with
/// retargetable tweens, slower vertically than horizontally. Inactive on compact viewports.
pub struct HoverPreview {
    preview: TargetId,
    rows: Vec<Row>,
    current: Option<usize>,
    visibility: Tween,
    follow_x: Tween,
    follow_y: Tween,
    enabled: bool,
    written: Option<(f64, Point)>,
}

struct Row {
    overlay: TargetId,
    wipe: Tween,
    written: Option<f64>,
}

fn settled(value: f64, duration: Duration, ease: Ease) -> Tween {
    Tween::new(value, value, Duration::ZERO, duration, ease)
}

impl HoverPreview {
    pub fn new(preview: TargetId, overlays: &[TargetId], class: ViewportClass) -> Self {
        Self {
            preview,
            rows: overlays
                .iter()
                .map(|&overlay| Row {
                    overlay,
                    wipe: settled(0.0, Duration::ZERO, Ease::Linear),
                    written: None,
                })
                .collect(),
            current: None,
            visibility: settled(0.0, PREVIEW_FADE, Ease::OutQuad),
            follow_x: settled(0.0, PREVIEW_FOLLOW_X, Ease::OutCubic),
            follow_y: settled(0.0, PREVIEW_FOLLOW_Y, Ease::OutCubic),
            enabled: class == ViewportClass::Regular,
            written: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.enabled
    }

    /// Row currently hovered.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// How far row `row`'s overlay is wiped in, `0..=1`.
    pub fn overlay_reveal(&self, row: usize, now: Duration) -> f64 {
        self.rows.get(row).map_or(0.0, |r| r.wipe.sample(now))
    }

    /// Preview opacity; its scale follows as `0.95 + 0.05 * opacity`.
    pub fn visibility(&self, now: Duration) -> f64 {
        self.visibility.sample(now)
    }

    pub fn position(&self, now: Duration) -> Point {
        Point::new(self.follow_x.sample(now), self.follow_y.sample(now))
    }

    pub fn hover(&mut self, event: RowHover, now: Duration) {
        match event {
            RowHover::Enter(row) => self.pointer_enter(row, now),
            RowHover::Leave(row) => self.pointer_leave(row, now),
        }
    }

    pub fn pointer_enter(&mut self, row: usize, now: Duration) {
        if !self.enabled {
            return;
        }
        self.current = Some(row);
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        r.wipe = Tween::new(0.0, 1.0, now, WIPE_IN, Ease::OutQuad);
        self.visibility = self.visibility.retarget(1.0, now);
    }

    pub fn pointer_leave(&mut self, row: usize, now: Duration) {
        if !self.enabled {
            return;
        }
        self.current = None;
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        r.wipe = Tween::new(r.wipe.sample(now), 0.0, now, WIPE_OUT, Ease::InQuad);
        self.visibility = self.visibility.retarget(0.0, now);
    }

    /// Pointer position in viewport coordinates.
    pub fn pointer_move(&mut self, position: Point, now: Duration) {
        if !self.enabled || !(position.x.is_finite() && position.y.is_finite()) {
            return;
        }
        let anchor = position + PREVIEW_OFFSET;
        self.follow_x = self.follow_x.retarget(anchor.x, now);
        self.follow_y = self.follow_y.retarget(anchor.y, now);
    }

    /// Write overlay clips and preview state that changed since the last frame.
    pub fn frame(&mut self, now: Duration, sink: &mut dyn PropertySink) {
        if !self.enabled {
            return;
        }
        for row in &mut self.rows {
            let reveal = row.wipe.sample(now);
            if row.written == Some(reveal) || !sink.is_attached(row.overlay) {
                continue;
            }
            let clip = ClipShape::lerp(&ClipShape::COLLAPSED_BOTTOM, &ClipShape::FULL, reveal);
            sink.write(row.overlay, Property::ClipPath, Value::Clip(clip));
            row.written = Some(reveal);
        }

        let shown = (self.visibility(now), self.position(now));
        if self.written == Some(shown) || !sink.is_attached(self.preview) {
            return;
        }
        let (opacity, at) = shown;
        let scale = PREVIEW_REST_SCALE + (1.0 - PREVIEW_REST_SCALE) * opacity;
        sink.write(self.preview, Property::Opacity, Value::Scalar(opacity));
        sink.write(self.preview, Property::Scale, Value::Scalar(scale));
        sink.write(self.preview, Property::Translate, Value::Offset(at.to_vec2()));
        self.written = Some(shown);
    }
}

impl ScrollEffect for HoverPreview {
    fn measure(&mut self, viewport: Viewport) {
        let enabled = viewport.class() == ViewportClass::Regular;
        if enabled != self.enabled {
            tracing::debug!(enabled, "hover preview toggled by viewport class");
            self.current = None;
        }
        self.enabled = enabled;
    }

    fn update(
        &mut self,
        ctx: &FrameCtx<'_>,
        sink: &mut dyn PropertySink,
    ) -> Option<ScrollRequest> {
        self.frame(ctx.now(), sink);
        None
    }

    fn label(&self) -> &'static str {
        "hover-preview"
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/preview.rs"]
mod tests;
