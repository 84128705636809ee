use std::cell::RefCell;
use std::rc::Rc;

use crate::{
    animation::{
        playhead::{Autoplay, Toggle},
        sink::PropertySink,
        timeline::{TimedTimeline, Timeline},
        value::{Property, Value},
    },
    foundation::core::{Region, TargetId, Viewport},
    foundation::error::ScrollworkResult,
    scroll::{
        binding::{Anchor, Distance, Extent, ProgressBinding, Scrub, TriggerSpec},
        pin::{Pin, PinLayout},
        remap::HorizontalScrollStrategy,
        source::{FrameCtx, ScrollRequest},
    },
};

/// Anything the frame scheduler drives once per frame.
pub trait ScrollEffect {
    /// Re-resolve layout-dependent geometry. Runs before `update` whenever the viewport changed.
    fn measure(&mut self, _viewport: Viewport) {}

    /// Replace the element region this effect is bound to. Followed by `measure`.
    fn set_region(&mut self, _region: Region) {}

    fn update(&mut self, ctx: &FrameCtx<'_>, sink: &mut dyn PropertySink)
    -> Option<ScrollRequest>;

    fn label(&self) -> &'static str {
        "effect"
    }
}

/// Shared effects stay reachable by the host for input while the scheduler ticks them.
impl<T: ScrollEffect + ?Sized> ScrollEffect for Rc<RefCell<T>> {
    fn measure(&mut self, viewport: Viewport) {
        if let Ok(mut inner) = self.try_borrow_mut() {
            inner.measure(viewport);
        }
    }

    fn set_region(&mut self, region: Region) {
        if let Ok(mut inner) = self.try_borrow_mut() {
            inner.set_region(region);
        }
    }

    fn update(
        &mut self,
        ctx: &FrameCtx<'_>,
        sink: &mut dyn PropertySink,
    ) -> Option<ScrollRequest> {
        match self.try_borrow_mut() {
            Ok(mut inner) => inner.update(ctx, sink),
            Err(_) => {
                tracing::trace!("shared effect busy; skipped this frame");
                None
            }
        }
    }

    fn label(&self) -> &'static str {
        self.try_borrow().map(|inner| inner.label()).unwrap_or("shared")
    }
}

/// Timeline scrubbed by scroll progress through a trigger.
pub struct ScrubEffect {
    binding: ProgressBinding,
    timeline: Timeline,
    scrub: Scrub,
    shown: Option<f64>,
    evaluated: Option<f64>,
}

impl ScrubEffect {
    pub fn new(
        trigger: TriggerSpec,
        region: Region,
        viewport: Viewport,
        timeline: Timeline,
        scrub: Scrub,
    ) -> Self {
        Self {
            binding: ProgressBinding::new(trigger, region, viewport),
            timeline,
            scrub,
            shown: None,
            evaluated: None,
        }
    }

    pub fn progress(&self) -> f64 {
        self.shown.unwrap_or(0.0)
    }
}

impl ScrollEffect for ScrubEffect {
    fn measure(&mut self, viewport: Viewport) {
        self.binding.measure(self.binding.region(), viewport);
        self.evaluated = None;
    }

    fn set_region(&mut self, region: Region) {
        self.binding.set_region(region);
    }

    fn update(
        &mut self,
        ctx: &FrameCtx<'_>,
        sink: &mut dyn PropertySink,
    ) -> Option<ScrollRequest> {
        let target = self.binding.update(ctx.snapshot.scroll_y);
        let shown = match self.shown {
            Some(prev) => self.scrub.follow(prev, target, ctx.dt),
            None => target,
        };
        self.shown = Some(shown);
        if self.evaluated != Some(shown) {
            self.timeline.evaluate(shown, sink);
            self.evaluated = Some(shown);
        }
        None
    }

    fn label(&self) -> &'static str {
        "scrub"
    }
}

/// What a pin drives with its progress.
pub enum PinDriver {
    Timeline(Timeline),
    Callback(Box<dyn FnMut(f64, &mut dyn PropertySink)>),
    None,
}

/// Pinned section with an optional progress-driven timeline or callback.
pub struct PinEffect {
    pin: Pin,
    region: Region,
    section: TargetId,
    driver: PinDriver,
    scrub: Scrub,
    shown: Option<f64>,
    driven: Option<f64>,
    layout: Option<PinLayout>,
}

impl PinEffect {
    pub fn new(
        section: TargetId,
        region: Region,
        distance: Distance,
        viewport: Viewport,
        driver: PinDriver,
    ) -> Self {
        Self {
            pin: Pin::new(region, distance, viewport),
            region,
            section,
            driver,
            scrub: Scrub::Immediate,
            shown: None,
            driven: None,
            layout: None,
        }
    }

    pub fn scrub(mut self, scrub: Scrub) -> Self {
        self.scrub = scrub;
        self
    }

    pub fn with_tolerance(mut self, px: f64) -> Self {
        self.pin = self.pin.with_tolerance(px);
        self
    }

    pub fn pin(&self) -> &Pin {
        &self.pin
    }
}

impl ScrollEffect for PinEffect {
    fn measure(&mut self, viewport: Viewport) {
        self.pin.measure(self.region, viewport);
        self.layout = None;
        self.driven = None;
    }

    fn set_region(&mut self, region: Region) {
        self.region = region;
    }

    fn update(
        &mut self,
        ctx: &FrameCtx<'_>,
        sink: &mut dyn PropertySink,
    ) -> Option<ScrollRequest> {
        let frame = self.pin.update(ctx.snapshot.scroll_y);
        if self.layout != Some(frame.layout) {
            if sink.is_attached(self.section) {
                sink.write(self.section, Property::PinLayout, Value::Layout(frame.layout));
            }
            self.layout = Some(frame.layout);
        }

        let shown = match self.shown {
            Some(prev) => self.scrub.follow(prev, frame.progress, ctx.dt),
            None => frame.progress,
        };
        self.shown = Some(shown);
        if self.driven != Some(shown) {
            match &mut self.driver {
                PinDriver::Timeline(timeline) => timeline.evaluate(shown, sink),
                PinDriver::Callback(on_progress) => on_progress(shown, sink),
                PinDriver::None => {}
            }
            self.driven = Some(shown);
        }
        None
    }

    fn label(&self) -> &'static str {
        "pin"
    }
}

/// One-shot autoplay timeline started when scroll reaches a trigger anchor.
///
/// A degenerate trigger region jumps straight to the final state instead of hiding content.
pub struct RevealEffect {
    binding: ProgressBinding,
    autoplay: Autoplay,
    fired: bool,
}

impl RevealEffect {
    pub fn new(
        start: Anchor,
        region: Region,
        viewport: Viewport,
        timed: TimedTimeline,
    ) -> ScrollworkResult<Self> {
        let trigger = TriggerSpec::new(start, Extent::Distance(Distance::Px(1.0)));
        Ok(Self {
            binding: ProgressBinding::new(trigger, region, viewport),
            autoplay: Autoplay::new(timed)?,
            fired: false,
        })
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    pub fn progress(&self) -> f64 {
        self.autoplay.playhead.progress()
    }
}

impl ScrollEffect for RevealEffect {
    fn measure(&mut self, viewport: Viewport) {
        self.binding.measure(self.binding.region(), viewport);
    }

    fn set_region(&mut self, region: Region) {
        self.binding.set_region(region);
    }

    fn update(
        &mut self,
        ctx: &FrameCtx<'_>,
        sink: &mut dyn PropertySink,
    ) -> Option<ScrollRequest> {
        if !self.fired {
            if self.binding.region().is_degenerate() {
                self.fired = true;
                self.autoplay.playhead.seek(1.0);
                self.autoplay.invalidate();
                tracing::debug!("reveal region is empty; showing final state");
            } else if self.binding.has_started(ctx.snapshot.scroll_y) {
                self.fired = true;
                self.autoplay.playhead.play();
                tracing::debug!(start = self.binding.start(), "reveal fired");
            }
        }
        self.autoplay.tick(ctx.dt, sink);
        None
    }

    fn label(&self) -> &'static str {
        "reveal"
    }
}

/// Horizontal strip driven through whichever strategy was selected at mount.
pub struct RemapEffect {
    strategy: Box<dyn HorizontalScrollStrategy>,
}

impl RemapEffect {
    pub fn new(strategy: Box<dyn HorizontalScrollStrategy>) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &dyn HorizontalScrollStrategy {
        self.strategy.as_ref()
    }
}

impl ScrollEffect for RemapEffect {
    fn measure(&mut self, viewport: Viewport) {
        self.strategy.measure(viewport);
    }

    fn set_region(&mut self, region: Region) {
        self.strategy.set_region(region);
    }

    fn update(
        &mut self,
        ctx: &FrameCtx<'_>,
        sink: &mut dyn PropertySink,
    ) -> Option<ScrollRequest> {
        self.strategy.update(ctx, sink)
    }

    fn label(&self) -> &'static str {
        "remap"
    }
}

impl ScrollEffect for Autoplay {
    fn update(
        &mut self,
        ctx: &FrameCtx<'_>,
        sink: &mut dyn PropertySink,
    ) -> Option<ScrollRequest> {
        self.tick(ctx.dt, sink);
        None
    }

    fn label(&self) -> &'static str {
        "autoplay"
    }
}

impl ScrollEffect for Toggle {
    fn update(
        &mut self,
        ctx: &FrameCtx<'_>,
        sink: &mut dyn PropertySink,
    ) -> Option<ScrollRequest> {
        self.tick(ctx.dt, sink);
        None
    }

    fn label(&self) -> &'static str {
        "toggle"
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/effect.rs"]
mod tests;
