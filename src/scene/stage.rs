use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::{
    animation::{
        sink::{PropertyWrite, RecordingSink},
        timeline::Timeline,
    },
    effects::{marquee::Marquee, preview::HoverPreview},
    foundation::{
        core::{Region, Viewport, ViewportClass},
        error::ScrollworkResult,
    },
    pointer::overlay::PointerOverlay,
    scene::model::{EffectSpec, SceneSpec, ScrollTrace, timed_from_tweens},
    schedule::{
        effect::{PinDriver, PinEffect, RemapEffect, RevealEffect, ScrollEffect, ScrubEffect},
        scheduler::{FrameScheduler, Registration},
    },
    scroll::{
        remap::select_strategy,
        sections::{SectionMarker, SectionTracker},
    },
};

/// Build the scroll-driven effect for `effect`. Pointer-driven kinds are built by the stage.
fn build_effect(
    spec: &SceneSpec,
    effect: &EffectSpec,
    viewport: Viewport,
    class: ViewportClass,
) -> ScrollworkResult<Option<Box<dyn ScrollEffect>>> {
    Ok(Some(match effect {
        EffectSpec::Scrub {
            section,
            trigger,
            scrub,
            timeline,
        } => Box::new(ScrubEffect::new(
            *trigger,
            spec.section_region(section)?,
            viewport,
            Timeline::from_entries(timeline.clone())?,
            *scrub,
        )),
        EffectSpec::Pin {
            section,
            target,
            distance,
            scrub,
            timeline,
        } => {
            let driver = if timeline.is_empty() {
                PinDriver::None
            } else {
                PinDriver::Timeline(Timeline::from_entries(timeline.clone())?)
            };
            let region = spec.section_region(section)?;
            Box::new(PinEffect::new(*target, region, *distance, viewport, driver).scrub(*scrub))
        }
        EffectSpec::Remap {
            section,
            target,
            content,
            scroll_width,
            cards,
        } => {
            let config = spec.strip_config(section, *target, *content, *scroll_width, *cards)?;
            config.validate()?;
            Box::new(RemapEffect::new(select_strategy(class, config, viewport)))
        }
        EffectSpec::Reveal {
            section,
            start,
            tweens,
        } => Box::new(RevealEffect::new(
            *start,
            spec.section_region(section)?,
            viewport,
            timed_from_tweens(tweens)?,
        )?),
        EffectSpec::Marquee {
            target,
            strip_width,
            reverse,
        } => Box::new(Marquee::new(*target, *strip_width, *reverse)),
        EffectSpec::Preview { .. } => return Ok(None),
    }))
}

/// A mounted scene. Dropping it unregisters every effect it created.
pub struct Stage {
    scheduler: FrameScheduler,
    sections: Vec<(String, Region)>,
    registrations: Vec<Registration>,
    pointer: Option<Rc<RefCell<PointerOverlay>>>,
    previews: Vec<Rc<RefCell<HoverPreview>>>,
}

impl Stage {
    /// Validate `spec` and register all of its effects with `scheduler`.
    ///
    /// Strategies and the pointer's enabled state are chosen from the scheduler's current
    /// viewport class.
    #[tracing::instrument(skip_all, fields(sections = spec.sections.len(), effects = spec.effects.len()))]
    pub fn mount(spec: &SceneSpec, scheduler: &FrameScheduler) -> ScrollworkResult<Self> {
        spec.validate()?;
        let viewport = scheduler.viewport();
        let class = scheduler.viewport_class();

        let mut registrations = Vec::with_capacity(spec.effects.len() + 1);
        let mut previews = Vec::new();
        for effect in &spec.effects {
            if let EffectSpec::Preview { target, overlays } = effect {
                let preview = Rc::new(RefCell::new(HoverPreview::new(*target, overlays, class)));
                registrations.push(scheduler.register(preview.clone()));
                previews.push(preview);
            } else if let Some(built) = build_effect(spec, effect, viewport, class)? {
                registrations.push(scheduler.register_boxed(built));
            }
        }

        let pointer = match spec.pointer {
            Some(p) => {
                let mut markers = Vec::with_capacity(spec.sections.len());
                for s in &spec.sections {
                    markers.push(SectionMarker {
                        id: s.id.clone(),
                        region: s.region(),
                        color: s.color()?,
                    });
                }
                let overlay = Rc::new(RefCell::new(PointerOverlay::new(
                    p.cursor,
                    SectionTracker::new(markers),
                    class,
                )));
                registrations.push(scheduler.register(overlay.clone()));
                Some(overlay)
            }
            None => None,
        };

        tracing::debug!(registered = registrations.len(), ?class, "scene mounted");
        Ok(Self {
            scheduler: scheduler.clone(),
            sections: spec
                .sections
                .iter()
                .map(|s| (s.id.clone(), s.region()))
                .collect(),
            registrations,
            pointer,
            previews,
        })
    }

    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    /// Shared pointer overlay, for feeding pointer input.
    pub fn pointer(&self) -> Option<&Rc<RefCell<PointerOverlay>>> {
        self.pointer.as_ref()
    }

    /// Shared hover previews, for feeding row hover and pointer input.
    pub fn previews(&self) -> &[Rc<RefCell<HoverPreview>>] {
        &self.previews
    }

    pub fn section(&self, id: &str) -> Option<Region> {
        self.sections
            .iter()
            .find(|(sid, _)| sid == id)
            .map(|(_, r)| *r)
    }

    /// Smooth-scroll to a section by id. Returns `false` for unknown ids.
    pub fn navigate_to(&self, id: &str, now: Duration) -> bool {
        match self.section(id) {
            Some(region) => {
                self.scheduler.navigate_to(region, now);
                true
            }
            None => false,
        }
    }

    /// Unregister every effect now.
    pub fn unmount(self) {}
}

impl Drop for Stage {
    fn drop(&mut self) {
        if let Some(pointer) = &self.pointer
            && let Ok(mut overlay) = pointer.try_borrow_mut()
        {
            overlay.dispose();
        }
        self.registrations.clear();
    }
}

/// What one simulated frame did.
#[derive(Clone, Debug, serde::Serialize)]
pub struct FrameRecord {
    pub frame: u64,
    pub at_ms: u64,
    pub scroll_y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_to: Option<f64>,
    pub writes: Vec<PropertyWrite>,
}

/// Mount `spec` headlessly and replay `trace`, collecting every property write.
///
/// Scroll positions the engine requests are applied before the next frame, the way a
/// browser host would.
#[tracing::instrument(skip_all, fields(frames = trace.frames.len()))]
pub fn simulate(spec: &SceneSpec, trace: &ScrollTrace) -> ScrollworkResult<Vec<FrameRecord>> {
    let viewport = Viewport::new(spec.viewport.width, spec.viewport.height)?;
    let scheduler = FrameScheduler::new(viewport);
    let stage = Stage::mount(spec, &scheduler)?;
    let mut sink = RecordingSink::new();
    let mut records = Vec::with_capacity(trace.frames.len());

    for f in &trace.frames {
        let now = Duration::from_millis(f.at_ms);
        if let Some(vp) = f.resize {
            scheduler.push_resize(Viewport::new(vp.width, vp.height)?);
        }
        if let Some(y) = f.scroll_y {
            scheduler.push_scroll(y, now);
        }
        if let Some((container, left)) = f.native_scroll {
            scheduler.push_native_scroll(container, left, now);
        }
        if let Some(position) = f.pointer {
            if let Some(pointer) = stage.pointer() {
                pointer.borrow_mut().pointer_move(position);
            }
            for preview in stage.previews() {
                preview.borrow_mut().pointer_move(position, now);
            }
        }
        if let Some(event) = f.hover {
            for preview in stage.previews() {
                preview.borrow_mut().hover(event, now);
            }
        }
        if let Some(id) = &f.navigate
            && !stage.navigate_to(id, now)
        {
            tracing::warn!(section = %id, at_ms = f.at_ms, "navigation to unknown section ignored");
        }

        let output = scheduler.tick(now, &mut sink);
        if let Some(y) = output.scroll_to {
            scheduler.push_scroll(y, now);
        }
        records.push(FrameRecord {
            frame: output.frame,
            at_ms: f.at_ms,
            scroll_y: scheduler.scroll_y(),
            scroll_to: output.scroll_to,
            writes: sink.take_log(),
        });
    }

    stage.unmount();
    Ok(records)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/stage.rs"]
mod tests;
