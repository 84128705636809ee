use std::collections::BTreeSet;
use std::time::Duration;

use crate::{
    animation::{
        ease::Ease,
        playhead::Autoplay,
        timeline::{TimedBuilder, TimedTimeline, Timeline, TimelineEntry},
        value::{Property, Value},
    },
    content::catalog,
    effects::preview::RowHover,
    foundation::{
        core::{Point, Region, Rgba8, TargetId, Viewport, ViewportClass},
        error::{ScrollworkError, ScrollworkResult},
    },
    scroll::{
        binding::{Anchor, Distance, Scrub, TriggerSpec},
        remap::{StrategyKind, StripConfig, select_strategy},
    },
};

/// A page description: measured sections plus the scroll effects bound to them.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SceneSpec {
    pub viewport: Viewport,
    pub sections: Vec<SectionSpec>,
    #[serde(default)]
    pub effects: Vec<EffectSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<PointerSpec>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SectionSpec {
    pub id: String,
    pub top: f64,
    pub height: f64,
    /// Pointer color while this section is active, `#rrggbb`. Defaults to the site palette.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct PointerSpec {
    pub cursor: TargetId,
}

/// One tween of an autoplay timeline, placed in milliseconds.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct TweenSpec {
    pub target: TargetId,
    pub property: Property,
    pub from: Value,
    pub to: Value,
    #[serde(default)]
    pub ease: Ease,
    #[serde(default)]
    pub at_ms: u64,
    pub duration_ms: u64,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectSpec {
    /// Timeline scrubbed by scroll through a trigger on a section.
    Scrub {
        section: String,
        trigger: TriggerSpec,
        #[serde(default)]
        scrub: Scrub,
        timeline: Vec<TimelineEntry>,
    },
    /// Section pinned for `distance` of scroll, optionally driving a timeline.
    Pin {
        section: String,
        target: TargetId,
        distance: Distance,
        #[serde(default)]
        scrub: Scrub,
        #[serde(default)]
        timeline: Vec<TimelineEntry>,
    },
    /// Horizontal strip driven by vertical scroll.
    Remap {
        section: String,
        target: TargetId,
        content: TargetId,
        scroll_width: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cards: Option<usize>,
    },
    /// One-shot autoplay timeline started when the section reaches `start`.
    Reveal {
        section: String,
        start: Anchor,
        tweens: Vec<TweenSpec>,
    },
    /// Endless scroll-boosted strip loop.
    Marquee {
        target: TargetId,
        strip_width: f64,
        #[serde(default)]
        reverse: bool,
    },
    /// Floating project preview with one wipe overlay per row.
    Preview {
        target: TargetId,
        overlays: Vec<TargetId>,
    },
}

impl EffectSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Scrub { .. } => "scrub",
            Self::Pin { .. } => "pin",
            Self::Remap { .. } => "remap",
            Self::Reveal { .. } => "reveal",
            Self::Marquee { .. } => "marquee",
            Self::Preview { .. } => "preview",
        }
    }

    pub fn section(&self) -> Option<&str> {
        match self {
            Self::Scrub { section, .. }
            | Self::Pin { section, .. }
            | Self::Remap { section, .. }
            | Self::Reveal { section, .. } => Some(section),
            Self::Marquee { .. } | Self::Preview { .. } => None,
        }
    }
}

impl SectionSpec {
    pub fn region(&self) -> Region {
        Region::new(self.top, self.height)
    }

    pub fn color(&self) -> ScrollworkResult<Rgba8> {
        match &self.color {
            Some(hex) => Rgba8::from_hex(hex),
            None => Ok(catalog::section_color(&self.id).unwrap_or(catalog::ACCENT)),
        }
    }
}

pub(crate) fn timed_from_tweens(tweens: &[TweenSpec]) -> ScrollworkResult<TimedTimeline> {
    tweens
        .iter()
        .fold(TimedBuilder::new(), |b, t| {
            b.tween(
                TimelineEntry::new(t.target, t.property, t.from, t.to).ease(t.ease),
                Duration::from_millis(t.at_ms),
                Duration::from_millis(t.duration_ms),
            )
        })
        .build()
}

impl SceneSpec {
    pub fn from_json(json: &str) -> ScrollworkResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> ScrollworkResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn section(&self, id: &str) -> Option<&SectionSpec> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub(crate) fn section_region(&self, id: &str) -> ScrollworkResult<Region> {
        self.section(id).map(SectionSpec::region).ok_or_else(|| {
            ScrollworkError::validation(format!("effect references unknown section '{id}'"))
        })
    }

    pub fn validate(&self) -> ScrollworkResult<()> {
        Viewport::new(self.viewport.width, self.viewport.height)?;

        let mut ids = BTreeSet::new();
        for s in &self.sections {
            if s.id.trim().is_empty() {
                return Err(ScrollworkError::validation("section id must be non-empty"));
            }
            if !ids.insert(s.id.as_str()) {
                return Err(ScrollworkError::validation(format!(
                    "duplicate section id '{}'",
                    s.id
                )));
            }
            if !s.top.is_finite() || !s.height.is_finite() || s.height < 0.0 {
                return Err(ScrollworkError::validation(format!(
                    "section '{}' needs finite top and height >= 0",
                    s.id
                )));
            }
            s.color()?;
        }

        for (i, effect) in self.effects.iter().enumerate() {
            self.validate_effect(effect).map_err(|e| {
                ScrollworkError::validation(format!("effect #{i} ({}): {e}", effect.kind()))
            })?;
        }
        Ok(())
    }

    fn validate_effect(&self, effect: &EffectSpec) -> ScrollworkResult<()> {
        if let Some(section) = effect.section() {
            self.section_region(section)?;
        }
        match effect {
            EffectSpec::Scrub {
                trigger,
                scrub,
                timeline,
                ..
            } => {
                trigger.validate()?;
                validate_scrub(*scrub)?;
                Timeline::from_entries(timeline.clone())?;
            }
            EffectSpec::Pin {
                distance,
                scrub,
                timeline,
                ..
            } => {
                TriggerSpec::pinned(*distance).validate()?;
                validate_scrub(*scrub)?;
                Timeline::from_entries(timeline.clone())?;
            }
            EffectSpec::Remap {
                target,
                content,
                scroll_width,
                cards,
                section,
            } => {
                self.strip_config(section, *target, *content, *scroll_width, *cards)?
                    .validate()?;
            }
            EffectSpec::Reveal { tweens, .. } => {
                Autoplay::new(timed_from_tweens(tweens)?)?;
            }
            EffectSpec::Marquee { strip_width, .. } => {
                if !strip_width.is_finite() || *strip_width <= 0.0 {
                    return Err(ScrollworkError::validation("marquee strip_width must be > 0"));
                }
            }
            EffectSpec::Preview { target, overlays } => {
                if overlays.contains(target) {
                    return Err(ScrollworkError::validation(
                        "preview card cannot also be a row overlay",
                    ));
                }
            }
        }
        Ok(())
    }

    pub(crate) fn strip_config(
        &self,
        section: &str,
        target: TargetId,
        content: TargetId,
        scroll_width: f64,
        cards: Option<usize>,
    ) -> ScrollworkResult<StripConfig> {
        let config = StripConfig::new(target, content, self.section_region(section)?, scroll_width);
        Ok(match cards {
            Some(n) => config.snap_cards(n),
            None => config,
        })
    }

    /// Which horizontal strategy each remap effect gets at this scene's viewport.
    pub fn strategies(&self) -> ScrollworkResult<Vec<StrategyKind>> {
        let class = ViewportClass::from_width(self.viewport.width);
        let mut out = Vec::new();
        for effect in &self.effects {
            if let EffectSpec::Remap {
                section,
                target,
                content,
                scroll_width,
                cards,
            } = effect
            {
                let config =
                    self.strip_config(section, *target, *content, *scroll_width, *cards)?;
                out.push(select_strategy(class, config, self.viewport).kind());
            }
        }
        Ok(out)
    }
}

fn validate_scrub(scrub: Scrub) -> ScrollworkResult<()> {
    match scrub {
        Scrub::Smoothed(lag) if !lag.is_finite() || lag < 0.0 => Err(
            ScrollworkError::validation("scrub smoothing must be a finite number of seconds >= 0"),
        ),
        _ => Ok(()),
    }
}

/// One host frame of a recorded session.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct TraceFrame {
    pub at_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resize: Option<Viewport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<Point>,
    /// Native horizontal scroll of a strip container, `(container, scroll_left)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_scroll: Option<(TargetId, f64)>,
    /// Section id to smooth-scroll to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigate: Option<String>,
    /// Pointer entering or leaving a preview row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover: Option<RowHover>,
}

/// A scroll/pointer session replayed frame by frame.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ScrollTrace {
    pub frames: Vec<TraceFrame>,
}

impl ScrollTrace {
    pub fn from_json(json: &str) -> ScrollworkResult<Self> {
        let trace: Self = serde_json::from_str(json)?;
        if trace.frames.windows(2).any(|w| w[1].at_ms < w[0].at_ms) {
            return Err(ScrollworkError::validation(
                "trace frames must be in non-decreasing at_ms order",
            ));
        }
        Ok(trace)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
