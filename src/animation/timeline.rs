use std::collections::BTreeMap;
use std::time::Duration;

use crate::{
    animation::ease::Ease,
    animation::sink::PropertySink,
    animation::value::{Lerp, Property, Value},
    foundation::core::TargetId,
    foundation::error::{ScrollworkError, ScrollworkResult},
    foundation::math::{clamp_unit, inverse_lerp},
};

/// One animated property segment inside a [`Timeline`].
///
/// `start`/`end` are fractions of the parent progress domain with `0 <= start < end <= 1`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineEntry {
    pub target: TargetId,
    pub property: Property,
    pub from: Value,
    pub to: Value,
    #[serde(default)]
    pub start: f64,
    #[serde(default = "full_window_end")]
    pub end: f64,
    #[serde(default)]
    pub ease: Ease,
}

fn full_window_end() -> f64 {
    1.0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Pending,
    Active,
    Passed,
}

impl TimelineEntry {
    /// Entry spanning the whole progress domain with linear easing.
    pub fn new(target: TargetId, property: Property, from: Value, to: Value) -> Self {
        Self {
            target,
            property,
            from,
            to,
            start: 0.0,
            end: 1.0,
            ease: Ease::Linear,
        }
    }

    pub fn window(mut self, start: f64, end: f64) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn validate(&self) -> ScrollworkResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(ScrollworkError::animation("entry offsets must be finite"));
        }
        if !(0.0 <= self.start && self.start < self.end && self.end <= 1.0) {
            return Err(ScrollworkError::animation(format!(
                "entry for {:?}/{:?} needs 0 <= start < end <= 1 (got {}..{})",
                self.target, self.property, self.start, self.end
            )));
        }
        if !self.property.is_animatable() {
            return Err(ScrollworkError::animation(format!(
                "property {:?} cannot be tweened",
                self.property
            )));
        }
        if !self.from.same_kind(&self.to) {
            return Err(ScrollworkError::animation(format!(
                "entry for {:?}/{:?} mixes value kinds",
                self.target, self.property
            )));
        }
        if !self.property.accepts(&self.from) {
            return Err(ScrollworkError::animation(format!(
                "property {:?} does not accept {:?}",
                self.property, self.from
            )));
        }
        if !self.from.is_finite() || !self.to.is_finite() {
            return Err(ScrollworkError::animation("entry values must be finite"));
        }
        Ok(())
    }

    /// Local progress inside this entry's window, clamped to `[0, 1]`.
    pub fn local_progress(&self, progress: f64) -> f64 {
        clamp_unit(inverse_lerp(self.start, self.end, progress))
    }

    /// Value this entry presents at parent `progress`.
    pub fn sample(&self, progress: f64) -> Value {
        let t = self.local_progress(progress);
        if t <= 0.0 {
            return self.from;
        }
        if t >= 1.0 {
            return self.to;
        }
        Value::lerp(&self.from, &self.to, self.ease.apply(t))
    }

    fn phase(&self, progress: f64) -> Phase {
        if progress < self.start {
            Phase::Pending
        } else if progress > self.end {
            Phase::Passed
        } else {
            Phase::Active
        }
    }

    fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// All entries driving one (target, property) pair, in declaration order.
#[derive(Clone, Debug)]
struct Slot {
    target: TargetId,
    property: Property,
    entries: Vec<usize>,
}

/// An ordered, validated list of [`TimelineEntry`] values evaluated against one progress scalar.
///
/// Entries driving the same (target, property) share a slot, and each slot is written exactly
/// once per evaluation. The writer is chosen by this precedence:
///
/// 1. the last-declared entry whose window contains the progress (overlaps: last write wins),
/// 2. else the passed entry with the greatest `end`, presenting its `to` value,
/// 3. else the pending entry with the smallest `start`, presenting its `from` value.
///
/// Sequential chains on one property therefore stay continuous, and overlapping windows
/// resolve to the later declaration. [`Timeline::overlaps`] reports the latter.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
    slots: Vec<Slot>,
}

impl Timeline {
    pub fn builder() -> TimelineBuilder {
        TimelineBuilder::default()
    }

    /// Validate `entries` and group them into slots.
    pub fn from_entries(entries: Vec<TimelineEntry>) -> ScrollworkResult<Self> {
        for e in &entries {
            e.validate()?;
        }

        let mut index: BTreeMap<(TargetId, Property), usize> = BTreeMap::new();
        let mut slots: Vec<Slot> = Vec::new();
        for (i, e) in entries.iter().enumerate() {
            let slot = *index.entry((e.target, e.property)).or_insert_with(|| {
                slots.push(Slot {
                    target: e.target,
                    property: e.property,
                    entries: Vec::new(),
                });
                slots.len() - 1
            });
            slots[slot].entries.push(i);
        }

        let tl = Self { entries, slots };
        if cfg!(debug_assertions) {
            for (a, b) in tl.overlaps() {
                let e = &tl.entries[b];
                tracing::warn!(
                    target_id = e.target.0,
                    property = ?e.property,
                    earlier = a,
                    later = b,
                    "overlapping timeline entries; later entry wins"
                );
            }
        }
        Ok(tl)
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct targets in first-declaration order.
    pub fn targets(&self) -> impl Iterator<Item = TargetId> + '_ {
        let mut seen = Vec::new();
        self.slots.iter().filter_map(move |s| {
            if seen.contains(&s.target) {
                None
            } else {
                seen.push(s.target);
                Some(s.target)
            }
        })
    }

    /// Index pairs `(earlier, later)` of same-slot entries whose windows overlap.
    pub fn overlaps(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for slot in &self.slots {
            for (n, &a) in slot.entries.iter().enumerate() {
                for &b in &slot.entries[n + 1..] {
                    if self.entries[a].overlaps(&self.entries[b]) {
                        out.push((a, b));
                    }
                }
            }
        }
        out
    }

    fn resolve(&self, slot: &Slot, progress: f64) -> Option<&TimelineEntry> {
        let mut active: Option<usize> = None;
        let mut passed: Option<usize> = None;
        let mut pending: Option<usize> = None;

        for &i in &slot.entries {
            let e = &self.entries[i];
            match e.phase(progress) {
                Phase::Active => active = Some(i),
                Phase::Passed => {
                    if passed.is_none_or(|p| e.end >= self.entries[p].end) {
                        passed = Some(i);
                    }
                }
                Phase::Pending => {
                    if pending.is_none_or(|p| e.start < self.entries[p].start) {
                        pending = Some(i);
                    }
                }
            }
        }

        active.or(passed).or(pending).map(|i| &self.entries[i])
    }

    /// Value the timeline presents for one slot at `progress`, if the slot exists.
    pub fn value_at(&self, target: TargetId, property: Property, progress: f64) -> Option<Value> {
        let progress = clamp_unit(progress);
        let slot = self
            .slots
            .iter()
            .find(|s| s.target == target && s.property == property)?;
        self.resolve(slot, progress).map(|e| e.sample(progress))
    }

    /// Write every slot's value at `progress` into `sink`.
    ///
    /// Idempotent and allocation-free. Detached targets are skipped.
    pub fn evaluate(&self, progress: f64, sink: &mut dyn PropertySink) {
        let progress = clamp_unit(progress);
        for slot in &self.slots {
            if !sink.is_attached(slot.target) {
                continue;
            }
            if let Some(e) = self.resolve(slot, progress) {
                sink.write(slot.target, slot.property, e.sample(progress));
            }
        }
    }
}

/// Builder for normalized (progress-domain) timelines.
#[derive(Clone, Debug, Default)]
pub struct TimelineBuilder {
    entries: Vec<TimelineEntry>,
}

impl TimelineBuilder {
    pub fn entry(mut self, entry: TimelineEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Repeat `template` once per target, shifting each window by `each`.
    pub fn stagger(mut self, targets: &[TargetId], template: TimelineEntry, each: f64) -> Self {
        for (i, &target) in targets.iter().enumerate() {
            let shift = each * i as f64;
            self.entries.push(TimelineEntry {
                target,
                start: template.start + shift,
                end: template.end + shift,
                ..template
            });
        }
        self
    }

    pub fn build(self) -> ScrollworkResult<Timeline> {
        Timeline::from_entries(self.entries)
    }
}

/// A timeline authored in seconds, normalized against its total duration on build.
#[derive(Clone, Debug)]
pub struct TimedTimeline {
    pub timeline: Timeline,
    pub duration: Duration,
}

#[derive(Clone, Copy, Debug)]
struct TimedEntry {
    entry: TimelineEntry,
    at: f64,
    duration: f64,
}

/// Builder for autoplay timelines whose entries are placed in seconds.
#[derive(Clone, Debug, Default)]
pub struct TimedBuilder {
    entries: Vec<TimedEntry>,
    min_duration: f64,
}

impl TimedBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `entry` (its window is ignored) at `at` for `duration`.
    pub fn tween(mut self, entry: TimelineEntry, at: Duration, duration: Duration) -> Self {
        self.entries.push(TimedEntry {
            entry,
            at: at.as_secs_f64(),
            duration: duration.as_secs_f64(),
        });
        self
    }

    /// One tween per target, the i-th starting `each * i` after `at`.
    pub fn stagger(
        mut self,
        targets: &[TargetId],
        template: TimelineEntry,
        at: Duration,
        duration: Duration,
        each: Duration,
    ) -> Self {
        for (i, &target) in targets.iter().enumerate() {
            let at = at + each * i as u32;
            self = self.tween(TimelineEntry { target, ..template }, at, duration);
        }
        self
    }

    /// Pad the total length, e.g. to hold the final state before a callback.
    pub fn min_duration(mut self, d: Duration) -> Self {
        self.min_duration = d.as_secs_f64();
        self
    }

    pub fn build(self) -> ScrollworkResult<TimedTimeline> {
        let total = self
            .entries
            .iter()
            .map(|e| e.at + e.duration)
            .fold(self.min_duration, f64::max);
        if total <= 0.0 {
            return Err(ScrollworkError::animation(
                "timed timeline must have a positive duration",
            ));
        }
        for e in &self.entries {
            if e.duration <= 0.0 {
                return Err(ScrollworkError::animation("tween duration must be > 0"));
            }
        }

        let entries = self
            .entries
            .into_iter()
            .map(|e| TimelineEntry {
                start: e.at / total,
                end: ((e.at + e.duration) / total).min(1.0),
                ..e.entry
            })
            .collect();
        Ok(TimedTimeline {
            timeline: Timeline::from_entries(entries)?,
            duration: Duration::from_secs_f64(total),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
