use std::time::Duration;

use crate::{
    animation::{sink::PropertySink, value::Property, value::Value},
    foundation::core::{TargetId, ViewportClass},
    foundation::math::clamp_unit,
    gate::listeners::{Listeners, Subscription},
};

pub const SYNTHETIC_DURATION: Duration = Duration::from_millis(2000);
pub const SYNTHETIC_INTERVAL: Duration = Duration::from_millis(50);
/// Pause at 100% before the reveal starts, so the full bar is seen.
pub const SETTLE_DELAY: Duration = Duration::from_millis(300);
pub const OVERLAY_FADE: Duration = Duration::from_millis(700);
pub const CONTENT_FADE: Duration = Duration::from_millis(1000);
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(8);

/// Where load progress comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressSignal {
    /// Externally driven asset-loader percentage; may jitter.
    Asset,
    /// Timer ramp from 0 to 100 over a fixed duration.
    Synthetic,
}

impl ProgressSignal {
    /// Compact devices do not get a reliable asset signal.
    pub fn for_class(class: ViewportClass) -> Self {
        match class {
            ViewportClass::Compact => Self::Synthetic,
            ViewportClass::Regular => Self::Asset,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GatePhase {
    Loading,
    Ready,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateEvent {
    /// Observed progress rose to this percentage.
    Progress(f64),
    Ready,
    /// Both cross-fades finished.
    FadeComplete,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GateConfig {
    /// Loader overlay element.
    pub overlay: TargetId,
    /// Main page content element.
    pub content: TargetId,
    /// Give up on a stalled asset signal after this long. `None` waits forever.
    pub max_wait: Option<Duration>,
    pub settle: Duration,
    pub overlay_fade: Duration,
    pub content_fade: Duration,
    pub synthetic_duration: Duration,
    pub synthetic_interval: Duration,
}

impl GateConfig {
    pub fn new(overlay: TargetId, content: TargetId) -> Self {
        Self {
            overlay,
            content,
            max_wait: Some(DEFAULT_MAX_WAIT),
            settle: SETTLE_DELAY,
            overlay_fade: OVERLAY_FADE,
            content_fade: CONTENT_FADE,
            synthetic_duration: SYNTHETIC_DURATION,
            synthetic_interval: SYNTHETIC_INTERVAL,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Ramp {
    from: f64,
    started: Duration,
}

/// Startup state machine that holds the page back until loading completes.
///
/// `observed` never decreases. `Loading -> Ready` happens once, `settle` after the observed
/// value first reaches 100, and starts overlapping fades: overlay 1 -> 0 and content 0 -> 1.
pub struct LoadGate {
    config: GateConfig,
    signal: ProgressSignal,
    started: Duration,
    phase: GatePhase,
    observed: f64,
    ramp: Option<Ramp>,
    complete_at: Option<Duration>,
    ready_at: Option<Duration>,
    primed: bool,
    fade_done: bool,
    listeners: Listeners<GateEvent>,
}

impl LoadGate {
    #[tracing::instrument(skip(config))]
    pub fn start(signal: ProgressSignal, config: GateConfig, now: Duration) -> Self {
        let ramp = match signal {
            ProgressSignal::Synthetic => Some(Ramp {
                from: 0.0,
                started: now,
            }),
            ProgressSignal::Asset => None,
        };
        Self {
            config,
            signal,
            started: now,
            phase: GatePhase::Loading,
            observed: 0.0,
            ramp,
            complete_at: None,
            ready_at: None,
            primed: false,
            fade_done: false,
            listeners: Listeners::new(),
        }
    }

    pub fn subscribe(&self, callback: impl FnMut(&GateEvent) + 'static) -> Subscription {
        self.listeners.subscribe(callback)
    }

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == GatePhase::Ready
    }

    pub fn signal(&self) -> ProgressSignal {
        self.signal
    }

    /// Whether the asset signal was abandoned for a synthetic ramp.
    pub fn fell_back(&self) -> bool {
        self.signal == ProgressSignal::Asset && self.ramp.is_some()
    }

    pub fn observed(&self) -> f64 {
        self.observed
    }

    /// Whole percent shown in the loader label.
    pub fn display_percent(&self) -> u8 {
        self.observed.floor().clamp(0.0, 100.0) as u8
    }

    pub fn fade_complete(&self) -> bool {
        self.fade_done
    }

    /// Feed the asset loader's raw percentage. Ignored once a synthetic ramp drives the gate.
    pub fn push_asset_progress(&mut self, raw: f64, now: Duration) -> f64 {
        if self.ramp.is_none() && self.phase == GatePhase::Loading {
            self.observe(raw, now);
        }
        self.observed
    }

    /// Advance timers and write loader/content opacity. Call from the host's interval or frame
    /// callback; the cadence does not change the outcome.
    pub fn poll(&mut self, now: Duration, sink: &mut dyn PropertySink) {
        if !self.primed {
            self.primed = true;
            self.write(sink, 1.0, 0.0);
        }
        if self.phase == GatePhase::Loading {
            self.check_stall(now);
            if let Some(raw) = self.ramp_value(now) {
                self.observe(raw, now);
            }
            if let Some(done) = self.complete_at
                && now.saturating_sub(done) >= self.config.settle
            {
                let ready_at = done + self.config.settle;
                self.phase = GatePhase::Ready;
                self.ready_at = Some(ready_at);
                tracing::debug!(?ready_at, "load gate ready");
                self.listeners.emit(&GateEvent::Ready);
            }
        }
        if let Some(ready_at) = self.ready_at
            && !self.fade_done
        {
            let since = now.saturating_sub(ready_at);
            let overlay = 1.0 - fraction(since, self.config.overlay_fade);
            let content = fraction(since, self.config.content_fade);
            self.write(sink, overlay, content);
            if overlay <= 0.0 && content >= 1.0 {
                self.fade_done = true;
                self.listeners.emit(&GateEvent::FadeComplete);
            }
        }
    }

    fn check_stall(&mut self, now: Duration) {
        let Some(max_wait) = self.config.max_wait else {
            return;
        };
        if self.ramp.is_some() || self.complete_at.is_some() {
            return;
        }
        if now.saturating_sub(self.started) >= max_wait {
            tracing::warn!(
                observed = self.observed,
                ?max_wait,
                "load signal stalled; completing with a synthetic ramp"
            );
            self.ramp = Some(Ramp {
                from: self.observed,
                started: now,
            });
        }
    }

    /// Ramp value at the most recent interval tick at or before `now`.
    fn ramp_value(&self, now: Duration) -> Option<f64> {
        let ramp = self.ramp?;
        let elapsed = now.saturating_sub(ramp.started);
        let ticks = match self.config.synthetic_interval.as_nanos() {
            0 => elapsed.as_nanos(),
            step => elapsed.as_nanos() / step * step,
        };
        let total = self.config.synthetic_duration.as_nanos();
        let t = if total == 0 {
            1.0
        } else {
            clamp_unit(ticks as f64 / total as f64)
        };
        Some(ramp.from + (100.0 - ramp.from) * t)
    }

    fn observe(&mut self, raw: f64, now: Duration) {
        if !raw.is_finite() {
            return;
        }
        let raw = raw.clamp(0.0, 100.0);
        if raw > self.observed {
            self.observed = raw;
            self.listeners.emit(&GateEvent::Progress(raw));
        }
        if self.observed >= 100.0 && self.complete_at.is_none() {
            self.complete_at = Some(now);
            tracing::debug!(?now, "load signal complete");
        }
    }

    fn write(&self, sink: &mut dyn PropertySink, overlay: f64, content: f64) {
        if sink.is_attached(self.config.overlay) {
            sink.write(self.config.overlay, Property::Opacity, Value::Scalar(overlay));
        }
        if sink.is_attached(self.config.content) {
            sink.write(self.config.content, Property::Opacity, Value::Scalar(content));
        }
    }
}

fn fraction(elapsed: Duration, total: Duration) -> f64 {
    if total.is_zero() {
        return 1.0;
    }
    clamp_unit(elapsed.as_secs_f64() / total.as_secs_f64())
}

#[cfg(test)]
#[path = "../../tests/unit/gate/load.rs"]
mod tests;
