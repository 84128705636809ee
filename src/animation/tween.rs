use std::time::Duration;

use crate::{animation::ease::Ease, foundation::math::clamp_unit};

/// One-shot scalar tween sampled against absolute host time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    started: Duration,
    duration: Duration,
    ease: Ease,
}

impl Tween {
    pub fn new(from: f64, to: f64, started: Duration, duration: Duration, ease: Ease) -> Self {
        Self {
            from,
            to,
            started,
            duration,
            ease,
        }
    }

    pub fn from(&self) -> f64 {
        self.from
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    pub fn started(&self) -> Duration {
        self.started
    }

    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started);
        clamp_unit(elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }

    pub fn sample(&self, now: Duration) -> f64 {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * self.ease.apply(t)
    }

    pub fn is_done(&self, now: Duration) -> bool {
        self.progress(now) >= 1.0
    }

    /// Restart toward `to` from wherever this tween currently is.
    pub fn retarget(&self, to: f64, now: Duration) -> Self {
        Self::new(self.sample(now), to, now, self.duration, self.ease)
    }
}
