use std::time::Duration;

use crate::{
    animation::{
        ease::Ease,
        sink::PropertySink,
        tween::Tween,
        value::{Property, Value},
    },
    foundation::core::TargetId,
    schedule::effect::ScrollEffect,
    scroll::source::{FrameCtx, ScrollRequest},
};

/// Cruise speed at time scale 1.
pub const MARQUEE_SPEED_PX_PER_S: f64 = 50.0;
/// Magnitude of the per-gesture direction factor.
pub const BOOST_FACTOR: f64 = 2.5;
pub const BOOST_RAMP: Duration = Duration::from_millis(200);
pub const BOOST_HOLD: Duration = Duration::from_millis(300);
pub const BOOST_DECAY: Duration = Duration::from_millis(1000);

/// Wrap `x` into `(-width, 0]`.
pub fn wrap_strip(x: f64, width: f64) -> f64 {
    if !(x.is_finite() && width.is_finite()) || width <= 0.0 {
        return 0.0;
    }
    let r = x.rem_euclid(width);
    if r == 0.0 { 0.0 } else { r - width }
}

/// Ramp to a peak, hold, then decay to the new cruise scale.
#[derive(Clone, Copy, Debug)]
struct Boost {
    ramp: Tween,
    decay: Tween,
}

impl Boost {
    fn new(current: f64, factor: f64, now: Duration) -> Self {
        let peak = factor * BOOST_FACTOR;
        Self {
            ramp: Tween::new(current, peak, now, BOOST_RAMP, Ease::Linear),
            decay: Tween::new(
                peak,
                factor / BOOST_FACTOR,
                now + BOOST_RAMP + BOOST_HOLD,
                BOOST_DECAY,
                Ease::Linear,
            ),
        }
    }

    fn sample(&self, now: Duration) -> f64 {
        if self.ramp.is_done(now) {
            self.decay.sample(now)
        } else {
            self.ramp.sample(now)
        }
    }
}

/// Endless horizontal loop over a strip repeated three times.
///
/// `strip_width` is the width of one copy. Scrolling boosts the loop and picks its direction:
/// scrolling down runs it the configured way, scrolling up runs it backwards.
pub struct Marquee {
    target: TargetId,
    strip_width: f64,
    reverse: bool,
    position: f64,
    boost: Option<Boost>,
    cruise: f64,
    written: Option<f64>,
}

impl Marquee {
    pub fn new(target: TargetId, strip_width: f64, reverse: bool) -> Self {
        Self {
            target,
            strip_width,
            reverse,
            position: 0.0,
            boost: None,
            cruise: 1.0,
            written: None,
        }
    }

    pub fn set_strip_width(&mut self, width: f64) {
        self.strip_width = width;
        self.position = wrap_strip(self.position, width);
        self.written = None;
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn time_scale(&self, now: Duration) -> f64 {
        self.boost.map_or(self.cruise, |b| b.sample(now))
    }

    /// React to a user scroll gesture moving the page by `delta_y`.
    pub fn observe_scroll(&mut self, delta_y: f64, now: Duration) {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return;
        }
        let backwards = if self.reverse {
            delta_y > 0.0
        } else {
            delta_y < 0.0
        };
        let factor = if backwards { -BOOST_FACTOR } else { BOOST_FACTOR };
        let current = self.time_scale(now);
        self.boost = Some(Boost::new(current, factor, now));
        self.cruise = factor / BOOST_FACTOR;
    }

    /// Advance by `dt` and write the strip offset when it moved.
    pub fn advance(&mut self, dt: Duration, now: Duration, sink: &mut dyn PropertySink) {
        if !(self.strip_width.is_finite() && self.strip_width > 0.0) {
            return;
        }
        let scale = self.time_scale(now);
        let direction = if self.reverse { 1.0 } else { -1.0 };
        let step = MARQUEE_SPEED_PX_PER_S * scale * dt.as_secs_f64() * direction;
        self.position = wrap_strip(self.position + step, self.strip_width);
        if self.boost.is_some_and(|b| b.decay.is_done(now)) {
            self.boost = None;
        }
        if self.written != Some(self.position) && sink.is_attached(self.target) {
            sink.write(self.target, Property::TranslateX, Value::Scalar(self.position));
            self.written = Some(self.position);
        }
    }
}

impl ScrollEffect for Marquee {
    fn update(
        &mut self,
        ctx: &FrameCtx<'_>,
        sink: &mut dyn PropertySink,
    ) -> Option<ScrollRequest> {
        let now = ctx.now();
        if ctx.snapshot.user_scrolled {
            self.observe_scroll(ctx.snapshot.delta_y, now);
        }
        self.advance(ctx.dt, now, sink);
        None
    }

    fn label(&self) -> &'static str {
        "marquee"
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/marquee.rs"]
mod tests;
