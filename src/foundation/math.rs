use std::time::Duration;

/// Frame period the fixed-`k` easing constants were tuned against (60 Hz).
pub(crate) const REFERENCE_FRAME_SECS: f64 = 1.0 / 60.0;

/// Clamp to `[0, 1]`, mapping NaN to 0.
pub(crate) fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Position of `v` in `[a, b]`, unclamped. Degenerate spans return 0.
pub(crate) fn inverse_lerp(a: f64, b: f64, v: f64) -> f64 {
    let span = b - a;
    if span.abs() <= f64::EPSILON || !span.is_finite() {
        return 0.0;
    }
    (v - a) / span
}

/// Per-frame blend factor for "move `k` of the remaining distance each 60 Hz frame",
/// corrected for the actual frame delta so dropped frames do not slow the follow.
pub(crate) fn frame_corrected_alpha(k: f64, dt: Duration) -> f64 {
    let k = clamp_unit(k);
    if k >= 1.0 {
        return 1.0;
    }
    let frames = dt.as_secs_f64() / REFERENCE_FRAME_SECS;
    1.0 - (1.0 - k).powf(frames)
}

/// Blend factor for an exponential approach that is ~95% settled after `settle`.
pub(crate) fn settle_alpha(settle: Duration, dt: Duration) -> f64 {
    let settle = settle.as_secs_f64();
    if settle <= 0.0 {
        return 1.0;
    }
    1.0 - (-3.0 * dt.as_secs_f64() / settle).exp()
}
