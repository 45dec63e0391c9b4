//! Scalar helpers shared by the simulation steps
//!
//! None of these functions clamp implicitly. Each step applies its own bounds.

/// Linearly maps `x` from `[x1, x2]` onto `[y1, y2]`, extrapolating outside the
/// input range.
///
/// A degenerate input range (`x1 == x2`) becomes a step: `y1` below `x1`,
/// `y2` at or above it.
///
/// # Example
///
/// ```
/// use turbofix_sim::math::map;
///
/// assert!((map(0.5, 0.0, 1.0, 0.0, 10.0) - 5.0).abs() < 1e-6);
/// assert!((map(2.0, 0.0, 1.0, 0.0, 10.0) - 20.0).abs() < 1e-6);
/// ```
#[inline]
pub fn map(x: f32, x1: f32, x2: f32, y1: f32, y2: f32) -> f32 {
    let span = x2 - x1;
    if span.abs() <= f32::EPSILON {
        return if x < x1 { y1 } else { y2 };
    }
    (x - x1) * (y2 - y1) / span + y1
}

/// Linear interpolation between `a` and `b` by factor `f`.
#[inline]
pub fn lerp(a: f32, b: f32, f: f32) -> f32 {
    a + f * (b - a)
}

/// Bounds `value` to `[lo, hi]`.
///
/// Total for every input, including `lo > hi` (the lower bound wins) and NaN
/// (returned unchanged). `f32::clamp` panics on inverted bounds, so this is
/// used for every bound that comes from profile data.
#[inline]
pub fn clamp(value: f32, lo: f32, hi: f32) -> f32 {
    if value < lo {
        lo
    } else if hi < value {
        hi
    } else {
        value
    }
}

/// Returns `value` when finite, otherwise `fallback`.
#[inline]
pub fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

/// Per-tick blend factor for a rate expressed as the fraction of the gap
/// closed per second.
///
/// `1 - (1 - rate)^dt` keeps the per-second convergence equal to `rate` at
/// any tick rate.
#[inline]
pub fn blend_factor(rate: f32, delta_s: f32) -> f32 {
    1.0 - (1.0 - rate).powf(delta_s)
}
