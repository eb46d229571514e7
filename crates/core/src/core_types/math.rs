//! Scalar helpers shared by the integrator and the color mapper.

/// Clamp a value into `[0, 1]`.
///
/// `f32::clamp` propagates NaN, which would leak into particle positions and
/// color channels. NaN maps to the lower bound instead.
#[inline]
#[must_use]
pub fn clamp01(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Linear interpolation from `a` to `b`. `t` is not clamped.
#[inline]
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Channel-wise interpolation between two RGB anchor triples.
#[inline]
#[must_use]
pub fn lerp_rgb(low: [f32; 3], high: [f32; 3], t: f32) -> [f32; 3] {
    [
        lerp(low[0], high[0], t),
        lerp(low[1], high[1], t),
        lerp(low[2], high[2], t),
    ]
}
