//! Ease-in-out curve and point interpolation shared by every cup animation

use glam::Vec2;
use std::f32::consts::PI;

/// Linear progress of `elapsed` through `duration`, clamped to [0, 1]
#[inline]
pub fn progress(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0)
}

/// Cosine ease-in-out: slow start, slow end, symmetric around 0.5
#[inline]
pub fn ease_in_out(p: f32) -> f32 {
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
    0.5 - 0.5 * (PI * p).cos()
}

/// Point between `start` and `target` at eased fraction `e`
#[inline]
pub fn lerp(start: Vec2, target: Vec2, e: f32) -> Vec2 {
    start + (target - start) * e
}
