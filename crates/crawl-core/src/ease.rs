//! Interpolation helpers for animating committed grid transitions.

use std::f32::consts::{PI, TAU};

/// Linear interpolation between `a` and `b` by `t`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Ease-in-out (smoothstep) curve over `t` in \[0, 1\].
///
/// Input outside the unit interval is clamped.
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Normalize an angle into (−π, π].
///
/// Scaling the wrapped delta between two yaws by the eased parameter gives
/// the shortest angular path between them.
#[inline]
pub fn wrap_angle(a: f32) -> f32 {
    let mut a = a % TAU;
    if a <= -PI {
        a += TAU;
    } else if a > PI {
        a -= TAU;
    }
    a
}
