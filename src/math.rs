//! Small vector helpers shared by emission sampling and the update pass.

use glam::Vec3;

/// Normalize `v`, returning `fallback` when `v` has zero (or non-finite) length.
#[inline]
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    v.try_normalize().unwrap_or(fallback)
}

/// Linear interpolation between two scalars, written as `a * (1 - t) + b * t`.
///
/// This form is exact at both endpoints, so `t = 0` yields `a` and `t = 1`
/// yields `b` bit for bit.
#[inline]
pub fn lerp_scalar(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Component-wise [`lerp_scalar`] for RGB colors stored as `Vec3`.
#[inline]
pub fn lerp_rgb(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a * (1.0 - t) + b * t
}
