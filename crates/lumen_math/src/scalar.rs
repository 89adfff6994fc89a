//! Numeric guards and small vector helpers shared by the renderer.
//!
//! Every geometric formula that could divide by a near-zero value or take the
//! square root of a rounding-noise negative goes through one of these.

use crate::Vec3;

/// Threshold below which a value is treated as zero.
pub const ZERO_EPSILON: f32 = 8e-7;

/// Rec. 709 weights used for perceived brightness.
const LUMINANCE_WEIGHTS: Vec3 = Vec3::new(0.212671, 0.715160, 0.072169);

/// Returns true if `value` lies strictly within `ZERO_EPSILON` of zero.
#[inline]
pub fn almost_zero(value: f32) -> bool {
    almost_zero_eps(value, ZERO_EPSILON)
}

/// Returns true if `value` lies strictly within `epsilon` of zero.
#[inline]
pub fn almost_zero_eps(value: f32, epsilon: f32) -> bool {
    -epsilon < value && value < epsilon
}

/// Square root that returns 0 for any non-positive input instead of NaN.
#[inline]
pub fn safe_sqrt(value: f32) -> f32 {
    if value <= 0.0 {
        0.0
    } else {
        value.sqrt()
    }
}

/// Normalize a vector, returning the zero vector when its squared length
/// is almost zero.
#[inline]
pub fn safe_normalize(v: Vec3) -> Vec3 {
    let squared = v.length_squared();
    if almost_zero(squared) {
        return Vec3::ZERO;
    }
    v * (1.0 / squared.sqrt())
}

/// Reflect `v` about the unit normal `n`.
///
/// Both vectors point away from the surface: `n * 2(v·n) - v`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    n * (2.0 * v.dot(n)) - v
}

/// Perceived brightness of a linear RGB color.
#[inline]
pub fn luminance(color: Vec3) -> f32 {
    color.dot(LUMINANCE_WEIGHTS)
}

/// True if any channel of `color` is NaN or infinite.
#[inline]
pub fn is_invalid(color: Vec3) -> bool {
    !(color.x + color.y + color.z).is_finite()
}
