//! Hittable trait and hit records for ray-primitive intersection.

use crate::{MaterialId, Ray};
use lumen_math::Vec3;

/// Result of a single-primitive intersection test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Parameter t along the ray (always finite and non-negative)
    pub distance: f32,
    /// Unit surface normal, outward facing (not flipped toward the ray)
    pub normal: Vec3,
}

impl SurfaceHit {
    #[inline]
    pub fn new(distance: f32, normal: Vec3) -> Self {
        Self { distance, normal }
    }
}

/// Record of the closest ray-scene intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Parameter t where the intersection occurs
    pub distance: f32,
    /// Unit surface normal at the intersection
    pub normal: Vec3,
    /// Material of the primitive that was hit
    pub material: MaterialId,
}

impl HitRecord {
    /// Point of intersection along `ray`.
    #[inline]
    pub fn point(&self, ray: &Ray) -> Vec3 {
        ray.at(self.distance)
    }
}

/// Trait for primitives that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test the ray against this primitive.
    ///
    /// Returns the nearest non-negative hit, or `None` on a miss.
    fn hit(&self, ray: &Ray) -> Option<SurfaceHit>;

    /// Material tag carried by this primitive.
    fn material(&self) -> MaterialId;
}
