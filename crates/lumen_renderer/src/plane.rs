//! Infinite plane primitive.

use crate::{
    hittable::{Hittable, SurfaceHit},
    MaterialId, Ray,
};
use lumen_math::{almost_zero, Vec3};

/// An infinite plane satisfying `dot(p, normal) + offset = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vec3,
    offset: f32,
    material: MaterialId,
}

impl Plane {
    /// Create a new plane. `normal` is expected to be unit length.
    pub fn new(normal: Vec3, offset: f32, material: MaterialId) -> Self {
        Self {
            normal,
            offset,
            material,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray) -> Option<SurfaceHit> {
        let mapped = ray.direction().dot(self.normal);

        // Parallel to the plane, also guards the division
        if almost_zero(mapped) {
            return None;
        }

        let distance = (ray.origin().dot(self.normal) + self.offset) / -mapped;
        if distance < 0.0 {
            return None;
        }

        // Same normal whichever side is hit
        Some(SurfaceHit::new(distance, self.normal))
    }

    fn material(&self) -> MaterialId {
        self.material
    }
}
