//! Sphere primitive for ray tracing.

use crate::{
    hittable::{Hittable, SurfaceHit},
    MaterialId, Ray,
};
use lumen_math::{safe_normalize, safe_sqrt, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: MaterialId,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: MaterialId) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray) -> Option<SurfaceHit> {
        // Solve |offset + t*d|^2 = r^2 with offset measured from the center
        let offset = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let mapped = -offset.dot(ray.direction()) / a;
        let c = (offset.length_squared() - self.radius * self.radius) / a;

        let discriminant = mapped * mapped - c;
        if discriminant < 0.0 {
            return None;
        }

        let extend = safe_sqrt(discriminant);

        // Nearest root first, the far one when the origin is inside
        let mut distance = mapped - extend;
        if distance < 0.0 {
            distance = mapped + extend;
        }
        if distance < 0.0 {
            return None;
        }

        let normal = safe_normalize(ray.direction() * distance + offset);
        Some(SurfaceHit::new(distance, normal))
    }

    fn material(&self) -> MaterialId {
        self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere_at(center: Vec3) -> Sphere {
        Sphere::new(center, 1.0, MaterialId::new(0))
    }

    #[test]
    fn test_sphere_hit_through_center() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 1.0, 3.0));
        let ray = Ray::new(Vec3::new(0.0, 1.0, -3.0), Vec3::Z);

        let hit = sphere.hit(&ray).expect("ray aims at the center");
        // |origin - center| - radius
        assert!((hit.distance - 5.0).abs() < 1e-5);
        assert!(hit.normal.abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }

    #[test]
    fn test_sphere_tangent_is_a_hit() {
        let sphere = unit_sphere_at(Vec3::ZERO);
        let ray = Ray::new(Vec3::new(1.0, 0.0, -5.0), Vec3::Z);

        let hit = sphere.hit(&ray).expect("tangent ray touches the sphere");
        assert!((hit.distance - 5.0).abs() < 1e-5);
        assert!(hit.normal.abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn test_sphere_origin_inside_takes_far_root() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0, MaterialId::new(0));
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let hit = sphere.hit(&ray).expect("exit point");
        assert!((hit.distance - 2.0).abs() < 1e-5);
        assert!(hit.normal.abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, -3.0));

        // Ray pointing away from sphere
        let away = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(sphere.hit(&away).is_none());

        // Ray passing beside it
        let beside = Ray::new(Vec3::new(2.0, 0.0, 0.0), Vec3::NEG_Z);
        assert!(sphere.hit(&beside).is_none());
    }

    #[test]
    fn test_sphere_unnormalized_direction() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, 5.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0));

        let hit = sphere.hit(&ray).expect("hit");
        // t is measured in units of the direction vector
        assert!((hit.distance - 2.0).abs() < 1e-5);
        assert!((ray.at(hit.distance).z - 4.0).abs() < 1e-5);
    }
}
