//! Axis-aligned box primitive.
//!
//! Uses the slab method, but unlike a bounding-volume test it also tracks
//! which axis produced the entry and exit bounds so it can report the face
//! normal of whichever one is the actual hit.

use crate::{
    hittable::{Hittable, SurfaceHit},
    MaterialId, Ray,
};
use lumen_math::Vec3;

/// A solid axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBox {
    min: Vec3,
    max: Vec3,
    material: MaterialId,
}

impl AxisBox {
    /// Create a box from two opposite corners (in any order).
    pub fn from_corners(a: Vec3, b: Vec3, material: MaterialId) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            material,
        }
    }

    /// Create a box from its center and full size along each axis.
    pub fn from_center(center: Vec3, size: Vec3, material: MaterialId) -> Self {
        let extend = size.abs() / 2.0;
        Self::from_corners(center - extend, center + extend, material)
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }
}

/// Unit vector along `axis` with the given sign.
#[inline]
fn axis_normal(axis: usize, sign: f32) -> Vec3 {
    let mut normal = Vec3::ZERO;
    normal[axis] = sign;
    normal
}

impl Hittable for AxisBox {
    fn hit(&self, ray: &Ray) -> Option<SurfaceHit> {
        let direction = ray.direction();
        let direction_r = direction.recip();
        let lengths0 = (self.min - ray.origin()) * direction_r;
        let lengths1 = (self.max - ray.origin()) * direction_r;

        let mut near = f32::NEG_INFINITY;
        let mut near_axis = 0;
        let mut far = f32::INFINITY;
        let mut far_axis = 0;

        for axis in 0..3 {
            let (entry, exit) = if lengths0[axis] <= lengths1[axis] {
                (lengths0[axis], lengths1[axis])
            } else {
                (lengths1[axis], lengths0[axis])
            };

            // Strict comparisons keep the first axis on ties
            if axis == 0 || entry > near {
                near = entry;
                near_axis = axis;
            }
            if axis == 0 || exit < far {
                far = exit;
                far_axis = axis;
            }
        }

        if far < near || far < 0.0 {
            return None;
        }

        if near >= 0.0 {
            // Entering: face points against the ray
            let sign = -direction[near_axis].signum();
            Some(SurfaceHit::new(near, axis_normal(near_axis, sign)))
        } else {
            // Origin inside: leave through the far face
            let sign = direction[far_axis].signum();
            Some(SurfaceHit::new(far, axis_normal(far_axis, sign)))
        }
    }

    fn material(&self) -> MaterialId {
        self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> AxisBox {
        AxisBox::from_center(Vec3::ZERO, Vec3::splat(2.0), MaterialId::new(0))
    }

    #[test]
    fn test_box_from_center() {
        let b = AxisBox::from_center(Vec3::new(2.0, 1.1, 3.0), Vec3::new(2.0, 2.0, 0.5), MaterialId::new(0));
        assert!(b.min().abs_diff_eq(Vec3::new(1.0, 0.1, 2.75), 1e-6));
        assert!(b.max().abs_diff_eq(Vec3::new(3.0, 2.1, 3.25), 1e-6));
    }

    #[test]
    fn test_box_hit_from_outside() {
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
        let hit = cube().hit(&ray).expect("hit");

        assert!((hit.distance - 4.0).abs() < 1e-6);
        assert_eq!(hit.normal, Vec3::NEG_X);
    }

    #[test]
    fn test_box_hit_on_y_face() {
        let ray = Ray::new(Vec3::new(0.2, 5.0, -0.3), Vec3::NEG_Y);
        let hit = cube().hit(&ray).expect("hit");

        assert!((hit.distance - 4.0).abs() < 1e-6);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn test_box_origin_inside_reports_far_exit() {
        let ray = Ray::new(Vec3::new(0.5, 0.0, 0.0), Vec3::X);
        let hit = cube().hit(&ray).expect("exit");

        assert!((hit.distance - 0.5).abs() < 1e-6);
        assert_eq!(hit.normal, Vec3::X);

        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.25), Vec3::NEG_Z);
        let hit = cube().hit(&ray).expect("exit");

        assert!((hit.distance - 1.25).abs() < 1e-6);
        assert_eq!(hit.normal, Vec3::NEG_Z);
    }

    #[test]
    fn test_box_diagonal_inside_exit_axis() {
        // Leaves through the +y face first
        let ray = Ray::new(Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.6, 0.8, 0.0));
        let hit = cube().hit(&ray).expect("exit");

        assert!((hit.distance - 0.625).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn test_box_miss() {
        let beside = Ray::new(Vec3::new(-5.0, 3.0, 0.0), Vec3::X);
        assert!(cube().hit(&beside).is_none());

        let behind = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::X);
        assert!(cube().hit(&behind).is_none());
    }
}
