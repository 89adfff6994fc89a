//! Scene aggregate: material table plus primitive lists.
//!
//! The scene is built once, then shared read-only by every render worker.
//! Intersection is a linear closest-hit scan over all primitives.

use crate::{
    hittable::{HitRecord, Hittable},
    AxisBox, Material, MaterialId, Plane, Ray, Sphere,
};
use lumen_math::{almost_zero, Vec3};
use thiserror::Error;

/// Errors that can occur while building a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Unknown material id {id} (scene has {count} materials)")]
    UnknownMaterial { id: MaterialId, count: usize },

    #[error("Invalid sphere radius: {0}")]
    InvalidRadius(f32),

    #[error("Degenerate plane normal: {0}")]
    DegenerateNormal(Vec3),

    #[error("Non-finite geometry: {0}")]
    NonFinite(Vec3),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// A static scene of spheres, planes and boxes.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    materials: Vec<Material>,
    spheres: Vec<Sphere>,
    planes: Vec<Plane>,
    boxes: Vec<AxisBox>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material and return its id.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let id = MaterialId::new(self.materials.len() as u32);
        self.materials.push(material);
        id
    }

    /// Look up a material by id.
    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.index())
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn insert_sphere(&mut self, center: Vec3, radius: f32, material: MaterialId) -> SceneResult<()> {
        self.check_material(material)?;
        check_finite(center)?;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SceneError::InvalidRadius(radius));
        }

        self.spheres.push(Sphere::new(center, radius, material));
        Ok(())
    }

    /// Insert the plane `dot(p, normal) + offset = 0`.
    ///
    /// A non-unit normal is normalized and the offset scaled to match.
    pub fn insert_plane(&mut self, normal: Vec3, offset: f32, material: MaterialId) -> SceneResult<()> {
        self.check_material(material)?;
        check_finite(normal)?;
        check_finite(Vec3::splat(offset))?;

        let length = normal.length();
        if almost_zero(length) {
            return Err(SceneError::DegenerateNormal(normal));
        }

        self.planes
            .push(Plane::new(normal / length, offset / length, material));
        Ok(())
    }

    /// Insert an axis-aligned box given its center and full size.
    pub fn insert_box(&mut self, center: Vec3, size: Vec3, material: MaterialId) -> SceneResult<()> {
        self.check_material(material)?;
        check_finite(center)?;
        check_finite(size)?;

        self.boxes.push(AxisBox::from_center(center, size, material));
        Ok(())
    }

    /// Insert an axis-aligned box given two opposite corners.
    pub fn insert_box_bounds(&mut self, min: Vec3, max: Vec3, material: MaterialId) -> SceneResult<()> {
        self.check_material(material)?;
        check_finite(min)?;
        check_finite(max)?;

        self.boxes.push(AxisBox::from_corners(min, max, material));
        Ok(())
    }

    /// Find the closest primitive hit by `ray`.
    ///
    /// Only a strictly closer hit replaces the current best, so equal
    /// distances resolve to the first primitive tested.
    pub fn intersect(&self, ray: &Ray) -> Option<HitRecord> {
        let mut closest = None;
        let mut closest_so_far = f32::INFINITY;

        closest_in(&self.spheres, ray, &mut closest_so_far, &mut closest);
        closest_in(&self.planes, ray, &mut closest_so_far, &mut closest);
        closest_in(&self.boxes, ray, &mut closest_so_far, &mut closest);

        closest
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.spheres.len() + self.planes.len() + self.boxes.len()
    }

    /// Check if the scene has no primitives.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn boxes(&self) -> &[AxisBox] {
        &self.boxes
    }

    fn check_material(&self, id: MaterialId) -> SceneResult<()> {
        if id.index() < self.materials.len() {
            Ok(())
        } else {
            Err(SceneError::UnknownMaterial {
                id,
                count: self.materials.len(),
            })
        }
    }
}

fn check_finite(v: Vec3) -> SceneResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(SceneError::NonFinite(v))
    }
}

fn closest_in<T: Hittable>(
    objects: &[T],
    ray: &Ray,
    closest_so_far: &mut f32,
    closest: &mut Option<HitRecord>,
) {
    for object in objects {
        if let Some(hit) = object.hit(ray) {
            if hit.distance.is_finite() && hit.distance < *closest_so_far {
                *closest_so_far = hit.distance;
                *closest = Some(HitRecord {
                    distance: hit.distance,
                    normal: hit.normal,
                    material: object.material(),
                });
            }
        }
    }
}
