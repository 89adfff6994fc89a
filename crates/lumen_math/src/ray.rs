use crate::Vec3;

/// Distance a continuation ray is pushed along its new direction so it does
/// not immediately re-hit the surface it left.
pub const BOUNCE_OFFSET: f32 = 1e-4;

/// A ray in 3D space with origin and direction.
///
/// The direction must be non-zero. Intersection routines divide by its
/// components, so a zero direction is a caller error, not a recoverable one.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the origin point of the ray.
    ///
    /// Note: Since `origin` is public, you can also access it directly via `ray.origin`.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    ///
    /// Note: Since `direction` is public, you can also access it directly via `ray.direction`.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Spawn a continuation ray from the point at `distance` heading along
    /// `direction`, offset by `BOUNCE_OFFSET`.
    #[inline]
    pub fn bounce(&self, distance: f32, direction: Vec3) -> Ray {
        let point = self.at(distance) + direction * BOUNCE_OFFSET;
        Ray::new(point, direction)
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::Z,
        }
    }
}
