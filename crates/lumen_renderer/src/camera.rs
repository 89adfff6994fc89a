//! Pinhole camera for primary ray generation.

use crate::Ray;
use lumen_math::{safe_normalize, Vec3};

/// Pinhole camera looking down +Z from a fixed origin.
///
/// Screen coordinates are normalized by the image width on both axes, so
/// pixels are square and the horizontal field of view is fixed. Row 0 is the
/// bottom of the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinholeCamera {
    origin: Vec3,
    width: u32,
    height: u32,
}

impl PinholeCamera {
    /// Create a camera at the default position.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            origin: Vec3::new(0.0, 1.0, -3.0),
            width,
            height,
        }
    }

    /// Set camera position.
    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels in the image.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Generate the ray through pixel (x, y) offset by `jitter` in [0, 1)^2.
    pub fn ray(&self, x: u32, y: u32, jitter_x: f32, jitter_y: f32) -> Ray {
        let width = self.width as f32;
        let height = self.height as f32;

        let u = (x as f32 + jitter_x - width / 2.0) / width;
        let v = (y as f32 + jitter_y - height / 2.0) / width;

        Ray::new(self.origin, safe_normalize(Vec3::new(u, v, 1.0)))
    }
}
