//! Row-based work units for the parallel driver.
//!
//! Workers claim whole image rows and hand back a `RowResult`, which is
//! written into its slot of the shared buffer as soon as it is done.

use crate::renderer::render_pixel;
use crate::{Color, PinholeCamera, RenderConfig, Scene};
use rand::RngCore;

/// Result of rendering one image row.
#[derive(Debug, Clone)]
pub struct RowResult {
    /// Row index (0 is the bottom of the image)
    pub y: u32,
    /// Pixel colors, left to right
    pub pixels: Vec<Color>,
    /// Samples dropped for being NaN or infinite
    pub invalid_samples: u64,
}

impl RowResult {
    /// Offset of this row's first pixel in a row-major buffer.
    pub fn buffer_offset(&self, width: u32) -> usize {
        self.y as usize * width as usize
    }
}

/// Render a single row, drawing all samples from `rng`.
pub fn render_row(
    scene: &Scene,
    camera: &PinholeCamera,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> RowResult {
    let mut pixels = Vec::with_capacity(camera.width() as usize);
    let mut invalid_samples = 0;

    for x in 0..camera.width() {
        let estimate = render_pixel(scene, camera, x, y, config, rng);
        invalid_samples += u64::from(estimate.invalid_samples);
        pixels.push(estimate.color);
    }

    RowResult {
        y,
        pixels,
        invalid_samples,
    }
}
