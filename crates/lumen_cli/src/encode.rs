//! Image encoding: gamma, clamping, quantization and file output.

use anyhow::{Context, Result};
use image::RgbImage;
use lumen_renderer::{Color, ImageBuffer};
use std::path::Path;

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit sRGB-ish RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let convert = |v: f32| (255.0 * linear_to_gamma(v.clamp(0.0, 1.0))) as u8;
    [convert(color.x), convert(color.y), convert(color.z)]
}

/// Quantize a render into an 8-bit image.
///
/// Buffer row 0 is the bottom of the picture, so rows are flipped.
pub fn to_rgb_image(image: &ImageBuffer) -> RgbImage {
    RgbImage::from_fn(image.width, image.height, |x, y| {
        let color = image.get(x, image.height - 1 - y);
        image::Rgb(color_to_rgb(color))
    })
}

/// Encode and write a render to `path`.
pub fn save(image: &ImageBuffer, path: &Path) -> Result<()> {
    to_rgb_image(image)
        .save(path)
        .with_context(|| format!("Failed to write image to {}", path.display()))
}
