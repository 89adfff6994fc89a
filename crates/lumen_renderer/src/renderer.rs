//! Pixel sampling and the parallel render driver.
//!
//! Implements Monte Carlo path tracing with:
//! - Jittered multi-sampling per pixel
//! - Rejection of NaN/infinite samples
//! - Row-parallel rendering on a rayon pool, one seeded stream per worker

use crate::integrator::evaluate;
use crate::row::{render_row, RowResult};
use crate::sampling::{gen_f32, worker_rng};
use crate::{Color, PinholeCamera, Scene};
use lumen_math::is_invalid;
use rand::rngs::StdRng;
use rand::RngCore;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors that can occur while rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Color buffer holds {actual} pixels, image needs {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Paths whose throughput luminance drops below this are terminated
    pub luminance_cutoff: f32,
    /// Worker count; `None` uses the available hardware parallelism
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 64,
            max_depth: 128,
            luminance_cutoff: 0.01,
            threads: None,
        }
    }
}

impl RenderConfig {
    /// Number of workers to use for an image with `rows` rows.
    pub fn worker_count(&self, rows: u32) -> usize {
        let requested = self.threads.unwrap_or_else(rayon::current_num_threads);
        requested.clamp(1, rows.max(1) as usize)
    }
}

/// Averaged color of one pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelEstimate {
    pub color: Color,
    pub invalid_samples: u32,
}

/// Render a single pixel with multi-sampling.
///
/// Invalid samples are dropped from both the sum and the count. A pixel with
/// no valid samples is black.
pub fn render_pixel(
    scene: &Scene,
    camera: &PinholeCamera,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> PixelEstimate {
    let mut sum = Color::ZERO;
    let mut count = 0u32;
    let mut invalid_samples = 0u32;

    for _ in 0..config.samples_per_pixel {
        let jitter_x = gen_f32(rng);
        let jitter_y = gen_f32(rng);
        let ray = camera.ray(x, y, jitter_x, jitter_y);

        let sample = evaluate(scene, &ray, Color::ONE, 0, config, rng);
        if is_invalid(sample) {
            invalid_samples += 1;
            continue;
        }
        sum += sample;
        count += 1;
    }

    let color = if count == 0 {
        Color::ZERO
    } else {
        sum / count as f32
    };

    PixelEstimate {
        color,
        invalid_samples,
    }
}

/// Simple image buffer for storing render output.
///
/// Row-major, linear RGB, row 0 at the bottom.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Copy a rendered row into place.
    pub fn write_row(&mut self, row: &RowResult) {
        write_row(&mut self.pixels, self.width, row);
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Summary of a finished render.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderStats {
    pub workers: usize,
    pub rows: u32,
    pub invalid_samples: u64,
    pub elapsed: Duration,
}

fn write_row(buffer: &mut [Color], width: u32, row: &RowResult) {
    let start = row.buffer_offset(width);
    buffer[start..start + row.pixels.len()].copy_from_slice(&row.pixels);
}

/// Render the scene into a caller-owned row-major buffer.
///
/// A fixed pool of `config.worker_count` threads is created for this call.
/// Worker `i` owns a stream seeded with `i` and claims rows from a shared
/// atomic counter until none are left, writing each finished row straight
/// into its slot of `buffer`. Since row claiming is dynamic, output is only
/// bit-reproducible with a single worker.
pub fn render_into(
    scene: &Scene,
    camera: &PinholeCamera,
    config: &RenderConfig,
    buffer: &mut [Color],
) -> RenderResult<RenderStats> {
    let expected = camera.pixel_count();
    if buffer.len() != expected {
        return Err(RenderError::BufferSize {
            expected,
            actual: buffer.len(),
        });
    }

    let width = camera.width();
    let height = camera.height();
    if expected == 0 {
        return Ok(RenderStats::default());
    }

    let workers = config.worker_count(height);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("lumen-worker-{i}"))
        .build()?;

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}, {} workers, {} primitives",
        width,
        height,
        config.samples_per_pixel,
        config.max_depth,
        workers,
        scene.len()
    );

    let start = Instant::now();
    let streams: Vec<StdRng> = (0..workers).map(worker_rng).collect();
    let next_row = AtomicU32::new(0);
    let invalid_samples = AtomicU64::new(0);
    let film = Mutex::new(buffer);

    pool.scope(|s| {
        for (ordinal, mut rng) in streams.into_iter().enumerate() {
            let next_row = &next_row;
            let invalid_samples = &invalid_samples;
            let film = &film;
            s.spawn(move |_| {
                let mut rows = 0;
                loop {
                    let y = next_row.fetch_add(1, Ordering::Relaxed);
                    if y >= height {
                        break;
                    }
                    let row = render_row(scene, camera, y, config, &mut rng);
                    invalid_samples.fetch_add(row.invalid_samples, Ordering::Relaxed);

                    // Rows never overlap, so a poisoned lock still guards valid data
                    let mut buffer = film.lock().unwrap_or_else(PoisonError::into_inner);
                    write_row(&mut buffer[..], width, &row);
                    rows += 1;
                }
                log::debug!("Worker {} rendered {} rows", ordinal, rows);
            });
        }
    });

    let mut stats = RenderStats {
        workers,
        rows: height,
        invalid_samples: invalid_samples.into_inner(),
        ..RenderStats::default()
    };
    stats.elapsed = start.elapsed();

    if stats.invalid_samples > 0 {
        log::warn!("Discarded {} invalid samples", stats.invalid_samples);
    }
    log::info!("Rendered in {:?}", stats.elapsed);

    Ok(stats)
}

/// Render the scene in parallel into a new image buffer.
pub fn render(
    scene: &Scene,
    camera: &PinholeCamera,
    config: &RenderConfig,
) -> RenderResult<(ImageBuffer, RenderStats)> {
    let mut image = ImageBuffer::new(camera.width(), camera.height());
    let stats = render_into(scene, camera, config, &mut image.pixels)?;
    Ok((image, stats))
}

/// Render the entire scene on the calling thread from a single stream.
///
/// Rows are rendered bottom to top, which matches what a single worker of
/// `render_into` does with the same stream.
pub fn render_serial(
    scene: &Scene,
    camera: &PinholeCamera,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> ImageBuffer {
    let mut image = ImageBuffer::new(camera.width(), camera.height());

    for y in 0..camera.height() {
        let row = render_row(scene, camera, y, config, rng);
        image.write_row(&row);
    }

    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Vec3};

    fn test_scene() -> Scene {
        let mut scene = Scene::new();
        let ground = scene.add_material(Material::lambertian(Color::splat(0.5)));
        let mirror = scene.add_material(Material::mirror().with_albedo(0.8));
        let light = scene.add_material(Material::emissive(Color::ONE));

        scene.insert_plane(Vec3::Y, 0.0, ground).unwrap();
        scene.insert_sphere(Vec3::new(0.0, 1.0, 3.0), 1.0, mirror).unwrap();
        scene.insert_sphere(Vec3::new(0.0, 3.0, 3.0), 0.3, light).unwrap();
        scene
    }

    fn quick_config(threads: usize) -> RenderConfig {
        RenderConfig {
            samples_per_pixel: 4,
            max_depth: 8,
            threads: Some(threads),
            ..RenderConfig::default()
        }
    }

    #[test]
    fn test_render_pixel_empty_scene_is_sky() {
        let scene = Scene::new();
        let camera = PinholeCamera::new(10, 10);
        let config = quick_config(1);

        let estimate = render_pixel(&scene, &camera, 5, 5, &config, &mut worker_rng(0));
        assert_eq!(estimate.invalid_samples, 0);
        // Looking roughly down +z the sky is mostly blue channel
        assert!(estimate.color.z > 0.9);
        assert!(estimate.color.x < 0.05 && estimate.color.y < 0.05);
    }

    #[test]
    fn test_render_pixel_zero_samples_is_black() {
        let scene = test_scene();
        let camera = PinholeCamera::new(10, 10);
        let config = RenderConfig {
            samples_per_pixel: 0,
            ..RenderConfig::default()
        };

        let estimate = render_pixel(&scene, &camera, 5, 5, &config, &mut worker_rng(0));
        assert_eq!(estimate.color, Color::ZERO);
    }

    /// Ground plane emitting infinite radiance, so every ray that hits it
    /// produces a non-finite sample.
    fn infinite_ground() -> Scene {
        let mut scene = Scene::new();
        let hot = scene.add_material(Material::emissive(Color::splat(f32::INFINITY)));
        scene.insert_plane(Vec3::Y, 0.0, hot).unwrap();
        scene
    }

    #[test]
    fn test_render_pixel_drops_invalid_samples() {
        let scene = infinite_ground();
        // A single pixel spans the horizon: half its rays see the ground
        let camera = PinholeCamera::new(1, 1);
        let config = RenderConfig {
            samples_per_pixel: 64,
            ..quick_config(1)
        };

        let estimate = render_pixel(&scene, &camera, 0, 0, &config, &mut worker_rng(7));

        // Replay the same jitter and average only the rays that reach the sky
        let mut rng = worker_rng(7);
        let mut sum = Color::ZERO;
        let mut valid = 0u32;
        let mut invalid = 0u32;
        for _ in 0..config.samples_per_pixel {
            let jitter_x = gen_f32(&mut rng);
            let jitter_y = gen_f32(&mut rng);
            let ray = camera.ray(0, 0, jitter_x, jitter_y);
            if scene.intersect(&ray).is_some() {
                invalid += 1;
            } else {
                sum += crate::escape(ray.direction);
                valid += 1;
            }
        }

        assert!(invalid > 0 && valid > 0);
        assert_eq!(estimate.invalid_samples, invalid);
        assert!(!is_invalid(estimate.color));
        assert!(estimate.color.abs_diff_eq(sum / valid as f32, 1e-5));
    }

    #[test]
    fn test_render_pixel_all_invalid_is_black() {
        let mut scene = Scene::new();
        let hot = scene.add_material(Material::emissive(Color::splat(f32::INFINITY)));
        let camera = PinholeCamera::new(4, 4);
        // Every ray leaves through the far side of a sphere around the camera
        scene.insert_sphere(camera.origin(), 10.0, hot).unwrap();

        let estimate = render_pixel(&scene, &camera, 1, 2, &quick_config(1), &mut worker_rng(0));
        assert_eq!(estimate.invalid_samples, 4);
        assert_eq!(estimate.color, Color::ZERO);
    }

    #[test]
    fn test_render_into_keeps_invalid_samples_out_of_buffer() {
        let scene = infinite_ground();
        let camera = PinholeCamera::new(4, 4);
        let mut buffer = vec![Color::splat(-1.0); camera.pixel_count()];

        let stats = render_into(&scene, &camera, &quick_config(2), &mut buffer).unwrap();

        assert!(stats.invalid_samples > 0);
        assert!(buffer.iter().all(|c| !is_invalid(*c) && c.min_element() >= 0.0));
        // Rows below the horizon only ever see the ground
        assert_eq!(buffer[0], Color::ZERO);
        // The top row only ever sees the sky
        assert!(buffer[12].length() > 0.0);
    }

    #[test]
    fn test_render_into_rejects_wrong_buffer() {
        let scene = test_scene();
        let camera = PinholeCamera::new(8, 4);
        let mut buffer = vec![Color::ZERO; 31];

        let err = render_into(&scene, &camera, &quick_config(2), &mut buffer).unwrap_err();
        assert!(matches!(
            err,
            RenderError::BufferSize {
                expected: 32,
                actual: 31
            }
        ));
    }

    #[test]
    fn test_single_worker_matches_serial() {
        let scene = test_scene();
        let camera = PinholeCamera::new(16, 8);
        let config = quick_config(1);

        let (parallel, stats) = render(&scene, &camera, &config).unwrap();
        let serial = render_serial(&scene, &camera, &config, &mut worker_rng(0));

        assert_eq!(stats.workers, 1);
        assert_eq!(stats.rows, 8);
        assert_eq!(parallel.pixels, serial.pixels);
    }

    #[test]
    fn test_every_row_is_written() {
        let scene = Scene::new();
        let camera = PinholeCamera::new(6, 9);
        let config = quick_config(4);

        let mut buffer = vec![Color::splat(-1.0); camera.pixel_count()];
        let stats = render_into(&scene, &camera, &config, &mut buffer).unwrap();

        assert_eq!(stats.workers, 4);
        // The sky is never negative, so every slot was overwritten
        assert!(buffer.iter().all(|c| c.min_element() >= 0.0));
    }

    #[test]
    fn test_worker_count_never_exceeds_rows() {
        let config = RenderConfig {
            threads: Some(16),
            ..RenderConfig::default()
        };
        assert_eq!(config.worker_count(3), 3);
        assert_eq!(config.worker_count(0), 1);

        let config = RenderConfig {
            threads: Some(0),
            ..RenderConfig::default()
        };
        assert_eq!(config.worker_count(10), 1);
    }

    #[test]
    fn test_image_buffer_get_set() {
        let mut image = ImageBuffer::new(4, 3);
        image.set(2, 1, Color::ONE);

        assert_eq!(image.get(2, 1), Color::ONE);
        assert_eq!(image.pixels[6], Color::ONE);
        assert_eq!(image.get(0, 0), Color::ZERO);
    }
}
