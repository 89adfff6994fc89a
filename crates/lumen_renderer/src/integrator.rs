//! Unidirectional path integrator.
//!
//! Traces a path as an explicit loop: each bounce adds the emission seen at
//! the hit (weighted by the throughput that reached it) and multiplies the
//! throughput by the sampled BSDF weight and cosine. Paths end when they
//! escape, hit the depth limit, or carry too little energy to matter.

use crate::{Color, Ray, RenderConfig, Scene};
use lumen_math::{luminance, Vec3};
use rand::RngCore;

/// Outcome of tracing one path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    /// Radiance carried back to the path's origin
    pub radiance: Color,
    /// Number of surface bounces taken
    pub bounces: u32,
}

/// Background seen by rays that leave the scene.
///
/// Component-wise square of the direction: an arbitrary but deterministic sky.
#[inline]
pub fn escape(direction: Vec3) -> Color {
    direction * direction
}

/// Trace a path starting at `depth` with the given accumulated throughput.
pub fn trace_path(
    scene: &Scene,
    ray: &Ray,
    throughput: Color,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> PathSample {
    let mut radiance = Color::ZERO;
    let mut throughput = throughput;
    let mut ray = *ray;
    let mut bounces = 0;

    for _ in depth..config.max_depth {
        let Some(hit) = scene.intersect(&ray) else {
            return PathSample {
                radiance: radiance + throughput * escape(ray.direction),
                bounces,
            };
        };

        // Ids were validated at insert time
        let Some(material) = scene.material(hit.material) else {
            return PathSample { radiance, bounces };
        };

        let outgoing = -ray.direction;
        let sample = material.sample(outgoing, hit.normal, rng);
        radiance += throughput * material.emitted();

        let next = throughput * sample.weight * hit.normal.dot(sample.incident).abs();
        if luminance(next) < config.luminance_cutoff {
            return PathSample { radiance, bounces };
        }

        ray = ray.bounce(hit.distance, sample.incident);
        throughput = next;
        bounces += 1;
    }

    PathSample {
        radiance: radiance + throughput * escape(ray.direction),
        bounces,
    }
}

/// Compute the radiance seen along a ray.
pub fn evaluate(
    scene: &Scene,
    ray: &Ray,
    throughput: Color,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    trace_path(scene, ray, throughput, depth, config, rng).radiance
}
