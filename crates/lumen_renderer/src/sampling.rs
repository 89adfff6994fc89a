//! Random sampling helpers.
//!
//! All sampling draws from an explicit `RngCore` so that the stream a worker
//! uses is a visible parameter rather than thread-local state.

use lumen_math::{safe_normalize, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Uniform f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Random point in the volume of the unit sphere (rejection sampling).
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(gen_f32(rng), gen_f32(rng), gen_f32(rng)) * 2.0 - Vec3::ONE;
        if p.length_squared() <= 1.0 {
            return p;
        }
    }
}

/// Random point on the surface of the unit sphere.
#[inline]
pub fn random_on_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    safe_normalize(random_in_unit_sphere(rng))
}

/// Random stream for the worker with the given ordinal.
///
/// The ordinal is the seed, so worker N always starts from the same state.
pub fn worker_rng(ordinal: usize) -> StdRng {
    StdRng::seed_from_u64(ordinal as u64)
}
