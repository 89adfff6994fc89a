//! Surface materials: BSDF sampling and emission.
//!
//! A material turns an outgoing direction and a surface normal into a sampled
//! incident direction plus a throughput weight. The weight is defined so that
//! `weight * |cos(incident, normal)|` is an unbiased estimate of the reflected
//! radiance transfer; the integrator applies the cosine.

use crate::sampling::{gen_f32, random_on_unit_sphere};
use lumen_math::{almost_zero, reflect, safe_normalize, safe_sqrt, Vec3};
use rand::RngCore;
use std::f32::consts::FRAC_1_PI;

/// Color type alias (linear RGB)
pub type Color = Vec3;

/// Index of a material in a scene's material table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(u32);

impl MaterialId {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for MaterialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sampled scattering event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BsdfSample {
    /// Direction light arrives from, pointing away from the surface
    pub incident: Vec3,
    /// Throughput weight before the cosine term
    pub weight: Color,
}

impl BsdfSample {
    /// A sample that carries no energy.
    #[inline]
    pub fn absorbed(incident: Vec3) -> Self {
        Self {
            incident,
            weight: Color::ZERO,
        }
    }
}

/// The closed set of surface models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Diffuse reflection, cosine-weighted importance sampling.
    Lambertian { reflectance: Color, albedo: f32 },
    /// Perfect mirror.
    SpecularReflection { albedo: f32 },
    /// Smooth dielectric interface choosing reflection or refraction by the
    /// Fresnel reflectance. `eta` is the outside index over the inside index,
    /// so glass in air is `1.0 / 1.5`.
    SpecularFresnel { eta: f32, albedo: f32 },
    /// Light source. Emits `radiance` and scatters nothing.
    Emissive { radiance: Color },
    /// Absorbs everything.
    Absorbing,
}

impl Material {
    pub fn lambertian(reflectance: Color) -> Self {
        Material::Lambertian {
            reflectance,
            albedo: 1.0,
        }
    }

    pub fn mirror() -> Self {
        Material::SpecularReflection { albedo: 1.0 }
    }

    pub fn fresnel(eta: f32) -> Self {
        Material::SpecularFresnel { eta, albedo: 1.0 }
    }

    pub fn emissive(radiance: Color) -> Self {
        Material::Emissive { radiance }
    }

    /// Set the scalar multiplier applied after the BSDF weight.
    ///
    /// Emissive and absorbing materials have no albedo; they are returned unchanged.
    pub fn with_albedo(self, albedo: f32) -> Self {
        match self {
            Material::Lambertian { reflectance, .. } => Material::Lambertian {
                reflectance,
                albedo,
            },
            Material::SpecularReflection { .. } => Material::SpecularReflection { albedo },
            Material::SpecularFresnel { eta, .. } => Material::SpecularFresnel { eta, albedo },
            other => other,
        }
    }

    /// Sample an incident direction for light leaving along `outgoing`.
    pub fn sample(&self, outgoing: Vec3, normal: Vec3, rng: &mut dyn RngCore) -> BsdfSample {
        match *self {
            Material::Lambertian {
                reflectance,
                albedo,
            } => {
                let sample = sample_lambertian(outgoing, normal, rng);
                scaled(sample, reflectance * albedo)
            }
            Material::SpecularReflection { albedo } => {
                let sample = sample_specular_reflection(outgoing, normal);
                scaled(sample, Color::splat(albedo))
            }
            Material::SpecularFresnel { eta, albedo } => {
                let sample = sample_specular_fresnel(outgoing, normal, eta, rng);
                scaled(sample, Color::splat(albedo))
            }
            Material::Emissive { .. } | Material::Absorbing => BsdfSample::absorbed(normal),
        }
    }

    /// Radiance emitted by this material.
    pub fn emitted(&self) -> Color {
        match *self {
            Material::Emissive { radiance } => radiance,
            _ => Color::ZERO,
        }
    }

    pub fn is_emissive(&self) -> bool {
        matches!(self, Material::Emissive { .. })
    }
}

#[inline]
fn scaled(sample: BsdfSample, factor: Color) -> BsdfSample {
    BsdfSample {
        incident: sample.incident,
        weight: sample.weight * factor,
    }
}

/// Weight of a delta BSDF: cancels the cosine the integrator reapplies.
#[inline]
fn specular_sample(incident: Vec3, normal: Vec3) -> BsdfSample {
    let correction = incident.dot(normal).abs();
    if almost_zero(correction) {
        return BsdfSample::absorbed(incident);
    }
    BsdfSample {
        incident,
        weight: Color::splat(1.0 / correction),
    }
}

/// Flip `incident` onto the same side of the surface as `outgoing`.
#[inline]
fn make_same_side(outgoing: Vec3, normal: Vec3, incident: Vec3) -> Vec3 {
    let dot_o = outgoing.dot(normal);
    let dot_i = incident.dot(normal);
    if dot_o * dot_i < 0.0 {
        reflect(-incident, normal)
    } else {
        incident
    }
}

/// Unit-reflectance Lambertian sample.
fn sample_lambertian(outgoing: Vec3, normal: Vec3, rng: &mut dyn RngCore) -> BsdfSample {
    let incident = safe_normalize(normal + random_on_unit_sphere(rng));
    let incident = make_same_side(outgoing, normal, incident);

    let evaluated = FRAC_1_PI;
    let pdf = incident.dot(normal).abs() * FRAC_1_PI;
    if almost_zero(pdf) {
        return BsdfSample::absorbed(incident);
    }

    BsdfSample {
        incident,
        weight: Color::splat(evaluated / pdf),
    }
}

fn sample_specular_reflection(outgoing: Vec3, normal: Vec3) -> BsdfSample {
    specular_sample(reflect(outgoing, normal), normal)
}

fn sample_specular_fresnel(
    outgoing: Vec3,
    normal: Vec3,
    eta: f32,
    rng: &mut dyn RngCore,
) -> BsdfSample {
    let cos_o = outgoing.dot(normal);
    let eta = if cos_o < 0.0 { 1.0 / eta } else { eta };

    let cos_i = fresnel_cos_i(eta, cos_o);
    let reflectance = fresnel_reflectance(eta, cos_o, cos_i);

    // Picking the branch with the Fresnel probability cancels the Fresnel term
    let incident = if gen_f32(rng) < reflectance {
        safe_normalize(reflect(outgoing, normal))
    } else {
        fresnel_refract(eta, cos_i, outgoing, normal)
    };

    specular_sample(incident, normal)
}

/// Cosine of the refracted direction, signed to lie on the opposite side of
/// the normal from `cos_o`. Zero on total internal reflection.
pub(crate) fn fresnel_cos_i(eta: f32, cos_o: f32) -> f32 {
    let sin_o2 = 1.0 - cos_o * cos_o;
    let sin_i2 = eta * eta * sin_o2;
    if sin_i2 >= 1.0 {
        return 0.0;
    }

    let cos_i = safe_sqrt(1.0 - sin_i2);
    if cos_o > 0.0 {
        -cos_i
    } else {
        cos_i
    }
}

/// Unpolarized dielectric Fresnel reflectance (mean of s and p terms).
pub(crate) fn fresnel_reflectance(eta: f32, cos_o: f32, cos_i: f32) -> f32 {
    if almost_zero(cos_i) {
        return 1.0;
    }

    let cos_o = cos_o.abs();
    let cos_i = cos_i.abs();

    let para0 = cos_o * eta;
    let para1 = cos_i;
    let perp0 = cos_o;
    let perp1 = cos_i * eta;

    let para = (para0 - para1) / (para0 + para1);
    let perp = (perp0 - perp1) / (perp0 + perp1);
    (para * para + perp * perp) / 2.0
}

fn fresnel_refract(eta: f32, cos_i: f32, outgoing: Vec3, normal: Vec3) -> Vec3 {
    let cos_o = outgoing.dot(normal);
    safe_normalize(normal * (eta * cos_o + cos_i) - outgoing * eta)
}
