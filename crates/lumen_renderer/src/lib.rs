//! Lumen - CPU Path Tracing
//!
//! A unidirectional Monte Carlo path tracer for scenes built from spheres,
//! planes and axis-aligned boxes.
//!
//! The scene is scanned linearly for the closest hit, materials sample their
//! BSDF from an explicit per-worker random stream, and the integrator is an
//! explicitly bounded loop. The driver renders rows in parallel into a flat,
//! row-major buffer of linear RGB colors; encoding that buffer is left to the
//! caller.

mod axis_box;
mod camera;
mod hittable;
mod integrator;
mod material;
mod plane;
mod renderer;
mod row;
pub mod sampling;
mod scene;
mod sphere;

pub use axis_box::AxisBox;
pub use camera::PinholeCamera;
pub use hittable::{HitRecord, Hittable, SurfaceHit};
pub use integrator::{escape, evaluate, trace_path, PathSample};
pub use material::{BsdfSample, Color, Material, MaterialId};
pub use plane::Plane;
pub use renderer::{
    render, render_into, render_pixel, render_serial, ImageBuffer, PixelEstimate, RenderConfig,
    RenderError, RenderResult, RenderStats,
};
pub use row::{render_row, RowResult};
pub use sampling::{gen_f32, worker_rng};
pub use scene::{Scene, SceneError, SceneResult};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Ray, Vec3};
