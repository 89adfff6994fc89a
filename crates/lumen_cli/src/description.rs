//! JSON scene descriptions.
//!
//! Materials are declared by name and referenced by primitives; building the
//! description resolves names to ids and hands the geometry to the scene.

use anyhow::{Context, Result};
use lumen_renderer::{Color, Material, MaterialId, Scene, Vec3};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

fn one() -> f32 {
    1.0
}

/// Material entry, tagged by `type`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    Lambertian {
        reflectance: [f32; 3],
        #[serde(default = "one")]
        albedo: f32,
    },
    Mirror {
        #[serde(default = "one")]
        albedo: f32,
    },
    Fresnel {
        eta: f32,
        #[serde(default = "one")]
        albedo: f32,
    },
    Emissive {
        radiance: [f32; 3],
    },
    Absorbing,
}

impl MaterialDesc {
    fn to_material(&self) -> Material {
        match *self {
            MaterialDesc::Lambertian {
                reflectance,
                albedo,
            } => Material::lambertian(Color::from_array(reflectance)).with_albedo(albedo),
            MaterialDesc::Mirror { albedo } => Material::mirror().with_albedo(albedo),
            MaterialDesc::Fresnel { eta, albedo } => Material::fresnel(eta).with_albedo(albedo),
            MaterialDesc::Emissive { radiance } => Material::emissive(Color::from_array(radiance)),
            MaterialDesc::Absorbing => Material::Absorbing,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NamedMaterial {
    pub name: String,
    #[serde(flatten)]
    pub material: MaterialDesc,
}

/// Primitive entry, tagged by `type`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PrimitiveDesc {
    Sphere {
        center: [f32; 3],
        radius: f32,
        material: String,
    },
    Plane {
        normal: [f32; 3],
        offset: f32,
        material: String,
    },
    Box {
        center: [f32; 3],
        size: [f32; 3],
        material: String,
    },
}

impl PrimitiveDesc {
    fn material(&self) -> &str {
        match self {
            PrimitiveDesc::Sphere { material, .. }
            | PrimitiveDesc::Plane { material, .. }
            | PrimitiveDesc::Box { material, .. } => material,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CameraDesc {
    pub origin: [f32; 3],
}

/// A complete scene file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: Option<CameraDesc>,
    pub materials: Vec<NamedMaterial>,
    pub primitives: Vec<PrimitiveDesc>,
}

impl SceneDescription {
    /// Load a description from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid scene file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Built-in scene: diffuse ground, glass and mirror balls, a glass slab
    /// and a small light above them.
    pub fn reference() -> Self {
        let named = |name: &str, material| NamedMaterial {
            name: name.to_string(),
            material,
        };

        Self {
            camera: Some(CameraDesc {
                origin: [0.0, 1.5, -3.0],
            }),
            materials: vec![
                named(
                    "ground",
                    MaterialDesc::Lambertian {
                        reflectance: [1.0; 3],
                        albedo: 0.5,
                    },
                ),
                named("mirror", MaterialDesc::Mirror { albedo: 0.8 }),
                named(
                    "glass",
                    MaterialDesc::Fresnel {
                        eta: 1.0 / 1.5,
                        albedo: 0.9,
                    },
                ),
                named("light", MaterialDesc::Emissive { radiance: [1.0; 3] }),
            ],
            primitives: vec![
                PrimitiveDesc::Sphere {
                    center: [0.0, 1.0, 3.0],
                    radius: 1.0,
                    material: "glass".into(),
                },
                PrimitiveDesc::Sphere {
                    center: [-2.0, 1.0, 3.0],
                    radius: 1.0,
                    material: "mirror".into(),
                },
                PrimitiveDesc::Sphere {
                    center: [0.0, 3.0, 3.0],
                    radius: 0.3,
                    material: "light".into(),
                },
                PrimitiveDesc::Plane {
                    normal: [0.0, 1.0, 0.0],
                    offset: 0.0,
                    material: "ground".into(),
                },
                PrimitiveDesc::Box {
                    center: [2.0, 1.1, 3.0],
                    size: [2.0, 2.0, 0.5],
                    material: "glass".into(),
                },
            ],
        }
    }

    /// Camera origin, if the description sets one.
    pub fn camera_origin(&self) -> Option<Vec3> {
        self.camera.as_ref().map(|c| Vec3::from_array(c.origin))
    }

    /// Build the scene, resolving material names.
    pub fn build(&self) -> Result<Scene> {
        let mut scene = Scene::new();
        let mut ids: HashMap<&str, MaterialId> = HashMap::new();

        for entry in &self.materials {
            let id = scene.add_material(entry.material.to_material());
            if ids.insert(entry.name.as_str(), id).is_some() {
                anyhow::bail!("Duplicate material name '{}'", entry.name);
            }
        }

        for (index, primitive) in self.primitives.iter().enumerate() {
            let name = primitive.material();
            let id = *ids
                .get(name)
                .with_context(|| format!("Primitive {index} uses unknown material '{name}'"))?;

            let inserted = match *primitive {
                PrimitiveDesc::Sphere { center, radius, .. } => {
                    scene.insert_sphere(Vec3::from_array(center), radius, id)
                }
                PrimitiveDesc::Plane { normal, offset, .. } => {
                    scene.insert_plane(Vec3::from_array(normal), offset, id)
                }
                PrimitiveDesc::Box { center, size, .. } => {
                    scene.insert_box(Vec3::from_array(center), Vec3::from_array(size), id)
                }
            };
            inserted.with_context(|| format!("Invalid primitive {index}"))?;
        }

        log::debug!(
            "Built scene with {} materials and {} primitives",
            scene.materials().len(),
            scene.len()
        );
        Ok(scene)
    }
}
