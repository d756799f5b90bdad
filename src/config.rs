//! Scene description files.
//!
//! A scene file is TOML:
//!
//! ```toml
//! [render]
//! width = 320
//! height = 160
//! background = { kind = "solid", color = [0.1, 0.1, 0.1] }
//!
//! [camera]
//! look_from = [0.0, 1.0, -6.0]
//! look_at = [0.0, 0.0, 0.0]
//! vfov = 40.0
//!
//! [[materials]]
//! name = "mirror"
//! kind = "specular"
//! color = [0.9, 0.9, 0.9]
//!
//! [[spheres]]
//! center = [0.0, 0.0, 0.0]
//! radius = 1.0
//! material = "mirror"
//! ```
//!
//! Every `[render]` field is optional. Materials are named so that several
//! spheres can share one.

use std::collections::HashMap;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::camera::{Camera, CameraSettings};
use crate::error::ConfigError;
use crate::material::Material;
use crate::scene::Scene;
use crate::tracer::RenderSettings;
use crate::vec3::Vec3;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MaterialDef {
    pub name: String,
    #[serde(flatten)]
    pub material: Material,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SphereDef {
    pub center: Vec3,
    pub radius: f32,
    pub material: String,
}

/// The parsed contents of a scene file, before any validation.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneFile {
    #[serde(default)]
    pub render: RenderSettings,
    pub camera: CameraSettings,
    #[serde(default)]
    pub materials: Vec<MaterialDef>,
    #[serde(default)]
    pub spheres: Vec<SphereDef>,
}

/// Everything needed to render: the result of building a `SceneFile`.
#[derive(Clone, Debug)]
pub struct Setup {
    pub scene: Scene,
    pub camera: Camera,
    pub settings: RenderSettings,
}

impl SceneFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        debug!("loaded scene file {}", path.display());
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Resolves material names and validates the scene and camera.
    pub fn build(self) -> Result<Setup, ConfigError> {
        self.render.validate()?;

        let mut scene = Scene::new();
        let mut ids = HashMap::new();
        for def in self.materials {
            if ids.contains_key(&def.name) {
                return Err(ConfigError::DuplicateMaterial(def.name));
            }
            let id = scene.add_material(def.material);
            ids.insert(def.name, id);
        }

        for (index, def) in self.spheres.into_iter().enumerate() {
            let id = *ids
                .get(&def.material)
                .ok_or_else(|| ConfigError::UnknownMaterial {
                    index,
                    name: def.material.clone(),
                })?;
            scene.add_sphere(def.center, def.radius, id)?;
        }

        let camera = self.camera.build(self.render.aspect())?;
        debug!(
            "built scene with {} spheres and {} materials",
            scene.len(),
            scene.materials().len()
        );

        Ok(Setup {
            scene,
            camera,
            settings: self.render,
        })
    }
}
