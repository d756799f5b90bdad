#![deny(unsafe_code)]

pub mod camera;
pub mod config;
pub mod error;
pub mod image;
pub mod material;
pub mod ray;
pub mod scene;
pub mod sphere;
pub mod tracer;
pub mod vec3;

pub use crate::camera::Camera;
pub use crate::config::{SceneFile, Setup};
pub use crate::error::{CameraError, ConfigError, DegenerateVector, RenderError, SceneError};
pub use crate::image::{write_ppm, Image, PpmSink};
pub use crate::material::{Material, Reflection};
pub use crate::ray::Ray;
pub use crate::scene::{MaterialId, Scene};
pub use crate::sphere::{HitRecord, Sphere};
pub use crate::tracer::{color_of, render, render_serial, Background, RenderSettings};

/// The scene rendered when no scene file is given: a mirror ball between two
/// matte ones, on a matte floor.
pub const DEMO_SCENE: &str = include_str!("../scenes/demo.toml");

pub fn demo_scene() -> Result<SceneFile, ConfigError> {
    SceneFile::from_toml(DEMO_SCENE)
}
