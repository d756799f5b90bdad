//! Error types for scene construction, rendering and scene-file loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::scene::MaterialId;

/// Returned when asked to normalize a vector that has no direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot normalize a zero-length vector")]
pub struct DegenerateVector;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("material {0:?} is not part of this scene")]
    UnknownMaterial(MaterialId),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CameraError {
    #[error("camera position, target and up vector do not define a view")]
    Degenerate(#[from] DegenerateVector),

    #[error("vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("aspect ratio must be positive, got {0}")]
    InvalidAspect(f32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage { width: usize, height: usize },

    #[error("at least one sample per pixel is required")]
    NoSamples,
}

/// Errors from loading a scene description file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid scene: {0}")]
    Scene(#[from] SceneError),

    #[error("invalid camera: {0}")]
    Camera(#[from] CameraError),

    #[error("invalid render settings: {0}")]
    Render(#[from] RenderError),

    #[error("sphere {index} refers to unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("material '{0}' is defined more than once")]
    DuplicateMaterial(String),
}
