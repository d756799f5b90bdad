use log::{trace, warn};
use rand::prelude::*;
use serde::Deserialize;

use crate::ray::Ray;
use crate::sphere::HitRecord;
use crate::vec3::{reflect, Vec3};

/// Upper bound on rejection-sampling attempts for a diffuse bounce. A uniform
/// source accepts about half of its candidates, so this only trips on a broken
/// random source.
pub const MAX_DIFFUSE_ATTEMPTS: usize = 1024;

/// Material options for a rendered object.
///
/// Materials hold no state besides their color, so one value can be shared by
/// any number of spheres and used from any number of threads.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Material {
    /// A matte surface that scatters light in a random direction on the
    /// outside of the surface.
    ///
    /// Directions are drawn uniformly from the hemisphere around the normal
    /// (restricted from a cube), *not* cosine-weighted, so this is only an
    /// approximation of [Lambertian reflectance][lambert].
    ///
    /// [lambert]: https://en.wikipedia.org/wiki/Lambertian_reflectance
    Diffuse {
        /// The amount of light energy reflected in each color component, so
        /// `Vec3(1., 1., 1.)` is a white surface, and `Vec3(0., 0., 0.)` is
        /// totally black.
        color: Vec3,
    },
    /// A perfect mirror.
    Specular {
        /// Tint applied to the mirrored light.
        color: Vec3,
    },
}

/// The outcome of light bouncing off a surface: where it goes next, and how
/// much of each color component survives.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Reflection {
    pub ray: Ray,
    pub tint: Vec3,
}

impl Material {
    /// The material's base color.
    pub fn color(&self) -> Vec3 {
        match self {
            Material::Diffuse { color } | Material::Specular { color } => *color,
        }
    }

    /// Reflects light arriving along `ray` off the surface described by
    /// `hit`.
    ///
    /// Returns `None` when the bounce contributes nothing to the image: either
    /// the mirrored direction degenerated, or the diffuse sampler could not
    /// find a direction within `MAX_DIFFUSE_ATTEMPTS`.
    pub fn reflect(&self, ray: &Ray, hit: &HitRecord, rng: &mut impl Rng) -> Option<Reflection> {
        debug_assert!(
            (hit.normal.length() - 1.).abs() < 1e-3,
            "hit normal {:?} is not unit length",
            hit.normal
        );

        match self {
            Material::Diffuse { color } => {
                let direction = match sample_hemisphere(hit.normal, rng) {
                    Some(d) => d,
                    None => {
                        warn!(
                            "no diffuse direction found after {} attempts",
                            MAX_DIFFUSE_ATTEMPTS
                        );
                        return None;
                    }
                };
                Some(Reflection {
                    ray: Ray {
                        origin: hit.p,
                        direction,
                    },
                    tint: *color,
                })
            }
            Material::Specular { color } => {
                let direction = match reflect(ray.direction, hit.normal).normalize() {
                    Ok(d) => d,
                    Err(e) => {
                        trace!("mirror reflection at {:?}: {}", hit.p, e);
                        return None;
                    }
                };
                Some(Reflection {
                    ray: Ray {
                        origin: hit.p,
                        direction,
                    },
                    tint: *color,
                })
            }
        }
    }
}

/// Picks a random unit direction on the same side of the surface as `normal`.
///
/// Candidates are drawn from the cube `[-1,1)³` and rejected until one is
/// non-zero and not pointing into the surface.
fn sample_hemisphere(normal: Vec3, rng: &mut impl Rng) -> Option<Vec3> {
    for _ in 0..MAX_DIFFUSE_ATTEMPTS {
        let candidate = Vec3::random_in(-1.0..1.0, rng);
        if candidate.is_zero() || candidate.dot(normal) < 0. {
            continue;
        }
        if let Ok(dir) = candidate.normalize() {
            return Some(dir);
        }
    }
    None
}
