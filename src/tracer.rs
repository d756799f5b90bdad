//! The recursive ray tracer and its per-pixel driver.
//!
//! Every pixel gets its own random stream, seeded from the render seed and
//! the pixel's coordinates. Pixels therefore don't depend on the order they
//! are computed in, and a parallel render is bit-for-bit the same as a serial
//! one.

use std::time::Instant;

use log::{debug, info};
use rand::prelude::*;
use serde::Deserialize;

use crate::camera::Camera;
use crate::error::RenderError;
use crate::image::Image;
use crate::ray::Ray;
use crate::scene::Scene;
use crate::vec3::Vec3;

/// Smallest `t` accepted for a hit. Bounced rays start exactly on a surface,
/// and rounding would otherwise let them hit it again straight away.
pub const NEAR: f32 = 0.001;

/// What a ray sees when it escapes the scene.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Background {
    /// The same color in every direction.
    Solid { color: Vec3 },
    /// A vertical blend from `bottom` (looking straight down) to `top`
    /// (looking straight up).
    Gradient { bottom: Vec3, top: Vec3 },
}

impl Default for Background {
    fn default() -> Self {
        Background::Gradient {
            bottom: Vec3::from(1.),
            top: Vec3(0.5, 0.7, 1.0),
        }
    }
}

impl Background {
    pub fn color(&self, ray: &Ray) -> Vec3 {
        match self {
            Background::Solid { color } => *color,
            Background::Gradient { bottom, top } => {
                let a = 0.5 * (ray.direction.1 + 1.);
                (1. - a) * *bottom + a * *top
            }
        }
    }
}

/// Render configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    pub width: usize,
    pub height: usize,
    /// Primary rays per pixel, jittered across the pixel and averaged.
    pub samples: usize,
    /// Bounce budget. A path that runs out contributes black.
    pub max_depth: u32,
    pub background: Background,
    /// Whether to gamma-correct (gamma 2) before clamping.
    pub gamma: bool,
    pub seed: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            width: 200,
            height: 100,
            samples: 16,
            max_depth: 8,
            background: Background::default(),
            gamma: true,
            seed: 0xDEADBEEF,
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples == 0 {
            return Err(RenderError::NoSamples);
        }
        Ok(())
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Computes the color seen along `ray` in `scene`, following at most `depth`
/// bounces.
///
/// This is the actual ray-tracing routine.
pub fn color_of(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    background: &Background,
    rng: &mut impl Rng,
) -> Vec3 {
    if depth == 0 {
        return Vec3::default();
    }

    let hit = match scene.hit(ray, NEAR..=f32::INFINITY) {
        Some(hit) => hit,
        None => return background.color(ray),
    };

    match scene.material(hit.material).reflect(ray, &hit, rng) {
        Some(bounce) => bounce.tint * color_of(&bounce.ray, scene, depth - 1, background, rng),
        // Absorbed, or nowhere sensible to go.
        None => Vec3::default(),
    }
}

/// Derives the random seed for pixel `(x, y)`.
pub fn pixel_seed(seed: u64, x: usize, y: usize) -> u64 {
    let coords = ((y as u64) << 32) ^ (x as u64);
    seed ^ coords.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Gamma-corrects (if asked) and clamps a linear color into `[0, 1]`.
pub fn tone_map(col: Vec3, gamma: bool) -> Vec3 {
    let col = if gamma {
        col.map(|c| c.max(0.).sqrt())
    } else {
        col
    };
    col.map(|c| c.clamp(0., 1.))
}

/// Computes the final color of pixel `(x, y)`, where `y = 0` is the bottom
/// row.
pub fn render_pixel(
    x: usize,
    y: usize,
    scene: &Scene,
    camera: &Camera,
    settings: &RenderSettings,
) -> Vec3 {
    let mut rng = SmallRng::seed_from_u64(pixel_seed(settings.seed, x, y));
    let (nx, ny) = (settings.width as f32, settings.height as f32);

    let col: Vec3 = (0..settings.samples)
        .map(|_| {
            let u = (x as f32 + rng.gen::<f32>()) / nx;
            let v = (y as f32 + rng.gen::<f32>()) / ny;
            let r = camera.get_ray(u, v);
            color_of(&r, scene, settings.max_depth, &settings.background, &mut rng)
        })
        .sum();

    tone_map(col / settings.samples as f32, settings.gamma)
}

/// Renders the whole image, spreading rows across the rayon thread pool.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    settings: &RenderSettings,
) -> Result<Image, RenderError> {
    settings.validate()?;
    log_start(scene, settings);

    let start = Instant::now();
    let image = Image::par_compute(settings.width, settings.height, |x, y| {
        render_pixel(x, y, scene, camera, settings)
    });
    info!("render finished in {:.2?}", start.elapsed());

    Ok(image)
}

/// Renders the whole image on the calling thread.
pub fn render_serial(
    scene: &Scene,
    camera: &Camera,
    settings: &RenderSettings,
) -> Result<Image, RenderError> {
    settings.validate()?;
    log_start(scene, settings);

    let start = Instant::now();
    let image = Image::compute(settings.width, settings.height, |x, y| {
        render_pixel(x, y, scene, camera, settings)
    });
    info!("render finished in {:.2?}", start.elapsed());

    Ok(image)
}

fn log_start(scene: &Scene, settings: &RenderSettings) {
    info!(
        "rendering {}x{} at {} samples/pixel, depth {}",
        settings.width, settings.height, settings.samples, settings.max_depth
    );
    debug!(
        "{} spheres, {} materials, seed {:#x}",
        scene.len(),
        scene.materials().len(),
        settings.seed
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;

    fn sky() -> Background {
        Background::Solid {
            color: Vec3(0.2, 0.4, 0.8),
        }
    }

    fn mirror_ball() -> Scene {
        let mut scene = Scene::new();
        let white = scene.add_material(Material::Specular {
            color: Vec3::from(1.),
        });
        scene.add_sphere(Vec3::default(), 1., white).unwrap();
        scene
    }

    fn toward_origin() -> Ray {
        Ray {
            origin: Vec3(0., 0., -5.),
            direction: Vec3(0., 0., 1.),
        }
    }

    #[test]
    fn depth_zero_is_black() {
        let mut rng = SmallRng::seed_from_u64(1);
        let bg = sky();
        for scene in [Scene::new(), mirror_ball()] {
            assert_eq!(
                color_of(&toward_origin(), &scene, 0, &bg, &mut rng),
                Vec3::default()
            );
        }
    }

    #[test]
    fn empty_scene_is_background() {
        let mut rng = SmallRng::seed_from_u64(1);
        let scene = Scene::new();
        let bg = sky();
        for _ in 0..100 {
            let ray = Ray {
                origin: Vec3::random_in(-10.0..10.0, &mut rng),
                direction: Vec3::random_in(-1.0..1.0, &mut rng)
                    .normalize()
                    .unwrap_or(Vec3(0., 1., 0.)),
            };
            assert_eq!(color_of(&ray, &scene, 5, &bg, &mut rng), bg.color(&ray));
        }
    }

    #[test]
    fn mirror_ball_bounces_straight_back() {
        let scene = mirror_ball();
        let ray = toward_origin();

        let hit = scene.hit(&ray, NEAR..=f32::INFINITY).unwrap();
        assert_eq!(hit.t, 4.);
        assert_eq!(hit.normal, Vec3(0., 0., -1.));

        let mut rng = SmallRng::seed_from_u64(1);
        let bounce = scene
            .material(hit.material)
            .reflect(&ray, &hit, &mut rng)
            .unwrap();
        assert_eq!(bounce.ray.direction, Vec3(0., 0., -1.));

        // One bounce is spent on the sphere, so the reflected ray is cut off.
        let bg = sky();
        assert_eq!(color_of(&ray, &scene, 1, &bg, &mut rng), Vec3::default());
        // With a second bounce it escapes and sees the background, untinted.
        assert_eq!(color_of(&ray, &scene, 2, &bg, &mut rng), bg.color(&ray));
    }

    #[test]
    fn tint_multiplies_componentwise() {
        let mut scene = Scene::new();
        let red = scene.add_material(Material::Specular {
            color: Vec3(1., 0.5, 0.),
        });
        scene.add_sphere(Vec3::default(), 1., red).unwrap();

        let mut rng = SmallRng::seed_from_u64(1);
        let bg = Background::Solid {
            color: Vec3(0.5, 0.5, 0.5),
        };
        assert_eq!(
            color_of(&toward_origin(), &scene, 4, &bg, &mut rng),
            Vec3(0.5, 0.25, 0.)
        );
    }

    #[test]
    fn gradient_runs_bottom_to_top() {
        let bg = Background::default();
        let up = Ray {
            origin: Vec3::default(),
            direction: Vec3(0., 1., 0.),
        };
        let down = Ray {
            origin: Vec3::default(),
            direction: Vec3(0., -1., 0.),
        };
        assert_eq!(bg.color(&up), Vec3(0.5, 0.7, 1.0));
        assert_eq!(bg.color(&down), Vec3::from(1.));
    }

    #[test]
    fn tone_map_clamps() {
        assert_eq!(tone_map(Vec3(4., -1., 0.25), false), Vec3(1., 0., 0.25));
        assert_eq!(tone_map(Vec3(4., -1., 0.25), true), Vec3(1., 0., 0.5));
    }

    #[test]
    fn pixel_seeds_differ() {
        let a = pixel_seed(7, 0, 0);
        assert_ne!(a, pixel_seed(7, 1, 0));
        assert_ne!(a, pixel_seed(7, 0, 1));
        assert_ne!(a, pixel_seed(8, 0, 0));
        assert_ne!(pixel_seed(7, 1, 0), pixel_seed(7, 0, 1));
    }

    #[test]
    fn settings_are_validated() {
        let mut settings = RenderSettings::default();
        assert_eq!(settings.validate(), Ok(()));
        settings.samples = 0;
        assert_eq!(settings.validate(), Err(RenderError::NoSamples));
        settings.samples = 1;
        settings.height = 0;
        assert!(matches!(
            settings.validate(),
            Err(RenderError::EmptyImage { .. })
        ));
    }

    #[test]
    fn empty_scene_renders_background_everywhere() {
        let settings = RenderSettings {
            width: 8,
            height: 4,
            samples: 2,
            background: sky(),
            gamma: false,
            ..RenderSettings::default()
        };
        let camera = Camera::look(
            Vec3(0., 0., -5.),
            Vec3::default(),
            Vec3(0., 1., 0.),
            40.,
            settings.aspect(),
        )
        .unwrap();
        let image = render(&Scene::new(), &camera, &settings).unwrap();
        for y in 0..4 {
            for x in 0..8 {
                let c = image.get(x, y);
                assert!((c - Vec3(0.2, 0.4, 0.8)).length() < 1e-6, "{c:?}");
            }
        }
    }
}
