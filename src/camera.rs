use serde::Deserialize;

use crate::error::CameraError;
use crate::ray::Ray;
use crate::vec3::Vec3;

/// A pinhole camera producing primary rays.
#[derive(Clone, Debug)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    forward: Vec3,
}

/// How a camera is placed in a scene file. `aspect` defaults to the image's
/// width over height.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraSettings {
    pub look_from: Vec3,
    pub look_at: Vec3,
    #[serde(default = "default_up")]
    pub up: Vec3,
    /// Vertical field of view, in degrees.
    pub vfov: f32,
    #[serde(default)]
    pub aspect: Option<f32>,
}

fn default_up() -> Vec3 {
    Vec3(0., 1., 0.)
}

impl CameraSettings {
    pub fn build(&self, default_aspect: f32) -> Result<Camera, CameraError> {
        Camera::look(
            self.look_from,
            self.look_at,
            self.up,
            self.vfov,
            self.aspect.unwrap_or(default_aspect),
        )
    }
}

impl Camera {
    /// Places a camera at `look_from`, facing `look_at`, with `up` giving the
    /// rough direction of the top of the image.
    ///
    /// `fov` is the vertical field of view in degrees; `aspect` is width over
    /// height.
    pub fn look(
        look_from: Vec3,
        look_at: Vec3,
        up: Vec3,
        fov: f32,
        aspect: f32,
    ) -> Result<Self, CameraError> {
        if !(fov > 0. && fov < 180.) {
            return Err(CameraError::InvalidFieldOfView(fov));
        }
        if !(aspect > 0. && aspect.is_finite()) {
            return Err(CameraError::InvalidAspect(aspect));
        }

        let theta = fov * std::f32::consts::PI / 180.;
        let half_height = f32::tan(theta / 2.);
        let half_width = aspect * half_height;
        let origin = look_from;
        let w = (look_from - look_at).normalize()?;
        let u = up.cross(&w).normalize()?;
        let v = w.cross(&u);
        let lower_left_corner = origin - half_width * u - half_height * v - w;
        let horizontal = 2. * half_width * u;
        let vertical = 2. * half_height * v;
        Ok(Camera {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            forward: -w,
        })
    }

    /// Gets the ray through the image plane at `(s, t)`, where `(0, 0)` is the
    /// lower-left corner and `(1, 1)` the upper-right. The direction is unit
    /// length.
    pub fn get_ray(&self, s: f32, t: f32) -> Ray {
        let direction = self.lower_left_corner + s * self.horizontal + t * self.vertical
            - self.origin;
        Ray {
            origin: self.origin,
            // The image plane is one unit in front of the origin.
            direction: direction.normalize().unwrap_or(self.forward),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn center_ray_looks_at_target() {
        let cam = Camera::look(
            Vec3(0., 0., -5.),
            Vec3::default(),
            Vec3(0., 1., 0.),
            90.,
            2.,
        )
        .unwrap();
        let r = cam.get_ray(0.5, 0.5);
        assert_eq!(r.origin, Vec3(0., 0., -5.));
        assert!(close(r.direction, Vec3(0., 0., 1.)), "{:?}", r.direction);
    }

    #[test]
    fn corners_span_field_of_view() {
        let cam = Camera::look(
            Vec3::default(),
            Vec3(0., 0., -1.),
            Vec3(0., 1., 0.),
            90.,
            1.,
        )
        .unwrap();
        // tan(45°) = 1, so the top edge of the image is at 45° up.
        let top = cam.get_ray(0.5, 1.).direction;
        assert!(close(top, Vec3(0., 1., -1.).normalize().unwrap()), "{top:?}");
        let bottom_left = cam.get_ray(0., 0.).direction;
        assert!(bottom_left.0 < 0. && bottom_left.1 < 0.);
        for (s, t) in [(0., 0.), (1., 0.), (0.3, 0.8), (1., 1.)] {
            assert!((cam.get_ray(s, t).direction.length() - 1.).abs() < 1e-5);
        }
    }

    #[test]
    fn degenerate_views_are_rejected() {
        let up = Vec3(0., 1., 0.);
        assert!(matches!(
            Camera::look(Vec3::default(), Vec3::default(), up, 40., 1.),
            Err(CameraError::Degenerate(_))
        ));
        assert!(matches!(
            Camera::look(Vec3::default(), Vec3(0., 5., 0.), up, 40., 1.),
            Err(CameraError::Degenerate(_))
        ));
        assert!(matches!(
            Camera::look(Vec3::default(), Vec3(0., 0., 1.), up, 0., 1.),
            Err(CameraError::InvalidFieldOfView(_))
        ));
        assert!(matches!(
            Camera::look(Vec3::default(), Vec3(0., 0., 1.), up, 40., -1.),
            Err(CameraError::InvalidAspect(_))
        ));
    }

    #[test]
    fn settings_fall_back_to_image_aspect() {
        let settings: CameraSettings = toml::from_str(
            r#"
            look_from = [0.0, 0.0, -5.0]
            look_at = [0.0, 0.0, 0.0]
            vfov = 40.0
            "#,
        )
        .unwrap();
        assert_eq!(settings.up, Vec3(0., 1., 0.));
        assert_eq!(settings.aspect, None);
        assert!(settings.build(2.).is_ok());
    }
}
