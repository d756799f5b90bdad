use std::ops::RangeInclusive;

use crate::error::SceneError;
use crate::ray::Ray;
use crate::scene::MaterialId;
use crate::vec3::Vec3;

/// A sphere.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: MaterialId,
}

/// A description of a `Ray` hitting a `Sphere`. This stores information needed
/// for rendering later.
///
/// A `HitRecord` only exists for an actual intersection; a miss is `None`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitRecord {
    /// Position along the ray, expressed in distance from the origin.
    pub t: f32,
    /// Position along the ray, as an actual point.
    pub p: Vec3,
    /// Outward surface normal of the object at the hit position, unit length.
    pub normal: Vec3,
    /// Material of the object at the hit position.
    pub material: MaterialId,
}

impl Sphere {
    /// Creates a sphere, rejecting radii that are not positive and finite.
    pub fn new(center: Vec3, radius: f32, material: MaterialId) -> Result<Self, SceneError> {
        if !(radius > 0. && radius.is_finite()) {
            return Err(SceneError::InvalidRadius(radius));
        }
        Ok(Sphere {
            center,
            radius,
            material,
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }

    /// Tests if `ray` intersects the sphere, and if so, if that intersection
    /// occurs within `t_range` along the ray. (Recall that `Ray` is defined in
    /// terms of a `t` value that refers to points along the ray.)
    ///
    /// The nearer root is preferred. If it falls outside `t_range` the farther
    /// root is tried, which is how a ray starting inside the sphere finds its
    /// way out.
    ///
    /// `ray.direction` must be unit length; the quadratic is solved with its
    /// leading coefficient fixed at 1.
    #[inline]
    pub fn hit(&self, ray: &Ray, t_range: RangeInclusive<f32>) -> Option<HitRecord> {
        let oc = ray.origin - self.center;
        let half_b = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;
        let discriminant = half_b * half_b - c;
        if discriminant < 0. {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let t = [-half_b - sqrt_d, -half_b + sqrt_d]
            .into_iter()
            .find(|t| t_range.contains(t))?;

        let p = ray.at(t);
        Some(HitRecord {
            t,
            p,
            normal: (p - self.center) / self.radius,
            material: self.material,
        })
    }
}
