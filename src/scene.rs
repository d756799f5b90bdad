use std::ops::RangeInclusive;

use crate::error::SceneError;
use crate::material::Material;
use crate::ray::Ray;
use crate::sphere::{HitRecord, Sphere};
use crate::vec3::Vec3;

/// Names one entry in a `Scene`'s material table. Only `Scene::add_material`
/// hands these out; they can't be made up outside the crate:
///
/// ```compile_fail
/// use spheretrace::MaterialId;
///
/// let id = MaterialId(3);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(pub(crate) usize);

/// The things a ray can hit: an ordered list of spheres and the materials
/// they refer to.
///
/// Spheres are tested in the order they were added. Order never changes which
/// surface is nearest, but it does decide exact ties.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    materials: Vec<Material>,
    spheres: Vec<Sphere>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `material` to the material table. Any number of spheres may refer
    /// to the returned id.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    /// Adds a sphere made of `material`, which must already be in this scene.
    pub fn add_sphere(
        &mut self,
        center: Vec3,
        radius: f32,
        material: MaterialId,
    ) -> Result<(), SceneError> {
        if material.0 >= self.materials.len() {
            return Err(SceneError::UnknownMaterial(material));
        }
        self.spheres.push(Sphere::new(center, radius, material)?);
        Ok(())
    }

    /// Looks up a material by id.
    ///
    /// Ids come from `add_material`, so an id always names a material of the
    /// scene that issued it. Mixing ids between scenes is a bug and panics if
    /// the id is out of range.
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// Finds the nearest surface along `ray` within `t_range`.
    ///
    /// Every sphere is tested. Once a hit is found at `t`, later spheres only
    /// replace it if they are strictly nearer, so the closest surface wins
    /// and exact ties go to the sphere added first.
    pub fn hit(&self, ray: &Ray, t_range: RangeInclusive<f32>) -> Option<HitRecord> {
        let near = *t_range.start();
        let mut nearest = *t_range.end();
        let mut hit = None;

        for sphere in &self.spheres {
            if let Some(rec) = sphere.hit(ray, near..=nearest) {
                if hit.is_none() || rec.t < nearest {
                    nearest = rec.t;
                    hit = Some(rec);
                }
            }
        }

        hit
    }
}
