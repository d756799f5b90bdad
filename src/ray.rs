use crate::vec3::Vec3;

/// A ray, beginning at `origin` and extending along `direction`.
///
/// Intersection code assumes `direction` has unit length; whoever builds a
/// `Ray` is responsible for normalizing it first.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Finds the point along the ray at distance `t` from the origin. Positive
    /// values of `t` represent positions forward from the origin, and negative
    /// values, behind the origin.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}
