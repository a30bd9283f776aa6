use crate::{Mat4, Vec3};

/// A ray in 3D space with an origin and a unit direction.
///
/// The direction is normalized on construction and after every frame
/// change, so `t` along a ray is always a distance in that ray's frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray. The direction is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance from the ray origin to `point`.
    #[inline]
    pub fn distance_to(&self, point: Vec3) -> f32 {
        (point - self.origin).length()
    }

    /// Move the ray into another frame.
    ///
    /// The origin is transformed as a point (w=1) and the direction as a
    /// vector (w=0), then re-normalized.
    pub fn change_frame(&self, m: &Mat4) -> Ray {
        Ray::new(
            m.transform_point3(self.origin),
            m.transform_vector3(self.direction),
        )
    }
}
