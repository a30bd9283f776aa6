//! Result of a ray query.

use glint_core::Material;
use glint_math::{Frame, Ray, Vec3};

/// Where and what a ray hit.
///
/// `Intersection::default()` is a miss. For a hit, `t` is the distance
/// along the ray that produced it, in that ray's frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Intersection {
    pub is_hit: bool,
    pub t: f32,
    /// Unit surface normal
    pub normal: Vec3,
    pub position: Vec3,
    pub material: Material,
}

impl Intersection {
    /// A hit at `t`.
    pub fn hit(t: f32, position: Vec3, normal: Vec3, material: Material) -> Self {
        Self {
            is_hit: true,
            t,
            normal,
            position,
            material,
        }
    }

    /// Carry a local-space hit back to world space.
    ///
    /// The position goes through `to_world`, the normal through the
    /// transposed inverse, and `t` becomes the world distance from
    /// `world_ray`'s origin. A miss is returned untouched.
    pub fn change_frame(self, frame: &Frame, world_ray: &Ray) -> Self {
        if !self.is_hit {
            return self;
        }

        let position = frame.point_to_world(self.position);
        Self {
            is_hit: true,
            t: world_ray.distance_to(position),
            normal: frame.normal_to_world(self.normal),
            position,
            material: self.material,
        }
    }
}
