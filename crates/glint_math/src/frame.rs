// Local/world frame utilities for Mat4
//
// Every primitive carries a Frame: the local->world matrix and its inverse.
// The inverse is computed once when the frame is built and never again.

use glam::{Mat4, Vec3, Vec4};

use crate::Ray;

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Transform a surface normal by the transpose of `self`.
    ///
    /// Call this on the world->local matrix to carry a local normal to world
    /// space. Stays perpendicular to the surface under non-uniform scale.
    /// The result is not normalized.
    fn transform_normal3(&self, normal: Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn transform_normal3(&self, normal: Vec3) -> Vec3 {
        let n4 = self.transpose() * Vec4::new(normal.x, normal.y, normal.z, 0.0);
        Vec3::new(n4.x, n4.y, n4.z)
    }
}

/// A local->world transform together with its inverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Local to world (`M`).
    pub to_world: Mat4,
    /// World to local (`M_inv`).
    pub to_local: Mat4,
}

impl Default for Frame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Frame {
    pub const IDENTITY: Frame = Frame {
        to_world: Mat4::IDENTITY,
        to_local: Mat4::IDENTITY,
    };

    /// Build a frame from a local->world matrix, computing its inverse.
    pub fn from_matrix(to_world: Mat4) -> Self {
        Self {
            to_world,
            to_local: to_world.inverse(),
        }
    }

    /// Translate, rotate (XYZ Euler angles in degrees) and scale.
    ///
    /// Composition order is `T * Rx * Ry * Rz * S`.
    pub fn from_trs(translation: Vec3, rotation_degrees: Vec3, scale: Vec3) -> Self {
        let to_world = Mat4::from_translation(translation)
            * Mat4::from_rotation_x(rotation_degrees.x.to_radians())
            * Mat4::from_rotation_y(rotation_degrees.y.to_radians())
            * Mat4::from_rotation_z(rotation_degrees.z.to_radians())
            * Mat4::from_scale(scale);
        Self::from_matrix(to_world)
    }

    /// Place this frame inside `parent`: `parent.M * M` and
    /// `M_inv * parent.M_inv`.
    pub fn then(&self, parent: &Frame) -> Frame {
        Frame {
            to_world: parent.to_world * self.to_world,
            to_local: self.to_local * parent.to_local,
        }
    }

    /// Move a world-space ray into local space, also returning how much
    /// the transform stretched its direction.
    ///
    /// A point at world distance `t` along `ray` lies at local distance
    /// `t * stretch` along the returned ray.
    pub fn ray_to_local_scaled(&self, ray: &Ray) -> (Ray, f32) {
        let stretch = self.to_local.transform_vector3(ray.direction).length();
        (ray.change_frame(&self.to_local), stretch)
    }

    /// Move a local point into world space.
    #[inline]
    pub fn point_to_world(&self, point: Vec3) -> Vec3 {
        self.to_world.transform_point3(point)
    }

    /// Move a local surface normal into world space (unit length).
    #[inline]
    pub fn normal_to_world(&self, normal: Vec3) -> Vec3 {
        self.to_local.transform_normal3(normal).normalize_or_zero()
    }
}
