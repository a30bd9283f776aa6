//! The ray query trait shared by every primitive kind.

use glint_core::{Mesh, MeshPool};
use glint_math::{Frame, Interval, Ray};

use crate::Intersection;

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Closest hit of `ray` strictly inside `ray_t`, in world space.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Intersection;
}

impl<T: Hittable + ?Sized> Hittable for &T {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Intersection {
        (**self).hit(ray, ray_t)
    }
}

/// A mesh paired with the pool its faces live in.
#[derive(Clone, Copy, Debug)]
pub struct MeshRef<'a> {
    pub mesh: &'a Mesh,
    pub pool: &'a MeshPool,
}

impl<'a> MeshRef<'a> {
    pub fn new(mesh: &'a Mesh, pool: &'a MeshPool) -> Self {
        Self { mesh, pool }
    }
}

/// Move a world query into `frame`'s local space.
///
/// The interval is rescaled so local parameters measure the same points
/// as world ones. `None` when the transform collapses the ray direction.
pub(crate) fn localize(frame: &Frame, ray: &Ray, ray_t: Interval) -> Option<(Ray, Interval)> {
    let (local, stretch) = frame.ray_to_local_scaled(ray);
    if stretch <= 0.0 || !stretch.is_finite() {
        return None;
    }
    Some((local, Interval::new(ray_t.min * stretch, ray_t.max * stretch)))
}

/// Carry a local hit back to world space, rejecting it if rounding pushed
/// the world distance out of `ray_t`.
pub(crate) fn to_world(local: Intersection, frame: &Frame, ray: &Ray, ray_t: Interval) -> Intersection {
    let hit = local.change_frame(frame, ray);
    if hit.is_hit && ray_t.surrounds(hit.t) {
        hit
    } else {
        Intersection::default()
    }
}
