//! Ray-mesh intersection: a linear scan over the mesh's pooled faces.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use glint_math::{Interval, Ray, Vec3};

use crate::hittable::{localize, to_world};
use crate::{Hittable, Intersection, MeshRef};

/// Ray parameter of the hit on triangle `(v0, v1, v2)`, if strictly
/// inside `ray_t`.
fn hit_triangle(ray: &Ray, [v0, v1, v2]: [Vec3; 3], ray_t: Interval) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < 1e-8 {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    ray_t.surrounds(t).then_some(t)
}

impl Hittable for MeshRef<'_> {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Intersection {
        let frame = &self.mesh.frame;
        let Some((local, mut local_t)) = localize(frame, ray, ray_t) else {
            return Intersection::default();
        };

        let faces = self.mesh.faces();
        let end = faces.end.min(self.pool.face_count());

        let mut closest = Intersection::default();
        for face in faces.start..end {
            let triangle = self.pool.triangle(face);
            if let Some(t) = hit_triangle(&local, triangle, local_t) {
                let [v0, v1, v2] = triangle;
                let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
                closest = Intersection::hit(t, local.at(t), normal, self.mesh.material);
                local_t = local_t.with_max(t);
            }
        }

        to_world(closest, frame, ray, ray_t)
    }
}
