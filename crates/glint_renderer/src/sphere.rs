//! Ray-sphere intersection.

use glint_core::Sphere;
use glint_math::{Interval, Ray};

use crate::hittable::{localize, to_world};
use crate::{Hittable, Intersection, EPSILON};

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Intersection {
        let Some((local, local_t)) = localize(&self.frame, ray, ray_t) else {
            return Intersection::default();
        };

        let p = local.origin;
        let d = local.direction;
        let a = d.dot(d);
        let b = 2.0 * p.dot(d);
        let c = p.dot(p) - self.radius * self.radius;

        if a.abs() < EPSILON {
            return Intersection::default();
        }

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return Intersection::default();
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-b - sqrtd) / (2.0 * a);
        if !local_t.surrounds(root) {
            root = (-b + sqrtd) / (2.0 * a);
            if !local_t.surrounds(root) {
                return Intersection::default();
            }
        }

        let point = local.at(root);
        let hit = Intersection::hit(root, point, point.normalize_or_zero(), self.material);
        to_world(hit, &self.frame, ray, ray_t)
    }
}
