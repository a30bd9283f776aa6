//! Ray-box intersection using the slab method.

use glint_core::AaBox;
use glint_math::{Interval, Ray, Vec3};

use crate::hittable::{localize, to_world};
use crate::{Hittable, Intersection, EPSILON};

impl Hittable for AaBox {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Intersection {
        let Some((local, local_t)) = localize(&self.frame, ray, ray_t) else {
            return Intersection::default();
        };

        let origin = local.origin;
        let direction = local.direction;

        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        let mut near_axis = 0;
        let mut far_axis = 0;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];

            if d.abs() < EPSILON {
                // Parallel to this slab
                if o < self.min[axis] || o > self.max[axis] {
                    return Intersection::default();
                }
                continue;
            }

            let inv_d = 1.0 / d;
            let mut t0 = (self.min[axis] - o) * inv_d;
            let mut t1 = (self.max[axis] - o) * inv_d;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            if t0 > t_near {
                t_near = t0;
                near_axis = axis;
            }
            if t1 < t_far {
                t_far = t1;
                far_axis = axis;
            }
        }

        if t_near > t_far {
            return Intersection::default();
        }

        // Entering faces point against the ray, the exit face along it
        let (t, axis, sign) = if local_t.surrounds(t_near) {
            (t_near, near_axis, -direction[near_axis].signum())
        } else if local_t.surrounds(t_far) {
            (t_far, far_axis, direction[far_axis].signum())
        } else {
            return Intersection::default();
        };

        let mut normal = Vec3::ZERO;
        normal[axis] = sign;

        let hit = Intersection::hit(t, local.at(t), normal, self.material);
        to_world(hit, &self.frame, ray, ray_t)
    }
}
