//! Ray-plane intersection, with an optional checkerboard.

use glint_core::{Material, Plane};
use glint_math::{Interval, Ray, Vec3};

use crate::hittable::{localize, to_world};
use crate::{Hittable, Intersection, EPSILON};

/// Material at local point `p`: the checkerboard alternates on the unit
/// grid of the local XZ plane.
fn checker_material(plane: &Plane, p: Vec3) -> Material {
    if !plane.two_materials {
        return plane.material1;
    }

    let parity = (p.x.floor() + p.z.floor()) as i64;
    if parity.rem_euclid(2) == 0 {
        plane.material1
    } else {
        plane.material2
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Intersection {
        let Some((local, local_t)) = localize(&self.frame, ray, ray_t) else {
            return Intersection::default();
        };

        let denom = self.normal.dot(local.direction);
        if denom.abs() < EPSILON {
            return Intersection::default();
        }

        let t = -self.normal.dot(local.origin) / denom;
        if !local_t.surrounds(t) {
            return Intersection::default();
        }

        let point = local.at(t);
        let hit = Intersection::hit(t, point, self.normal, checker_material(self, point));
        to_world(hit, &self.frame, ray, ray_t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::Frame;

    fn ground(second: Option<Material>) -> Plane {
        let white = Material::diffuse(0, Vec3::ONE);
        Plane {
            id: 0,
            two_materials: second.is_some(),
            material1: white,
            material2: second.unwrap_or(white),
            normal: Vec3::Y,
            frame: Frame::from_trs(Vec3::new(0.0, -1.0, 0.0), Vec3::ZERO, Vec3::ONE),
        }
    }

    #[test]
    fn test_plane_hit() {
        let plane = ground(None);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, -1.0));

        let rec = plane.hit(&ray, Interval::FORWARD);
        assert!(rec.is_hit);
        assert!((rec.t - 2f32.sqrt()).abs() < 1e-5);
        assert!((rec.position - Vec3::new(0.0, -1.0, -1.0)).length() < 1e-5);
        assert!((rec.normal - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_parallel_ray_misses() {
        let plane = ground(None);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(!plane.hit(&ray, Interval::FORWARD).is_hit);
    }

    #[test]
    fn test_behind_origin_misses() {
        let plane = ground(None);
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(!plane.hit(&ray, Interval::FORWARD).is_hit);
    }

    #[test]
    fn test_checkerboard_parity() {
        let black = Material::diffuse(1, Vec3::ZERO);
        let plane = ground(Some(black));

        let shoot = |x: f32, z: f32| {
            let ray = Ray::new(Vec3::new(x, 1.0, z), Vec3::new(0.0, -1.0, 0.0));
            plane.hit(&ray, Interval::FORWARD).material.id
        };

        // floor(x) + floor(z) even -> first material
        assert_eq!(shoot(0.5, 0.5), 0);
        assert_eq!(shoot(1.5, 0.5), 1);
        assert_eq!(shoot(1.5, 1.5), 0);
        // Negative cells keep alternating across the origin
        assert_eq!(shoot(-0.5, 0.5), 1);
        assert_eq!(shoot(-0.5, -0.5), 0);
    }

    #[test]
    fn test_hit_respects_interval_bounds() {
        let plane = ground(None);
        // Straight down from the origin meets the floor at exactly t = 1
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Y);

        let rec = plane.hit(&ray, Interval::FORWARD);
        assert!(rec.is_hit);
        assert_eq!(rec.t, 1.0);

        assert!(!plane.hit(&ray, Interval::new(0.0, 1.0)).is_hit);
        assert!(!plane.hit(&ray, Interval::new(1.0, f32::INFINITY)).is_hit);
        assert!(!plane.hit(&ray, Interval::new(0.0, 0.5)).is_hit);
        assert!(plane.hit(&ray, Interval::new(0.5, 1.5)).is_hit);
    }

    #[test]
    fn test_transformed_plane_stays_inside_interval() {
        let mut plane = ground(None);
        plane.frame = Frame::from_trs(
            Vec3::new(0.5, -2.0, 1.0),
            Vec3::new(20.0, 0.0, -35.0),
            Vec3::new(2.0, 0.5, 3.0),
        );

        for i in 0..40 {
            let a = i as f32 * 0.37;
            let direction = Vec3::new(a.cos(), -1.0 - (a * 0.5).sin().abs(), a.sin());
            let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), direction);
            let full = plane.hit(&ray, Interval::FORWARD);

            for ray_t in [
                Interval::new(0.0, 2.0),
                Interval::new(1.0, 4.0),
                Interval::new(3.0, f32::INFINITY),
                Interval::new(0.01, full.t),
            ] {
                let rec = plane.hit(&ray, ray_t);
                assert!(!rec.is_hit || ray_t.surrounds(rec.t), "t {} outside {:?}", rec.t, ray_t);
                if rec.is_hit {
                    assert!((rec.position - ray.at(rec.t)).length() < 1e-3);
                }
            }
        }
    }
}
