//! A scene ready to render: primitives, lights, camera and accumulator.

use glint_core::SceneDescription;
use glint_math::{Interval, Ray};

use crate::{Camera, Hittable, ImageBuffer, Intersection, MeshRef, RenderConfig};

/// Keep `candidate` if it beats the current closest hit, narrowing `ray_t`.
#[inline]
fn keep_closer(closest: &mut Intersection, ray_t: &mut Interval, candidate: Intersection) {
    if candidate.is_hit && candidate.t < ray_t.max {
        *ray_t = ray_t.with_max(candidate.t);
        *closest = candidate;
    }
}

fn closest_of<H: Hittable>(
    objects: impl IntoIterator<Item = H>,
    ray: &Ray,
    closest: &mut Intersection,
    ray_t: &mut Interval,
) {
    for object in objects {
        let candidate = object.hit(ray, *ray_t);
        keep_closer(closest, ray_t, candidate);
    }
}

/// Everything one render invocation needs.
///
/// Built once from a `SceneDescription`; geometry is immutable afterwards
/// and only the accumulation image changes between iterations.
pub struct Scene {
    pub description: SceneDescription,
    pub camera: Camera,
    pub config: RenderConfig,
    pub(crate) image: ImageBuffer,
}

impl Scene {
    /// Create a scene with the default render configuration.
    pub fn new(description: SceneDescription) -> Self {
        Self::with_config(description, RenderConfig::default())
    }

    pub fn with_config(description: SceneDescription, config: RenderConfig) -> Self {
        let camera = Camera::new(&description.camera);
        let image = ImageBuffer::new(camera.width, camera.height);
        Self {
            description,
            camera,
            config,
            image,
        }
    }

    /// Read access to the accumulated image.
    pub fn image(&self) -> &ImageBuffer {
        &self.image
    }

    /// Clear the accumulator back to black.
    pub fn reset(&mut self) {
        self.image = ImageBuffer::new(self.camera.width, self.camera.height);
    }

    fn meshes(&self) -> impl Iterator<Item = MeshRef<'_>> {
        let pool = &self.description.mesh_pool;
        self.description
            .meshes
            .iter()
            .map(move |mesh| MeshRef::new(mesh, pool))
    }

    /// Closest hit over every primitive: spheres, planes, boxes, then
    /// meshes. A miss if nothing lies strictly inside `ray_t`.
    pub fn intersect_scene(&self, ray: &Ray, ray_t: Interval) -> Intersection {
        let scene = &self.description;
        let mut closest = Intersection::default();
        let mut ray_t = ray_t;

        closest_of(&scene.spheres, ray, &mut closest, &mut ray_t);
        closest_of(&scene.planes, ray, &mut closest, &mut ray_t);
        closest_of(&scene.boxes, ray, &mut closest, &mut ray_t);
        closest_of(self.meshes(), ray, &mut closest, &mut ray_t);

        closest
    }

    /// Whether anything lies strictly inside `ray_t`. Stops at the first
    /// hit found.
    pub fn occluded(&self, ray: &Ray, ray_t: Interval) -> bool {
        let scene = &self.description;

        scene.spheres.iter().any(|s| s.hit(ray, ray_t).is_hit)
            || scene.planes.iter().any(|p| p.hit(ray, ray_t).is_hit)
            || scene.boxes.iter().any(|b| b.hit(ray, ray_t).is_hit)
            || self.meshes().any(|m| m.hit(ray, ray_t).is_hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::{CameraSettings, MeshData, SceneBuilder};
    use glint_math::{Frame, Vec3};

    fn at(z: f32) -> Frame {
        Frame::from_trs(Vec3::new(0.0, 0.0, z), Vec3::ZERO, Vec3::ONE)
    }

    #[test]
    fn test_closest_hit_wins() {
        let mut builder = SceneBuilder::new(CameraSettings::default());
        let near = builder.material(Vec3::X, Vec3::ZERO, 1.0);
        let far = builder.material(Vec3::Y, Vec3::ZERO, 1.0);

        // Far object pushed first so the fold has to replace it
        let far_sphere = builder.sphere(far, 1.0, at(-10.0));
        builder.push(far_sphere);
        let near_box = builder.aabox(near, -Vec3::ONE, Vec3::ONE, at(-5.0));
        builder.push(near_box);

        let scene = Scene::new(builder.build());
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let rec = scene.intersect_scene(&ray, Interval::FORWARD);
        assert!(rec.is_hit);
        assert_eq!(rec.material.id, near.id);
        assert!((rec.t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_mesh_and_plane_order() {
        let mut builder = SceneBuilder::new(CameraSettings::default());
        let floor = builder.material(Vec3::ONE, Vec3::ZERO, 1.0);
        let tri = builder.material(Vec3::X, Vec3::ZERO, 1.0);

        let plane = builder.plane(floor, None, Vec3::Z, at(-8.0));
        builder.push(plane);
        let data = MeshData {
            vertices: vec![Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0)],
            faces: vec![[0, 1, 2]],
        };
        let mesh = builder.mesh(tri, &data, at(-3.0));
        builder.push(mesh);

        let scene = Scene::new(builder.build());
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let rec = scene.intersect_scene(&ray, Interval::FORWARD);
        assert_eq!(rec.material.id, tri.id);
        assert!((rec.t - 3.0).abs() < 1e-5);

        let beside = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_Z);
        assert_eq!(scene.intersect_scene(&beside, Interval::FORWARD).material.id, floor.id);
    }

    #[test]
    fn test_occluded_matches_intersect() {
        let mut builder = SceneBuilder::new(CameraSettings::default());
        let mat = builder.material(Vec3::ONE, Vec3::ZERO, 1.0);
        let sphere = builder.sphere(mat, 1.0, at(-5.0));
        builder.push(sphere);
        let scene = Scene::new(builder.build());

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        for t_max in [1.0, 3.9, 4.1, f32::INFINITY] {
            let ray_t = Interval::new(0.01, t_max);
            assert_eq!(scene.occluded(&ray, ray_t), scene.intersect_scene(&ray, ray_t).is_hit);
        }
        assert!(!scene.occluded(&ray, Interval::new(0.01, 3.9)));
        assert!(scene.occluded(&ray, Interval::new(0.01, 4.1)));
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = Scene::new(SceneBuilder::new(CameraSettings::default()).build());
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(!scene.intersect_scene(&ray, Interval::FORWARD).is_hit);
        assert!(!scene.occluded(&ray, Interval::FORWARD));
    }
}
