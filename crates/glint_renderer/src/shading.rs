//! Blinn-Phong shading with hard shadows.

use glint_core::{Color, LightKind};
use glint_math::{Interval, Ray};

use crate::{Intersection, Scene};

impl Scene {
    /// Colour seen along `ray` at the hit `intersect`.
    ///
    /// Ambient plus, for every light with an unblocked line of sight, a
    /// Lambert diffuse term and a Blinn-Phong specular lobe.
    pub fn compute_shading(&self, intersect: &Intersection, ray: &Ray) -> Color {
        let material = &intersect.material;
        let normal = intersect.normal;
        let position = intersect.position;
        let view = (-ray.direction).normalize_or_zero();

        let mut colour = self.description.ambient * material.diffuse;

        for light in &self.description.lights {
            let (light_dir, attenuation, max_distance) = match light.kind {
                LightKind::Directional { direction } => (direction, 1.0, f32::INFINITY),
                LightKind::Point {
                    position: light_pos,
                    attenuation,
                } => {
                    let to_light = light_pos - position;
                    let distance = to_light.length();
                    (
                        to_light.normalize_or_zero(),
                        attenuation.factor(distance),
                        distance,
                    )
                }
            };

            // All-zero coefficients
            if !attenuation.is_finite() {
                continue;
            }

            let n_dot_l = normal.dot(light_dir).max(0.0);
            if n_dot_l <= 0.0 {
                continue;
            }

            let shadow_ray = Ray::new(position, light_dir);
            let shadow_t = Interval::new(self.config.shadow_epsilon, max_distance);
            if self.occluded(&shadow_ray, shadow_t) {
                continue;
            }

            let radiance = light.colour * attenuation;
            colour += n_dot_l * material.diffuse * radiance;

            if material.is_specular() {
                let half = (view + light_dir).normalize_or_zero();
                let n_dot_h = normal.dot(half).max(0.0);
                colour += n_dot_h.powf(material.shininess) * material.specular * radiance;
            }
        }

        colour
    }
}
