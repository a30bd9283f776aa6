//! Surface material: Lambertian diffuse plus Blinn-Phong specular.

use crate::Color;

/// A material definition.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Material {
    /// Index of the material in the scene file
    pub id: u32,

    /// Diffuse coefficient (kd)
    pub diffuse: Color,

    /// Specular coefficient (ks)
    pub specular: Color,

    /// Phong exponent for the specular lobe
    pub shininess: f32,
}

impl Material {
    /// Create a new material.
    pub fn new(id: u32, diffuse: Color, specular: Color, shininess: f32) -> Self {
        Self {
            id,
            diffuse,
            specular,
            shininess,
        }
    }

    /// A purely diffuse material.
    pub fn diffuse(id: u32, diffuse: Color) -> Self {
        Self::new(id, diffuse, Color::ZERO, 0.0)
    }

    /// Check if this material has a specular lobe at all.
    pub fn is_specular(&self) -> bool {
        self.specular != Color::ZERO
    }
}
