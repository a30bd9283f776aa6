//! Light sources.

use glint_math::Vec3;

use crate::Color;

/// Point light falloff: `1 / (constant + linear * d + quadratic * d^2)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attenuation {
    pub quadratic: f32,
    pub linear: f32,
    pub constant: f32,
}

impl Default for Attenuation {
    fn default() -> Self {
        Self::NONE
    }
}

impl Attenuation {
    /// No falloff.
    pub const NONE: Attenuation = Attenuation {
        quadratic: 0.0,
        linear: 0.0,
        constant: 1.0,
    };

    /// Build from the `[quadratic, linear, constant]` triple used by scene
    /// files.
    pub fn from_array([quadratic, linear, constant]: [f32; 3]) -> Self {
        Self {
            quadratic,
            linear,
            constant,
        }
    }

    /// Attenuation factor at `distance`.
    pub fn factor(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

/// What kind of light this is, with the geometry that kind needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    /// Light arriving from infinitely far away. `direction` is the unit
    /// vector pointing from the surface toward the light.
    Directional { direction: Vec3 },
    /// A point light at a world position.
    Point {
        position: Vec3,
        attenuation: Attenuation,
    },
}

/// A light in the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub id: u32,
    /// Colour already multiplied by the light's power.
    pub colour: Color,
    pub kind: LightKind,
}

impl Light {
    /// A directional light. The direction is normalized.
    pub fn directional(id: u32, colour: Color, direction: Vec3) -> Self {
        Self {
            id,
            colour,
            kind: LightKind::Directional {
                direction: direction.normalize_or_zero(),
            },
        }
    }

    /// A point light.
    pub fn point(id: u32, colour: Color, position: Vec3, attenuation: Attenuation) -> Self {
        Self {
            id,
            colour,
            kind: LightKind::Point {
                position,
                attenuation,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attenuation_factor() {
        assert_eq!(Attenuation::NONE.factor(100.0), 1.0);

        let quadratic = Attenuation::from_array([1.0, 0.0, 0.0]);
        assert!((quadratic.factor(2.0) - 0.25).abs() < 1e-6);

        let mixed = Attenuation::from_array([0.5, 1.0, 1.0]);
        // 1 / (1 + 2 + 0.5 * 4)
        assert!((mixed.factor(2.0) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_directional_is_normalized() {
        let light = Light::directional(0, Color::ONE, Vec3::new(0.0, 10.0, 0.0));
        match light.kind {
            LightKind::Directional { direction } => assert_eq!(direction, Vec3::Y),
            LightKind::Point { .. } => panic!("expected a directional light"),
        }
    }
}
