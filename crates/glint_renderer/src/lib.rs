//! Glint Renderer - progressive Whitted-style ray tracing on the CPU.
//!
//! One call to [`Scene::render`] traces one ray per pixel, shades the
//! closest hit with Blinn-Phong plus hard shadows, and folds the sample
//! into a running average. Repeating the call with jitter enabled
//! anti-aliases the image.

mod aabox;
mod camera;
mod hittable;
mod intersection;
mod mesh;
mod plane;
mod renderer;
mod scene;
mod shading;
mod sphere;

pub use camera::Camera;
pub use hittable::{Hittable, MeshRef};
pub use intersection::Intersection;
pub use renderer::{color_to_rgb8, iterations_for, ImageBuffer, Progressive, RenderConfig};
pub use scene::Scene;

/// Re-export common types from the core and math crates
pub use glint_core::{Color, Material, SceneDescription};
pub use glint_math::{Interval, Ray, Vec3};

/// Geometric tolerance for parallel rays and degenerate quadratics.
pub const EPSILON: f32 = 1e-5;
