//! Glint Core - scene description and loading.
//!
//! This crate provides:
//!
//! - **Scene types**: `Material`, `Light`, the primitive records
//!   (`Sphere`, `Plane`, `AaBox`, `Mesh`) and the shared `MeshPool`
//! - **Scene building**: `SceneBuilder` accumulates ids and mesh pool
//!   offsets while a scene is assembled
//! - **Scene files**: JSON scene loading with node hierarchies, instances
//!   and OBJ meshes
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_scene;
//!
//! let scene = load_scene("scenes/cornell.json", 1.0)?;
//! println!("Loaded {} primitives, {} lights",
//!     scene.primitive_count(),
//!     scene.lights.len());
//! ```

pub mod light;
pub mod loader;
pub mod material;
pub mod mesh;
pub mod primitive;
pub mod scene;

// Re-export commonly used types
pub use light::{Attenuation, Light, LightKind};
pub use loader::{load_scene, load_scene_from_str, LoadError, LoadResult};
pub use material::Material;
pub use mesh::{MeshData, MeshPool};
pub use primitive::{AaBox, Mesh, Plane, Primitive, Sphere};
pub use scene::{CameraSettings, SceneBuilder, SceneDescription};

/// Colour type alias (linear RGB, typically 0-1)
pub type Color = glint_math::Vec3;
