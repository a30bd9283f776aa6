// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod frame;
mod interval;
mod ray;

pub use frame::{Frame, Mat4Ext};
pub use interval::Interval;
pub use ray::Ray;
