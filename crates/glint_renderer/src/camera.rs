//! Pinhole camera for primary ray generation.

use glint_core::CameraSettings;
use glint_math::{Ray, Vec3};
use rand::{Rng, RngCore};

/// Camera for generating rays into the scene.
///
/// The image plane sits one unit in front of the eye. Pixel `(0, 0)` is
/// the bottom-left corner of the plane.
#[derive(Clone, Debug)]
pub struct Camera {
    pub width: u32,
    pub height: u32,

    eye: Vec3,

    // Orthonormal basis; the camera looks down -w
    u: Vec3,
    v: Vec3,
    w: Vec3,

    // Image plane extents at distance 1
    top: f32,
    bottom: f32,
    left: f32,
    right: f32,
}

impl Camera {
    pub fn new(settings: &CameraSettings) -> Self {
        let width = settings.width.max(1);
        let height = settings.height.max(1);

        // Calculate camera basis vectors
        let w = (settings.eye - settings.look_at).normalize_or_zero();
        let u = settings.up.cross(w).normalize_or_zero();
        let v = w.cross(u);

        let top = (settings.fovy.to_radians() / 2.0).tan();
        let right = top * width as f32 / height as f32;

        Self {
            width,
            height,
            eye: settings.eye,
            u,
            v,
            w,
            top,
            bottom: -top,
            left: -right,
            right,
        }
    }

    /// Ray through pixel `(x, y)`.
    ///
    /// Without jitter the ray passes through the pixel center. With jitter
    /// it passes through a uniformly random point of the pixel.
    pub fn create_ray(&self, x: u32, y: u32, jitter: bool, rng: &mut dyn RngCore) -> Ray {
        let (dx, dy) = if jitter {
            (rng.gen::<f32>(), rng.gen::<f32>())
        } else {
            (0.5, 0.5)
        };

        let nx = (x as f32 + dx) / self.width as f32;
        let ny = (y as f32 + dy) / self.height as f32;

        let uc = self.left + (self.right - self.left) * nx;
        let vc = self.bottom + (self.top - self.bottom) * ny;

        Ray::new(self.eye, uc * self.u + vc * self.v - self.w)
    }
}
