//! Progressive rendering.
//!
//! Each call to `Scene::render` traces one sample per pixel and folds it
//! into the accumulator as a running average:
//!
//! - rows are rendered in parallel with rayon
//! - jitter draws from each worker's thread-local RNG
//! - an iteration only returns once every pixel has been updated

use std::time::Instant;

use glint_core::Color;
use glint_math::Interval;
use rand::RngCore;
use rayon::prelude::*;

use crate::Scene;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Minimum distance along a shadow ray, to keep surfaces from
    /// shadowing themselves
    pub shadow_epsilon: f32,
    /// Background color when ray doesn't hit anything
    pub background: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shadow_epsilon: 1e-2,
            background: Color::ZERO,
        }
    }
}

/// Linear RGB accumulation buffer.
///
/// Row 0 is the bottom of the picture. Values are not clamped.
#[derive(Clone, Debug, Default)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = y as usize * self.width as usize + x as usize;
        self.pixels[index] = color;
    }

    /// Convert to 8-bit RGB, top row first.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                bytes.extend_from_slice(&color_to_rgb8(self.get(x, y)));
            }
        }
        bytes
    }
}

/// Clamp a colour to [0, 1] and quantize.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let quantize = |c: f32| (255.0 * Interval::UNIT.clamp(c) + 0.5) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

impl Scene {
    /// Colour of one camera sample through pixel `(x, y)`.
    pub fn sample_pixel(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Color {
        let ray = self.camera.create_ray(x, y, self.description.jitter, rng);
        let hit = self.intersect_scene(&ray, Interval::FORWARD);
        if hit.is_hit {
            self.compute_shading(&hit, &ray)
        } else {
            self.config.background
        }
    }

    /// Trace iteration `iteration` (1-based) and fold it into the image.
    ///
    /// # Panics
    ///
    /// If `iteration` is zero.
    pub fn render(&mut self, iteration: u32) {
        assert!(iteration >= 1, "iterations are numbered from 1");

        let start = Instant::now();
        let weight = iteration as f32;
        let width = self.image.width as usize;

        // Geometry is read-only while the accumulator is written
        let mut image = std::mem::take(&mut self.image);
        {
            let scene = &*self;
            image
                .pixels
                .par_chunks_mut(width.max(1))
                .enumerate()
                .for_each(|(y, row)| {
                    let mut rng = rand::thread_rng();
                    for (x, pixel) in row.iter_mut().enumerate() {
                        let sample = scene.sample_pixel(x as u32, y as u32, &mut rng);
                        *pixel += (sample - *pixel) / weight;
                    }
                });
        }
        self.image = image;

        log::debug!(
            "Iteration {} of '{}' took {:.2?}",
            iteration,
            self.description.name,
            start.elapsed()
        );
    }
}

/// Number of passes a non-interactive run makes for a scene's sample
/// setting. Zero makes no passes and leaves the image black; an unbounded
/// (negative) setting makes a single pass.
pub fn iterations_for(samples: i32) -> u32 {
    match samples {
        0 => 0,
        s if s > 0 => s as u32,
        _ => 1,
    }
}

/// Drives `Scene::render` with consecutive iteration numbers.
pub struct Progressive<'a> {
    scene: &'a mut Scene,
    iteration: u32,
}

impl<'a> Progressive<'a> {
    /// Start a fresh accumulation.
    pub fn new(scene: &'a mut Scene) -> Self {
        scene.reset();
        Self { scene, iteration: 0 }
    }

    /// Number of iterations completed so far.
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn scene(&self) -> &Scene {
        self.scene
    }

    /// Render the next iteration. Returns its number.
    pub fn step(&mut self) -> u32 {
        self.iteration += 1;
        self.scene.render(self.iteration);
        self.iteration
    }

    /// Render as many iterations as `samples` asks for in a
    /// non-interactive run. Returns the number rendered.
    pub fn run(&mut self, samples: i32) -> u32 {
        let total = iterations_for(samples);
        let start = Instant::now();

        for _ in 0..total {
            let done = self.step();
            log::info!("{}: sample {}/{}", self.scene.description.name, done, total);
        }

        log::info!(
            "{}: {} samples in {:.2?}",
            self.scene.description.name,
            total,
            start.elapsed()
        );
        total
    }

    /// Keep rendering until `keep_going` returns false. It is called after
    /// every iteration with the iteration number and the current image.
    pub fn run_until<F>(&mut self, mut keep_going: F) -> u32
    where
        F: FnMut(u32, &ImageBuffer) -> bool,
    {
        loop {
            let done = self.step();
            if !keep_going(done, self.scene.image()) {
                return done;
            }
        }
    }
}
