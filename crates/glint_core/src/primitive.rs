//! Primitive records as the renderer consumes them.
//!
//! Each primitive is described in its own local space and placed in the
//! world by a `Frame`. Frames are already composed through any node
//! hierarchy by the time a primitive lands in a scene.

use std::ops::Range;

use glint_math::{Frame, Vec3};

use crate::Material;

/// A sphere centered at the local origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub id: u32,
    pub material: Material,
    pub radius: f32,
    pub frame: Frame,
}

/// A plane through the local origin.
///
/// With `two_materials` set, `material1` and `material2` alternate in a
/// checkerboard over the local XZ plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub id: u32,
    pub two_materials: bool,
    pub material1: Material,
    pub material2: Material,
    /// Unit normal in local space
    pub normal: Vec3,
    pub frame: Frame,
}

/// A box, axis aligned in local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AaBox {
    pub id: u32,
    pub material: Material,
    pub min: Vec3,
    pub max: Vec3,
    pub frame: Frame,
}

/// A triangle mesh: a range of faces in the scene's `MeshPool`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mesh {
    pub id: u32,
    pub material: Material,
    pub face_start: usize,
    pub face_count: usize,
    pub frame: Frame,
}

impl Mesh {
    /// Pool faces belonging to this mesh.
    pub fn faces(&self) -> Range<usize> {
        self.face_start..self.face_start + self.face_count
    }
}

/// Any primitive, used while a scene is being flattened.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
    Plane(Plane),
    Box(AaBox),
    Mesh(Mesh),
}

impl Primitive {
    pub fn id(&self) -> u32 {
        match self {
            Primitive::Sphere(s) => s.id,
            Primitive::Plane(p) => p.id,
            Primitive::Box(b) => b.id,
            Primitive::Mesh(m) => m.id,
        }
    }

    pub fn frame(&self) -> &Frame {
        match self {
            Primitive::Sphere(s) => &s.frame,
            Primitive::Plane(p) => &p.frame,
            Primitive::Box(b) => &b.frame,
            Primitive::Mesh(m) => &m.frame,
        }
    }

    fn frame_mut(&mut self) -> &mut Frame {
        match self {
            Primitive::Sphere(s) => &mut s.frame,
            Primitive::Plane(p) => &mut p.frame,
            Primitive::Box(b) => &mut b.frame,
            Primitive::Mesh(m) => &mut m.frame,
        }
    }

    /// The same primitive placed inside `parent`.
    pub fn placed_in(&self, parent: &Frame) -> Primitive {
        let mut placed = *self;
        let frame = placed.frame().then(parent);
        *placed.frame_mut() = frame;
        placed
    }

    /// Lower-case kind name, as used in scene files.
    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Sphere(_) => "sphere",
            Primitive::Plane(_) => "plane",
            Primitive::Box(_) => "box",
            Primitive::Mesh(_) => "mesh",
        }
    }
}
