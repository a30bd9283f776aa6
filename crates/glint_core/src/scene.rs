//! Flat scene description and the builder that assembles it.
//!
//! The renderer never walks a hierarchy. By the time a `SceneDescription`
//! exists, every primitive carries its fully composed frame and every mesh
//! points into the shared `MeshPool`.

use glint_math::{Frame, Vec3};

use crate::mesh::{MeshData, MeshPool};
use crate::primitive::{AaBox, Mesh, Plane, Primitive, Sphere};
use crate::{Color, Light, LightKind, Material};

/// Camera placement and image size, as given by the scene file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSettings {
    pub width: u32,
    pub height: u32,
    pub eye: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fovy: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            eye: Vec3::new(0.0, 0.0, 5.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            fovy: 45.0,
        }
    }
}

/// Everything the renderer consumes.
#[derive(Clone, Debug)]
pub struct SceneDescription {
    /// Scene name (file stem when loaded from disk)
    pub name: String,

    pub camera: CameraSettings,

    /// Ambient light colour
    pub ambient: Color,

    /// Jitter camera rays within each pixel
    pub jitter: bool,

    /// Number of progressive iterations; negative means unbounded
    pub samples: i32,

    pub lights: Vec<Light>,
    pub spheres: Vec<Sphere>,
    pub planes: Vec<Plane>,
    pub boxes: Vec<AaBox>,
    pub meshes: Vec<Mesh>,

    /// Vertex and face storage shared by all meshes
    pub mesh_pool: MeshPool,
}

impl SceneDescription {
    /// Total number of primitives of every kind.
    pub fn primitive_count(&self) -> usize {
        self.spheres.len() + self.planes.len() + self.boxes.len() + self.meshes.len()
    }

    /// Total number of mesh triangles.
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.face_count).sum()
    }
}

/// Accumulates a scene one primitive at a time.
///
/// The builder owns the running counters (geometry, material and light
/// ids) and the mesh pool, so ids stay dense and mesh face ranges stay
/// valid however the primitives are produced.
#[derive(Debug)]
pub struct SceneBuilder {
    scene: SceneDescription,
    next_geometry_id: u32,
    next_material_id: u32,
}

impl SceneBuilder {
    /// Create a new builder with an empty scene.
    pub fn new(camera: CameraSettings) -> Self {
        Self {
            scene: SceneDescription {
                name: String::from("untitled"),
                camera,
                ambient: Color::splat(0.1),
                jitter: false,
                samples: 1,
                lights: Vec::new(),
                spheres: Vec::new(),
                planes: Vec::new(),
                boxes: Vec::new(),
                meshes: Vec::new(),
                mesh_pool: MeshPool::new(),
            },
            next_geometry_id: 0,
            next_material_id: 0,
        }
    }

    /// Set the scene name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.scene.name = name.into();
        self
    }

    /// Set the ambient light colour.
    pub fn with_ambient(mut self, ambient: Color) -> Self {
        self.scene.ambient = ambient;
        self
    }

    /// Set anti-aliasing settings.
    pub fn with_sampling(mut self, jitter: bool, samples: i32) -> Self {
        self.scene.jitter = jitter;
        self.scene.samples = samples;
        self
    }

    /// Register a material, assigning the next material id.
    pub fn material(&mut self, diffuse: Color, specular: Color, shininess: f32) -> Material {
        let material = Material::new(self.next_material_id, diffuse, specular, shininess);
        self.next_material_id += 1;
        material
    }

    /// Add a light, assigning the next light id.
    pub fn add_light(&mut self, colour: Color, kind: LightKind) -> u32 {
        let id = self.scene.lights.len() as u32;
        let light = match kind {
            LightKind::Directional { direction } => Light::directional(id, colour, direction),
            LightKind::Point {
                position,
                attenuation,
            } => Light::point(id, colour, position, attenuation),
        };
        self.scene.lights.push(light);
        id
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_geometry_id;
        self.next_geometry_id += 1;
        id
    }

    /// Create a sphere with a fresh geometry id. Not added to the scene
    /// until passed to `push`.
    pub fn sphere(&mut self, material: Material, radius: f32, frame: Frame) -> Primitive {
        Primitive::Sphere(Sphere {
            id: self.next_id(),
            material,
            radius,
            frame,
        })
    }

    /// Create a plane. A second material turns on the checkerboard.
    pub fn plane(
        &mut self,
        material: Material,
        second: Option<Material>,
        normal: Vec3,
        frame: Frame,
    ) -> Primitive {
        Primitive::Plane(Plane {
            id: self.next_id(),
            two_materials: second.is_some(),
            material1: material,
            material2: second.unwrap_or(material),
            normal: normal.normalize_or_zero(),
            frame,
        })
    }

    /// Create an axis-aligned box.
    pub fn aabox(&mut self, material: Material, min: Vec3, max: Vec3, frame: Frame) -> Primitive {
        Primitive::Box(AaBox {
            id: self.next_id(),
            material,
            min: min.min(max),
            max: min.max(max),
            frame,
        })
    }

    /// Create a mesh, copying its geometry into the shared pool.
    pub fn mesh(&mut self, material: Material, data: &MeshData, frame: Frame) -> Primitive {
        let faces = self.scene.mesh_pool.append(&data.vertices, &data.faces);
        Primitive::Mesh(Mesh {
            id: self.next_id(),
            material,
            face_start: faces.start,
            face_count: faces.len(),
            frame,
        })
    }

    /// File a primitive under its kind's collection.
    pub fn push(&mut self, primitive: Primitive) {
        match primitive {
            Primitive::Sphere(s) => self.scene.spheres.push(s),
            Primitive::Plane(p) => self.scene.planes.push(p),
            Primitive::Box(b) => self.scene.boxes.push(b),
            Primitive::Mesh(m) => self.scene.meshes.push(m),
        }
    }

    /// Number of geometry ids handed out so far.
    pub fn geometry_count(&self) -> u32 {
        self.next_geometry_id
    }

    /// Finish the scene.
    pub fn build(self) -> SceneDescription {
        let scene = self.scene;
        log::info!(
            "Scene '{}': {} spheres, {} planes, {} boxes, {} meshes ({} triangles), {} lights",
            scene.name,
            scene.spheres.len(),
            scene.planes.len(),
            scene.boxes.len(),
            scene.meshes.len(),
            scene.triangle_count(),
            scene.lights.len()
        );
        scene
    }
}
