//! JSON5 scene file loading.
//!
//! Scene files are JSON5, so comments and trailing commas are accepted.
//! A scene file lists a camera, lights, named materials and a tree of
//! objects. Objects may be grouped under `node`s, whose transforms compose
//! onto their children, and re-used at the root level through `instance`s.
//! Loading flattens the tree: every primitive comes out with its final
//! frame and is filed into the scene by kind.
//!
//! ```json
//! {
//!   "resolution": [640, 360],
//!   "camera": { "position": [0, 1, 5], "lookAt": [0, 0, 0], "up": [0, 1, 0], "fovy": 45 },
//!   "lights": [ { "type": "directional", "colour": [1, 1, 1], "direction": [0, 1, 0] } ],
//!   "materials": [ { "name": "grey", "diffuse": [0.8, 0.8, 0.8], "specular": [0, 0, 0] } ],
//!   "objects": [ { "type": "sphere", "radius": 1, "materials": ["grey"] } ]
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glint_math::{Frame, Vec3};
use serde::Deserialize;
use thiserror::Error;

use crate::light::{Attenuation, LightKind};
use crate::mesh::MeshData;
use crate::primitive::Primitive;
use crate::scene::{CameraSettings, SceneBuilder, SceneDescription};
use crate::{Color, Material};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene file error: {0}")]
    Parse(#[from] json5::Error),

    #[error("Failed to load mesh {path}: {source}")]
    Mesh {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("Object '{0}' has no material")]
    MissingMaterial(String),

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("Instance references unknown node: {0}")]
    UnknownReference(String),

    #[error("Missing field '{field}' on {object}")]
    MissingField { object: String, field: &'static str },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a scene file.
///
/// `image_scale` multiplies the file's resolution. Mesh paths are resolved
/// against the scene file's directory first, then the working directory.
pub fn load_scene<P: AsRef<Path>>(path: P, image_scale: f32) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    log::info!("Parsing file: {}", path.display());

    let text = std::fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    parse_scene(&text, image_scale, name, base_dir)
}

/// Load a scene from JSON text. Mesh paths resolve against the working
/// directory.
pub fn load_scene_from_str(json: &str, image_scale: f32) -> LoadResult<SceneDescription> {
    parse_scene(json, image_scale, "unnamed", Path::new("."))
}

fn parse_scene(
    json: &str,
    image_scale: f32,
    name: &str,
    base_dir: &Path,
) -> LoadResult<SceneDescription> {
    let file: SceneFile = json5::from_str(json)?;

    let camera = CameraSettings {
        width: scale_resolution(file.resolution[0], image_scale),
        height: scale_resolution(file.resolution[1], image_scale),
        eye: Vec3::from(file.camera.position),
        look_at: Vec3::from(file.camera.look_at),
        up: Vec3::from(file.camera.up),
        fovy: file.camera.fovy,
    };

    let builder = SceneBuilder::new(camera)
        .with_name(name)
        .with_ambient(Color::from(file.ambient))
        .with_sampling(file.jitter, file.samples);

    let mut loader = Loader {
        builder,
        materials: HashMap::new(),
        named: HashMap::new(),
        mesh_cache: HashMap::new(),
        base_dir: base_dir.to_path_buf(),
    };

    for light in &file.lights {
        loader.load_light(light)?;
    }
    for material in &file.materials {
        loader.load_material(material);
    }
    for object in &file.objects {
        let primitives = loader.load_object(object, &Frame::IDENTITY, false)?;
        for primitive in primitives {
            loader.builder.push(primitive);
        }
    }

    log::info!("Loaded {} geometric objects", loader.builder.geometry_count());
    Ok(loader.builder.build())
}

fn scale_resolution(pixels: u32, image_scale: f32) -> u32 {
    ((pixels as f32 * image_scale) as u32).max(1)
}

/// Load-time state threaded through the object tree.
struct Loader {
    builder: SceneBuilder,
    materials: HashMap<String, Material>,
    /// Flattened primitives of every named node or geometry, for instancing
    named: HashMap<String, Vec<Primitive>>,
    mesh_cache: HashMap<PathBuf, MeshData>,
    base_dir: PathBuf,
}

impl Loader {
    fn load_light(&mut self, light: &LightFile) -> LoadResult<()> {
        let name = light.name.as_deref().unwrap_or("unnamed");
        let colour = Color::from(light.colour) * light.power;

        let kind = match light.kind.as_str() {
            "point" => {
                let position = light.position.ok_or_else(|| LoadError::MissingField {
                    object: format!("light '{}'", name),
                    field: "position",
                })?;
                LightKind::Point {
                    position: Vec3::from(position),
                    attenuation: light
                        .attenuation
                        .map(Attenuation::from_array)
                        .unwrap_or(Attenuation::NONE),
                }
            }
            "directional" => {
                let direction = light.direction.ok_or_else(|| LoadError::MissingField {
                    object: format!("light '{}'", name),
                    field: "direction",
                })?;
                if light.attenuation.is_some() {
                    log::warn!("Directional light '{}' has attenuation, ignoring", name);
                }
                LightKind::Directional {
                    direction: Vec3::from(direction),
                }
            }
            other => {
                log::warn!("Unknown light type '{}' on '{}', skipping", other, name);
                return Ok(());
            }
        };

        self.builder.add_light(colour, kind);
        Ok(())
    }

    fn load_material(&mut self, material: &MaterialFile) {
        let loaded = self.builder.material(
            Color::from(material.diffuse),
            Color::from(material.specular),
            material.shininess.as_ref().map_or(0.0, ScalarOrVec::first),
        );
        if self.materials.insert(material.name.clone(), loaded).is_some() {
            log::warn!("Material '{}' defined twice, keeping the last", material.name);
        }
    }

    fn lookup_material(&self, name: &str) -> LoadResult<Material> {
        self.materials
            .get(name)
            .copied()
            .ok_or_else(|| LoadError::UnknownMaterial(name.to_string()))
    }

    /// Flatten one object (and its children) under `parent`.
    fn load_object(
        &mut self,
        object: &ObjectFile,
        parent: &Frame,
        in_node: bool,
    ) -> LoadResult<Vec<Primitive>> {
        let local = object.frame();

        let primitives = match object.kind.as_str() {
            "sphere" | "plane" | "box" | "mesh" => {
                let primitive = self.load_geometry(object, local.then(parent))?;
                log::debug!("Loaded {} from {}", primitive.kind(), object.describe());
                vec![primitive]
            }
            "node" => {
                let frame = local.then(parent);
                let mut primitives = Vec::new();
                for child in &object.children {
                    primitives.extend(self.load_object(child, &frame, true)?);
                }
                primitives
            }
            "instance" if in_node => {
                log::warn!("Instances are not allowed inside nodes, must be defined at root level");
                return Ok(Vec::new());
            }
            "instance" => {
                let reference = object.reference.as_deref().ok_or_else(|| LoadError::MissingField {
                    object: object.describe(),
                    field: "ref",
                })?;
                let source = self
                    .named
                    .get(reference)
                    .ok_or_else(|| LoadError::UnknownReference(reference.to_string()))?;
                // Instances hang off the root
                return Ok(source.iter().map(|p| p.placed_in(&local)).collect());
            }
            other => {
                log::warn!("Unknown object type '{}', skipping", other);
                return Ok(Vec::new());
            }
        };

        if let Some(name) = &object.name {
            self.named.insert(name.clone(), primitives.clone());
        }

        Ok(primitives)
    }

    fn load_geometry(&mut self, object: &ObjectFile, frame: Frame) -> LoadResult<Primitive> {
        let mut materials = object.materials.iter().map(|name| self.lookup_material(name));
        let material = materials
            .next()
            .ok_or_else(|| LoadError::MissingMaterial(object.describe()))??;
        let second = materials.next().transpose()?;

        let primitive = match object.kind.as_str() {
            "sphere" => self
                .builder
                .sphere(material, object.radius.unwrap_or(1.0), frame),
            "plane" => self.builder.plane(
                material,
                second,
                object.normal.map_or(Vec3::Y, Vec3::from),
                frame,
            ),
            "box" => self.builder.aabox(
                material,
                object.min.map_or(Vec3::splat(-1.0), Vec3::from),
                object.max.map_or(Vec3::ONE, Vec3::from),
                frame,
            ),
            _ => {
                let filepath = object.filepath.as_deref().ok_or_else(|| LoadError::MissingField {
                    object: object.describe(),
                    field: "filepath",
                })?;
                let path = self.resolve(filepath);
                if !self.mesh_cache.contains_key(&path) {
                    let data = MeshData::load_obj(&path).map_err(|source| LoadError::Mesh {
                        path: path.clone(),
                        source,
                    })?;
                    self.mesh_cache.insert(path.clone(), data);
                }
                let data = &self.mesh_cache[&path];
                self.builder.mesh(material, data, frame)
            }
        };

        Ok(primitive)
    }

    fn resolve(&self, filepath: &str) -> PathBuf {
        let beside_scene = self.base_dir.join(filepath);
        if beside_scene.exists() {
            beside_scene
        } else {
            PathBuf::from(filepath)
        }
    }
}

// Scene file schema

#[derive(Deserialize)]
struct SceneFile {
    #[serde(default = "default_resolution")]
    resolution: [u32; 2],
    camera: CameraFile,
    #[serde(default = "default_ambient")]
    ambient: [f32; 3],
    #[serde(rename = "AA_jitter", default)]
    jitter: bool,
    #[serde(rename = "AA_samples", default = "default_samples")]
    samples: i32,
    #[serde(default)]
    lights: Vec<LightFile>,
    #[serde(default)]
    materials: Vec<MaterialFile>,
    #[serde(default)]
    objects: Vec<ObjectFile>,
}

fn default_resolution() -> [u32; 2] {
    [1280, 720]
}

fn default_ambient() -> [f32; 3] {
    [0.1, 0.1, 0.1]
}

fn default_samples() -> i32 {
    1
}

fn default_power() -> f32 {
    1.0
}

#[derive(Deserialize)]
struct CameraFile {
    position: [f32; 3],
    #[serde(rename = "lookAt")]
    look_at: [f32; 3],
    up: [f32; 3],
    fovy: f32,
}

#[derive(Deserialize)]
struct LightFile {
    #[serde(rename = "type")]
    kind: String,
    name: Option<String>,
    colour: [f32; 3],
    #[serde(default = "default_power")]
    power: f32,
    position: Option<[f32; 3]>,
    direction: Option<[f32; 3]>,
    attenuation: Option<[f32; 3]>,
}

#[derive(Deserialize)]
struct MaterialFile {
    name: String,
    diffuse: [f32; 3],
    #[serde(default)]
    specular: [f32; 3],
    shininess: Option<ScalarOrVec>,
}

/// A value given either as one number or as a list of numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum ScalarOrVec {
    Scalar(f32),
    Vector(Vec<f32>),
}

impl ScalarOrVec {
    fn first(&self) -> f32 {
        match self {
            ScalarOrVec::Scalar(x) => *x,
            ScalarOrVec::Vector(v) => v.first().copied().unwrap_or(0.0),
        }
    }

    fn to_vec3(&self) -> Vec3 {
        match self {
            ScalarOrVec::Scalar(x) => Vec3::splat(*x),
            ScalarOrVec::Vector(v) => match v.as_slice() {
                [x, y, z, ..] => Vec3::new(*x, *y, *z),
                [x] => Vec3::splat(*x),
                _ => Vec3::ONE,
            },
        }
    }
}

#[derive(Deserialize)]
struct ObjectFile {
    #[serde(rename = "type")]
    kind: String,
    name: Option<String>,
    #[serde(default)]
    materials: Vec<String>,
    position: Option<[f32; 3]>,
    rotation: Option<[f32; 3]>,
    scale: Option<ScalarOrVec>,
    radius: Option<f32>,
    normal: Option<[f32; 3]>,
    min: Option<[f32; 3]>,
    max: Option<[f32; 3]>,
    filepath: Option<String>,
    #[serde(default)]
    children: Vec<ObjectFile>,
    #[serde(rename = "ref")]
    reference: Option<String>,
}

impl ObjectFile {
    fn frame(&self) -> Frame {
        Frame::from_trs(
            self.position.map_or(Vec3::ZERO, Vec3::from),
            self.rotation.map_or(Vec3::ZERO, Vec3::from),
            self.scale.as_ref().map_or(Vec3::ONE, ScalarOrVec::to_vec3),
        )
    }

    fn describe(&self) -> String {
        match &self.name {
            Some(name) => format!("{} '{}'", self.kind, name),
            None => self.kind.clone(),
        }
    }
}
