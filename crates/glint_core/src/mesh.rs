//! Shared triangle storage for every mesh in a scene.
//!
//! Meshes do not own geometry. All vertices and faces live in one
//! `MeshPool`, and each `Mesh` primitive refers to a contiguous range of
//! faces in it. Face indices are absolute indices into the pool's vertex
//! array.

use std::ops::Range;
use std::path::Path;

use glint_math::Vec3;

/// Pooled vertex and face arrays.
#[derive(Clone, Debug, Default)]
pub struct MeshPool {
    /// Vertex positions, local space of the owning mesh
    pub vertices: Vec<Vec3>,

    /// Triangles as absolute vertex indices
    pub faces: Vec<[u32; 3]>,
}

impl MeshPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one mesh worth of geometry.
    ///
    /// `faces` index into `vertices` (zero based); they are offset by the
    /// current pool vertex count. Faces that reference a vertex outside
    /// `vertices` are dropped. Returns the range of pool faces the mesh
    /// now occupies.
    pub fn append(&mut self, vertices: &[Vec3], faces: &[[u32; 3]]) -> Range<usize> {
        let vertex_offset = self.vertices.len() as u32;
        let face_start = self.faces.len();
        let vertex_count = vertices.len() as u32;

        self.vertices.extend_from_slice(vertices);

        let mut dropped = 0;
        for face in faces {
            if face.iter().any(|&i| i >= vertex_count) {
                dropped += 1;
                continue;
            }
            self.faces.push(face.map(|i| i + vertex_offset));
        }

        if dropped > 0 {
            log::warn!("Dropped {} faces referencing missing vertices", dropped);
        }

        face_start..self.faces.len()
    }

    /// The three corners of pool face `face`.
    #[inline]
    pub fn triangle(&self, face: usize) -> [Vec3; 3] {
        let [a, b, c] = self.faces[face];
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the pool holds no geometry.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// Triangle soup read from a mesh file, before pooling.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<[u32; 3]>,
}

impl MeshData {
    /// Load an OBJ file. Every model in the file is merged into one mesh.
    pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Self, tobj::LoadError> {
        let (models, _materials) = tobj::load_obj(
            path.as_ref(),
            &tobj::LoadOptions {
                single_index: true,
                triangulate: true,
                ..Default::default()
            },
        )?;

        let mut data = MeshData::default();
        for model in &models {
            let mesh = &model.mesh;
            let base = data.vertices.len() as u32;

            data.vertices.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2])),
            );
            data.faces.extend(
                mesh.indices
                    .chunks_exact(3)
                    .map(|f| [f[0] + base, f[1] + base, f[2] + base]),
            );
        }

        log::info!(
            "Loaded {} with {} vertices, {} triangles",
            path.as_ref().display(),
            data.vertices.len(),
            data.faces.len()
        );

        Ok(data)
    }
}
