//! Triangle mesh storage.

use std::collections::BTreeSet;

use glam::Vec3;

use crate::error::{MeshpickError, Result};

/// A triangle mesh stored as flat arrays, immutable after construction.
///
/// Vertex `i` is `(vertices[3i], vertices[3i+1], vertices[3i+2])` and face
/// `f` is `indices[3f..3f+3]`. Pick names and selection identifiers use the
/// same flat offsets, so vertex `i` is named `3i` and face `f` is named `3f`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<f32>,
    indices: Vec<u32>,
    normals: Vec<f32>,
}

impl Mesh {
    /// Creates a mesh, validating the flat arrays.
    ///
    /// When `normals` is empty, per-vertex normals are computed from the faces.
    pub fn new(vertices: Vec<f32>, indices: Vec<u32>, normals: Vec<f32>) -> Result<Self> {
        if vertices.len() % 3 != 0 {
            return Err(MeshpickError::MalformedMesh(format!(
                "vertex array length {} is not a multiple of 3",
                vertices.len()
            )));
        }
        if indices.len() % 3 != 0 {
            return Err(MeshpickError::MalformedMesh(format!(
                "index array length {} is not a multiple of 3",
                indices.len()
            )));
        }
        let vertex_count = vertices.len() / 3;
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshpickError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }
        if !normals.is_empty() && normals.len() != vertices.len() {
            return Err(MeshpickError::MalformedMesh(format!(
                "{} normal components for {} vertex components",
                normals.len(),
                vertices.len()
            )));
        }

        let mut mesh = Self {
            vertices,
            indices,
            normals,
        };
        if mesh.normals.is_empty() {
            mesh.normals = mesh.compute_vertex_normals();
        }
        Ok(mesh)
    }

    /// Flat vertex positions.
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Flat triangle indices.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Flat per-vertex normals (same length as [`Self::vertices`]).
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of triangles.
    pub fn face_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Position of vertex `index`.
    pub fn vertex(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.vertices[index * 3..index * 3 + 3])
    }

    /// Position of the vertex starting at flat `offset` in the vertex array.
    pub fn vertex_at_offset(&self, offset: usize) -> Option<Vec3> {
        (offset % 3 == 0 && offset + 3 <= self.vertices.len())
            .then(|| Vec3::from_slice(&self.vertices[offset..offset + 3]))
    }

    /// Vertex indices of face `face`.
    pub fn face(&self, face: usize) -> [u32; 3] {
        let f = &self.indices[face * 3..face * 3 + 3];
        [f[0], f[1], f[2]]
    }

    /// Vertex indices of the face starting at flat `offset` in the index array.
    pub fn face_at_offset(&self, offset: usize) -> Option<[u32; 3]> {
        (offset % 3 == 0 && offset + 3 <= self.indices.len()).then(|| self.face(offset / 3))
    }

    /// Corner positions of face `face`.
    pub fn face_positions(&self, face: usize) -> [Vec3; 3] {
        self.face(face).map(|v| self.vertex(v as usize))
    }

    /// Iterates over vertex positions.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.chunks_exact(3).map(Vec3::from_slice)
    }

    /// Axis-aligned bounding box, or `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        let mut positions = self.positions();
        let first = positions.next()?;
        Some(positions.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    /// Unique undirected edges, each as `[low, high]` vertex indices.
    pub fn edges(&self) -> Vec<[u32; 2]> {
        let mut edges = BTreeSet::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                edges.insert([a.min(b), a.max(b)]);
            }
        }
        edges.into_iter().collect()
    }

    /// Area-weighted vertex normals.
    fn compute_vertex_normals(&self) -> Vec<f32> {
        let mut accum = vec![Vec3::ZERO; self.vertex_count()];
        for face in 0..self.face_count() {
            let [a, b, c] = self.face_positions(face);
            // Cross product length is twice the area, so this weights by area.
            let n = (b - a).cross(c - a);
            for v in self.face(face) {
                accum[v as usize] += n;
            }
        }
        accum
            .into_iter()
            .flat_map(|n| n.normalize_or(Vec3::Y).to_array())
            .collect()
    }
}
