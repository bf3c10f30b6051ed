//! Scene geometry and its GPU buffers.

use glam::Vec3;
use meshpick_core::{Mesh, SphereMesh};

use crate::buffer::{create_index_buffer, create_vertex_buffer};
use crate::uniforms::SceneVertex;

/// Length of each coordinate helper line.
pub const AXIS_LENGTH: f32 = 2.0;

/// Interleaves mesh positions and normals.
pub fn mesh_vertices(mesh: &Mesh) -> Vec<SceneVertex> {
    mesh.vertices()
        .chunks_exact(3)
        .zip(mesh.normals().chunks_exact(3))
        .map(|(p, n)| SceneVertex {
            position: [p[0], p[1], p[2]],
            normal: [n[0], n[1], n[2]],
        })
        .collect()
}

/// Line-list indices of the mesh's unique edges.
pub fn edge_indices(mesh: &Mesh) -> Vec<u32> {
    mesh.edges().into_iter().flatten().collect()
}

/// Sphere vertices.
pub fn sphere_vertices(sphere: &SphereMesh) -> Vec<SceneVertex> {
    sphere
        .positions
        .iter()
        .zip(&sphere.normals)
        .map(|(&position, &normal)| SceneVertex { position, normal })
        .collect()
}

/// One line per axis from the origin: X, then Y, then Z.
pub fn axis_vertices() -> [SceneVertex; 6] {
    let line = |axis: Vec3| {
        [
            SceneVertex::default(),
            SceneVertex {
                position: (axis * AXIS_LENGTH).to_array(),
                normal: [0.0; 3],
            },
        ]
    };
    let [x, y, z] = [line(Vec3::X), line(Vec3::Y), line(Vec3::Z)];
    [x[0], x[1], y[0], y[1], z[0], z[1]]
}

/// A vertex buffer with one index buffer.
pub struct GpuGeometry {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuGeometry {
    pub fn new(
        device: &wgpu::Device,
        vertices: &[SceneVertex],
        indices: &[u32],
        label: &str,
    ) -> Self {
        Self {
            vertex_buffer: create_vertex_buffer(device, vertices, Some(label)),
            index_buffer: create_index_buffer(device, indices, Some(label)),
            index_count: indices.len() as u32,
        }
    }
}

/// GPU resources for the loaded mesh.
///
/// Triangles and edges share one vertex buffer, so a face can be drawn on its
/// own by offsetting into the triangle indices.
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub triangle_buffer: wgpu::Buffer,
    pub triangle_count: u32,
    pub edge_buffer: wgpu::Buffer,
    pub edge_index_count: u32,
    /// Radius of the selected-vertex marker, scaled to the mesh size.
    pub marker_radius: f32,
}

impl GpuMesh {
    pub fn new(device: &wgpu::Device, mesh: &Mesh) -> Self {
        let edges = edge_indices(mesh);
        let diagonal = mesh
            .bounding_box()
            .map_or(1.0, |(min, max)| (max - min).length());
        log::debug!(
            "uploading mesh: {} vertices, {} triangles, {} edges",
            mesh.vertex_count(),
            mesh.face_count(),
            edges.len() / 2
        );
        Self {
            vertex_buffer: create_vertex_buffer(
                device,
                &mesh_vertices(mesh),
                Some("mesh vertices"),
            ),
            triangle_buffer: create_index_buffer(device, mesh.indices(), Some("mesh triangles")),
            triangle_count: mesh.face_count() as u32,
            edge_buffer: create_index_buffer(device, &edges, Some("mesh edges")),
            edge_index_count: edges.len() as u32,
            marker_radius: (diagonal * 0.01).max(1e-4),
        }
    }
}
