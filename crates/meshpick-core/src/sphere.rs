//! UV sphere generation for light and selection markers.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// Indexed triangle mesh of a sphere centered at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

/// Builds a sphere of `radius` with `slices` segments around +Y and `stacks`
/// bands from pole to pole.
///
/// `slices` is raised to at least 3 and `stacks` to at least 2. The seam
/// column is duplicated, so there are `(slices + 1) * (stacks + 1)` vertices.
pub fn uv_sphere(radius: f32, slices: u32, stacks: u32) -> SphereMesh {
    let slices = slices.max(3);
    let stacks = stacks.max(2);
    let ring = slices + 1;

    let mut positions = Vec::with_capacity((ring * (stacks + 1)) as usize);
    let mut normals = Vec::with_capacity(positions.capacity());
    for stack in 0..=stacks {
        let polar = PI * stack as f32 / stacks as f32;
        for slice in 0..=slices {
            let azimuth = TAU * slice as f32 / slices as f32;
            let normal = Vec3::new(
                polar.sin() * azimuth.cos(),
                polar.cos(),
                -polar.sin() * azimuth.sin(),
            );
            positions.push((normal * radius).to_array());
            normals.push(normal.to_array());
        }
    }

    let mut indices = Vec::with_capacity((slices * stacks * 6) as usize);
    for stack in 0..stacks {
        for slice in 0..slices {
            let a = stack * ring + slice;
            let b = a + ring;
            // The pole bands collapse to single triangles.
            if stack != 0 {
                indices.extend_from_slice(&[a, b, a + 1]);
            }
            if stack != stacks - 1 {
                indices.extend_from_slice(&[a + 1, b, b + 1]);
            }
        }
    }

    SphereMesh {
        positions,
        normals,
        indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertices_on_surface() {
        let sphere = uv_sphere(0.25, 16, 8);
        assert_eq!(sphere.positions.len(), 17 * 9);
        for (p, n) in sphere.positions.iter().zip(&sphere.normals) {
            assert!((Vec3::from_array(*p).length() - 0.25).abs() < 1e-5);
            assert!((Vec3::from_array(*n).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_indices_in_range_and_outward() {
        let sphere = uv_sphere(1.0, 12, 6);
        assert_eq!(sphere.indices.len() % 3, 0);
        assert_eq!(sphere.indices.len(), (12 * 6 * 2 - 2 * 12) * 3);
        for tri in sphere.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| Vec3::from_array(sphere.positions[i as usize]));
            let normal = (b - a).cross(c - a);
            let center = (a + b + c) / 3.0;
            assert!(normal.dot(center) > 0.0, "inward-facing triangle {tri:?}");
        }
    }

    #[test]
    fn test_minimum_resolution() {
        let sphere = uv_sphere(1.0, 0, 0);
        assert_eq!(sphere.positions.len(), 4 * 3);
        assert!(!sphere.indices.is_empty());
    }
}
