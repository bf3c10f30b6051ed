//! OBJ and PLY mesh loading.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};

use crate::error::{MeshpickError, Result};
use crate::mesh::Mesh;

/// Loads a mesh from an `.obj` or `.ply` file.
pub fn load_mesh(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let mesh = match extension.as_str() {
        "ply" => {
            let mut reader = BufReader::new(File::open(path)?);
            load_ply_from_reader(&mut reader)?
        }
        "obj" => {
            let (models, _materials) = tobj::load_obj(path, &obj_load_options())?;
            mesh_from_obj_models(&models)?
        }
        _ => return Err(MeshpickError::UnsupportedFormat(path.display().to_string())),
    };

    log::info!(
        "{} loaded, vertices: {}, faces: {}",
        path.display(),
        mesh.vertex_count(),
        mesh.face_count()
    );
    Ok(mesh)
}

/// Loads a mesh from PLY data (ASCII or binary).
///
/// Reads `x`, `y`, `z` (and `nx`, `ny`, `nz` when all three are present)
/// from the `vertex` element and the `vertex_indices` list from the `face`
/// element. Other vertex properties are ignored.
pub fn load_ply_from_reader(reader: &mut impl BufRead) -> Result<Mesh> {
    let parser = Parser::<DefaultElement>::new();
    let ply = parser
        .read_ply(reader)
        .map_err(|e| MeshpickError::PlyParse(e.to_string()))?;

    let vertex_elements = ply
        .payload
        .get("vertex")
        .ok_or_else(|| MeshpickError::PlyParse("missing 'vertex' element".to_string()))?;

    let mut vertices = Vec::with_capacity(vertex_elements.len() * 3);
    let mut normals = Vec::new();
    let has_normals = vertex_elements
        .first()
        .is_some_and(|v| v.contains_key("nx") && v.contains_key("ny") && v.contains_key("nz"));
    if has_normals {
        normals.reserve(vertex_elements.len() * 3);
    }

    for (i, vertex) in vertex_elements.iter().enumerate() {
        for key in ["x", "y", "z"] {
            vertices.push(scalar_property(vertex, key, i)?);
        }
        if has_normals {
            for key in ["nx", "ny", "nz"] {
                normals.push(scalar_property(vertex, key, i)?);
            }
        }
    }

    let mut indices = Vec::new();
    if let Some(faces) = ply.payload.get("face") {
        indices.reserve(faces.len() * 3);
        for (i, face) in faces.iter().enumerate() {
            let corners = face
                .get("vertex_indices")
                .or_else(|| face.get("vertex_index"))
                .ok_or_else(|| {
                    MeshpickError::PlyParse(format!("face {i} has no vertex_indices list"))
                })
                .and_then(|p| list_property(p, i))?;
            push_fan(&mut indices, &corners, i);
        }
    }

    Mesh::new(vertices, indices, normals)
}

/// Loads a mesh from OBJ data. Material libraries are not read.
pub fn load_obj_from_reader(reader: &mut impl BufRead) -> Result<Mesh> {
    let (models, _materials) = tobj::load_obj_buf(reader, &obj_load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })?;
    mesh_from_obj_models(&models)
}

fn obj_load_options() -> tobj::LoadOptions {
    // tobj numbers positions by first use in a face, so vertex numbers can
    // differ from the file's `v` order and unused positions are dropped.
    // Indices and positions always agree with each other.
    tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ..Default::default()
    }
}

/// Concatenates all OBJ models into one mesh.
///
/// Normals are indexed separately from positions in OBJ, so they are
/// scattered onto positions; a mesh where any position is left without a
/// normal falls back to computed normals.
fn mesh_from_obj_models(models: &[tobj::Model]) -> Result<Mesh> {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let mut normals: Vec<Option<[f32; 3]>> = Vec::new();

    for model in models {
        let mesh = &model.mesh;
        let base = (vertices.len() / 3) as u32;
        vertices.extend_from_slice(&mesh.positions);
        indices.extend(mesh.indices.iter().map(|&i| i + base));
        normals.resize(vertices.len() / 3, None);

        if !mesh.normals.is_empty() && mesh.normal_indices.len() == mesh.indices.len() {
            for (&vi, &ni) in mesh.indices.iter().zip(&mesh.normal_indices) {
                let n = ni as usize * 3;
                if let Some(normal) = mesh.normals.get(n..n + 3) {
                    normals[(vi + base) as usize] = Some([normal[0], normal[1], normal[2]]);
                }
            }
        }
    }

    let normals = if normals.iter().all(Option::is_some) {
        normals.into_iter().flatten().flatten().collect()
    } else {
        Vec::new()
    };

    Mesh::new(vertices, indices, normals)
}

fn scalar_property(element: &DefaultElement, key: &str, index: usize) -> Result<f32> {
    let value = element
        .get(key)
        .ok_or_else(|| MeshpickError::PlyParse(format!("vertex {index} has no '{key}'")))?;
    let scalar = match *value {
        Property::Char(v) => f32::from(v),
        Property::UChar(v) => f32::from(v),
        Property::Short(v) => f32::from(v),
        Property::UShort(v) => f32::from(v),
        Property::Int(v) => v as f32,
        Property::UInt(v) => v as f32,
        Property::Float(v) => v,
        Property::Double(v) => v as f32,
        _ => {
            return Err(MeshpickError::PlyParse(format!(
                "vertex {index} property '{key}' is a list"
            )))
        }
    };
    Ok(scalar)
}

fn list_property(value: &Property, face: usize) -> Result<Vec<u32>> {
    fn non_negative<T: Copy + TryInto<u32>>(values: &[T], face: usize) -> Result<Vec<u32>> {
        values
            .iter()
            .map(|&v| {
                v.try_into().map_err(|_| {
                    MeshpickError::PlyParse(format!("face {face} has a negative vertex index"))
                })
            })
            .collect()
    }

    match value {
        Property::ListChar(v) => non_negative(v, face),
        Property::ListUChar(v) => Ok(v.iter().map(|&i| u32::from(i)).collect()),
        Property::ListShort(v) => non_negative(v, face),
        Property::ListUShort(v) => Ok(v.iter().map(|&i| u32::from(i)).collect()),
        Property::ListInt(v) => non_negative(v, face),
        Property::ListUInt(v) => Ok(v.clone()),
        _ => Err(MeshpickError::PlyParse(format!(
            "face {face} vertex_indices is not an integer list"
        ))),
    }
}

/// Appends polygon `corners` as a triangle fan.
fn push_fan(indices: &mut Vec<u32>, corners: &[u32], face: usize) {
    if corners.len() < 3 {
        log::warn!(
            "skipping degenerate face {face} with {} corners",
            corners.len()
        );
        return;
    }
    for pair in corners[1..].windows(2) {
        indices.extend_from_slice(&[corners[0], pair[0], pair[1]]);
    }
}
