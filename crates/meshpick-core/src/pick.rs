//! Click picking of mesh vertices and faces.
//!
//! Picking runs a selection pass over the mesh with a projection narrowed to
//! a small square around the click. Every primitive is named by its offset
//! into the flat mesh arrays (`3 * index`), and the hit with the smallest
//! depth wins.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::FrameTransforms;
use crate::hit_record::HitRecord;
use crate::mesh::Mesh;
use crate::options::CameraOptions;
use crate::select::{SelectBackend, SelectScope};
use crate::viewport::ViewportRegion;

/// Which kind of mesh element a click selects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Clicks select nothing.
    #[default]
    None,
    /// Clicks select vertices.
    Vertex,
    /// Clicks select triangles.
    Face,
}

/// Input to [`pick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickRequest {
    /// Click position in window pixels, origin top-left.
    pub click_pos: Vec2,
    /// Half-size in pixels of the square pick region.
    pub region_radius: f32,
    /// The viewport the mesh is drawn into.
    pub viewport: ViewportRegion,
    /// What to pick.
    pub mode: SelectionMode,
}

/// Outcome of a pick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PickResult {
    /// Number of hit records produced by the selection pass.
    pub hit_count: usize,
    /// Offset of the nearest element: `3 * vertex` or `3 * face`.
    pub selected_id: Option<u32>,
}

/// Builds a matrix that maps the `size` rectangle centered at `center`
/// (window pixels) onto the full normalized device square of `viewport`.
///
/// Multiply it on the left of a projection to restrict the view volume to
/// that rectangle. A non-positive size yields the identity.
pub fn pick_matrix(center: Vec2, size: Vec2, viewport: ViewportRegion) -> Mat4 {
    if size.x <= 0.0 || size.y <= 0.0 || viewport.is_empty() {
        return Mat4::IDENTITY;
    }
    let ndc = viewport.window_to_ndc(center);
    let scale = Vec3::new(
        viewport.width as f32 / size.x,
        viewport.height as f32 / size.y,
        1.0,
    );
    Mat4::from_scale(scale) * Mat4::from_translation(Vec3::new(-ndc.x, -ndc.y, 0.0))
}

/// Returns the last name of the record with the smallest minimum depth.
///
/// Records without names are skipped. On equal depths the earlier record
/// wins.
pub fn resolve_nearest(records: &[HitRecord]) -> Option<u32> {
    let mut nearest: Option<&HitRecord> = None;
    for record in records.iter().filter(|r| !r.names.is_empty()) {
        if nearest.is_none_or(|best| record.min_depth < best.min_depth) {
            nearest = Some(record);
        }
    }
    nearest.and_then(HitRecord::last_name)
}

/// Picks the element of `mesh` nearest to the viewer under the click.
///
/// `transforms` must be the same snapshot used to draw the frame. With
/// [`SelectionMode::None`] the backend is not touched.
pub fn pick<B: SelectBackend + ?Sized>(
    request: &PickRequest,
    mesh: &Mesh,
    transforms: &FrameTransforms,
    options: &CameraOptions,
    backend: &mut B,
) -> PickResult {
    if request.mode == SelectionMode::None || request.viewport.is_empty() {
        return PickResult::default();
    }

    let projection = pick_matrix(
        request.click_pos,
        Vec2::splat(request.region_radius * 2.0),
        request.viewport,
    ) * transforms.projection(options.near, options.pick_far);

    let mut scope = SelectScope::begin(backend, projection, transforms.model_view());
    scope.init_names();
    scope.push_name(u32::MAX);
    match request.mode {
        SelectionMode::Vertex => {
            for (i, position) in mesh.positions().enumerate() {
                scope.load_name((3 * i) as u32);
                scope.draw_point(position);
            }
        }
        SelectionMode::Face => {
            for face in 0..mesh.face_count() {
                scope.load_name((3 * face) as u32);
                scope.draw_triangle(mesh.face_positions(face));
            }
        }
        SelectionMode::None => {}
    }
    let buffer = scope.finish();

    let selected_id = match buffer.records() {
        Ok(records) => resolve_nearest(&records),
        Err(e) => {
            log::warn!("discarding hit buffer: {e}");
            None
        }
    };
    let result = PickResult {
        hit_count: buffer.hit_count(),
        selected_id,
    };
    log::debug!(
        "pick {:?} at ({:.0}, {:.0}): {} hits, selected {:?}",
        request.mode,
        request.click_pos.x,
        request.click_pos.y,
        result.hit_count,
        result.selected_id
    );
    result
}
