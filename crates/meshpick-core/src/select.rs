//! Hit-test backends.
//!
//! A [`SelectBackend`] runs a selection pass: while active it draws nothing
//! and instead records which names were on the name stack when a primitive
//! landed inside the clip volume. [`SelectScope`] brackets the pass so the
//! backend always leaves hit-test mode.

use std::ops::{Deref, DerefMut};

use glam::{Mat4, Vec3, Vec4};

use crate::hit_record::{depth_to_u32, HitBuffer, HitRecord};

/// A renderer that can run a selection pass.
pub trait SelectBackend {
    /// Enters hit-test mode with the given transforms.
    fn begin(&mut self, projection: Mat4, model_view: Mat4);

    /// Clears the name stack.
    fn init_names(&mut self);

    /// Pushes `name` onto the name stack.
    fn push_name(&mut self, name: u32);

    /// Pops the top of the name stack.
    fn pop_name(&mut self);

    /// Replaces the top of the name stack with `name`.
    fn load_name(&mut self, name: u32);

    /// Tests a single point.
    fn draw_point(&mut self, position: Vec3);

    /// Tests a filled triangle.
    fn draw_triangle(&mut self, corners: [Vec3; 3]);

    /// Leaves hit-test mode and returns the recorded hits.
    fn end(&mut self) -> HitBuffer;

    /// Whether the backend is currently in hit-test mode.
    fn is_selecting(&self) -> bool;
}

/// Keeps a backend in hit-test mode for its lifetime.
///
/// Dropping the scope without calling [`SelectScope::finish`] still leaves
/// hit-test mode; the hits are discarded.
pub struct SelectScope<'a, B: SelectBackend + ?Sized> {
    backend: &'a mut B,
    finished: bool,
}

impl<'a, B: SelectBackend + ?Sized> SelectScope<'a, B> {
    /// Enters hit-test mode on `backend`.
    pub fn begin(backend: &'a mut B, projection: Mat4, model_view: Mat4) -> Self {
        backend.begin(projection, model_view);
        Self {
            backend,
            finished: false,
        }
    }

    /// Leaves hit-test mode and returns the hit buffer.
    pub fn finish(mut self) -> HitBuffer {
        self.finished = true;
        self.backend.end()
    }
}

impl<B: SelectBackend + ?Sized> Deref for SelectScope<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.backend
    }
}

impl<B: SelectBackend + ?Sized> DerefMut for SelectScope<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.backend
    }
}

impl<B: SelectBackend + ?Sized> Drop for SelectScope<'_, B> {
    fn drop(&mut self) {
        if !self.finished {
            let discarded = self.backend.end();
            log::debug!(
                "selection pass abandoned, {} hits discarded",
                discarded.hit_count()
            );
        }
    }
}

/// CPU selection backend.
///
/// Primitives are transformed to clip space and tested against the view
/// volume `-w <= x, y <= w`, `0 <= z <= w`. Triangles are clipped against
/// all six planes and hit when any part remains.
#[derive(Debug, Default)]
pub struct SoftwareSelector {
    clip_from_object: Mat4,
    selecting: bool,
    names: Vec<u32>,
    pending: Option<(u32, u32)>,
    buffer: HitBuffer,
}

impl SoftwareSelector {
    /// Creates an idle selector.
    pub fn new() -> Self {
        Self::default()
    }

    fn record_hit(&mut self, min_depth: f32, max_depth: f32) {
        let (lo, hi) = (depth_to_u32(min_depth), depth_to_u32(max_depth));
        self.pending = Some(match self.pending {
            Some((min, max)) => (min.min(lo), max.max(hi)),
            None => (lo, hi),
        });
    }

    /// Writes the pending hit, if any, under the current name stack.
    fn flush(&mut self) {
        if let Some((min_depth, max_depth)) = self.pending.take() {
            self.buffer.push(&HitRecord {
                min_depth,
                max_depth,
                names: self.names.clone(),
            });
        }
    }
}

impl SelectBackend for SoftwareSelector {
    fn begin(&mut self, projection: Mat4, model_view: Mat4) {
        if self.selecting {
            log::warn!("selection pass restarted before the previous one ended");
        }
        self.clip_from_object = projection * model_view;
        self.selecting = true;
        self.names.clear();
        self.pending = None;
        self.buffer = HitBuffer::new();
    }

    fn init_names(&mut self) {
        self.flush();
        self.names.clear();
    }

    fn push_name(&mut self, name: u32) {
        self.flush();
        self.names.push(name);
    }

    fn pop_name(&mut self) {
        self.flush();
        if self.names.pop().is_none() {
            log::warn!("pop_name on an empty name stack");
        }
    }

    fn load_name(&mut self, name: u32) {
        self.flush();
        match self.names.last_mut() {
            Some(top) => *top = name,
            None => log::warn!("load_name {name} on an empty name stack"),
        }
    }

    fn draw_point(&mut self, position: Vec3) {
        if !self.selecting {
            return;
        }
        let clip = self.clip_from_object * position.extend(1.0);
        if inside_all(clip) && clip.w > f32::EPSILON {
            let depth = clip.z / clip.w;
            self.record_hit(depth, depth);
        }
    }

    fn draw_triangle(&mut self, corners: [Vec3; 3]) {
        if !self.selecting {
            return;
        }
        let polygon: Vec<Vec4> = corners
            .iter()
            .map(|p| self.clip_from_object * p.extend(1.0))
            .collect();
        let clipped = clip_polygon(polygon);

        let mut range: Option<(f32, f32)> = None;
        for v in clipped.iter().filter(|v| v.w > f32::EPSILON) {
            let depth = v.z / v.w;
            range = Some(match range {
                Some((lo, hi)) => (lo.min(depth), hi.max(depth)),
                None => (depth, depth),
            });
        }
        if let Some((lo, hi)) = range {
            self.record_hit(lo, hi);
        }
    }

    fn end(&mut self) -> HitBuffer {
        self.flush();
        self.selecting = false;
        self.names.clear();
        std::mem::take(&mut self.buffer)
    }

    fn is_selecting(&self) -> bool {
        self.selecting
    }
}

/// Signed distance of `v` to clip plane `plane` (0..6); non-negative is inside.
fn plane_distance(v: Vec4, plane: usize) -> f32 {
    match plane {
        0 => v.w + v.x,
        1 => v.w - v.x,
        2 => v.w + v.y,
        3 => v.w - v.y,
        4 => v.z,
        _ => v.w - v.z,
    }
}

fn inside_all(v: Vec4) -> bool {
    (0..6).all(|plane| plane_distance(v, plane) >= 0.0)
}

/// Sutherland-Hodgman clipping of a convex polygon in homogeneous space.
fn clip_polygon(mut polygon: Vec<Vec4>) -> Vec<Vec4> {
    for plane in 0..6 {
        if polygon.is_empty() {
            break;
        }
        let mut output = Vec::with_capacity(polygon.len() + 1);
        for (i, &current) in polygon.iter().enumerate() {
            let previous = polygon[(i + polygon.len() - 1) % polygon.len()];
            let (dc, dp) = (plane_distance(current, plane), plane_distance(previous, plane));
            if dc >= 0.0 {
                if dp < 0.0 {
                    output.push(previous.lerp(current, dp / (dp - dc)));
                }
                output.push(current);
            } else if dp >= 0.0 {
                output.push(previous.lerp(current, dp / (dp - dc)));
            }
        }
        polygon = output;
    }
    polygon
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> SoftwareSelector {
        let mut selector = SoftwareSelector::new();
        selector.begin(Mat4::IDENTITY, Mat4::IDENTITY);
        selector
    }

    #[test]
    fn test_point_inside_and_outside() {
        let mut s = selector();
        s.push_name(1);
        s.draw_point(Vec3::new(0.0, 0.0, 0.5));
        s.load_name(2);
        s.draw_point(Vec3::new(2.0, 0.0, 0.5));
        s.load_name(3);
        s.draw_point(Vec3::new(0.0, 0.0, -0.1));
        let records = s.end().records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].names, vec![1]);
        assert_eq!(records[0].min_depth, depth_to_u32(0.5));
    }

    #[test]
    fn test_triangle_crossing_volume_hits() {
        let mut s = selector();
        s.push_name(9);
        // Corners all outside, edges pass through the volume.
        s.draw_triangle([
            Vec3::new(-5.0, -5.0, 0.5),
            Vec3::new(5.0, -5.0, 0.5),
            Vec3::new(0.0, 5.0, 0.5),
        ]);
        let records = s.end().records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].last_name(), Some(9));
    }

    #[test]
    fn test_triangle_beside_volume_misses() {
        let mut s = selector();
        s.push_name(9);
        s.draw_triangle([
            Vec3::new(1.5, 0.0, 0.5),
            Vec3::new(3.0, 0.0, 0.5),
            Vec3::new(2.0, 1.0, 0.5),
        ]);
        assert_eq!(s.end().hit_count(), 0);
    }

    #[test]
    fn test_clipped_depth_range() {
        let mut s = selector();
        s.push_name(0);
        // Depth runs from -1 to 2 across the triangle, clipped to [0, 1].
        s.draw_triangle([
            Vec3::new(-0.5, -0.5, -1.0),
            Vec3::new(0.5, -0.5, 2.0),
            Vec3::new(0.0, 0.5, 0.5),
        ]);
        let records = s.end().records().unwrap();
        assert!(records[0].min_depth < depth_to_u32(0.01));
        assert!(records[0].max_depth > depth_to_u32(0.99));
    }

    #[test]
    fn test_hits_under_one_name_merge() {
        let mut s = selector();
        s.push_name(4);
        s.draw_point(Vec3::new(0.0, 0.0, 0.2));
        s.draw_point(Vec3::new(0.1, 0.0, 0.7));
        let records = s.end().records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].min_depth, depth_to_u32(0.2));
        assert_eq!(records[0].max_depth, depth_to_u32(0.7));
    }

    #[test]
    fn test_hit_without_names_records_empty_stack() {
        let mut s = selector();
        s.draw_point(Vec3::ZERO);
        let records = s.end().records().unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].names.is_empty());
    }

    #[test]
    fn test_draws_outside_selection_are_ignored() {
        let mut s = SoftwareSelector::new();
        s.push_name(1);
        s.draw_point(Vec3::ZERO);
        assert_eq!(s.end().hit_count(), 0);
    }

    #[test]
    fn test_scope_ends_selection_on_drop() {
        let mut s = SoftwareSelector::new();
        {
            let mut scope = SelectScope::begin(&mut s, Mat4::IDENTITY, Mat4::IDENTITY);
            scope.push_name(1);
            scope.draw_point(Vec3::ZERO);
            assert!(scope.is_selecting());
        }
        assert!(!s.is_selecting());
    }

    #[test]
    fn test_scope_finish_returns_hits() {
        let mut s = SoftwareSelector::new();
        let mut scope = SelectScope::begin(&mut s, Mat4::IDENTITY, Mat4::IDENTITY);
        scope.push_name(5);
        scope.draw_point(Vec3::ZERO);
        let buffer = scope.finish();
        assert_eq!(buffer.hit_count(), 1);
        assert!(!s.is_selecting());
    }
}
