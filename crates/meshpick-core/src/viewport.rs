//! The 3D viewport rectangle.

use glam::Vec2;

/// Axis-aligned rectangle in physical window pixels, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportRegion {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ViewportRegion {
    /// Creates a viewport.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A square viewport docked to the right edge of the window and centered
    /// vertically, with side `min(width, height, max_side)`.
    pub fn docked_right(window_width: u32, window_height: u32, max_side: u32) -> Self {
        let side = window_width.min(window_height).min(max_side);
        Self {
            x: (window_width - side) as i32,
            y: ((window_height - side) / 2) as i32,
            width: side,
            height: side,
        }
    }

    /// Whether `pos` lies inside the rectangle (right and bottom edges excluded).
    pub fn contains(&self, pos: Vec2) -> bool {
        let (x, y) = (self.x as f32, self.y as f32);
        pos.x >= x
            && pos.y >= y
            && pos.x < x + self.width as f32
            && pos.y < y + self.height as f32
    }

    /// Whether the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Converts a window position to normalized device coordinates of this
    /// viewport (x right, y up, both in [-1, 1] inside the rectangle).
    pub fn window_to_ndc(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            2.0 * (pos.x - self.x as f32) / self.width as f32 - 1.0,
            1.0 - 2.0 * (pos.y - self.y as f32) / self.height as f32,
        )
    }

    /// Converts normalized device coordinates back to a window position.
    pub fn ndc_to_window(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            self.x as f32 + (ndc.x + 1.0) * 0.5 * self.width as f32,
            self.y as f32 + (1.0 - ndc.y) * 0.5 * self.height as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docked_right() {
        let vp = ViewportRegion::docked_right(1200, 600, 800);
        assert_eq!(vp, ViewportRegion::new(600, 0, 600, 600));

        let vp = ViewportRegion::docked_right(2000, 1000, 800);
        assert_eq!(vp, ViewportRegion::new(1200, 100, 800, 800));
    }

    #[test]
    fn test_contains_excludes_far_edges() {
        let vp = ViewportRegion::new(10, 20, 100, 50);
        assert!(vp.contains(Vec2::new(10.0, 20.0)));
        assert!(vp.contains(Vec2::new(109.5, 69.5)));
        assert!(!vp.contains(Vec2::new(110.0, 30.0)));
        assert!(!vp.contains(Vec2::new(50.0, 70.0)));
        assert!(!vp.contains(Vec2::new(9.9, 30.0)));
    }

    #[test]
    fn test_ndc_roundtrip_corners() {
        let vp = ViewportRegion::new(600, 0, 600, 600);
        assert_eq!(vp.window_to_ndc(Vec2::new(600.0, 0.0)), Vec2::new(-1.0, 1.0));
        assert_eq!(vp.window_to_ndc(Vec2::new(900.0, 300.0)), Vec2::ZERO);
        assert_eq!(vp.ndc_to_window(Vec2::new(1.0, -1.0)), Vec2::new(1200.0, 600.0));
    }
}
