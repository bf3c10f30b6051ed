//! Accumulates window pointer events into per-frame snapshots.

use glam::Vec2;
use meshpick_core::{ButtonFrame, PointerFrame};

/// Pixels of scrolling that count as one wheel notch.
const PIXELS_PER_NOTCH: f32 = 10.0;

#[derive(Debug, Clone, Copy, Default)]
struct ButtonInput {
    pressed: bool,
    released: bool,
    down: bool,
}

impl ButtonInput {
    fn set(&mut self, down: bool) {
        if down && !self.down {
            self.pressed = true;
        } else if !down && self.down {
            self.released = true;
        }
        self.down = down;
    }

    fn take(&mut self) -> ButtonFrame {
        let frame = ButtonFrame {
            pressed: self.pressed,
            released: self.released,
            down: self.down,
        };
        self.pressed = false;
        self.released = false;
        frame
    }
}

/// Which pointer button an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
}

/// Collects the pointer events seen between two frames.
#[derive(Debug, Clone, Default)]
pub struct PointerInput {
    pos: Vec2,
    frame_start_pos: Vec2,
    left: ButtonInput,
    right: ButtonInput,
    wheel: f32,
}

impl PointerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current pointer position in window pixels.
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn cursor_moved(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    pub fn button(&mut self, button: PointerButton, down: bool) {
        match button {
            PointerButton::Left => self.left.set(down),
            PointerButton::Right => self.right.set(down),
        }
    }

    /// Adds wheel movement in notches; positive zooms in.
    pub fn wheel_lines(&mut self, lines: f32) {
        self.wheel += lines;
    }

    /// Adds wheel movement reported in pixels.
    pub fn wheel_pixels(&mut self, pixels: f32) {
        self.wheel += pixels / PIXELS_PER_NOTCH;
    }

    /// Returns the frame's snapshot and starts a new frame.
    pub fn take_frame(&mut self, pointer_over_ui: bool) -> PointerFrame {
        let frame = PointerFrame {
            pos: self.pos,
            delta: self.pos - self.frame_start_pos,
            left: self.left.take(),
            right: self.right.take(),
            wheel: self.wheel,
            pointer_over_ui,
        };
        self.frame_start_pos = self.pos;
        self.wheel = 0.0;
        frame
    }
}
