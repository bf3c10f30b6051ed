//! Popup describing the picked element.

use egui::{Area, Context, Frame, Id, Order, Pos2};
use glam::Vec2;

/// A small window shown next to the click that selected something.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoPopup {
    open: bool,
    anchor: Vec2,
    text: String,
}

impl InfoPopup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the popup at `anchor` (window pixels) showing `text`.
    pub fn open_at(&mut self, anchor: Vec2, text: String) {
        self.open = true;
        self.anchor = anchor;
        self.text = text;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Draws the popup if open. Returns whether it is open.
    pub fn show(&self, ctx: &Context) -> bool {
        if !self.open {
            return false;
        }
        let scale = ctx.pixels_per_point();
        let pos = Pos2::new(self.anchor.x / scale + 12.0, self.anchor.y / scale);
        Area::new(Id::new("meshpick_info_popup"))
            .order(Order::Foreground)
            .fixed_pos(pos)
            .show(ctx, |ui| {
                Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(&self.text);
                });
            });
        true
    }
}
