//! The current selection.

use glam::{Vec2, Vec3};

use crate::mesh::Mesh;
use crate::pick::{PickResult, SelectionMode};

/// A selected mesh element.
///
/// Picking names elements by their offset into the flat mesh arrays; this
/// type keeps that offset and is the only place it is turned into an
/// element number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectedElement {
    /// A vertex, by offset into the vertex array (`3 * vertex`).
    Vertex { offset: u32 },
    /// A triangle, by offset into the index array (`3 * face`).
    Face { offset: u32 },
}

impl SelectedElement {
    /// Interprets a picked id under `mode`.
    pub fn from_id(mode: SelectionMode, id: u32) -> Option<Self> {
        match mode {
            SelectionMode::None => None,
            SelectionMode::Vertex => Some(Self::Vertex { offset: id }),
            SelectionMode::Face => Some(Self::Face { offset: id }),
        }
    }

    /// Offset into the flat array.
    pub fn offset(&self) -> u32 {
        match *self {
            Self::Vertex { offset } | Self::Face { offset } => offset,
        }
    }

    /// Vertex or face number.
    pub fn index(&self) -> u32 {
        self.offset() / 3
    }

    /// Position of a selected vertex.
    pub fn position(&self, mesh: &Mesh) -> Option<Vec3> {
        match *self {
            Self::Vertex { offset } => mesh.vertex_at_offset(offset as usize),
            Self::Face { .. } => None,
        }
    }

    /// Vertex indices of a selected face.
    pub fn corners(&self, mesh: &Mesh) -> Option<[u32; 3]> {
        match *self {
            Self::Face { offset } => mesh.face_at_offset(offset as usize),
            Self::Vertex { .. } => None,
        }
    }

    /// Popup text: `vertex 12 (x, y, z)`, or `triangle 4: 7 8 9` followed by
    /// one line per corner position.
    pub fn describe(&self, mesh: &Mesh) -> String {
        match *self {
            Self::Vertex { .. } => match self.position(mesh) {
                Some(p) => format!("vertex {} {}", self.index(), format_point(p)),
                None => format!("vertex {} (out of range)", self.index()),
            },
            Self::Face { .. } => match self.corners(mesh) {
                Some([a, b, c]) => {
                    let mut text = format!("triangle {}: {a} {b} {c}", self.index());
                    for corner in [a, b, c] {
                        text.push('\n');
                        text.push_str(&format_point(mesh.vertex(corner as usize)));
                    }
                    text
                }
                None => format!("triangle {} (out of range)", self.index()),
            },
        }
    }
}

fn format_point(p: Vec3) -> String {
    format!("({:.4}, {:.4}, {:.4})", p.x, p.y, p.z)
}

/// Selection mode, last pick and popup state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    mode: SelectionMode,
    selected_id: Option<u32>,
    last_hit_count: usize,
    click_pos: Option<Vec2>,
    display_active: bool,
}

impl SelectionState {
    /// Creates an empty state with picking off.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Changes the mode. A different mode clears the selection and closes
    /// the popup.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if mode != self.mode {
            self.mode = mode;
            self.selected_id = None;
            self.display_active = false;
            log::debug!("selection mode {mode:?}");
        }
    }

    /// Raw id of the last successful pick.
    pub fn selected_id(&self) -> Option<u32> {
        self.selected_id
    }

    /// Hit count of the last pick.
    pub fn last_hit_count(&self) -> usize {
        self.last_hit_count
    }

    /// Window position of the last successful pick.
    pub fn click_pos(&self) -> Option<Vec2> {
        self.click_pos
    }

    /// Whether the info popup is showing.
    pub fn display_active(&self) -> bool {
        self.display_active
    }

    /// Mirrors the popup's open state.
    pub fn set_display_active(&mut self, active: bool) {
        self.display_active = active;
    }

    /// Records a pick. Returns `true` when something was selected and the
    /// popup should open; a miss keeps the previous selection.
    pub fn apply_pick(&mut self, result: PickResult, click_pos: Vec2) -> bool {
        self.last_hit_count = result.hit_count;
        match result.selected_id {
            Some(id) if result.hit_count > 0 => {
                self.selected_id = Some(id);
                self.click_pos = Some(click_pos);
                true
            }
            _ => false,
        }
    }

    /// The selected element, when a mode is active and something was picked.
    pub fn selected_element(&self) -> Option<SelectedElement> {
        self.selected_id
            .and_then(|id| SelectedElement::from_id(self.mode, id))
    }

    /// Drops the selection and closes the popup.
    pub fn clear(&mut self) {
        self.selected_id = None;
        self.click_pos = None;
        self.display_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh() -> Mesh {
        Mesh::new(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0],
            vec![0, 1, 2, 2, 1, 3],
            Vec::new(),
        )
        .unwrap()
    }

    fn hit(id: u32) -> PickResult {
        PickResult {
            hit_count: 1,
            selected_id: Some(id),
        }
    }

    #[test]
    fn test_offsets_become_element_numbers() {
        let mesh = mesh();
        let vertex = SelectedElement::Vertex { offset: 9 };
        assert_eq!(vertex.index(), 3);
        assert_eq!(vertex.position(&mesh), Some(Vec3::new(1.0, 1.0, 0.0)));
        assert_eq!(vertex.corners(&mesh), None);

        let face = SelectedElement::Face { offset: 3 };
        assert_eq!(face.index(), 1);
        assert_eq!(face.corners(&mesh), Some([2, 1, 3]));
    }

    #[test]
    fn test_describe_face_lists_corners() {
        let text = SelectedElement::Face { offset: 3 }.describe(&mesh());
        assert_eq!(
            text,
            "triangle 1: 2 1 3\n\
             (0.0000, 1.0000, 0.0000)\n\
             (1.0000, 0.0000, 0.0000)\n\
             (1.0000, 1.0000, 0.0000)"
        );
    }

    #[test]
    fn test_describe_vertex() {
        let text = SelectedElement::Vertex { offset: 3 }.describe(&mesh());
        assert_eq!(text, "vertex 1 (1.0000, 0.0000, 0.0000)");
    }

    #[test]
    fn test_apply_pick_opens_popup() {
        let mut state = SelectionState::new();
        state.set_mode(SelectionMode::Face);
        assert!(state.apply_pick(hit(3), Vec2::new(5.0, 6.0)));
        assert_eq!(state.selected_id(), Some(3));
        assert_eq!(state.click_pos(), Some(Vec2::new(5.0, 6.0)));
        assert_eq!(
            state.selected_element(),
            Some(SelectedElement::Face { offset: 3 })
        );
    }

    #[test]
    fn test_miss_keeps_previous_selection() {
        let mut state = SelectionState::new();
        state.set_mode(SelectionMode::Vertex);
        state.apply_pick(hit(6), Vec2::ZERO);
        assert!(!state.apply_pick(PickResult::default(), Vec2::ONE));
        assert_eq!(state.selected_id(), Some(6));
        assert_eq!(state.last_hit_count(), 0);
        assert!(!state.display_active());
    }

    #[test]
    fn test_mode_change_clears_selection() {
        let mut state = SelectionState::new();
        state.set_mode(SelectionMode::Vertex);
        state.apply_pick(hit(6), Vec2::ZERO);
        state.set_display_active(true);

        state.set_mode(SelectionMode::Vertex);
        assert_eq!(state.selected_id(), Some(6));

        state.set_mode(SelectionMode::Face);
        assert_eq!(state.selected_id(), None);
        assert!(!state.display_active());
        assert_eq!(state.selected_element(), None);
    }

    #[test]
    fn test_no_element_without_mode() {
        let mut state = SelectionState::new();
        state.apply_pick(hit(0), Vec2::ZERO);
        assert_eq!(state.selected_element(), None);
    }
}
