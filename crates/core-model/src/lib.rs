//! High-level editor model: state plus presentation (cursor, sticky column, viewport).
//!
//! `EditorState` (core-state) owns the document and its history; `View` owns the
//! cursor and the sticky display column used by vertical motion; `ViewportManager`
//! owns scrolling. Keeping the cursor out of `EditorState` lets edit operations take it
//! by `&mut` and keeps viewport concerns local to this crate.
//!
//! Invariants (must hold after every public call):
//! * `view.cursor` is within the buffer (`row < line_count`, `col <= line_len(row)`).
//! * With the reactive policy and a non-zero height, the cursor row is on screen after
//!   `scroll_to_cursor`.

use core_state::EditorState;
use core_text::Position;

pub mod viewport;
pub use viewport::ViewportManager;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    pub cursor: Position,
    /// Sticky display column kept across consecutive vertical motions.
    pub preferred_col: Option<usize>,
}

impl View {
    pub fn new(cursor: Position) -> Self {
        Self {
            cursor,
            preferred_col: None,
        }
    }
}

#[derive(Debug)]
pub struct EditorModel {
    state: EditorState,
    view: View,
    pub viewport: ViewportManager,
}

impl EditorModel {
    pub fn new(state: EditorState, viewport: ViewportManager) -> Self {
        Self {
            state,
            view: View::default(),
            viewport,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }
    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }
    pub fn view(&self) -> &View {
        &self.view
    }
    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }
    pub fn cursor(&self) -> Position {
        self.view.cursor
    }

    /// Disjoint mutable borrows of the state and the view.
    pub fn split_state_and_view(&mut self) -> (&mut EditorState, &mut View) {
        (&mut self.state, &mut self.view)
    }

    /// Move the cursor directly (go-to-line, search hits), clamped. Resets the sticky column.
    pub fn set_cursor(&mut self, pos: Position) {
        self.view.cursor = self.state.buffer.clamp(pos);
        self.view.preferred_col = None;
    }

    /// Re-clamp cursor and selection anchor after the buffer changed underneath them.
    pub fn clamp_cursor(&mut self) {
        self.view.cursor = self.state.buffer.clamp(self.view.cursor);
        self.state.selection.clamp(&self.state.buffer);
    }

    /// Run the active scrolling policy for the current cursor row.
    pub fn scroll_to_cursor(&mut self) -> bool {
        self.viewport.recompute(self.view.cursor.row)
    }

    pub fn set_typewriter(&mut self, on: bool) {
        let row = self.view.cursor.row;
        self.viewport.set_typewriter(on, row);
    }
}
