//! Mode transitions (Navigation <-> Insert).
//!
//! Entering Insert positions the cursor first (`I`, `a`, `A`) or opens a line (`o`, `O`).
//! `EditorState::set_mode` closes the open undo record on every switch, so a typing burst
//! never spans two Insert sessions.

use super::DispatchResult;
use crate::InsertEntry;
use core_model::View;
use core_state::{EditorState, Mode};
use core_text::motion;
use std::time::Instant;

pub(crate) fn handle_enter_insert(
    entry: InsertEntry,
    state: &mut EditorState,
    view: &mut View,
    now: Instant,
) -> DispatchResult {
    match entry {
        InsertEntry::AtCursor => {}
        InsertEntry::LineStart => motion::line_start(&state.buffer, &mut view.cursor),
        InsertEntry::After => motion::right(&state.buffer, &mut view.cursor),
        InsertEntry::LineEnd => motion::line_end(&state.buffer, &mut view.cursor),
        InsertEntry::OpenBelow => state.open_line_below(&mut view.cursor, now),
        InsertEntry::OpenAbove => state.open_line_above(&mut view.cursor, now),
    }
    view.preferred_col = None;
    state.selection.collapse(view.cursor);
    state.set_mode(Mode::Insert);
    tracing::trace!(target: "actions.dispatch", ?entry, row = view.cursor.row, col = view.cursor.col, "enter_insert");
    DispatchResult::dirty()
}

pub(crate) fn handle_exit_insert(state: &mut EditorState) -> DispatchResult {
    if state.set_mode(Mode::Navigation) {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}
