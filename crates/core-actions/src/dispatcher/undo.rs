//! Undo / Redo dispatch.
//!
//! Both delegate to `EditorState`, which restores the buffer and cursor snapshot of the
//! record and collapses the selection. An empty stack reports a status message.

use super::DispatchResult;
use core_model::View;
use core_state::EditorState;

pub(crate) fn handle_undo(state: &mut EditorState, view: &mut View) -> DispatchResult {
    let before = state.buffer.line_count();
    if state.undo(&mut view.cursor) {
        view.preferred_col = None;
        let after = state.buffer.line_count();
        tracing::trace!(target: "actions.dispatch", op="undo", lines_changed = (before != after), depth = state.undo_depth(), "undo");
        DispatchResult::dirty()
    } else {
        tracing::trace!(target: "actions.dispatch", op="undo", "nothing_to_undo");
        DispatchResult::clean()
    }
}

pub(crate) fn handle_redo(state: &mut EditorState, view: &mut View) -> DispatchResult {
    let before = state.buffer.line_count();
    if state.redo(&mut view.cursor) {
        view.preferred_col = None;
        let after = state.buffer.line_count();
        tracing::trace!(target: "actions.dispatch", op="redo", lines_changed = (before != after), depth = state.redo_depth(), "redo");
        DispatchResult::dirty()
    } else {
        tracing::trace!(target: "actions.dispatch", op="redo", "nothing_to_redo");
        DispatchResult::clean()
    }
}
