//! Clipboard and selection commands.
//!
//! * Copy writes the selected text; with an empty selection it copies the cursor line.
//! * Cut with an empty selection does nothing.
//! * Paste replaces a non-empty selection and is a single undo step.
//! * Clipboard failures become status messages; the buffer is left untouched.

use super::{DispatchContext, DispatchResult};
use crate::{ClipboardError, STATUS_TTL};
use core_model::View;
use core_state::EditorState;
use std::time::Instant;

fn report_error(state: &mut EditorState, err: &ClipboardError, now: Instant) {
    tracing::warn!(target: "actions.dispatch", error = %err, "clipboard");
    state.set_status(err.to_string(), now, Some(STATUS_TTL));
}

pub(crate) fn handle_copy(
    state: &mut EditorState,
    view: &mut View,
    ctx: &mut DispatchContext<'_>,
) -> DispatchResult {
    let text = if state.selection.is_empty(view.cursor) {
        state.buffer.line(view.cursor.row).unwrap_or_default().to_string()
    } else {
        state.selected_text(view.cursor)
    };
    match ctx.clipboard.write(&text) {
        Ok(()) => state.set_status("Copied to clipboard", ctx.now, Some(STATUS_TTL)),
        Err(e) => report_error(state, &e, ctx.now),
    }
    DispatchResult::dirty()
}

pub(crate) fn handle_cut(
    state: &mut EditorState,
    view: &mut View,
    ctx: &mut DispatchContext<'_>,
) -> DispatchResult {
    if state.selection.is_empty(view.cursor) {
        return DispatchResult::clean();
    }
    let text = state.selected_text(view.cursor);
    if let Err(e) = ctx.clipboard.write(&text) {
        report_error(state, &e, ctx.now);
        return DispatchResult::dirty();
    }
    state.delete_selection(&mut view.cursor, ctx.now);
    view.preferred_col = None;
    state.set_status("Cut to clipboard", ctx.now, Some(STATUS_TTL));
    DispatchResult::dirty()
}

pub(crate) fn handle_paste(
    state: &mut EditorState,
    view: &mut View,
    ctx: &mut DispatchContext<'_>,
) -> DispatchResult {
    let text = match ctx.clipboard.read() {
        Ok(t) => t,
        Err(e) => {
            report_error(state, &e, ctx.now);
            return DispatchResult::dirty();
        }
    };
    if text.is_empty() {
        return DispatchResult::clean();
    }
    state.paste(&mut view.cursor, &text, ctx.now);
    view.preferred_col = None;
    tracing::trace!(target: "actions.dispatch", op="paste", chars = text.chars().count(), row = view.cursor.row, col = view.cursor.col, "paste");
    DispatchResult::dirty()
}

pub(crate) fn handle_select_all(state: &mut EditorState, view: &mut View) -> DispatchResult {
    state.close_undo_record();
    view.cursor = state.selection.select_all(&state.buffer);
    view.preferred_col = None;
    DispatchResult::dirty()
}

pub(crate) fn handle_select_line(state: &mut EditorState, view: &mut View) -> DispatchResult {
    state.close_undo_record();
    view.cursor = state.selection.select_line(&state.buffer, view.cursor.row);
    view.preferred_col = None;
    DispatchResult::dirty()
}

pub(crate) fn handle_collapse(state: &mut EditorState, view: &mut View) -> DispatchResult {
    if state.selection.is_empty(view.cursor) {
        return DispatchResult::clean();
    }
    state.selection.collapse(view.cursor);
    DispatchResult::dirty()
}
