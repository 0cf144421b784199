//! Text edit action handling (insert/backspace/delete/newline/tab/delete line).
//!
//! Typing, Enter, Tab and Backspace only act in Insert mode; `x`, `X` and `dd` come from
//! Navigation and Delete works in both. A non-empty selection is removed first by any
//! edit, so typing over a selection replaces it and Backspace/Delete delete it.

use super::{DispatchContext, DispatchResult};
use crate::Action;
use core_model::View;
use core_state::{EditorState, Mode};

pub(crate) fn handle_edit(
    action: &Action,
    state: &mut EditorState,
    view: &mut View,
    ctx: &mut DispatchContext<'_>,
) -> DispatchResult {
    let insert_only = matches!(
        action,
        Action::InsertChar(_) | Action::InsertTab | Action::Newline | Action::Backspace
    );
    if insert_only && state.mode != Mode::Insert {
        return DispatchResult::clean();
    }
    let now = ctx.now;
    let before = view.cursor;
    let lines_before = state.buffer.line_count();
    let had_selection = !state.selection.is_empty(view.cursor) && !matches!(action, Action::DeleteLine);
    if had_selection {
        state.delete_selection(&mut view.cursor, now);
    }
    let cursor = &mut view.cursor;
    match action {
        Action::InsertChar(c) => state.insert_char(cursor, *c, now),
        Action::InsertTab => {
            for _ in 0..ctx.tab_width {
                state.insert_char(cursor, ' ', now);
            }
        }
        Action::Newline => state.split_line(cursor, now),
        Action::Backspace | Action::DeleteBefore if !had_selection => state.delete_char_before(cursor, now),
        Action::DeleteUnder if !had_selection => state.delete_char_at(cursor, now),
        Action::DeleteLine => {
            let removed = state.delete_line(cursor, now);
            tracing::debug!(target: "actions.dispatch", row = before.row, chars = removed.chars().count(), "delete_line");
        }
        _ => {}
    }
    view.preferred_col = None;
    tracing::trace!(target: "actions.dispatch", op=?action, row=before.row, col=before.col, to_row=view.cursor.row, to_col=view.cursor.col, lines_before, lines_after=state.buffer.line_count(), "edit");
    DispatchResult::dirty()
}
