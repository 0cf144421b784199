//! Motion sub-dispatch (cursor movement and selection extension).
//!
//! * Every motion closes the open undo record: typing after a cursor jump starts a new step.
//! * Plain motions collapse the selection onto the new cursor; extending motions keep the
//!   anchor where it is.
//! * Vertical motions keep a sticky display column in `View::preferred_col`; any other
//!   motion resets it.

use super::DispatchResult;
use crate::MotionKind;
use core_model::View;
use core_state::EditorState;
use core_text::motion;

pub(crate) fn handle_motion(
    kind: MotionKind,
    state: &mut EditorState,
    view: &mut View,
    page_rows: usize,
    extend: bool,
) -> DispatchResult {
    state.close_undo_record();
    let before = view.cursor;
    let had_selection = !state.selection.is_empty(before);
    let buf = &state.buffer;
    let pos = &mut view.cursor;
    match kind {
        MotionKind::Up => view.preferred_col = motion::up(buf, pos, view.preferred_col),
        MotionKind::Down => view.preferred_col = motion::down(buf, pos, view.preferred_col),
        MotionKind::PageUp => {
            view.preferred_col = motion::vertical(buf, pos, view.preferred_col, -(page_rows as isize))
        }
        MotionKind::PageDown => {
            view.preferred_col = motion::vertical(buf, pos, view.preferred_col, page_rows as isize)
        }
        horizontal => {
            let f = match horizontal {
                MotionKind::Left => motion::left,
                MotionKind::Right => motion::right,
                MotionKind::WordForward => motion::word_forward,
                MotionKind::WordBackward => motion::word_backward,
                MotionKind::LineStart => motion::line_start,
                MotionKind::LineEnd => motion::line_end,
                MotionKind::DocStart => motion::doc_start,
                _ => motion::doc_end,
            };
            f(buf, pos);
            view.preferred_col = None;
        }
    }
    if !extend {
        state.selection.collapse(view.cursor);
    }
    if before != view.cursor || (had_selection && !extend) {
        tracing::trace!(target: "actions.dispatch", motion=?kind, extend, row=before.row, col=before.col, to_row=view.cursor.row, to_col=view.cursor.col, "motion");
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}
