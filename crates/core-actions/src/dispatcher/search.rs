//! Find, find next/previous and replace.
//!
//! A hit is presented as a selection: the cursor rests on the match start and the anchor
//! on its end. The last query and options live in `EditorState::search` so `n` / `N`
//! repeat them. Search errors and misses are reported on the status line.

use super::DispatchResult;
use crate::STATUS_TTL;
use core_model::View;
use core_state::EditorState;
use core_text::search::Query;
use core_text::{Match, Position, SearchError, TextBuffer};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Backward,
}

fn status(state: &mut EditorState, msg: impl Into<String>, now: Instant) {
    state.set_status(msg, now, Some(STATUS_TTL));
}

fn report_error(state: &mut EditorState, err: &SearchError, now: Instant) {
    tracing::debug!(target: "state.search", error = %err, "search_error");
    status(state, err.to_string(), now);
}

fn select_match(state: &mut EditorState, view: &mut View, m: Match) {
    state.close_undo_record();
    view.cursor = m.start_pos();
    view.preferred_col = None;
    state.selection.set_anchor(m.end_pos());
}

/// Position one character past `pos`, stepping onto the next line at line end.
fn step_forward(buf: &TextBuffer, pos: Position) -> Position {
    if pos.col < buf.line_len(pos.row) {
        Position::new(pos.row, pos.col + 1)
    } else if pos.row < buf.last_row() {
        Position::new(pos.row + 1, 0)
    } else {
        pos
    }
}

/// Search for the stored query from `from` and select the hit.
pub(crate) fn find_from(
    state: &mut EditorState,
    view: &mut View,
    from: Position,
    dir: Direction,
    now: Instant,
) -> DispatchResult {
    let Some(pattern) = state.search.query.clone() else {
        status(state, "No previous search", now);
        return DispatchResult::dirty();
    };
    let opts = state.search.options;
    let query = match Query::new(&pattern, opts) {
        Ok(q) => q,
        Err(e) => {
            report_error(state, &e, now);
            return DispatchResult::dirty();
        }
    };
    let hit = match dir {
        Direction::Forward => query.find(&state.buffer, from, opts.wrap),
        Direction::Backward => query.find_backward(&state.buffer, from, opts.wrap),
    };
    tracing::debug!(target: "state.search", query = %pattern, ?dir, hit = ?hit, "find");
    match hit {
        Some(m) => {
            let wrapped = match dir {
                Direction::Forward => m.start_pos() < from,
                Direction::Backward => m.start_pos() >= from,
            };
            select_match(state, view, m);
            if wrapped {
                status(state, "Search wrapped", now);
            }
        }
        None => status(state, format!("Not found: {pattern}"), now),
    }
    DispatchResult::dirty()
}

pub(crate) fn handle_find_next(state: &mut EditorState, view: &mut View, now: Instant) -> DispatchResult {
    let from = step_forward(&state.buffer, view.cursor);
    find_from(state, view, from, Direction::Forward, now)
}

pub(crate) fn handle_find_prev(state: &mut EditorState, view: &mut View, now: Instant) -> DispatchResult {
    let from = view.cursor;
    find_from(state, view, from, Direction::Backward, now)
}

/// Replace the match at the cursor (if any) and select the next one.
pub(crate) fn replace_one(
    state: &mut EditorState,
    view: &mut View,
    pattern: &str,
    replacement: &str,
    now: Instant,
) -> DispatchResult {
    let opts = state.search.options;
    match state.replace_current(&mut view.cursor, pattern, replacement, opts, now) {
        Ok(outcome) => {
            view.preferred_col = None;
            if outcome.next.is_none() {
                status(state, format!("Not found: {pattern}"), now);
            }
        }
        Err(e) => report_error(state, &e, now),
    }
    DispatchResult::dirty()
}

/// Replace every match as one undo step.
pub(crate) fn replace_all(
    state: &mut EditorState,
    view: &mut View,
    pattern: &str,
    replacement: &str,
    now: Instant,
) -> DispatchResult {
    let opts = state.search.options;
    match state.replace_all(&mut view.cursor, pattern, replacement, opts, now) {
        Ok(0) => status(state, format!("Not found: {pattern}"), now),
        Ok(n) => {
            let noun = if n == 1 { "occurrence" } else { "occurrences" };
            status(state, format!("Replaced {n} {noun}"), now);
        }
        Err(e) => report_error(state, &e, now),
    }
    DispatchResult::dirty()
}
