//! Editor state: buffer, mode, undo engine, selection anchor, prompts and status.
//!
//! Every buffer mutation made on behalf of a key press goes through an `EditorState`
//! method so that it is captured by the `UndoEngine`. The methods take the view cursor
//! by `&mut Position` (the cursor itself lives in `core-model`) and the current instant,
//! which drives the idle-timeout close of coalesced typing bursts.
//!
//! Undo coalescing:
//! - Insert-mode character insertions merge into one open record.
//! - The record is closed by a mode switch, cursor-only movement, Enter, Backspace/Delete,
//!   any other edit, a save, or an idle gap of `undo_coalesce_timeout_ms`.
//! - Undo restores the buffer and cursor only; the mode is left alone so that undoing
//!   after `Esc` does not drop the user back into Insert mode.

use core_text::search::Query;
use core_text::{FindOptions, Match, Position, SearchError, TextBuffer};
use std::fmt;
use std::ops::Range;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::debug;

pub mod prompt;
pub mod selection;
pub mod undo;

pub use prompt::{Prompt, PromptKind};
pub use selection::{SelectionModel, SelectionRange};
pub use undo::{EditKind, EditRecord, Restore, UNDO_HISTORY_MAX, UndoEngine};

/// Current editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Cursor movement and single-key commands.
    #[default]
    Navigation,
    /// Printable keys insert text.
    Insert,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Navigation => f.write_str("NAVIGATION"),
            Mode::Insert => f.write_str("INSERT"),
        }
    }
}

/// Status line message with an optional expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub expires_at: Option<Instant>,
}

/// Last search parameters, reused by find-next / find-previous.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: Option<String>,
    pub replacement: Option<String>,
    pub options: FindOptions,
}

/// Result of a single replace step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceOutcome {
    /// A match sat at the cursor and was replaced.
    pub replaced: bool,
    /// Next match after the replacement point, if any.
    pub next: Option<Match>,
}

/// Top-level editor state container (one document per instance).
#[derive(Debug)]
pub struct EditorState {
    pub buffer: TextBuffer,
    pub mode: Mode,
    undo: UndoEngine,
    pub selection: SelectionModel,
    pub prompt: Option<Prompt>,
    pub status: Option<StatusMessage>,
    pub file_path: Option<PathBuf>,
    pub search: SearchState,
}

impl EditorState {
    /// Create a new state with default undo settings.
    pub fn new(buffer: TextBuffer) -> Self {
        Self::with_undo(buffer, UndoEngine::default())
    }

    pub fn with_undo(buffer: TextBuffer, undo: UndoEngine) -> Self {
        Self {
            buffer,
            mode: Mode::Navigation,
            undo,
            selection: SelectionModel::default(),
            prompt: None,
            status: None,
            file_path: None,
            search: SearchState::default(),
        }
    }

    pub fn undo_engine(&self) -> &UndoEngine {
        &self.undo
    }
    pub fn undo_depth(&self) -> usize {
        self.undo.undo_depth()
    }
    pub fn redo_depth(&self) -> usize {
        self.undo.redo_depth()
    }

    /// Switch mode. Any mode change closes the open undo record. Returns true if changed.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.undo.close_record();
        debug!(target: "state", from = %self.mode, to = %mode, "mode_change");
        self.mode = mode;
        true
    }

    /// Set a status message; `ttl == None` keeps it until replaced or cleared.
    pub fn set_status<S: Into<String>>(&mut self, msg: S, now: Instant, ttl: Option<Duration>) {
        self.status = Some(StatusMessage {
            text: msg.into(),
            expires_at: ttl.map(|t| now + t),
        });
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|m| m.text.as_str())
    }

    /// Drop an expired status message; returns true if one was cleared.
    pub fn tick_status(&mut self, now: Instant) -> bool {
        if let Some(m) = &self.status
            && let Some(at) = m.expires_at
            && now >= at
        {
            self.status = None;
            return true;
        }
        false
    }

    /// Close the open undo record (cursor-only movement, explicit boundaries).
    pub fn close_undo_record(&mut self) {
        self.undo.close_record();
    }

    /// Idle-timeout close of the open undo record.
    pub fn expire_undo(&mut self, now: Instant) -> bool {
        self.undo.expire_idle(now)
    }

    /// Called after a successful save: buffer becomes clean and the open record closes.
    pub fn mark_saved(&mut self) {
        self.buffer.mark_clean();
        self.undo.close_record();
    }

    /// Rows `first..=last`, clamped to the document.
    fn rows(&self, first: usize, last: usize) -> Range<usize> {
        let last_row = self.buffer.last_row();
        first.min(last_row)..last.min(last_row) + 1
    }

    /// Apply `f` to the buffer and record the change as one undo step of `kind`.
    ///
    /// `span` must cover every pre-edit row that `f` rewrites or removes; rows it inserts
    /// land inside the span's post-edit extent. Only the span is copied into the record.
    fn edit<R>(
        &mut self,
        cursor: &mut Position,
        kind: EditKind,
        span: Range<usize>,
        now: Instant,
        f: impl FnOnce(&mut TextBuffer, Position) -> (Position, R),
    ) -> R {
        let cursor_before = *cursor;
        let count_before = self.buffer.line_count();
        let before = self.buffer.lines()[span.clone()].to_vec();
        let (after_cursor, out) = f(&mut self.buffer, *cursor);
        *cursor = self.buffer.clamp(after_cursor);
        let end = (span.end + self.buffer.line_count())
            .saturating_sub(count_before)
            .max(span.start);
        let after = self.buffer.lines()[span.start..end].to_vec();
        self.undo
            .record_edit(span.start, before, after, cursor_before, *cursor, kind, now);
        self.selection.collapse(*cursor);
        out
    }

    /// Insert one character. In Insert mode consecutive calls coalesce into one undo step.
    pub fn insert_char(&mut self, cursor: &mut Position, ch: char, now: Instant) {
        if ch == '\n' {
            return self.split_line(cursor, now);
        }
        let kind = match self.mode {
            Mode::Insert => EditKind::InsertChar,
            Mode::Navigation => EditKind::InsertText,
        };
        let span = self.rows(cursor.row, cursor.row);
        self.edit(cursor, kind, span, now, |b, p| (b.insert_char(p, ch), ()));
    }

    /// Insert possibly multi-line text as a single undo step.
    pub fn insert_text(&mut self, cursor: &mut Position, text: &str, now: Instant) {
        let span = self.rows(cursor.row, cursor.row);
        self.edit(cursor, EditKind::InsertText, span, now, |b, p| (b.insert_text(p, text), ()));
    }

    /// Enter: split the current line. Always its own undo step.
    pub fn split_line(&mut self, cursor: &mut Position, now: Instant) {
        self.undo.close_record();
        let span = self.rows(cursor.row, cursor.row);
        self.edit(cursor, EditKind::Newline, span, now, |b, p| (b.split_line(p), ()));
    }

    /// Backspace: delete before the cursor, joining with the previous line at column 0.
    pub fn delete_char_before(&mut self, cursor: &mut Position, now: Instant) {
        self.undo.close_record();
        let span = self.rows(cursor.row.saturating_sub(1), cursor.row);
        self.edit(cursor, EditKind::DeleteChar, span, now, |b, p| (b.delete_char_before(p), ()));
    }

    /// Delete: remove the character under the cursor, joining the next line at line end.
    pub fn delete_char_at(&mut self, cursor: &mut Position, now: Instant) {
        self.undo.close_record();
        let span = self.rows(cursor.row, cursor.row + 1);
        self.edit(cursor, EditKind::DeleteChar, span, now, |b, p| (b.delete_char_at(p), ()));
    }

    /// Remove the cursor's line (sole line is cleared). Returns the removed text.
    pub fn delete_line(&mut self, cursor: &mut Position, now: Instant) -> String {
        self.undo.close_record();
        let span = self.rows(cursor.row, cursor.row);
        self.edit(cursor, EditKind::DeleteLine, span, now, |b, p| {
            let removed = b.line(p.row).unwrap_or_default().to_string();
            (b.delete_line(p.row), removed)
        })
    }

    /// Open an empty line below the cursor row and move there.
    pub fn open_line_below(&mut self, cursor: &mut Position, now: Instant) {
        self.undo.close_record();
        let span = self.rows(cursor.row, cursor.row);
        self.edit(cursor, EditKind::OpenLine, span, now, |b, p| (b.insert_line(p.row + 1, ""), ()));
    }

    /// Open an empty line above the cursor row and move there.
    pub fn open_line_above(&mut self, cursor: &mut Position, now: Instant) {
        self.undo.close_record();
        let span = self.rows(cursor.row, cursor.row);
        self.edit(cursor, EditKind::OpenLine, span, now, |b, p| (b.insert_line(p.row, ""), ()));
    }

    /// Text covered by the selection whose active end is `active`.
    pub fn selected_text(&self, active: Position) -> String {
        let r = self.selection.range(active);
        self.buffer.text_range(r.start, r.end)
    }

    /// Delete the selected text as one undo step and collapse. Empty selection is a no-op.
    pub fn delete_selection(&mut self, cursor: &mut Position, now: Instant) -> String {
        let range = self.selection.range(*cursor);
        if range.is_empty() {
            return String::new();
        }
        self.undo.close_record();
        let span = self.rows(range.start.row, range.end.row);
        self.edit(cursor, EditKind::DeleteRange, span, now, |b, _| {
            let (removed, at) = b.delete_range(range.start, range.end);
            (at, removed)
        })
    }

    /// Paste `text`, replacing a non-empty selection. One undo step in either case.
    pub fn paste(&mut self, cursor: &mut Position, text: &str, now: Instant) {
        let range = self.selection.range(*cursor);
        self.undo.close_record();
        let span = self.rows(range.start.row.min(cursor.row), range.end.row.max(cursor.row));
        self.edit(cursor, EditKind::InsertText, span, now, |b, p| {
            let at = if range.is_empty() {
                p
            } else {
                b.delete_range(range.start, range.end).1
            };
            (b.insert_text(at, text), ())
        });
    }

    /// Replace the match sitting at the cursor (if any), then move to the next match.
    ///
    /// After the call the cursor rests on the start of the next match with the selection
    /// anchored at its end, mirroring how find presents a hit.
    pub fn replace_current(
        &mut self,
        cursor: &mut Position,
        query: &str,
        replacement: &str,
        opts: FindOptions,
        now: Instant,
    ) -> Result<ReplaceOutcome, SearchError> {
        let q = Query::new(query, opts)?;
        let at_cursor = q
            .find(&self.buffer, *cursor, false)
            .filter(|m| m.start_pos() == *cursor);
        let mut replaced = false;
        if let Some(m) = at_cursor {
            self.undo.close_record();
            let line = self.buffer.line(m.row).unwrap_or_default().to_string();
            let text = q.expand(&line, &m, replacement);
            let span = self.rows(m.row, m.row);
            self.edit(cursor, EditKind::Replace, span, now, |b, _| {
                let end = b.replace_in_line(m.row, m.start, m.end, &text);
                (Position::new(m.row, end), ())
            });
            replaced = true;
        }
        let next = q.find(&self.buffer, *cursor, opts.wrap);
        if let Some(n) = next {
            *cursor = n.start_pos();
            self.selection.set_anchor(n.end_pos());
        }
        Ok(ReplaceOutcome { replaced, next })
    }

    /// Replace every match in the document as a single undo step. Returns the count.
    pub fn replace_all(
        &mut self,
        cursor: &mut Position,
        query: &str,
        replacement: &str,
        opts: FindOptions,
        now: Instant,
    ) -> Result<usize, SearchError> {
        let q = Query::new(query, opts)?;
        self.undo.close_record();
        let span = 0..self.buffer.line_count();
        let count = self.edit(cursor, EditKind::ReplaceAll, span, now, |b, p| {
            let mut total = 0;
            let lines: Vec<String> = b
                .lines()
                .iter()
                .map(|line| {
                    let (new, n) = q.replace_line(line, replacement);
                    total += n;
                    new
                })
                .collect();
            if total > 0 {
                b.replace_lines(lines);
            }
            (p, total)
        });
        debug!(target: "state.search", query, count, "replace_all");
        Ok(count)
    }

    /// Undo the most recent record. Returns false when there was nothing to undo.
    pub fn undo(&mut self, cursor: &mut Position) -> bool {
        let Some(restore) = self.undo.undo() else {
            return false;
        };
        self.apply_restore(cursor, restore);
        true
    }

    /// Redo the most recently undone record. Returns false when there was nothing to redo.
    pub fn redo(&mut self, cursor: &mut Position) -> bool {
        let Some(restore) = self.undo.redo() else {
            return false;
        };
        self.apply_restore(cursor, restore);
        true
    }

    fn apply_restore(&mut self, cursor: &mut Position, restore: Restore) {
        self.buffer
            .splice_lines(restore.start, restore.remove, restore.lines);
        *cursor = self.buffer.clamp(restore.cursor);
        self.selection.collapse(*cursor);
    }
}
