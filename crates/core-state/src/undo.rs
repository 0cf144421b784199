use core_text::Position;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::trace;

/// Default maximum number of records retained in undo history.
pub const UNDO_HISTORY_MAX: usize = 200;

/// Classification of an edit. Only `InsertChar` records are extended by later edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditKind {
    /// Insert-mode character typing (coalescable).
    InsertChar,
    /// Multi-character insertion outside a typing burst (paste, navigation-mode insert).
    InsertText,
    Newline,
    DeleteChar,
    DeleteLine,
    DeleteRange,
    OpenLine,
    Replace,
    ReplaceAll,
}

/// One reversible edit: the span of lines it rewrote, in both versions, plus cursors.
///
/// `before` held rows `start..start + before.len()` prior to the edit; `after` holds the
/// rows that replaced them. Lines outside the span are untouched apart from shifting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditRecord {
    pub kind: EditKind,
    pub start: usize,
    pub before: Vec<String>,
    pub after: Vec<String>,
    pub cursor_before: Position,
    pub cursor_after: Position,
    /// Time of the most recent edit merged into this record.
    pub last_edit_at: Instant,
}

impl EditRecord {
    /// True when an edit of rows `start..start + len` falls inside this record's `after` span.
    fn covers(&self, start: usize, len: usize) -> bool {
        start >= self.start && start + len <= self.start + self.after.len()
    }
}

/// Line splice handed back by `undo` / `redo`: replace `remove` rows at `start` with `lines`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Restore {
    pub start: usize,
    pub remove: usize,
    pub lines: Vec<String>,
    pub cursor: Position,
}

/// Undo/redo history with an explicit open record for coalescing typing bursts.
///
/// The open record is closed by `close_record` (mode switch, cursor movement, save),
/// by any non-`InsertChar` edit, by `undo`/`redo`, and by `expire_idle` once the gap since
/// the last merged edit reaches the coalesce timeout.
#[derive(Debug)]
pub struct UndoEngine {
    undo_stack: VecDeque<EditRecord>,
    redo_stack: Vec<EditRecord>,
    open: bool,
    capacity: usize,
    coalesce_timeout: Duration,
    /// Count of edits skipped because nothing changed.
    skipped: u64,
}

impl Default for UndoEngine {
    fn default() -> Self {
        Self::new(UNDO_HISTORY_MAX, Duration::from_millis(1000))
    }
}

impl UndoEngine {
    pub fn new(capacity: usize, coalesce_timeout: Duration) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            open: false,
            capacity: capacity.max(1),
            coalesce_timeout,
            skipped: 0,
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
    pub fn is_open(&self) -> bool {
        self.open
    }
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lines held by every record on both stacks.
    pub fn retained_lines(&self) -> usize {
        self.undo_stack
            .iter()
            .chain(self.redo_stack.iter())
            .map(|r| r.before.len() + r.after.len())
            .sum()
    }

    /// Record an applied edit that replaced `before` at row `start` with `after`.
    /// Returns `false` when the edit changed nothing and was skipped.
    #[allow(clippy::too_many_arguments)]
    pub fn record_edit(
        &mut self,
        start: usize,
        before: Vec<String>,
        after: Vec<String>,
        cursor_before: Position,
        cursor_after: Position,
        kind: EditKind,
        now: Instant,
    ) -> bool {
        if before == after {
            self.skipped += 1;
            trace!(target: "state.undo", ?kind, undo_depth = self.undo_stack.len(), "edit_skipped_identical");
            return false;
        }
        self.redo_stack.clear();
        if self.open
            && kind == EditKind::InsertChar
            && let Some(top) = self.undo_stack.back_mut()
            && top.kind == EditKind::InsertChar
            && now.saturating_duration_since(top.last_edit_at) < self.coalesce_timeout
            && top.covers(start, before.len())
        {
            let at = start - top.start;
            top.after.splice(at..at + before.len(), after);
            top.cursor_after = cursor_after;
            top.last_edit_at = now;
            let span = top.after.len();
            trace!(target: "state.undo", undo_depth = self.undo_stack.len(), span, "edit_coalesced");
            return true;
        }
        let span = after.len();
        self.undo_stack.push_back(EditRecord {
            kind,
            start,
            before,
            after,
            cursor_before,
            cursor_after,
            last_edit_at: now,
        });
        self.open = kind == EditKind::InsertChar;
        trace!(target: "state.undo", ?kind, start, span, undo_depth = self.undo_stack.len(), "record_pushed");
        while self.undo_stack.len() > self.capacity {
            self.undo_stack.pop_front();
            trace!(target: "state.undo", capacity = self.capacity, "undo_stack_trimmed");
        }
        true
    }

    /// Close the open record so the next edit starts a new one.
    pub fn close_record(&mut self) {
        if self.open {
            self.open = false;
            trace!(target: "state.undo", undo_depth = self.undo_stack.len(), "record_closed");
        }
    }

    /// Close the open record when the idle gap has reached the coalesce timeout.
    /// Returns true when a record was closed.
    pub fn expire_idle(&mut self, now: Instant) -> bool {
        let idle = self
            .undo_stack
            .back()
            .map(|r| now.saturating_duration_since(r.last_edit_at) >= self.coalesce_timeout)
            .unwrap_or(false);
        if self.open && idle {
            self.close_record();
            return true;
        }
        false
    }

    pub fn undo(&mut self) -> Option<Restore> {
        self.open = false;
        let record = self.undo_stack.pop_back()?;
        let restore = Restore {
            start: record.start,
            remove: record.after.len(),
            lines: record.before.clone(),
            cursor: record.cursor_before,
        };
        self.redo_stack.push(record);
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "undo_pop");
        Some(restore)
    }

    pub fn redo(&mut self) -> Option<Restore> {
        self.open = false;
        let record = self.redo_stack.pop()?;
        let restore = Restore {
            start: record.start,
            remove: record.before.len(),
            lines: record.after.clone(),
            cursor: record.cursor_after,
        };
        self.undo_stack.push_back(record);
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "redo_pop");
        Some(restore)
    }
}
