//! Anchor-based selection.
//!
//! The active end of a selection is always the view cursor, owned by `core-model`; this
//! model stores only the anchor. Operations that move the active end return the new
//! cursor for the caller to apply.

use core_text::{Position, TextBuffer};

/// Normalized selection extent, `start <= end` in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: Position,
    pub end: Position,
}

impl SelectionRange {
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Per-row character spans `(row, start_col, end_col)` covered by the range, given
    /// each row's length. Rows fully inside the range span the whole line.
    pub fn row_spans(&self, buf: &TextBuffer) -> Vec<(usize, usize, usize)> {
        if self.is_empty() {
            return Vec::new();
        }
        (self.start.row..=self.end.row)
            .map(|row| {
                let s = if row == self.start.row { self.start.col } else { 0 };
                let e = if row == self.end.row {
                    self.end.col
                } else {
                    buf.line_len(row)
                };
                (row, s, e)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionModel {
    anchor: Position,
}

impl SelectionModel {
    pub fn new(at: Position) -> Self {
        Self { anchor: at }
    }

    pub fn anchor(&self) -> Position {
        self.anchor
    }

    pub fn set_anchor(&mut self, anchor: Position) {
        self.anchor = anchor;
    }

    /// Empty selection at `active`. Idempotent.
    pub fn collapse(&mut self, active: Position) {
        self.anchor = active;
    }

    pub fn is_empty(&self, active: Position) -> bool {
        self.anchor == active
    }

    pub fn range(&self, active: Position) -> SelectionRange {
        SelectionRange::new(self.anchor, active)
    }

    /// Select `row` from column 0 to its end. Returns the new active position.
    pub fn select_line(&mut self, buf: &TextBuffer, row: usize) -> Position {
        let row = row.min(buf.last_row());
        self.anchor = Position::new(row, 0);
        Position::new(row, buf.line_len(row))
    }

    /// Select the whole document. Returns the new active position (document end).
    pub fn select_all(&mut self, buf: &TextBuffer) -> Position {
        self.anchor = Position::origin();
        buf.end()
    }

    /// Re-clamp the anchor after the buffer shrank.
    pub fn clamp(&mut self, buf: &TextBuffer) {
        self.anchor = buf.clamp(self.anchor);
    }
}
