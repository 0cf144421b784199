//! Cursor motion helpers.
//!
//! These operate purely on a `TextBuffer` + `Position` pair and are free of editor
//! state. Every motion clamps at buffer bounds; none of them fail.
//!
//! Words are runs of non-whitespace characters, matching how writers count them.

use crate::{Position, TextBuffer, width};

/// Move left one character. Stops at column 0 (no wrap to the previous line).
pub fn left(_buf: &TextBuffer, pos: &mut Position) {
    pos.col = pos.col.saturating_sub(1);
}

/// Move right one character. Stops at line end.
pub fn right(buf: &TextBuffer, pos: &mut Position) {
    if pos.col < buf.line_len(pos.row) {
        pos.col += 1;
    }
}

/// Move to start of line.
pub fn line_start(_buf: &TextBuffer, pos: &mut Position) {
    pos.col = 0;
}

/// Move to end of line (after the last character).
pub fn line_end(buf: &TextBuffer, pos: &mut Position) {
    pos.col = buf.line_len(pos.row);
}

pub fn doc_start(_buf: &TextBuffer, pos: &mut Position) {
    *pos = Position::origin();
}

pub fn doc_end(buf: &TextBuffer, pos: &mut Position) {
    *pos = buf.end();
}

/// Move up one line preserving a target display column (sticky). Returns the updated sticky column.
/// Caller should keep the returned value across successive vertical motions and reset it to
/// `None` on any horizontal motion or edit.
pub fn up(buf: &TextBuffer, pos: &mut Position, sticky_col: Option<usize>) -> Option<usize> {
    vertical(buf, pos, sticky_col, -1)
}

/// Move down one line preserving sticky display column.
pub fn down(buf: &TextBuffer, pos: &mut Position, sticky_col: Option<usize>) -> Option<usize> {
    vertical(buf, pos, sticky_col, 1)
}

/// Move `rows` lines up (negative) or down (positive), clamped to the document. Used by paging.
pub fn vertical(
    buf: &TextBuffer,
    pos: &mut Position,
    sticky_col: Option<usize>,
    rows: isize,
) -> Option<usize> {
    let target_row = if rows < 0 {
        pos.row.saturating_sub(rows.unsigned_abs())
    } else {
        pos.row.saturating_add(rows as usize).min(buf.last_row())
    };
    if target_row == pos.row {
        return sticky_col;
    }
    let sticky = sticky_col
        .unwrap_or_else(|| width::display_col(buf.line(pos.row).unwrap_or_default(), pos.col));
    pos.row = target_row;
    pos.col = width::col_for_display(buf.line(pos.row).unwrap_or_default(), sticky);
    Some(sticky)
}

fn char_at(buf: &TextBuffer, pos: Position) -> Option<char> {
    buf.line(pos.row).and_then(|l| l.chars().nth(pos.col))
}

/// Move forward to the start of the next word.
///
/// Skips the rest of the current word, then any whitespace and line breaks. When no
/// further word exists the cursor lands at the document end.
pub fn word_forward(buf: &TextBuffer, pos: &mut Position) {
    let mut p = buf.clamp(*pos);
    while let Some(c) = char_at(buf, p) {
        if c.is_whitespace() {
            break;
        }
        p.col += 1;
    }
    loop {
        match char_at(buf, p) {
            Some(c) if !c.is_whitespace() => break,
            Some(_) => p.col += 1,
            None => {
                if p.row >= buf.last_row() {
                    break;
                }
                p = Position::new(p.row + 1, 0);
            }
        }
    }
    *pos = p;
}

/// Move backward to the start of the previous word. If currently at the start of a
/// word, moves to the start of the word before it. Stops at the document start.
pub fn word_backward(buf: &TextBuffer, pos: &mut Position) {
    let mut p = buf.clamp(*pos);
    // Step back over whitespace and line breaks until we sit just after a word char.
    loop {
        if p.col == 0 {
            if p.row == 0 {
                *pos = Position::origin();
                return;
            }
            p.row -= 1;
            p.col = buf.line_len(p.row);
            continue;
        }
        match char_at(buf, Position::new(p.row, p.col - 1)) {
            Some(c) if c.is_whitespace() => p.col -= 1,
            _ => break,
        }
    }
    while p.col > 0 {
        match char_at(buf, Position::new(p.row, p.col - 1)) {
            Some(c) if !c.is_whitespace() => p.col -= 1,
            _ => break,
        }
    }
    *pos = p;
}
