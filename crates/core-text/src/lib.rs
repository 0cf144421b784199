//! Line-oriented text buffer.
//!
//! The document is an ordered `Vec<String>` of lines without terminators.
//! Invariants that hold after every public call:
//! * at least one line exists (an empty document is a single empty line);
//! * no stored line contains `'\n'`.
//!
//! Columns are character offsets (Unicode scalar values) within a line, never
//! byte offsets; conversion to byte indices happens only inside this crate.
//! Mutating operations return the resulting cursor position and flag the
//! buffer dirty. Undo boundaries are decided elsewhere (`core-state`).

pub mod motion;
pub mod search;
pub mod stats;
pub mod width;

pub use search::{FindOptions, Match, Query, SearchError};
pub use stats::TextStats;

/// A position inside a buffer expressed as (row, character column).
///
/// Field order matters: the derived `Ord` compares `row` first, then `col`,
/// which is the document order used for selections and search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
    pub const fn origin() -> Self {
        Self { row: 0, col: 0 }
    }
}

/// Byte index of character column `col` in `line` (line end when past the last char).
pub fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(b, _)| b)
        .unwrap_or(line.len())
}

/// Character column of byte index `byte` in `line`.
pub fn char_col(line: &str, byte: usize) -> usize {
    line[..byte.min(line.len())].chars().count()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
    dirty: bool,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Empty document: one empty line, clean.
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            dirty: false,
        }
    }

    /// Build a buffer from raw text. CRLF and lone CR are normalized to LF first.
    pub fn from_text(content: &str) -> Self {
        let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
        let lines = normalized.split('\n').map(str::to_string).collect();
        Self::from_lines(lines)
    }

    /// Build a buffer from already split lines. Embedded newlines are split further.
    pub fn from_lines(lines: Vec<String>) -> Self {
        let mut out = Vec::with_capacity(lines.len().max(1));
        for line in lines {
            if line.contains('\n') {
                out.extend(line.split('\n').map(str::to_string));
            } else {
                out.push(line);
            }
        }
        if out.is_empty() {
            out.push(String::new());
        }
        Self {
            lines: out,
            dirty: false,
        }
    }

    /// Join lines with `'\n'` (no trailing newline).
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    /// Character length of `row` (0 for rows past the end).
    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map(|l| l.chars().count()).unwrap_or(0)
    }

    pub fn last_row(&self) -> usize {
        self.lines.len() - 1
    }

    /// True for the single-empty-line document.
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Called by the session after a successful save.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Clamp `pos` into the buffer (row first, then column against that row).
    pub fn clamp(&self, pos: Position) -> Position {
        let row = pos.row.min(self.last_row());
        let col = pos.col.min(self.line_len(row));
        Position { row, col }
    }

    /// Position just after the last character of the document.
    pub fn end(&self) -> Position {
        let row = self.last_row();
        Position::new(row, self.line_len(row))
    }

    /// Whole-document replacement used by replace-all. Keeps the non-empty invariant.
    pub fn replace_lines(&mut self, lines: Vec<String>) {
        let fresh = Self::from_lines(lines);
        self.lines = fresh.lines;
        self.dirty = true;
    }

    /// Replace `count` lines starting at `start` with `lines` (undo/redo splice).
    /// Both bounds are clamped to the document; an emptied buffer keeps one blank line.
    pub fn splice_lines(&mut self, start: usize, count: usize, lines: Vec<String>) {
        let start = start.min(self.lines.len());
        let end = start.saturating_add(count).min(self.lines.len());
        self.lines.splice(start..end, lines);
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.dirty = true;
    }

    /// Insert `ch` at `pos` and return `(row, col + 1)`. A newline splits the line instead.
    pub fn insert_char(&mut self, pos: Position, ch: char) -> Position {
        if ch == '\n' {
            return self.split_line(pos);
        }
        let pos = self.clamp(pos);
        let line = &mut self.lines[pos.row];
        let at = byte_index(line, pos.col);
        line.insert(at, ch);
        self.dirty = true;
        Position::new(pos.row, pos.col + 1)
    }

    /// Insert possibly multi-line text at `pos`; returns the position after the inserted text.
    pub fn insert_text(&mut self, pos: Position, text: &str) -> Position {
        let pos = self.clamp(pos);
        if text.is_empty() {
            return pos;
        }
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let mut segments = normalized.split('\n');
        let first = segments.next().unwrap_or("");
        let rest: Vec<&str> = segments.collect();

        let line = &mut self.lines[pos.row];
        let at = byte_index(line, pos.col);
        let tail = line.split_off(at);
        line.push_str(first);
        self.dirty = true;
        if rest.is_empty() {
            let col = pos.col + first.chars().count();
            self.lines[pos.row].push_str(&tail);
            return Position::new(pos.row, col);
        }
        let mut row = pos.row;
        for segment in &rest {
            row += 1;
            self.lines.insert(row, (*segment).to_string());
        }
        let col = self.lines[row].chars().count();
        self.lines[row].push_str(&tail);
        Position::new(row, col)
    }

    /// Split the line at `pos` (Enter). Returns the start of the new line.
    pub fn split_line(&mut self, pos: Position) -> Position {
        let pos = self.clamp(pos);
        let line = &mut self.lines[pos.row];
        let at = byte_index(line, pos.col);
        let tail = line.split_off(at);
        self.lines.insert(pos.row + 1, tail);
        self.dirty = true;
        Position::new(pos.row + 1, 0)
    }

    /// Append line `row + 1` onto `row`. Returns the join point. No-op on the last line.
    pub fn join_line(&mut self, row: usize) -> Position {
        let row = row.min(self.last_row());
        let join_col = self.line_len(row);
        if row >= self.last_row() {
            return Position::new(row, join_col);
        }
        let next = self.lines.remove(row + 1);
        self.lines[row].push_str(&next);
        self.dirty = true;
        Position::new(row, join_col)
    }

    /// Delete the character under `pos`; at line end joins the next line. Returns `pos` (clamped).
    pub fn delete_char_at(&mut self, pos: Position) -> Position {
        let pos = self.clamp(pos);
        if pos.col < self.line_len(pos.row) {
            let line = &mut self.lines[pos.row];
            let at = byte_index(line, pos.col);
            line.remove(at);
            self.dirty = true;
            pos
        } else {
            self.join_line(pos.row)
        }
    }

    /// Delete the character before `pos` (Backspace). At column 0 joins with the previous
    /// line; at the document start this is a no-op.
    pub fn delete_char_before(&mut self, pos: Position) -> Position {
        let pos = self.clamp(pos);
        if pos.col > 0 {
            let line = &mut self.lines[pos.row];
            let at = byte_index(line, pos.col - 1);
            line.remove(at);
            self.dirty = true;
            Position::new(pos.row, pos.col - 1)
        } else if pos.row > 0 {
            self.join_line(pos.row - 1)
        } else {
            pos
        }
    }

    /// Text between two positions (order-insensitive), lines joined by `'\n'`.
    pub fn text_range(&self, a: Position, b: Position) -> String {
        let (start, end) = ordered(self.clamp(a), self.clamp(b));
        if start.row == end.row {
            let line = &self.lines[start.row];
            return line[byte_index(line, start.col)..byte_index(line, end.col)].to_string();
        }
        let mut out = String::new();
        let first = &self.lines[start.row];
        out.push_str(&first[byte_index(first, start.col)..]);
        for row in start.row + 1..end.row {
            out.push('\n');
            out.push_str(&self.lines[row]);
        }
        out.push('\n');
        let last = &self.lines[end.row];
        out.push_str(&last[..byte_index(last, end.col)]);
        out
    }

    /// Remove the text between two positions (order-insensitive) and return it.
    /// The cursor lands on the normalized start.
    pub fn delete_range(&mut self, a: Position, b: Position) -> (String, Position) {
        let (start, end) = ordered(self.clamp(a), self.clamp(b));
        if start == end {
            return (String::new(), start);
        }
        let removed = self.text_range(start, end);
        let end_line = &self.lines[end.row];
        let suffix = end_line[byte_index(end_line, end.col)..].to_string();
        let first = &mut self.lines[start.row];
        let cut = byte_index(first, start.col);
        first.truncate(cut);
        first.push_str(&suffix);
        self.lines.drain(start.row + 1..=end.row);
        self.dirty = true;
        (removed, start)
    }

    /// Remove line `row`. The only line is cleared instead. Returns the cursor position:
    /// row clamped to the remaining lines, column 0.
    pub fn delete_line(&mut self, row: usize) -> Position {
        let row = row.min(self.last_row());
        if self.lines.len() == 1 {
            if !self.lines[0].is_empty() {
                self.lines[0].clear();
                self.dirty = true;
            }
            return Position::origin();
        }
        self.lines.remove(row);
        self.dirty = true;
        Position::new(row.min(self.last_row()), 0)
    }

    /// Insert a new line with `text` at index `row` (clamped to `line_count`).
    pub fn insert_line(&mut self, row: usize, text: &str) -> Position {
        let row = row.min(self.lines.len());
        self.lines.insert(row, text.replace('\n', " "));
        self.dirty = true;
        Position::new(row, 0)
    }

    /// Replace the characters `[start_col, end_col)` of `row` with `text` (single line).
    /// Returns the column just after the replacement.
    pub fn replace_in_line(&mut self, row: usize, start_col: usize, end_col: usize, text: &str) -> usize {
        let row = row.min(self.last_row());
        let len = self.line_len(row);
        let (s, e) = (start_col.min(len), end_col.min(len).max(start_col.min(len)));
        let line = &mut self.lines[row];
        let (bs, be) = (byte_index(line, s), byte_index(line, e));
        line.replace_range(bs..be, text);
        self.dirty = true;
        s + text.chars().count()
    }

    pub fn stats(&self) -> TextStats {
        TextStats::compute(&self.lines)
    }
}

fn ordered(a: Position, b: Position) -> (Position, Position) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn buf(lines: &[&str]) -> TextBuffer {
        TextBuffer::from_lines(lines.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn empty_document_has_one_line() {
        let b = TextBuffer::new();
        assert_eq!(b.line_count(), 1);
        assert!(b.is_empty());
        assert!(!b.is_dirty());
        let b = TextBuffer::from_lines(Vec::new());
        assert_eq!(b.lines(), &[String::new()]);
    }

    #[test]
    fn from_text_normalizes_line_endings() {
        let b = TextBuffer::from_text("a\r\nb\rc\n");
        assert_eq!(b.lines(), &["a", "b", "c", ""]);
        assert_eq!(b.to_text(), "a\nb\nc\n");
    }

    #[test]
    fn insert_char_advances_column() {
        let mut b = buf(&["hllo"]);
        let p = b.insert_char(Position::new(0, 1), 'e');
        assert_eq!(p, Position::new(0, 2));
        assert_eq!(b.line(0), Some("hello"));
        assert!(b.is_dirty());
    }

    #[test]
    fn insert_char_handles_multibyte_columns() {
        let mut b = buf(&["héllo"]);
        let p = b.insert_char(Position::new(0, 2), 'X');
        assert_eq!(b.line(0), Some("héXllo"));
        assert_eq!(p.col, 3);
    }

    #[test]
    fn insert_char_out_of_bounds_clamps() {
        let mut b = buf(&["ab"]);
        let p = b.insert_char(Position::new(9, 9), 'c');
        assert_eq!(b.line(0), Some("abc"));
        assert_eq!(p, Position::new(0, 3));
    }

    #[test]
    fn split_and_join_round_trip() {
        let mut b = buf(&["abcd"]);
        let p = b.split_line(Position::new(0, 2));
        assert_eq!(b.lines(), &["ab", "cd"]);
        assert_eq!(p, Position::new(1, 0));
        let j = b.join_line(0);
        assert_eq!(b.lines(), &["abcd"]);
        assert_eq!(j, Position::new(0, 2));
    }

    #[test]
    fn join_on_last_line_is_noop() {
        let mut b = buf(&["a", "b"]);
        b.join_line(1);
        assert_eq!(b.lines(), &["a", "b"]);
        assert!(!b.is_dirty());
    }

    #[test]
    fn backspace_at_document_start_is_noop() {
        let mut b = buf(&["abc"]);
        let p = b.delete_char_before(Position::origin());
        assert_eq!(p, Position::origin());
        assert_eq!(b.lines(), &["abc"]);
        assert!(!b.is_dirty());
    }

    #[test]
    fn backspace_at_col_zero_joins_previous() {
        let mut b = buf(&["ab", "cd"]);
        let p = b.delete_char_before(Position::new(1, 0));
        assert_eq!(b.lines(), &["abcd"]);
        assert_eq!(p, Position::new(0, 2));
    }

    #[test]
    fn delete_at_line_end_joins_next() {
        let mut b = buf(&["ab", "cd"]);
        let p = b.delete_char_at(Position::new(0, 2));
        assert_eq!(b.lines(), &["abcd"]);
        assert_eq!(p, Position::new(0, 2));
    }

    #[test]
    fn delete_line_middle() {
        let mut b = buf(&["Line 1", "Line 2", "Line 3"]);
        let p = b.delete_line(1);
        assert_eq!(b.lines(), &["Line 1", "Line 3"]);
        assert_eq!(p, Position::new(1, 0));
    }

    #[test]
    fn delete_last_line_clamps_row() {
        let mut b = buf(&["a", "b"]);
        let p = b.delete_line(1);
        assert_eq!(b.lines(), &["a"]);
        assert_eq!(p, Position::new(0, 0));
    }

    #[test]
    fn delete_only_line_clears_it() {
        let mut b = buf(&["only"]);
        let p = b.delete_line(0);
        assert_eq!(b.lines(), &[""]);
        assert_eq!(p, Position::origin());
        let mut empty = TextBuffer::new();
        empty.delete_line(0);
        assert!(!empty.is_dirty(), "clearing an empty document changes nothing");
    }

    #[test]
    fn delete_range_multi_line() {
        let mut b = buf(&["hello", "big", "world"]);
        let (removed, at) = b.delete_range(Position::new(2, 2), Position::new(0, 3));
        assert_eq!(removed, "lo\nbig\nwo");
        assert_eq!(b.lines(), &["helrld"]);
        assert_eq!(at, Position::new(0, 3));
    }

    #[test]
    fn insert_text_multi_line_keeps_tail() {
        let mut b = buf(&["abXY"]);
        let p = b.insert_text(Position::new(0, 2), "1\n22\n3");
        assert_eq!(b.lines(), &["ab1", "22", "3XY"]);
        assert_eq!(p, Position::new(2, 1));
    }

    #[test]
    fn text_range_single_line() {
        let b = buf(&["This is a Test case"]);
        assert_eq!(b.text_range(Position::new(0, 10), Position::new(0, 14)), "Test");
    }

    #[test]
    fn replace_in_line_returns_end_column() {
        let mut b = buf(&["banana"]);
        let end = b.replace_in_line(0, 1, 2, "XYZ");
        assert_eq!(b.line(0), Some("bXYZnana"));
        assert_eq!(end, 4);
    }

    #[test]
    fn mark_clean_resets_dirty() {
        let mut b = buf(&["a"]);
        b.insert_char(Position::origin(), 'b');
        assert!(b.is_dirty());
        b.mark_clean();
        assert!(!b.is_dirty());
    }

    #[test]
    fn splice_lines_replaces_a_span() {
        let mut b = buf(&["a", "b", "c"]);
        b.splice_lines(1, 1, vec!["x".into(), "y".into()]);
        assert_eq!(b.lines(), &["a", "x", "y", "c"]);
        b.splice_lines(0, 9, Vec::new());
        assert_eq!(b.lines(), &[""]);
        assert!(b.is_dirty());
    }
}
