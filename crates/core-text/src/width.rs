//! Display width helpers.
//!
//! Columns stored in `Position` are character offsets. Renderers and sticky
//! vertical motion work in terminal cells instead; these two functions are the
//! only place the two are converted.

use unicode_width::UnicodeWidthChar;

fn char_width(c: char) -> usize {
    // Control characters have no width entry; render them as a single cell.
    UnicodeWidthChar::width(c).unwrap_or(1)
}

/// Display column (terminal cells) of character column `col` in `line`.
pub fn display_col(line: &str, col: usize) -> usize {
    line.chars().take(col).map(char_width).sum()
}

/// Character column whose display column is the greatest value `<= target`.
/// Clamps to the line length.
pub fn col_for_display(line: &str, target: usize) -> usize {
    let mut cells = 0;
    for (idx, c) in line.chars().enumerate() {
        let w = char_width(c);
        if cells + w > target {
            return idx;
        }
        cells += w;
    }
    line.chars().count()
}

/// Total display width of a string.
pub fn str_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}
