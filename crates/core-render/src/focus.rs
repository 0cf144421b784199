//! Focus window: which rows are drawn at full intensity.
//!
//! A row `r` is in focus iff `|r - cursor_row| <= radius`. Pure rendering hint; it never
//! touches the buffer or cursor. With focus mode off every row is in focus.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusWindow {
    pub enabled: bool,
    pub radius: usize,
}

impl FocusWindow {
    pub fn new(enabled: bool, radius: usize) -> Self {
        Self { enabled, radius }
    }

    pub fn is_focused(&self, row: usize, cursor_row: usize) -> bool {
        !self.enabled || row.abs_diff(cursor_row) <= self.radius
    }

    /// Inclusive row range in focus, clipped to `line_count`. `None` when disabled.
    pub fn focused_rows(&self, cursor_row: usize, line_count: usize) -> Option<std::ops::RangeInclusive<usize>> {
        if !self.enabled || line_count == 0 {
            return None;
        }
        let start = cursor_row.saturating_sub(self.radius);
        let end = cursor_row.saturating_add(self.radius).min(line_count - 1);
        Some(start..=end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_one_marks_neighbours() {
        let f = FocusWindow::new(true, 1);
        let flags: Vec<bool> = (0..6).map(|r| f.is_focused(r, 3)).collect();
        assert_eq!(flags, vec![false, false, true, true, true, false]);
    }

    #[test]
    fn radius_zero_only_cursor_row() {
        let f = FocusWindow::new(true, 0);
        assert!(f.is_focused(5, 5));
        assert!(!f.is_focused(4, 5));
        assert!(!f.is_focused(6, 5));
    }

    #[test]
    fn disabled_focuses_everything() {
        let f = FocusWindow::new(false, 0);
        assert!((0..100).all(|r| f.is_focused(r, 50)));
        assert_eq!(f.focused_rows(50, 100), None);
    }

    #[test]
    fn focused_rows_clip_to_document() {
        let f = FocusWindow::new(true, 2);
        assert_eq!(f.focused_rows(0, 10), Some(0..=2));
        assert_eq!(f.focused_rows(9, 10), Some(7..=9));
    }
}
