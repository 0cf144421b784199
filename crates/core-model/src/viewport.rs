//! Vertical scrolling policies.
//!
//! Two policies share one state machine:
//! * Reactive: scroll the minimum needed to keep the cursor row on screen.
//! * Typewriter: pin the cursor near `floor(height * position)` while the writer moves
//!   forward; backward or same-row motion that stays on screen leaves the view alone.
//!
//! `last_row` is updated on every recompute (including `height == 0`) so the typewriter
//! forward-motion test always compares against the previous frame.

use tracing::trace;

/// Reactive policy: new `scroll_y` keeping `cursor_row` within `[scroll_y, scroll_y + height)`.
/// Returns `None` when no scroll is needed or `height == 0`.
pub fn compute_reactive_scroll(scroll_y: usize, cursor_row: usize, height: usize) -> Option<usize> {
    if height == 0 {
        return None;
    }
    if cursor_row < scroll_y {
        Some(cursor_row)
    } else if cursor_row >= scroll_y + height {
        Some(cursor_row + 1 - height)
    } else {
        None
    }
}

/// Target screen line for the typewriter policy.
pub fn typewriter_target(height: usize, position: f64) -> usize {
    (height as f64 * position).floor() as usize
}

/// Typewriter policy. Returns `None` when `scroll_y` stays unchanged.
pub fn compute_typewriter_scroll(
    scroll_y: usize,
    cursor_row: usize,
    last_row: usize,
    height: usize,
    position: f64,
) -> Option<usize> {
    if height == 0 {
        return None;
    }
    let off_screen = cursor_row < scroll_y || cursor_row >= scroll_y + height;
    if cursor_row > last_row || off_screen {
        let desired = cursor_row.saturating_sub(typewriter_target(height, position));
        if desired != scroll_y {
            return Some(desired);
        }
    }
    None
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewportManager {
    pub scroll_y: usize,
    pub last_row: usize,
    pub height: usize,
    pub width: usize,
    typewriter: bool,
    position: f64,
}

/// Typewriter target used when the requested position is outside `(0, 1)`.
pub const DEFAULT_TYPEWRITER_POSITION: f64 = 0.66;

impl ViewportManager {
    pub fn new(typewriter: bool, position: f64) -> Self {
        let position = if position > 0.0 && position < 1.0 {
            position
        } else {
            DEFAULT_TYPEWRITER_POSITION
        };
        Self {
            scroll_y: 0,
            last_row: 0,
            height: 0,
            width: 0,
            typewriter,
            position,
        }
    }

    pub fn typewriter(&self) -> bool {
        self.typewriter
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    /// Apply the active policy for `cursor_row`. Returns true if `scroll_y` changed.
    pub fn recompute(&mut self, cursor_row: usize) -> bool {
        let next = if self.typewriter {
            compute_typewriter_scroll(
                self.scroll_y,
                cursor_row,
                self.last_row,
                self.height,
                self.position,
            )
        } else {
            compute_reactive_scroll(self.scroll_y, cursor_row, self.height)
        };
        self.last_row = cursor_row;
        match next {
            Some(s) => {
                trace!(target: "model.viewport", from = self.scroll_y, to = s, cursor_row, typewriter = self.typewriter, "scroll");
                self.scroll_y = s;
                true
            }
            None => false,
        }
    }

    /// Switch policy. Turning typewriter on re-centers once, unconditionally.
    pub fn set_typewriter(&mut self, on: bool, cursor_row: usize) {
        self.typewriter = on;
        if on && self.height > 0 {
            self.scroll_y = cursor_row.saturating_sub(typewriter_target(self.height, self.position));
            trace!(target: "model.viewport", scroll_y = self.scroll_y, cursor_row, "typewriter_recenter");
        }
        self.last_row = cursor_row;
        if !on {
            self.recompute(cursor_row);
        }
    }

    /// Buffer rows currently on screen, clipped to `line_count`.
    pub fn visible_rows(&self, line_count: usize) -> std::ops::Range<usize> {
        let start = self.scroll_y.min(line_count);
        let end = (self.scroll_y + self.height).min(line_count);
        start..end
    }

    /// Rows moved by PageUp / PageDown.
    pub fn page_rows(&self) -> usize {
        self.height.saturating_sub(1).max(1)
    }
}
