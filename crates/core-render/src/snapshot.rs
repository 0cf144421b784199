//! Per-frame render snapshot.
//!
//! The engine never paints; it hands a `RenderSnapshot` to the host's `Renderer`.
//! Columns in the snapshot are display columns (terminal cells), derived with
//! `core_text::width`, so wide characters place the cursor correctly.

use core_model::EditorModel;
use core_state::Mode;
use core_text::width;

use crate::focus::FocusWindow;
use crate::status::{StatusContext, build_status};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleLine {
    /// Buffer row this screen line shows.
    pub row: usize,
    pub text: String,
    /// False when the line lies outside the focus window and should be dimmed.
    pub focused: bool,
}

/// Selected display-column span `[start_col, end_col)` on one buffer row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub row: usize,
    pub start_col: usize,
    pub end_col: usize,
}

/// Content of an open info dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogView {
    pub title: String,
    pub body: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSnapshot {
    pub visible_lines: Vec<VisibleLine>,
    pub cursor_screen_row: usize,
    pub cursor_screen_col: usize,
    /// False during the "off" phase of the cursor blink.
    pub cursor_visible: bool,
    pub mode: Mode,
    pub selection_ranges: Vec<LineSpan>,
    pub status: String,
    pub dialog: Option<DialogView>,
    pub show_line_numbers: bool,
}

/// Presentation switches that live outside the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotOptions {
    pub focus: FocusWindow,
    pub show_line_numbers: bool,
    pub cursor_visible: bool,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            focus: FocusWindow::new(false, 1),
            show_line_numbers: false,
            cursor_visible: true,
        }
    }
}

pub fn build_snapshot(model: &EditorModel, opts: &SnapshotOptions) -> RenderSnapshot {
    let state = model.state();
    let buf = &state.buffer;
    let cursor = model.cursor();
    let vp = &model.viewport;

    let visible_lines: Vec<VisibleLine> = vp
        .visible_rows(buf.line_count())
        .map(|row| VisibleLine {
            row,
            text: buf.line(row).unwrap_or_default().to_string(),
            focused: opts.focus.is_focused(row, cursor.row),
        })
        .collect();

    let selection = state.selection.range(cursor);
    let visible = vp.visible_rows(buf.line_count());
    let selection_ranges = selection
        .row_spans(buf)
        .into_iter()
        .filter(|(row, _, _)| visible.contains(row))
        .map(|(row, s, e)| {
            let line = buf.line(row).unwrap_or_default();
            LineSpan {
                row,
                start_col: width::display_col(line, s),
                end_col: width::display_col(line, e),
            }
        })
        .collect();

    let cursor_line = buf.line(cursor.row).unwrap_or_default();
    let prompt_line = state
        .prompt
        .as_ref()
        .filter(|p| !p.is_info())
        .map(|p| p.display_line());
    let status = build_status(&StatusContext {
        mode: state.mode,
        line: cursor.row,
        col: cursor.col,
        file_name: state.file_path.as_deref(),
        dirty: buf.is_dirty(),
        typewriter: vp.typewriter(),
        focus: opts.focus.enabled,
        words: buf.stats().words,
        message: state.status_text(),
        prompt: prompt_line.as_deref(),
    });
    let dialog = state
        .prompt
        .as_ref()
        .filter(|p| p.is_info())
        .map(|p| DialogView {
            title: p.title.clone(),
            body: p.body.clone(),
        });

    RenderSnapshot {
        visible_lines,
        cursor_screen_row: cursor.row.saturating_sub(vp.scroll_y),
        cursor_screen_col: width::display_col(cursor_line, cursor.col),
        cursor_visible: opts.cursor_visible,
        mode: state.mode,
        selection_ranges,
        status,
        dialog,
        show_line_numbers: opts.show_line_numbers,
    }
}
