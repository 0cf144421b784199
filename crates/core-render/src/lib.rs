//! Rendering boundary: focus window, status line and per-frame snapshots.
//!
//! The engine produces a `RenderSnapshot` for every frame and hands it to a host-provided
//! `Renderer`. Painting (terminal, GUI) is the host's business; this crate only decides
//! what is visible, what is dimmed, where the cursor sits and what the status line says.
//!
//! Exposed components:
//! - `focus`: focus-window calculator (in-focus vs dimmed rows).
//! - `status`: status line segments and formatting.
//! - `snapshot`: `RenderSnapshot` assembly from an `EditorModel`.
//! - `FrameRenderer`: a headless `Renderer` that keeps the last painted frame as plain text.

pub mod focus;
pub mod snapshot;
pub mod status;

pub use focus::FocusWindow;
pub use snapshot::{DialogView, LineSpan, RenderSnapshot, SnapshotOptions, VisibleLine, build_snapshot};

/// Paints snapshots. Implemented by the host shell.
pub trait Renderer {
    fn paint(&mut self, snapshot: &RenderSnapshot);
}

/// Headless renderer: formats each frame into text rows.
///
/// Dimmed rows are prefixed with `~ `, focused rows with two spaces, and the status line is
/// appended last. Useful for tests and for hosts that diff plain text.
#[derive(Debug, Default, Clone)]
pub struct FrameRenderer {
    pub frames: usize,
    pub last: Vec<String>,
    pub last_snapshot: Option<RenderSnapshot>,
}

impl Renderer for FrameRenderer {
    fn paint(&mut self, snapshot: &RenderSnapshot) {
        let gutter = snapshot
            .visible_lines
            .last()
            .map(|l| (l.row + 1).to_string().len())
            .unwrap_or(1);
        let mut rows: Vec<String> = snapshot
            .visible_lines
            .iter()
            .map(|l| {
                let marker = if l.focused { "  " } else { "~ " };
                if snapshot.show_line_numbers {
                    format!("{marker}{:>gutter$} {}", l.row + 1, l.text)
                } else {
                    format!("{marker}{}", l.text)
                }
            })
            .collect();
        if let Some(d) = &snapshot.dialog {
            rows.push(format!("[{}]", d.title));
            rows.extend(d.body.iter().cloned());
        }
        rows.push(snapshot.status.clone());
        tracing::trace!(target: "render", rows = rows.len(), frame = self.frames + 1, "paint");
        self.frames += 1;
        self.last = rows;
        self.last_snapshot = Some(snapshot.clone());
    }
}
