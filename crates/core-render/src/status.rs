//! Status line composition.
//!
//! Format: `[MODE] <name>[*] Ln X, Col Y[ | TW][ | FOCUS] | N words[ | <message>]`.
//! * `<name>` is the base file name or `[No Name]` for an unsaved buffer.
//! * `*` appears only when the buffer is dirty.
//! * An open prompt replaces the message with `title: input`.
//!
//! Two stages: `compose_status` produces ordered `StatusSegment`s and `format_status`
//! renders them, so hosts can restyle individual segments.

use core_state::Mode;
use std::borrow::Cow;
use std::fmt::Write as _;

/// Inputs needed to render a status line.
pub struct StatusContext<'a> {
    pub mode: Mode,
    pub line: usize, // 0-based current line index
    pub col: usize,  // 0-based character column
    pub file_name: Option<&'a std::path::Path>,
    pub dirty: bool,
    pub typewriter: bool,
    pub focus: bool,
    pub words: usize,
    pub message: Option<&'a str>,
    /// Rendered prompt line when a prompt is open.
    pub prompt: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    Mode(&'static str),
    /// File name including leading space and optional dirty marker.
    FileName(Cow<'a, str>),
    /// 1-based cursor line & column.
    Position { line_1: usize, col_1: usize },
    Flag(&'static str),
    WordCount(usize),
    Message(&'a str),
    Prompt(&'a str),
}

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Navigation => "NAVIGATION",
        Mode::Insert => "INSERT",
    }
}

pub fn compose_status<'a>(ctx: &'a StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let name = ctx
        .file_name
        .and_then(|p| p.file_name())
        .and_then(|s| s.to_str())
        .unwrap_or("[No Name]");
    let file_segment: Cow<'_, str> = if ctx.dirty {
        format!(" {name}*").into()
    } else {
        format!(" {name}").into()
    };
    let mut out = Vec::with_capacity(7);
    out.push(StatusSegment::Mode(mode_label(ctx.mode)));
    out.push(StatusSegment::FileName(file_segment));
    out.push(StatusSegment::Position {
        line_1: ctx.line + 1,
        col_1: ctx.col + 1,
    });
    if ctx.typewriter {
        out.push(StatusSegment::Flag("TW"));
    }
    if ctx.focus {
        out.push(StatusSegment::Flag("FOCUS"));
    }
    out.push(StatusSegment::WordCount(ctx.words));
    if let Some(p) = ctx.prompt {
        out.push(StatusSegment::Prompt(p));
    } else if let Some(m) = ctx.message {
        out.push(StatusSegment::Message(m));
    }
    out
}

pub fn format_status(segments: &[StatusSegment<'_>]) -> String {
    let mut s = String::with_capacity(64);
    for seg in segments {
        match seg {
            StatusSegment::Mode(m) => {
                s.push('[');
                s.push_str(m);
                s.push(']');
            }
            StatusSegment::FileName(name) => s.push_str(name),
            StatusSegment::Position { line_1, col_1 } => {
                let _ = write!(s, " Ln {line_1}, Col {col_1}");
            }
            StatusSegment::Flag(f) => {
                let _ = write!(s, " | {f}");
            }
            StatusSegment::WordCount(n) => {
                let _ = write!(s, " | {n} {}", if *n == 1 { "word" } else { "words" });
            }
            StatusSegment::Message(m) | StatusSegment::Prompt(m) => {
                let _ = write!(s, " | {m}");
            }
        }
    }
    s
}

pub fn build_status(ctx: &StatusContext) -> String {
    format_status(&compose_status(ctx))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>() -> StatusContext<'a> {
        StatusContext {
            mode: Mode::Navigation,
            line: 0,
            col: 4,
            file_name: None,
            dirty: false,
            typewriter: false,
            focus: false,
            words: 0,
            message: None,
            prompt: None,
        }
    }

    #[test]
    fn builds_status_navigation_unnamed() {
        assert_eq!(build_status(&ctx()), "[NAVIGATION] [No Name] Ln 1, Col 5 | 0 words");
    }

    #[test]
    fn builds_status_insert_named_dirty_with_flags() {
        let c = StatusContext {
            mode: Mode::Insert,
            line: 2,
            col: 10,
            file_name: Some(std::path::Path::new("/tmp/chapter1.md")),
            dirty: true,
            typewriter: true,
            focus: true,
            words: 1,
            message: Some("Saved"),
            ..ctx()
        };
        assert_eq!(
            build_status(&c),
            "[INSERT] chapter1.md* Ln 3, Col 11 | TW | FOCUS | 1 word | Saved"
        );
    }

    #[test]
    fn prompt_replaces_message() {
        let c = StatusContext {
            message: Some("ignored"),
            prompt: Some("Find: cat"),
            ..ctx()
        };
        let segs = compose_status(&c);
        assert!(segs.contains(&StatusSegment::Prompt("Find: cat")));
        assert!(!segs.iter().any(|s| matches!(s, StatusSegment::Message(_))));
        assert!(format_status(&segs).ends_with("| Find: cat"));
    }
}
