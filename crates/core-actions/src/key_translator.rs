//! KeyTranslator: the `(mode, key) -> (action, next mode)` transition table.
//!
//! Evaluation order:
//! 1. An open prompt owns every key (info dialogs close on any key and consume it).
//! 2. Global chords (Ctrl+S, Ctrl+F, F1, ...) apply in both modes.
//! 3. The per-mode table, one `match` over `(Mode, KeyCode, Chord)`.
//!
//! The only state kept between keys is the first `d` of a `dd` pair. A second `d`
//! arriving within `delete_line_timeout` deletes the line; any other key, or a late
//! `d`, starts over.

use crate::{Action, InsertEntry, MotionKind};
use core_events::{KeyCode, KeyEvent, KeyModifiers, TimedKey};
use core_state::Mode;
use std::time::{Duration, Instant};

/// Who receives the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFocus {
    Buffer,
    /// Single-line input prompt (find, replace, go to line).
    PromptInput,
    /// Read-only info dialog.
    InfoDialog,
}

/// One row of the transition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub action: Action,
    pub next_mode: Mode,
}

impl Transition {
    pub fn new(action: Action, next_mode: Mode) -> Self {
        Self { action, next_mode }
    }
}

/// Modifier combinations the table distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chord {
    None,
    Shift,
    Ctrl,
    Alt,
    Other,
}

fn chord(mods: KeyModifiers) -> Chord {
    if mods.is_empty() {
        Chord::None
    } else if mods == KeyModifiers::SHIFT {
        Chord::Shift
    } else if mods == KeyModifiers::CTRL {
        Chord::Ctrl
    } else if mods == KeyModifiers::ALT {
        Chord::Alt
    } else {
        Chord::Other
    }
}

#[derive(Debug)]
pub struct KeyTranslator {
    delete_line_timeout: Duration,
    /// First `d` of a potential `dd`.
    pending_delete: Option<TimedKey>,
}

impl Default for KeyTranslator {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

impl KeyTranslator {
    pub fn new(delete_line_timeout: Duration) -> Self {
        Self {
            delete_line_timeout,
            pending_delete: None,
        }
    }

    pub fn set_delete_line_timeout(&mut self, timeout: Duration) {
        self.delete_line_timeout = timeout;
    }

    pub fn has_pending_delete(&self) -> bool {
        self.pending_delete.is_some()
    }

    pub fn reset(&mut self) {
        self.pending_delete = None;
    }

    pub fn translate(
        &mut self,
        mode: Mode,
        focus: KeyFocus,
        key: &KeyEvent,
        now: Instant,
    ) -> Transition {
        let pending = self.pending_delete.take();
        let action = match focus {
            KeyFocus::InfoDialog => Action::CloseInfo,
            KeyFocus::PromptInput => prompt_action(key),
            KeyFocus::Buffer => match global_action(key) {
                Some(a) => a,
                None => self.mode_action(mode, key, pending, now),
            },
        };
        let next_mode = match (&action, mode) {
            (Action::EnterInsert(_), _) => Mode::Insert,
            (Action::ExitInsert, _) => Mode::Navigation,
            (_, m) => m,
        };
        tracing::trace!(target: "actions.dispatch", key = %key, ?mode, ?focus, ?action, ?next_mode, "translate");
        Transition::new(action, next_mode)
    }

    fn mode_action(
        &mut self,
        mode: Mode,
        key: &KeyEvent,
        pending: Option<TimedKey>,
        now: Instant,
    ) -> Action {
        use Action::*;
        use MotionKind as M;
        match (mode, key.code, chord(key.mods)) {
            // Navigation
            (Mode::Navigation, KeyCode::Char('i'), Chord::None) => EnterInsert(InsertEntry::AtCursor),
            (Mode::Navigation, KeyCode::Char('I'), Chord::None | Chord::Shift) => {
                EnterInsert(InsertEntry::LineStart)
            }
            (Mode::Navigation, KeyCode::Char('a'), Chord::None) => EnterInsert(InsertEntry::After),
            (Mode::Navigation, KeyCode::Char('A'), Chord::None | Chord::Shift) => {
                EnterInsert(InsertEntry::LineEnd)
            }
            (Mode::Navigation, KeyCode::Char('o'), Chord::None) => EnterInsert(InsertEntry::OpenBelow),
            (Mode::Navigation, KeyCode::Char('O'), Chord::None | Chord::Shift) => {
                EnterInsert(InsertEntry::OpenAbove)
            }
            (Mode::Navigation, KeyCode::Char('h'), Chord::None) => Motion(M::Left),
            (Mode::Navigation, KeyCode::Char('j'), Chord::None) => Motion(M::Down),
            (Mode::Navigation, KeyCode::Char('k'), Chord::None) => Motion(M::Up),
            (Mode::Navigation, KeyCode::Char('l'), Chord::None) => Motion(M::Right),
            (Mode::Navigation, KeyCode::Char('w'), Chord::None) => Motion(M::WordForward),
            (Mode::Navigation, KeyCode::Char('b'), Chord::None) => Motion(M::WordBackward),
            (Mode::Navigation, KeyCode::Char('0'), Chord::None) => Motion(M::LineStart),
            (Mode::Navigation, KeyCode::Char('$'), Chord::None | Chord::Shift) => Motion(M::LineEnd),
            (Mode::Navigation, KeyCode::Char('g'), Chord::None) => Motion(M::DocStart),
            (Mode::Navigation, KeyCode::Char('G'), Chord::None | Chord::Shift) => Motion(M::DocEnd),
            (Mode::Navigation, KeyCode::Char('d'), Chord::None) => {
                let this = TimedKey::new(*key, now);
                match pending {
                    Some(prev) if this.repeats(&prev, self.delete_line_timeout) => DeleteLine,
                    _ => {
                        self.pending_delete = Some(this);
                        PendingDelete
                    }
                }
            }
            (Mode::Navigation, KeyCode::Char('x'), Chord::None) => DeleteUnder,
            (Mode::Navigation, KeyCode::Char('X'), Chord::None | Chord::Shift) => DeleteBefore,
            (Mode::Navigation, KeyCode::Char('u'), Chord::None) => Undo,
            (Mode::Navigation, KeyCode::Char('r'), Chord::Ctrl) => Redo,
            (Mode::Navigation, KeyCode::Char('p'), Chord::None) => Paste,
            (Mode::Navigation, KeyCode::Char('/'), Chord::None) => OpenFind,
            (Mode::Navigation, KeyCode::Char('n'), Chord::None) => FindNext,
            (Mode::Navigation, KeyCode::Char('N'), Chord::None | Chord::Shift) => FindPrev,
            (Mode::Navigation, KeyCode::Esc, Chord::None) => CollapseSelection,

            // Insert
            (Mode::Insert, KeyCode::Esc, Chord::None) => ExitInsert,
            (Mode::Insert, KeyCode::Enter, Chord::None) => Newline,
            (Mode::Insert, KeyCode::Backspace, Chord::None) => Backspace,
            (Mode::Insert, KeyCode::Delete, Chord::None) => DeleteUnder,
            (Mode::Insert, KeyCode::Tab, Chord::None) => InsertTab,
            (Mode::Insert, KeyCode::Char(_), Chord::None | Chord::Shift) => {
                key.printable().map_or(Noop, InsertChar)
            }

            // Both modes: named movement keys.
            (_, code, Chord::None) => named_motion(code).map_or(Noop, Motion),
            (_, code, Chord::Shift) => named_motion(code).map_or(Noop, ExtendSelection),
            _ => Noop,
        }
    }
}

fn named_motion(code: KeyCode) -> Option<MotionKind> {
    Some(match code {
        KeyCode::Left => MotionKind::Left,
        KeyCode::Right => MotionKind::Right,
        KeyCode::Up => MotionKind::Up,
        KeyCode::Down => MotionKind::Down,
        KeyCode::Home => MotionKind::LineStart,
        KeyCode::End => MotionKind::LineEnd,
        KeyCode::PageUp => MotionKind::PageUp,
        KeyCode::PageDown => MotionKind::PageDown,
        _ => return None,
    })
}

/// Chords that mean the same thing in every mode.
fn global_action(key: &KeyEvent) -> Option<Action> {
    use Action::*;
    let action = match (key.code, chord(key.mods)) {
        (KeyCode::Char(c), Chord::Ctrl) => match c.to_ascii_lowercase() {
            's' => Save,
            'f' => OpenFind,
            'h' => OpenReplace,
            'g' => OpenGoto,
            't' => ToggleTypewriter,
            'z' => Undo,
            'y' => Redo,
            'a' => SelectAll,
            'l' => SelectLine,
            'c' => Copy,
            'x' => Cut,
            'v' => Paste,
            'w' => WordCount,
            'q' => Quit,
            _ => return None,
        },
        (KeyCode::Home, Chord::Ctrl) => Motion(MotionKind::DocStart),
        (KeyCode::End, Chord::Ctrl) => Motion(MotionKind::DocEnd),
        (KeyCode::F(1), Chord::None) => Help,
        (KeyCode::F(9), Chord::None) => ToggleTypewriter,
        (KeyCode::F(3) | KeyCode::F(11), Chord::None) => ToggleFocus,
        _ => return None,
    };
    Some(action)
}

fn prompt_action(key: &KeyEvent) -> Action {
    match (key.code, chord(key.mods)) {
        (KeyCode::Enter, Chord::Alt) => Action::PromptReplaceOne,
        (KeyCode::Enter, _) => Action::PromptSubmit,
        (KeyCode::Esc, _) => Action::PromptCancel,
        (KeyCode::Backspace, _) => Action::PromptBackspace,
        (KeyCode::Char('r'), Chord::Alt) => Action::PromptToggleRegex,
        (KeyCode::Char('c'), Chord::Alt) => Action::PromptToggleCase,
        _ => key.printable().map_or(Action::Noop, Action::PromptChar),
    }
}
