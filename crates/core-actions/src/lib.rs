//! Action vocabulary, key translation and dispatch.
//!
//! Pipeline: `KeyEvent` -> `KeyTranslator::translate` -> `Transition { action, next_mode }`
//! -> `dispatch(action, model, ctx)`. The translator is the single place that knows which
//! key does what in which mode; the dispatcher is the single place that mutates the model.
//!
//! Effects that reach outside the model (saving, quitting, focus mode) are not performed
//! here. The dispatcher reports them as a `SessionRequest` and the owning session acts.

use std::time::Duration;

pub mod clipboard;
pub mod dispatcher;
pub mod key_translator;

pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard};
pub use dispatcher::{DispatchContext, DispatchResult, SessionRequest, dispatch};
pub use key_translator::{KeyFocus, KeyTranslator, Transition};

/// How long transient status messages stay on screen.
pub const STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    WordForward,
    WordBackward,
    LineStart,
    LineEnd,
    DocStart,
    DocEnd,
    PageUp,
    PageDown,
}

/// Where the cursor goes when Insert mode is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertEntry {
    /// `i`
    AtCursor,
    /// `I`
    LineStart,
    /// `a`: one column right, clamped at line end.
    After,
    /// `A`
    LineEnd,
    /// `o`
    OpenBelow,
    /// `O`
    OpenAbove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Motion(MotionKind),
    /// Motion that keeps the selection anchor (Shift+arrows).
    ExtendSelection(MotionKind),
    EnterInsert(InsertEntry),
    ExitInsert,
    InsertChar(char),
    InsertTab,
    Newline,
    Backspace,
    /// Delete the character under the cursor (`x`, Delete).
    DeleteUnder,
    /// Delete the character before the cursor (`X`).
    DeleteBefore,
    DeleteLine,
    /// First `d` of a `dd` pair.
    PendingDelete,
    Undo,
    Redo,
    Copy,
    Cut,
    Paste,
    SelectAll,
    SelectLine,
    CollapseSelection,
    OpenFind,
    OpenReplace,
    OpenGoto,
    FindNext,
    FindPrev,
    ToggleTypewriter,
    ToggleFocus,
    WordCount,
    Help,
    Save,
    Quit,
    PromptChar(char),
    PromptBackspace,
    PromptSubmit,
    /// Replace only the match at the cursor and advance (replace prompt, Alt+Enter).
    PromptReplaceOne,
    PromptCancel,
    PromptToggleRegex,
    PromptToggleCase,
    CloseInfo,
    Noop,
}
