//! Dispatcher applying `Action` to the editor model.
//!
//! Sub-modules by concern:
//! * `motion`    - cursor movement and selection extension
//! * `mode`      - Insert entry points and Esc
//! * `edit`      - text mutation (insert/delete/newline/tab)
//! * `undo`      - undo / redo
//! * `clipboard` - copy / cut / paste and selection commands
//! * `search`    - find, find next/previous, replace
//! * `prompt`    - prompt input editing, submission and info dialogs
//!
//! Every handler works on the disjoint `(EditorState, View)` borrow obtained from the
//! model. After any action the viewport policy runs once for the final cursor row.

use crate::{Action, Clipboard};
use core_model::EditorModel;
use std::time::Instant;

mod clipboard;
mod edit;
mod mode;
mod motion;
mod prompt;
mod search;
mod undo;

/// Work the owning session has to do on the dispatcher's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRequest {
    Save,
    Quit,
    ToggleFocus,
    /// Typewriter mode changed to the carried value; persist it.
    TypewriterChanged(bool),
}

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// Something visible changed and a frame should be painted.
    pub dirty: bool,
    pub request: Option<SessionRequest>,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            request: None,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            request: None,
        }
    }
    pub fn request(request: SessionRequest) -> Self {
        Self {
            dirty: true,
            request: Some(request),
        }
    }
}

/// Per-dispatch inputs that do not live in the model.
pub struct DispatchContext<'a> {
    pub now: Instant,
    pub clipboard: &'a mut dyn Clipboard,
    /// Spaces inserted by Tab.
    pub tab_width: usize,
}

/// Apply an action to the model.
pub fn dispatch(action: Action, model: &mut EditorModel, ctx: &mut DispatchContext<'_>) -> DispatchResult {
    let page_rows = model.viewport.page_rows();
    let typewriter = model.viewport.typewriter();
    let (state, view) = model.split_state_and_view();

    let result = match action {
        Action::Motion(kind) => motion::handle_motion(kind, state, view, page_rows, false),
        Action::ExtendSelection(kind) => motion::handle_motion(kind, state, view, page_rows, true),
        Action::EnterInsert(entry) => mode::handle_enter_insert(entry, state, view, ctx.now),
        Action::ExitInsert => mode::handle_exit_insert(state),
        Action::InsertChar(_)
        | Action::InsertTab
        | Action::Newline
        | Action::Backspace
        | Action::DeleteUnder
        | Action::DeleteBefore
        | Action::DeleteLine => edit::handle_edit(&action, state, view, ctx),
        Action::PendingDelete | Action::Noop => DispatchResult::clean(),
        Action::Undo => undo::handle_undo(state, view),
        Action::Redo => undo::handle_redo(state, view),
        Action::Copy => clipboard::handle_copy(state, view, ctx),
        Action::Cut => clipboard::handle_cut(state, view, ctx),
        Action::Paste => clipboard::handle_paste(state, view, ctx),
        Action::SelectAll => clipboard::handle_select_all(state, view),
        Action::SelectLine => clipboard::handle_select_line(state, view),
        Action::CollapseSelection => clipboard::handle_collapse(state, view),
        Action::OpenFind | Action::OpenReplace | Action::OpenGoto => {
            prompt::handle_open(&action, state)
        }
        Action::FindNext => search::handle_find_next(state, view, ctx.now),
        Action::FindPrev => search::handle_find_prev(state, view, ctx.now),
        Action::WordCount => prompt::handle_word_count(state),
        Action::Help => prompt::handle_help(state),
        Action::PromptChar(_)
        | Action::PromptBackspace
        | Action::PromptSubmit
        | Action::PromptReplaceOne
        | Action::PromptCancel
        | Action::PromptToggleRegex
        | Action::PromptToggleCase
        | Action::CloseInfo => prompt::handle_prompt_action(&action, state, view, ctx.now),
        Action::ToggleTypewriter => DispatchResult::request(SessionRequest::TypewriterChanged(!typewriter)),
        Action::ToggleFocus => DispatchResult::request(SessionRequest::ToggleFocus),
        Action::Save => DispatchResult::request(SessionRequest::Save),
        Action::Quit => DispatchResult::request(SessionRequest::Quit),
    };

    if let Some(SessionRequest::TypewriterChanged(on)) = result.request {
        model.set_typewriter(on);
    } else {
        model.scroll_to_cursor();
    }
    tracing::trace!(target: "actions.dispatch", ?action, dirty = result.dirty, request = ?result.request, "dispatch");
    result
}
