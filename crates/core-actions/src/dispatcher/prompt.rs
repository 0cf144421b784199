//! Prompt handling: opening dialogs, editing their input, and acting on submission.
//!
//! Prompts never change the mode. Find and replace prompts show the active search
//! options in their title; Alt+R and Alt+C flip them while the prompt is open.

use super::DispatchResult;
use super::search::{self, Direction};
use crate::{Action, STATUS_TTL};
use core_model::View;
use core_state::{EditorState, Prompt, PromptKind};
use core_text::{FindOptions, Position};
use std::time::Instant;

const HELP_LINES: &[&str] = &[
    "Navigation: h j k l / arrows move, w b words, 0 $ line, g G document",
    "i I a A o O enter Insert, Esc returns to Navigation",
    "x X delete char, dd delete line, u undo, Ctrl+R redo, p paste",
    "/ find, n next, N previous; Ctrl+F find, Ctrl+H replace, Ctrl+G go to line",
    "Ctrl+S save, Ctrl+Q quit, Ctrl+Z/Ctrl+Y undo/redo",
    "Ctrl+A select all, Ctrl+L select line, Ctrl+C/X/V copy/cut/paste",
    "Ctrl+T or F9 typewriter mode, F3 or F11 focus mode, Ctrl+W word count",
    "In find/replace prompts: Alt+R regex, Alt+C case sensitivity, Alt+Enter replace one",
];

fn title(base: &str, opts: FindOptions) -> String {
    let mut flags = Vec::new();
    if opts.regex {
        flags.push("regex");
    }
    if opts.case_sensitive {
        flags.push("case");
    }
    if flags.is_empty() {
        base.to_string()
    } else {
        format!("{base} [{}]", flags.join(", "))
    }
}

fn base_title(kind: &PromptKind) -> Option<&'static str> {
    match kind {
        PromptKind::Find => Some("Find"),
        PromptKind::ReplacePattern => Some("Replace"),
        PromptKind::ReplaceWith { .. } => Some("Replace with"),
        PromptKind::GotoLine | PromptKind::Info => None,
    }
}

fn search_prompt(kind: PromptKind, initial: &str, opts: FindOptions) -> Prompt {
    let t = base_title(&kind).map_or_else(String::new, |b| title(b, opts));
    Prompt::input_prompt(kind, t, initial)
}

pub(crate) fn handle_open(action: &Action, state: &mut EditorState) -> DispatchResult {
    state.close_undo_record();
    let last = state.search.query.clone().unwrap_or_default();
    let opts = state.search.options;
    let prompt = match action {
        Action::OpenFind => search_prompt(PromptKind::Find, &last, opts),
        Action::OpenReplace => search_prompt(PromptKind::ReplacePattern, &last, opts),
        _ => Prompt::input_prompt(PromptKind::GotoLine, "Go to line", ""),
    };
    tracing::debug!(target: "actions.dispatch", kind = ?prompt.kind, "prompt_open");
    state.prompt = Some(prompt);
    DispatchResult::dirty()
}

pub(crate) fn handle_word_count(state: &mut EditorState) -> DispatchResult {
    let s = state.buffer.stats();
    let body = vec![
        format!("Words: {}", s.words),
        format!("Characters: {}", s.chars),
        format!("Characters (no spaces): {}", s.chars_no_whitespace),
        format!("Lines: {}", s.lines),
        format!("Paragraphs: {}", s.paragraphs),
        format!("Reading time: ~{} min", s.reading_time().as_secs() / 60),
    ];
    state.prompt = Some(Prompt::info("Word Count", body));
    DispatchResult::dirty()
}

pub(crate) fn handle_help(state: &mut EditorState) -> DispatchResult {
    let body = HELP_LINES.iter().map(|l| l.to_string()).collect();
    state.prompt = Some(Prompt::info("Help", body));
    DispatchResult::dirty()
}

pub(crate) fn handle_prompt_action(
    action: &Action,
    state: &mut EditorState,
    view: &mut View,
    now: Instant,
) -> DispatchResult {
    let Some(prompt) = state.prompt.as_mut() else {
        return DispatchResult::clean();
    };
    match action {
        Action::PromptChar(c) => prompt.push_char(*c),
        Action::PromptBackspace => prompt.backspace(),
        Action::PromptToggleRegex | Action::PromptToggleCase => {
            let Some(base) = base_title(&prompt.kind) else {
                return DispatchResult::clean();
            };
            let opts = &mut state.search.options;
            if matches!(action, Action::PromptToggleRegex) {
                opts.regex = !opts.regex;
            } else {
                opts.case_sensitive = !opts.case_sensitive;
            }
            prompt.title = title(base, *opts);
        }
        Action::PromptCancel | Action::CloseInfo => {
            state.prompt = None;
        }
        Action::PromptReplaceOne => {
            if let PromptKind::ReplaceWith { pattern } = &prompt.kind {
                let pattern = pattern.clone();
                let replacement = prompt.input().to_string();
                state.search.replacement = Some(replacement.clone());
                return search::replace_one(state, view, &pattern, &replacement, now);
            }
            return submit(state, view, now);
        }
        Action::PromptSubmit => return submit(state, view, now),
        _ => return DispatchResult::clean(),
    }
    DispatchResult::dirty()
}

fn submit(state: &mut EditorState, view: &mut View, now: Instant) -> DispatchResult {
    let Some(prompt) = state.prompt.take() else {
        return DispatchResult::clean();
    };
    let input = prompt.input().to_string();
    tracing::debug!(target: "actions.dispatch", kind = ?prompt.kind, input = %input, "prompt_submit");
    match prompt.kind {
        PromptKind::Find => {
            state.search.query = Some(input);
            let from = view.cursor;
            search::find_from(state, view, from, Direction::Forward, now)
        }
        PromptKind::ReplacePattern => {
            if input.is_empty() {
                state.set_status(core_text::SearchError::EmptyQuery.to_string(), now, Some(STATUS_TTL));
                return DispatchResult::dirty();
            }
            state.search.query = Some(input.clone());
            let last = state.search.replacement.clone().unwrap_or_default();
            state.prompt = Some(search_prompt(
                PromptKind::ReplaceWith { pattern: input },
                &last,
                state.search.options,
            ));
            DispatchResult::dirty()
        }
        PromptKind::ReplaceWith { pattern } => {
            state.search.replacement = Some(input.clone());
            search::replace_all(state, view, &pattern, &input, now)
        }
        PromptKind::GotoLine => {
            match input.trim().parse::<usize>() {
                Ok(n) if n >= 1 => {
                    state.close_undo_record();
                    view.cursor = state.buffer.clamp(Position::new(n - 1, 0));
                    view.preferred_col = None;
                    state.selection.collapse(view.cursor);
                }
                _ => state.set_status(format!("Invalid line number: {input}"), now, Some(STATUS_TTL)),
            }
            DispatchResult::dirty()
        }
        PromptKind::Info => DispatchResult::dirty(),
    }
}
