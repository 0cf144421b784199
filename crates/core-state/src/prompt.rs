//! Modal prompts: single-line input dialogs and read-only info dialogs.
//!
//! While a prompt is open it owns key input; the buffer and mode are untouched.

/// What an input prompt's text is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    Find,
    /// First step of replace: the pattern.
    ReplacePattern,
    /// Second step of replace: the replacement for `pattern`.
    ReplaceWith { pattern: String },
    GotoLine,
    /// Read-only dialog; any key closes it.
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub title: String,
    input: String,
    /// Body lines of an info dialog.
    pub body: Vec<String>,
}

impl Prompt {
    pub fn input_prompt(kind: PromptKind, title: impl Into<String>, initial: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            input: initial.into(),
            body: Vec::new(),
        }
    }

    pub fn info(title: impl Into<String>, body: Vec<String>) -> Self {
        Self {
            kind: PromptKind::Info,
            title: title.into(),
            input: String::new(),
            body,
        }
    }

    pub fn is_info(&self) -> bool {
        self.kind == PromptKind::Info
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push_char(&mut self, ch: char) {
        if !self.is_info() {
            self.input.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }

    /// Single line shown by renderers: `title: input` for input prompts.
    pub fn display_line(&self) -> String {
        if self.is_info() {
            self.title.clone()
        } else {
            format!("{}: {}", self.title, self.input)
        }
    }
}
