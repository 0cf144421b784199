//! Clipboard collaborator.
//!
//! The host supplies the OS clipboard; `MemoryClipboard` is the in-process fallback and
//! the test double.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

pub trait Clipboard {
    fn read(&mut self) -> Result<String, ClipboardError>;
    fn write(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: String,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(text: impl Into<String>) -> Self {
        Self {
            contents: text.into(),
        }
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }
}

impl Clipboard for MemoryClipboard {
    fn read(&mut self) -> Result<String, ClipboardError> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = text.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_round_trips() {
        let mut cb = MemoryClipboard::new();
        assert_eq!(cb.read().unwrap(), "");
        cb.write("two\nlines").unwrap();
        assert_eq!(cb.read().unwrap(), "two\nlines");
        assert_eq!(cb.contents(), "two\nlines");
    }

    #[test]
    fn unavailable_message() {
        let e = ClipboardError::Unavailable("no display".into());
        assert_eq!(e.to_string(), "clipboard unavailable: no display");
    }
}
