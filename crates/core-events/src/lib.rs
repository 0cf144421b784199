//! Core event types for Quill.
//!
//! The editing engine is driven synchronously by a surrounding shell which
//! converts platform input (terminal, GUI toolkit) into the logical key
//! representation defined here. Timestamps are supplied by the caller at the
//! dispatch boundary so double-tap and idle-timeout rules can be tested
//! without wall-clock waiting.

use std::fmt;
use std::time::Instant;

/// Top-level event enum consumed by the editor session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    /// Screen resized to (columns, rows) of text area.
    Resize(u16, u16),
    /// Periodic tick used to drive auto-save, cursor blink and undo idle timeout.
    Tick,
    Shutdown,
}

/// A logical key press: key code plus modifier set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    /// Unmodified key.
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            mods: KeyModifiers::empty(),
        }
    }

    /// Unmodified printable character.
    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    /// Control chord on a printable character (`Ctrl+s`).
    pub const fn ctrl(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            mods: KeyModifiers::CTRL,
        }
    }

    /// Shift-modified named key (`Shift+Left`).
    pub const fn shift(code: KeyCode) -> Self {
        Self {
            code,
            mods: KeyModifiers::SHIFT,
        }
    }

    pub fn is_ctrl(&self) -> bool {
        self.mods.contains(KeyModifiers::CTRL)
    }

    pub fn is_shift(&self) -> bool {
        self.mods.contains(KeyModifiers::SHIFT)
    }

    /// Printable character carried by this key, ignoring Shift (upper case letters already
    /// arrive as their upper case `char`). Ctrl/Alt chords are never printable.
    pub fn printable(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c)
                if !self.mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT)
                    && !c.is_control() =>
            {
                Some(c)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Normalized logical key representations consumed by higher layers.
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.code, self.mods)
    }
}

/// A key press paired with the instant it was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedKey {
    pub key: KeyEvent,
    pub at: Instant,
}

impl TimedKey {
    pub fn new(key: KeyEvent, at: Instant) -> Self {
        Self { key, at }
    }

    /// True when `self` repeats `prev` (same code and modifiers) within `window`.
    pub fn repeats(&self, prev: &TimedKey, window: std::time::Duration) -> bool {
        self.key == prev.key && self.at.saturating_duration_since(prev.at) < window
    }
}
