//! Quill: a modal writing engine.
//!
//! This crate ties the core crates into one session object, [`Editor`], which a host
//! (terminal shell, GUI, test harness) drives with key events, resizes and periodic ticks.
//! The host also supplies the outside world through three traits:
//! - [`Persistence`] for reading and writing documents,
//! - [`Clipboard`] for copy and paste,
//! - [`ConfigStore`] for persisting toggled settings.
//!
//! Frames leave the engine as a [`RenderSnapshot`] handed to a host [`Renderer`].

pub mod editor;
pub mod io;
pub mod timers;

pub use core_actions::{Clipboard, ClipboardError, MemoryClipboard};
pub use core_config::{ConfigStore, EditorConfig, FileConfigStore, MemoryConfigStore};
pub use core_events::{Event, KeyCode, KeyEvent, KeyModifiers};
pub use core_render::{FrameRenderer, RenderSnapshot, Renderer};
pub use editor::{Control, Editor};
pub use io::{FileFormat, FsPersistence, LineEnding, LoadedFile, PersistError, Persistence};
pub use timers::{IntervalTimer, TickAction};
