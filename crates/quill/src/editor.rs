//! `Editor`: one open document plus everything needed to drive it.
//!
//! The editor owns the model, the key translator, the timers and the three outside
//! collaborators (persistence, clipboard, config store). It is single-threaded and
//! clock-free: every entry point that depends on time takes `now` from the host.

use crate::io::{FileFormat, PersistError, Persistence};
use crate::timers::{IntervalTimer, TickAction, auto_save_due};
use core_actions::{
    Clipboard, DispatchContext, KeyFocus, KeyTranslator, STATUS_TTL, SessionRequest, dispatch,
};
use core_config::{ConfigStore, EditorConfig};
use core_events::{Event, KeyEvent};
use core_model::{EditorModel, ViewportManager};
use core_render::{FocusWindow, RenderSnapshot, Renderer, SnapshotOptions, build_snapshot};
use core_state::{EditorState, UndoEngine};
use core_text::TextBuffer;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Whether the host loop should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct Editor {
    model: EditorModel,
    translator: KeyTranslator,
    config: EditorConfig,
    focus: FocusWindow,
    persistence: Box<dyn Persistence>,
    clipboard: Box<dyn Clipboard>,
    config_store: Box<dyn ConfigStore>,
    auto_save: IntervalTimer,
    blink: IntervalTimer,
    cursor_visible: bool,
    /// Time of a refused Ctrl+Q on a dirty buffer; a second one inside the window quits.
    quit_armed: Option<Instant>,
    shut_down: bool,
    /// Line endings and trailing newline of the open document, reused on save.
    format: FileFormat,
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn new_state(config: &EditorConfig, buffer: TextBuffer) -> EditorState {
    let undo = UndoEngine::new(config.undo_capacity, ms(config.undo_coalesce_timeout_ms));
    EditorState::with_undo(buffer, undo)
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("file")
        .to_string()
}

impl Editor {
    pub fn new(
        config: EditorConfig,
        persistence: Box<dyn Persistence>,
        clipboard: Box<dyn Clipboard>,
        config_store: Box<dyn ConfigStore>,
    ) -> Self {
        let config = config.validated();
        let viewport = ViewportManager::new(config.typewriter_mode, config.typewriter_position);
        let model = EditorModel::new(new_state(&config, TextBuffer::new()), viewport);
        Self {
            model,
            translator: KeyTranslator::new(ms(config.delete_line_timeout_ms)),
            focus: FocusWindow::new(config.focus_mode, config.focus_lines),
            auto_save: IntervalTimer::new(ms(config.auto_save_interval_ms)),
            blink: IntervalTimer::new(ms(config.cursor_blink_ms)),
            config,
            persistence,
            clipboard,
            config_store,
            cursor_visible: true,
            quit_armed: None,
            shut_down: false,
            format: FileFormat::default(),
        }
    }

    pub fn model(&self) -> &EditorModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut EditorModel {
        &mut self.model
    }

    pub fn state(&self) -> &EditorState {
        self.model.state()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn focus(&self) -> FocusWindow {
        self.focus
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn file_format(&self) -> FileFormat {
        self.format
    }

    /// Replace the document with `text` (unsaved, no path). History starts empty.
    pub fn load_text(&mut self, text: &str) {
        self.replace_document(TextBuffer::from_text(text), None, FileFormat::default());
    }

    /// Open `path`. A missing file starts an empty document bound to that path.
    pub fn open(&mut self, path: impl Into<PathBuf>, now: Instant) -> Result<(), PersistError> {
        let path = path.into();
        match self.persistence.load(&path) {
            Ok(loaded) => {
                info!(target: "session", file = %path.display(), lines = loaded.lines.len(), "open");
                self.replace_document(TextBuffer::from_lines(loaded.lines), Some(path), loaded.format);
                Ok(())
            }
            Err(PersistError::NotFound(_)) => {
                info!(target: "session", file = %path.display(), "open_new_file");
                let label = file_label(&path);
                self.replace_document(TextBuffer::new(), Some(path), FileFormat::default());
                self.set_status(format!("New file: {label}"), now);
                Ok(())
            }
            Err(e) => {
                warn!(target: "session", file = %path.display(), error = %e, "open_failed");
                self.set_status(format!("Open failed: {e}"), now);
                Err(e)
            }
        }
    }

    fn replace_document(&mut self, buffer: TextBuffer, path: Option<PathBuf>, format: FileFormat) {
        let mut state = new_state(&self.config, buffer);
        state.file_path = path;
        let (width, height) = (self.model.viewport.width, self.model.viewport.height);
        let mut viewport =
            ViewportManager::new(self.model.viewport.typewriter(), self.config.typewriter_position);
        viewport.resize(width, height);
        self.model = EditorModel::new(state, viewport);
        self.translator.reset();
        self.quit_armed = None;
        self.format = format;
    }

    fn set_status(&mut self, msg: impl Into<String>, now: Instant) {
        self.model.state_mut().set_status(msg, now, Some(STATUS_TTL));
    }

    /// Text area size in cells. Re-runs the scroll policy for the new height.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.model.viewport.resize(width as usize, height as usize);
        self.model.scroll_to_cursor();
        debug!(target: "session", width, height, "resize");
    }

    pub fn handle_event(&mut self, event: Event, now: Instant) -> Control {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Resize(w, h) => {
                self.resize(w, h);
                Control::Continue
            }
            Event::Tick => {
                self.tick(now);
                Control::Continue
            }
            Event::Shutdown => {
                self.shutdown();
                Control::Quit
            }
        }
    }

    fn key_focus(&self) -> KeyFocus {
        match &self.model.state().prompt {
            None => KeyFocus::Buffer,
            Some(p) if p.is_info() => KeyFocus::InfoDialog,
            Some(_) => KeyFocus::PromptInput,
        }
    }

    /// Translate and dispatch one key press.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Control {
        if self.shut_down {
            return Control::Quit;
        }
        let mode = self.model.state().mode;
        let focus = self.key_focus();
        let transition = self.translator.translate(mode, focus, &key, now);
        let mut ctx = DispatchContext {
            now,
            clipboard: self.clipboard.as_mut(),
            tab_width: self.config.tab_width,
        };
        let result = dispatch(transition.action.clone(), &mut self.model, &mut ctx);
        self.model.state_mut().set_mode(transition.next_mode);
        self.cursor_visible = true;
        self.blink.start(now);

        if !matches!(result.request, Some(SessionRequest::Quit)) {
            self.quit_armed = None;
        }
        match result.request {
            None => Control::Continue,
            Some(SessionRequest::Save) => {
                // The failure is already on the status line.
                if let Err(e) = self.save(now) {
                    debug!(target: "session", error = %e, "save_request_failed");
                }
                Control::Continue
            }
            Some(SessionRequest::Quit) => self.request_quit(now),
            Some(SessionRequest::ToggleFocus) => {
                self.focus.enabled = !self.focus.enabled;
                self.config.focus_mode = self.focus.enabled;
                let label = if self.focus.enabled { "on" } else { "off" };
                self.set_status(format!("Focus mode {label}"), now);
                self.persist_config(now);
                Control::Continue
            }
            Some(SessionRequest::TypewriterChanged(on)) => {
                self.config.typewriter_mode = on;
                let label = if on { "on" } else { "off" };
                self.set_status(format!("Typewriter mode {label}"), now);
                self.persist_config(now);
                Control::Continue
            }
        }
    }

    fn persist_config(&mut self, now: Instant) {
        if let Err(e) = self.config_store.persist(&self.config) {
            warn!(target: "config", error = %e, "config_persist_failed");
            self.set_status(format!("Could not save settings: {e}"), now);
        }
    }

    fn request_quit(&mut self, now: Instant) -> Control {
        let window = ms(self.config.delete_line_timeout_ms);
        let confirmed = self
            .quit_armed
            .is_some_and(|at| now.saturating_duration_since(at) < window);
        if self.model.state().buffer.is_dirty() && !confirmed {
            info!(target: "session", "quit_refused_dirty");
            self.quit_armed = Some(now);
            self.set_status("Unsaved changes. Press Ctrl+Q again to quit.", now);
            return Control::Continue;
        }
        self.shutdown();
        Control::Quit
    }

    /// Save to the document's path. `Ok(false)` when the document has no path yet.
    ///
    /// Failures keep the buffer, its dirty flag and the undo history intact.
    pub fn save(&mut self, now: Instant) -> Result<bool, PersistError> {
        let Some(path) = self.model.state().file_path.clone() else {
            self.set_status("No file name; nothing saved", now);
            return Ok(false);
        };
        match self.persistence.save(&path, self.model.state().buffer.lines(), self.format) {
            Ok(()) => {
                self.model.state_mut().mark_saved();
                info!(target: "session", file = %path.display(), "save_ok");
                self.set_status(format!("Saved {}", file_label(&path)), now);
                Ok(true)
            }
            Err(e) => {
                warn!(target: "session", file = %path.display(), error = %e, "save_failed");
                self.set_status(format!("Save failed: {e}"), now);
                Err(e)
            }
        }
    }

    /// Advance timers and expiries to `now`. Returns what happened.
    pub fn tick(&mut self, now: Instant) -> Vec<TickAction> {
        let mut actions = Vec::new();
        if self.shut_down {
            return actions;
        }
        if self.model.state_mut().expire_undo(now) {
            actions.push(TickAction::UndoRecordClosed);
        }
        if self.model.state_mut().tick_status(now) {
            actions.push(TickAction::StatusCleared);
        }
        if self.blink.poll(now) {
            self.cursor_visible = !self.cursor_visible;
            actions.push(TickAction::CursorBlink {
                visible: self.cursor_visible,
            });
        }
        let dirty = self.model.state().buffer.is_dirty();
        let has_path = self.model.state().file_path.is_some();
        if auto_save_due(&mut self.auto_save, now, dirty, has_path) {
            let ok = self.save(now).is_ok();
            debug!(target: "session", ok, "auto_save");
            actions.push(TickAction::AutoSave { ok });
        }
        actions
    }

    /// Cancel both timers. Further ticks do nothing and keys report `Quit`.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.auto_save.cancel();
        self.blink.cancel();
        self.shut_down = true;
        info!(target: "session", dirty = self.model.state().buffer.is_dirty(), "shutdown");
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let opts = SnapshotOptions {
            focus: self.focus,
            show_line_numbers: self.config.show_line_numbers,
            cursor_visible: self.cursor_visible,
        };
        build_snapshot(&self.model, &opts)
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.paint(&self.snapshot());
    }
}
