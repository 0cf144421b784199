#![allow(dead_code)]

use anyhow::{Result, bail};
use quill::{
    Clipboard, ClipboardError, ConfigStore, Editor, EditorConfig, FileFormat, KeyCode, KeyEvent,
    LoadedFile, PersistError, Persistence,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing_subscriber::fmt::MakeWriter;

/// In-memory file system shared between the test and the editor.
#[derive(Clone, Default)]
pub struct MemoryFiles {
    pub files: Rc<RefCell<HashMap<PathBuf, Vec<String>>>>,
    pub formats: Rc<RefCell<HashMap<PathBuf, FileFormat>>>,
    pub fail_writes: Rc<RefCell<bool>>,
    pub writes: Rc<RefCell<usize>>,
}

impl MemoryFiles {
    pub fn with_file(path: &str, lines: &[&str]) -> Self {
        let files = Self::default();
        files
            .files
            .borrow_mut()
            .insert(PathBuf::from(path), lines.iter().map(|s| s.to_string()).collect());
        files
    }

    /// Store a file together with the on-disk format it should load with.
    pub fn with_formatted_file(path: &str, lines: &[&str], format: FileFormat) -> Self {
        let files = Self::with_file(path, lines);
        files.formats.borrow_mut().insert(PathBuf::from(path), format);
        files
    }

    pub fn get(&self, path: &str) -> Option<Vec<String>> {
        self.files.borrow().get(Path::new(path)).cloned()
    }

    pub fn format_of(&self, path: &str) -> Option<FileFormat> {
        self.formats.borrow().get(Path::new(path)).copied()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.borrow_mut() = fail;
    }

    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }
}

impl Persistence for MemoryFiles {
    fn load(&self, path: &Path) -> Result<LoadedFile, PersistError> {
        let lines = self
            .files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| PersistError::NotFound(path.to_path_buf()))?;
        let format = self.formats.borrow().get(path).copied().unwrap_or_default();
        Ok(LoadedFile { lines, format })
    }

    fn save(&self, path: &Path, lines: &[String], format: FileFormat) -> Result<(), PersistError> {
        if *self.fail_writes.borrow() {
            return Err(PersistError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        *self.writes.borrow_mut() += 1;
        self.files.borrow_mut().insert(path.to_path_buf(), lines.to_vec());
        self.formats.borrow_mut().insert(path.to_path_buf(), format);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct SharedClipboard {
    pub text: Rc<RefCell<String>>,
}

impl Clipboard for SharedClipboard {
    fn read(&mut self) -> Result<String, ClipboardError> {
        Ok(self.text.borrow().clone())
    }

    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        *self.text.borrow_mut() = text.to_string();
        Ok(())
    }
}

/// Records persisted configs; optionally refuses them.
#[derive(Clone, Default)]
pub struct SharedConfigStore {
    pub saved: Rc<RefCell<Vec<EditorConfig>>>,
    pub fail: bool,
}

impl ConfigStore for SharedConfigStore {
    fn persist(&mut self, editor: &EditorConfig) -> Result<()> {
        if self.fail {
            bail!("config directory is read-only");
        }
        self.saved.borrow_mut().push(editor.clone());
        Ok(())
    }
}

pub struct Harness {
    pub editor: Editor,
    pub files: MemoryFiles,
    pub clipboard: SharedClipboard,
    pub store: SharedConfigStore,
    pub now: Instant,
}

impl Harness {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_parts(config, MemoryFiles::default(), SharedConfigStore::default())
    }

    pub fn with_parts(config: EditorConfig, files: MemoryFiles, store: SharedConfigStore) -> Self {
        let clipboard = SharedClipboard::default();
        let mut editor = Editor::new(
            config,
            Box::new(files.clone()),
            Box::new(clipboard.clone()),
            Box::new(store.clone()),
        );
        editor.resize(80, 20);
        Self {
            editor,
            files,
            clipboard,
            store,
            now: Instant::now(),
        }
    }

    pub fn with_text(text: &str) -> Self {
        let mut h = Self::new(EditorConfig::default());
        h.editor.load_text(text);
        h
    }

    /// Advance the fake clock.
    pub fn advance(&mut self, ms: u64) {
        self.now += Duration::from_millis(ms);
    }

    pub fn key(&mut self, key: KeyEvent) -> quill::Control {
        self.advance(10);
        self.editor.handle_key(key, self.now)
    }

    pub fn keys(&mut self, keys: &[KeyEvent]) {
        for k in keys {
            self.key(*k);
        }
    }

    /// Press each character as an unmodified key.
    pub fn type_str(&mut self, s: &str) {
        for c in s.chars() {
            self.key(KeyEvent::char(c));
        }
    }

    pub fn esc(&mut self) {
        self.key(KeyEvent::plain(KeyCode::Esc));
    }

    pub fn enter(&mut self) {
        self.key(KeyEvent::plain(KeyCode::Enter));
    }

    pub fn lines(&self) -> Vec<String> {
        self.editor.state().buffer.lines().to_vec()
    }

    pub fn status(&self) -> Option<String> {
        self.editor.state().status_text().map(str::to_string)
    }
}

#[derive(Clone)]
pub struct BufferWriter {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl BufferWriter {
    pub fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
        let buf = Arc::new(Mutex::new(Vec::new()));
        (Self { inner: buf.clone() }, buf)
    }
}

pub struct LockedWriter<'a> {
    guard: MutexGuard<'a, Vec<u8>>,
}

impl Write for LockedWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for BufferWriter {
    type Writer = LockedWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LockedWriter {
            guard: self.inner.lock().expect("log buffer poisoned"),
        }
    }
}

/// Run `f` under a debug-level fmt subscriber and return what it logged.
pub fn capture_logs(f: impl FnOnce()) -> String {
    let (writer, buf) = BufferWriter::new();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(writer)
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = buf.lock().expect("log buffer poisoned").clone();
    String::from_utf8_lossy(&bytes).into_owned()
}
