//! Configuration loading, validation and persistence.
//!
//! Parses `quill.toml` (or an override path supplied by the host) and exposes
//! the effective, validated `EditorConfig`. All keys live under an `[editor]`
//! table and every key is optional:
//!
//! ```toml
//! [editor]
//! typewriter_mode = true
//! typewriter_position = 0.5
//! focus_lines = 2
//! ```
//!
//! Missing or malformed files fall back to defaults. Individual out-of-range
//! values fall back to their default with a `warn!` on the `config` target, so a
//! bad value never reaches scrolling or dimming code. Unknown keys are ignored
//! to allow forward evolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "quill.toml";

/// Effective editor settings after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub typewriter_mode: bool,
    /// Fraction of the screen height where the cursor row is pinned; within `(0, 1)`.
    pub typewriter_position: f64,
    /// Distraction-free focus mode (dims lines outside the focus window).
    pub focus_mode: bool,
    /// Radius of the focus window in rows.
    pub focus_lines: usize,
    pub undo_coalesce_timeout_ms: u64,
    /// 0 disables auto-save.
    pub auto_save_interval_ms: u64,
    pub undo_capacity: usize,
    pub tab_width: usize,
    /// Window for the `dd` and quit double-taps.
    pub delete_line_timeout_ms: u64,
    /// 0 disables blinking.
    pub cursor_blink_ms: u64,
    pub show_line_numbers: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            typewriter_mode: false,
            typewriter_position: EditorConfig::DEFAULT_TYPEWRITER_POSITION,
            focus_mode: false,
            focus_lines: 1,
            undo_coalesce_timeout_ms: 1000,
            auto_save_interval_ms: 30_000,
            undo_capacity: 200,
            tab_width: 4,
            delete_line_timeout_ms: 500,
            cursor_blink_ms: 530,
            show_line_numbers: false,
        }
    }
}

impl EditorConfig {
    pub const DEFAULT_TYPEWRITER_POSITION: f64 = 0.66;
    const MAX_TAB_WIDTH: usize = 16;

    /// Run the same per-key checks as a loaded file. Hosts that build an
    /// `EditorConfig` in code go through this before the editor sees it.
    pub fn validated(&self) -> EditorConfig {
        validate(&ConfigFile::from(self).editor)
    }
}

/// Raw `[editor]` table as written by the user. Numbers are parsed signed so a
/// negative value is reported and replaced instead of failing the whole file.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct EditorSection {
    pub typewriter_mode: Option<bool>,
    pub typewriter_position: Option<f64>,
    pub focus_mode: Option<bool>,
    pub focus_lines: Option<i64>,
    pub undo_coalesce_timeout_ms: Option<i64>,
    pub auto_save_interval_ms: Option<i64>,
    pub undo_capacity: Option<i64>,
    pub tab_width: Option<i64>,
    pub delete_line_timeout_ms: Option<i64>,
    pub cursor_blink_ms: Option<i64>,
    pub show_line_numbers: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorSection,
}

impl From<&EditorConfig> for ConfigFile {
    fn from(cfg: &EditorConfig) -> Self {
        Self {
            editor: EditorSection {
                typewriter_mode: Some(cfg.typewriter_mode),
                typewriter_position: Some(cfg.typewriter_position),
                focus_mode: Some(cfg.focus_mode),
                focus_lines: Some(cfg.focus_lines as i64),
                undo_coalesce_timeout_ms: Some(cfg.undo_coalesce_timeout_ms as i64),
                auto_save_interval_ms: Some(cfg.auto_save_interval_ms as i64),
                undo_capacity: Some(cfg.undo_capacity as i64),
                tab_width: Some(cfg.tab_width as i64),
                delete_line_timeout_ms: Some(cfg.delete_line_timeout_ms as i64),
                cursor_blink_ms: Some(cfg.cursor_blink_ms as i64),
                show_line_numbers: Some(cfg.show_line_numbers),
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>,    // original file string (optional)
    pub file: ConfigFile,       // parsed (or default) data
    pub editor: EditorConfig,   // validated effective values
    pub path: Option<PathBuf>,  // where the file was read from
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("quill").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_file_absent_using_defaults");
        return Ok(Config {
            path: Some(path),
            ..Config::default()
        });
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            let editor = validate(&file.editor);
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
                editor,
                path: Some(path),
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config {
                path: Some(path),
                ..Config::default()
            })
        }
    }
}

fn non_negative(key: &'static str, value: Option<i64>, default: u64) -> u64 {
    match value {
        None => default,
        Some(v) if v >= 0 => v as u64,
        Some(v) => {
            warn!(target: "config", key, value = v, default, "config_value_rejected");
            default
        }
    }
}

fn positive(key: &'static str, value: Option<i64>, default: u64, max: u64) -> u64 {
    match value {
        None => default,
        Some(v) if v > 0 && (v as u64) <= max => v as u64,
        Some(v) => {
            warn!(target: "config", key, value = v, default, "config_value_rejected");
            default
        }
    }
}

/// Replace every out-of-range value with its default.
pub fn validate(section: &EditorSection) -> EditorConfig {
    let d = EditorConfig::default();
    let typewriter_position = match section.typewriter_position {
        None => d.typewriter_position,
        Some(p) if p > 0.0 && p < 1.0 => p,
        Some(p) => {
            warn!(
                target: "config",
                key = "typewriter_position",
                value = p,
                default = d.typewriter_position,
                "config_value_rejected"
            );
            d.typewriter_position
        }
    };
    EditorConfig {
        typewriter_mode: section.typewriter_mode.unwrap_or(d.typewriter_mode),
        typewriter_position,
        focus_mode: section.focus_mode.unwrap_or(d.focus_mode),
        focus_lines: non_negative("focus_lines", section.focus_lines, d.focus_lines as u64) as usize,
        undo_coalesce_timeout_ms: non_negative(
            "undo_coalesce_timeout_ms",
            section.undo_coalesce_timeout_ms,
            d.undo_coalesce_timeout_ms,
        ),
        auto_save_interval_ms: non_negative(
            "auto_save_interval_ms",
            section.auto_save_interval_ms,
            d.auto_save_interval_ms,
        ),
        undo_capacity: positive(
            "undo_capacity",
            section.undo_capacity,
            d.undo_capacity as u64,
            u32::MAX as u64,
        ) as usize,
        tab_width: positive(
            "tab_width",
            section.tab_width,
            d.tab_width as u64,
            EditorConfig::MAX_TAB_WIDTH as u64,
        ) as usize,
        delete_line_timeout_ms: positive(
            "delete_line_timeout_ms",
            section.delete_line_timeout_ms,
            d.delete_line_timeout_ms,
            60_000,
        ),
        cursor_blink_ms: non_negative("cursor_blink_ms", section.cursor_blink_ms, d.cursor_blink_ms),
        show_line_numbers: section.show_line_numbers.unwrap_or(d.show_line_numbers),
    }
}

impl Config {
    /// Effective validated settings.
    pub fn validated(&self) -> EditorConfig {
        validate(&self.file.editor)
    }

    /// Write `editor` as a complete `[editor]` table to `path`, creating parent directories.
    pub fn save_to(path: &Path, editor: &EditorConfig) -> Result<()> {
        let text = toml::to_string_pretty(&ConfigFile::from(editor))
            .context("serialize editor config")?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config dir {}", parent.display()))?;
        }
        fs::write(path, text).with_context(|| format!("write config {}", path.display()))?;
        info!(target: "config", path = %path.display(), "config_saved");
        Ok(())
    }
}

/// Collaborator that persists settings toggled at runtime (typewriter, focus mode).
pub trait ConfigStore {
    fn persist(&mut self, editor: &EditorConfig) -> Result<()>;
}

/// `ConfigStore` writing to a TOML file.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for FileConfigStore {
    fn persist(&mut self, editor: &EditorConfig) -> Result<()> {
        Config::save_to(&self.path, editor)
    }
}

/// In-memory `ConfigStore` that records every persisted snapshot.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    pub saved: Vec<EditorConfig>,
}

impl ConfigStore for MemoryConfigStore {
    fn persist(&mut self, editor: &EditorConfig) -> Result<()> {
        self.saved.push(editor.clone());
        Ok(())
    }
}
