//! Document persistence collaborator.
//!
//! Files are read as UTF-8 and split into lines with every line ending normalized away.
//! The dominant ending style and whether the file ended with a newline are kept in a
//! [`FileFormat`] so an unedited document saves back byte for byte.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Line ending style detected in a loaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    Cr,
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Cr => "\r",
            LineEnding::Crlf => "\r\n",
        }
    }
}

/// On-disk layout of a document. New documents use LF with a trailing newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFormat {
    pub line_ending: LineEnding,
    pub trailing_newline: bool,
}

impl Default for FileFormat {
    fn default() -> Self {
        Self {
            line_ending: LineEnding::Lf,
            trailing_newline: true,
        }
    }
}

/// Lines read from a file plus the format they were stored in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub lines: Vec<String>,
    pub format: FileFormat,
}

pub trait Persistence {
    fn load(&self, path: &Path) -> Result<LoadedFile, PersistError>;
    fn save(&self, path: &Path, lines: &[String], format: FileFormat) -> Result<(), PersistError>;
}

/// Majority line ending in `content`; ties go CRLF, then LF, then CR. No endings means LF.
fn detect_line_ending(content: &str) -> LineEnding {
    let (mut crlf, mut lf, mut cr) = (0usize, 0usize, 0usize);
    let mut bytes = content.bytes().peekable();
    while let Some(b) = bytes.next() {
        match b {
            b'\r' if bytes.peek() == Some(&b'\n') => {
                bytes.next();
                crlf += 1;
            }
            b'\r' => cr += 1,
            b'\n' => lf += 1,
            _ => {}
        }
    }
    if crlf > 0 && crlf >= lf && crlf >= cr {
        LineEnding::Crlf
    } else if cr > lf {
        LineEnding::Cr
    } else {
        LineEnding::Lf
    }
}

/// Split file content into buffer lines and record its format.
pub fn parse_content(content: &str) -> LoadedFile {
    let line_ending = detect_line_ending(content);
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    let trailing_newline = normalized.ends_with('\n');
    let body = normalized.strip_suffix('\n').unwrap_or(&normalized);
    LoadedFile {
        lines: body.split('\n').map(str::to_string).collect(),
        format: FileFormat {
            line_ending,
            trailing_newline,
        },
    }
}

/// Join buffer lines into file content using `format`.
pub fn lines_to_content(lines: &[String], format: FileFormat) -> String {
    let mut out = lines.join(format.line_ending.as_str());
    if format.trailing_newline {
        out.push_str(format.line_ending.as_str());
    }
    out
}

/// `Persistence` over `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsPersistence;

impl Persistence for FsPersistence {
    fn load(&self, path: &Path) -> Result<LoadedFile, PersistError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PersistError::NotFound(path.to_path_buf())
            } else {
                PersistError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        let loaded = parse_content(&content);
        tracing::debug!(target: "io", file=%path.display(), size_bytes = content.len(), line_count = loaded.lines.len(), line_ending = ?loaded.format.line_ending, "file_read_ok");
        Ok(loaded)
    }

    fn save(&self, path: &Path, lines: &[String], format: FileFormat) -> Result<(), PersistError> {
        let content = lines_to_content(lines, format);
        std::fs::write(path, content.as_bytes()).map_err(|e| {
            tracing::error!(target: "io", file=%path.display(), ?e, "file_write_error");
            PersistError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        })?;
        tracing::debug!(target: "io", file=%path.display(), size_bytes = content.len(), "file_write_ok");
        Ok(())
    }
}
