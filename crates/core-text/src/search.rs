//! Plain and regular-expression search over a `TextBuffer`.
//!
//! Every query is compiled to a `regex::Regex`; plain queries are escaped first so
//! both kinds share one matching path. Matches are confined to a single line and
//! reported in character columns. Empty matches (e.g. `a*` against `bbb`) are
//! skipped.

use regex::{Captures, Regex, RegexBuilder};
use thiserror::Error;

use crate::{Position, TextBuffer, byte_index, char_col};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("empty search query")]
    EmptyQuery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindOptions {
    /// Interpret the query as a regular expression.
    pub regex: bool,
    pub case_sensitive: bool,
    /// Continue from the other end of the document when the scan runs out.
    pub wrap: bool,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            regex: false,
            case_sensitive: false,
            wrap: true,
        }
    }
}

/// A match on `row` covering character columns `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Match {
    pub row: usize,
    pub start: usize,
    pub end: usize,
}

impl Match {
    pub fn start_pos(&self) -> Position {
        Position::new(self.row, self.start)
    }
    pub fn end_pos(&self) -> Position {
        Position::new(self.row, self.end)
    }
}

/// A compiled query.
#[derive(Debug, Clone)]
pub struct Query {
    re: Regex,
    regex: bool,
}

impl Query {
    pub fn new(pattern: &str, opts: FindOptions) -> Result<Self, SearchError> {
        if pattern.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        let source = if opts.regex {
            pattern.to_string()
        } else {
            regex::escape(pattern)
        };
        let re = RegexBuilder::new(&source)
            .case_insensitive(!opts.case_sensitive)
            .build()
            .map_err(|e| SearchError::InvalidPattern(e.to_string()))?;
        Ok(Self {
            re,
            regex: opts.regex,
        })
    }

    /// Non-overlapping non-empty matches on one line, in order (replace-all semantics).
    fn line_matches(&self, row: usize, line: &str) -> Vec<Match> {
        self.re
            .find_iter(line)
            .filter(|m| !m.is_empty())
            .map(|m| Match {
                row,
                start: char_col(line, m.start()),
                end: char_col(line, m.end()),
            })
            .collect()
    }

    fn to_match(row: usize, line: &str, m: regex::Match<'_>) -> Match {
        Match {
            row,
            start: char_col(line, m.start()),
            end: char_col(line, m.end()),
        }
    }

    /// First non-empty match on `line` starting in character columns `[lo, hi)`.
    ///
    /// Uses `find_at` so a match that begins inside an earlier one is still found.
    fn first_in(&self, row: usize, line: &str, lo: usize, hi: usize) -> Option<Match> {
        let mut at = byte_index(line, lo);
        while at <= line.len() {
            let m = self.re.find_at(line, at)?;
            if !m.is_empty() {
                let hit = Self::to_match(row, line, m);
                return (hit.start < hi).then_some(hit);
            }
            // Empty match: retry one character further on.
            at = match line[m.start()..].chars().next() {
                Some(ch) => m.start() + ch.len_utf8(),
                None => return None,
            };
        }
        None
    }

    /// Last non-empty match on `line` starting in character columns `[lo, hi)`.
    fn last_in(&self, row: usize, line: &str, lo: usize, hi: usize) -> Option<Match> {
        let hi = hi.min(line.chars().count());
        (lo..hi).rev().find_map(|col| {
            let at = byte_index(line, col);
            self.re
                .find_at(line, at)
                .filter(|m| m.start() == at && !m.is_empty())
                .map(|m| Self::to_match(row, line, m))
        })
    }

    /// First match starting at or after `from`; with `wrap`, continues from the document
    /// start up to `from` (exclusive).
    pub fn find(&self, buf: &TextBuffer, from: Position, wrap: bool) -> Option<Match> {
        let from = buf.clamp(from);
        let lines = buf.lines();
        let forward = (from.row..lines.len()).find_map(|row| {
            let lo = if row == from.row { from.col } else { 0 };
            self.first_in(row, &lines[row], lo, usize::MAX)
        });
        if forward.is_some() || !wrap {
            return forward;
        }
        (0..=from.row).find_map(|row| {
            let hi = if row == from.row { from.col } else { usize::MAX };
            self.first_in(row, &lines[row], 0, hi)
        })
    }

    /// Last match starting strictly before `from`; with `wrap`, continues from the document
    /// end back to `from` (inclusive).
    pub fn find_backward(&self, buf: &TextBuffer, from: Position, wrap: bool) -> Option<Match> {
        let from = buf.clamp(from);
        let lines = buf.lines();
        let backward = (0..=from.row).rev().find_map(|row| {
            let hi = if row == from.row { from.col } else { usize::MAX };
            self.last_in(row, &lines[row], 0, hi)
        });
        if backward.is_some() || !wrap {
            return backward;
        }
        (from.row..lines.len()).rev().find_map(|row| {
            let lo = if row == from.row { from.col } else { 0 };
            self.last_in(row, &lines[row], lo, usize::MAX)
        })
    }

    pub fn find_all(&self, buf: &TextBuffer) -> Vec<Match> {
        buf.lines()
            .iter()
            .enumerate()
            .flat_map(|(row, line)| self.line_matches(row, line))
            .collect()
    }

    /// Text that replaces `m` on `line`. Regex queries expand `$1`/`${name}` references;
    /// plain queries insert `replacement` literally.
    pub fn expand(&self, line: &str, m: &Match, replacement: &str) -> String {
        if !self.regex {
            return replacement.to_string();
        }
        let at = byte_index(line, m.start);
        match self.re.captures_at(line, at) {
            Some(caps) => expand_caps(&caps, replacement),
            None => replacement.to_string(),
        }
    }

    /// Replace every non-empty match on `line`. Returns the new line and the match count.
    pub fn replace_line(&self, line: &str, replacement: &str) -> (String, usize) {
        let mut out = String::with_capacity(line.len());
        let mut last = 0;
        let mut count = 0;
        for caps in self.re.captures_iter(line) {
            let Some(whole) = caps.get(0) else { continue };
            if whole.is_empty() {
                continue;
            }
            out.push_str(&line[last..whole.start()]);
            if self.regex {
                out.push_str(&expand_caps(&caps, replacement));
            } else {
                out.push_str(replacement);
            }
            last = whole.end();
            count += 1;
        }
        out.push_str(&line[last..]);
        (out, count)
    }
}

fn expand_caps(caps: &Captures<'_>, replacement: &str) -> String {
    let mut dst = String::new();
    caps.expand(replacement, &mut dst);
    dst
}

/// Compile `query` and return the first match at or after `from`.
pub fn find(
    buf: &TextBuffer,
    query: &str,
    from: Position,
    opts: FindOptions,
) -> Result<Option<Match>, SearchError> {
    Ok(Query::new(query, opts)?.find(buf, from, opts.wrap))
}

/// Compile `query` and return the last match before `from`.
pub fn find_backward(
    buf: &TextBuffer,
    query: &str,
    from: Position,
    opts: FindOptions,
) -> Result<Option<Match>, SearchError> {
    Ok(Query::new(query, opts)?.find_backward(buf, from, opts.wrap))
}

pub fn find_all(buf: &TextBuffer, query: &str, opts: FindOptions) -> Result<Vec<Match>, SearchError> {
    Ok(Query::new(query, opts)?.find_all(buf))
}
