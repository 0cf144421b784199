//! Writing statistics derived from buffer contents.

use std::time::Duration;

/// Average adult silent reading speed.
pub const READING_WORDS_PER_MINUTE: usize = 225;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStats {
    /// Whitespace-delimited tokens.
    pub words: usize,
    pub chars: usize,
    pub chars_no_whitespace: usize,
    pub lines: usize,
    /// Runs of non-blank lines separated by blank lines.
    pub paragraphs: usize,
}

impl TextStats {
    pub fn compute(lines: &[String]) -> Self {
        let mut stats = TextStats {
            lines: lines.len(),
            ..Default::default()
        };
        let mut in_paragraph = false;
        for line in lines {
            stats.words += line.split_whitespace().count();
            for c in line.chars() {
                stats.chars += 1;
                if !c.is_whitespace() {
                    stats.chars_no_whitespace += 1;
                }
            }
            let blank = line.trim().is_empty();
            if !blank && !in_paragraph {
                stats.paragraphs += 1;
            }
            in_paragraph = !blank;
        }
        stats
    }

    /// Reading time rounded up to whole minutes; zero for an empty document.
    pub fn reading_time(&self) -> Duration {
        let minutes = self.words.div_ceil(READING_WORDS_PER_MINUTE) as u64;
        Duration::from_secs(minutes * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn counts_words_chars_and_paragraphs() {
        let s = TextStats::compute(&lines(&["Hello  world", "again", "", "  ", "New para."]));
        assert_eq!(
            s,
            TextStats {
                words: 5,
                chars: 28,
                chars_no_whitespace: 23,
                lines: 5,
                paragraphs: 2,
            }
        );
    }

    #[test]
    fn empty_document() {
        let s = TextStats::compute(&lines(&[""]));
        assert_eq!(s.words, 0);
        assert_eq!(s.paragraphs, 0);
        assert_eq!(s.lines, 1);
        assert_eq!(s.reading_time(), Duration::ZERO);
    }

    #[test]
    fn reading_time_rounds_up() {
        let s = TextStats {
            words: 226,
            ..Default::default()
        };
        assert_eq!(s.reading_time(), Duration::from_secs(120));
    }
}
