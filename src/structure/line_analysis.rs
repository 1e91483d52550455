//! Line classification
//!
//! ABC is line-oriented: whether a line is a header field, a directive, a
//! lyric line or music decides everything else about it. The context
//! resolver, the duration pipeline and the fallback scanner all go through
//! `classify_line` rather than pattern-matching lines themselves.

use serde::{Deserialize, Serialize};

/// What a single line of an ABC document is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    /// Information field line (`K:G`, `M:6/8`, `X:1`), with its field key
    Header(char),
    /// `%%` directive line
    Directive,
    /// `%` comment line
    Comment,
    /// Lyrics (`w:` under the staff, `W:` after the tune)
    Lyric,
    /// Anything else with content
    Music,
    /// Empty or whitespace only
    Blank,
}

impl LineKind {
    /// Whether chord/duration context applies on this line
    pub fn is_music(&self) -> bool {
        matches!(self, LineKind::Music)
    }

    /// Whether this line starts a new tune (`X:` reference number)
    pub fn is_tune_start(&self) -> bool {
        matches!(self, LineKind::Header('X'))
    }
}

/// Classify one line (without its newline)
pub fn classify_line(line: &str) -> LineKind {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    if line.starts_with("%%") {
        return LineKind::Directive;
    }
    if line.starts_with('%') {
        return LineKind::Comment;
    }

    match field_key(line) {
        Some('w') | Some('W') => LineKind::Lyric,
        Some(key) => LineKind::Header(key),
        None => LineKind::Music,
    }
}

/// Field key of a `K:`-style line: one letter (or `+`) followed by a colon
/// at the very start of the line
pub fn field_key(line: &str) -> Option<char> {
    let mut chars = line.chars();
    let key = chars.next()?;
    if (key.is_ascii_alphabetic() || key == '+') && chars.next() == Some(':') {
        // "|:" and "::" repeats never start with a letter, but a bare
        // note followed by a repeat (`E:|`) does
        if chars.next() == Some('|') {
            return None;
        }
        Some(key)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_fields() {
        assert_eq!(classify_line("X:1"), LineKind::Header('X'));
        assert_eq!(classify_line("K:G"), LineKind::Header('K'));
        assert_eq!(classify_line("M:6/8"), LineKind::Header('M'));
        assert_eq!(classify_line("+:continued"), LineKind::Header('+'));
        assert!(classify_line("X:2").is_tune_start());
    }

    #[test]
    fn test_directives_and_comments() {
        assert_eq!(classify_line("%%MIDI program 1"), LineKind::Directive);
        assert_eq!(classify_line("% just a note"), LineKind::Comment);
    }

    #[test]
    fn test_lyrics() {
        assert_eq!(classify_line("w: la la la"), LineKind::Lyric);
        assert_eq!(classify_line("W:Verse two"), LineKind::Lyric);
    }

    #[test]
    fn test_music_and_blank() {
        assert_eq!(classify_line("|:ABc dBA:|"), LineKind::Music);
        assert_eq!(classify_line("E:|"), LineKind::Music);
        assert_eq!(classify_line("[K:D] ABc"), LineKind::Music);
        assert_eq!(classify_line("   "), LineKind::Blank);
        assert_eq!(classify_line(""), LineKind::Blank);
        assert!(LineKind::Music.is_music());
        assert!(!LineKind::Lyric.is_music());
    }
}
