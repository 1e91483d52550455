//! Whitespace-only lines

use crate::text::{SourceText, TextSpan};

use super::Diagnostic;

/// Error on every line holding nothing but whitespace. A truly empty line
/// is widened to one char so the mark stays visible. The empty remainder
/// after a trailing newline is not a line.
pub fn check_blank_lines(src: &SourceText<'_>) -> Vec<Diagnostic> {
    if src.is_empty() {
        return Vec::new();
    }

    let last = src.line_count() - 1;
    src.lines()
        .filter(|&(line, _, text)| !(line == last && line > 0 && text.is_empty()))
        .filter(|(_, _, text)| text.chars().all(char::is_whitespace))
        .map(|(_, span, _)| {
            let span = if span.is_empty() {
                TextSpan::new(span.from, span.from + 1)
            } else {
                span
            };
            Diagnostic::error(span, "blank_line", "Blank lines are not allowed here")
        })
        .collect()
}
