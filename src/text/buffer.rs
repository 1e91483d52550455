//! Read-only document index (Layer 0)
//!
//! Pure text storage with no musical knowledge. The host reports positions
//! as character offsets while `str` slicing and `regex` work in bytes, so
//! `SourceText` keeps both views plus a line table.

use super::cursor::TextSpan;

/// Borrowed document text with char/byte/line lookup tables
#[derive(Debug, Clone)]
pub struct SourceText<'a> {
    text: &'a str,
    /// Byte offset of every char, plus a trailing entry for `text.len()`
    char_bytes: Vec<usize>,
    /// Char offset of the first char of every line
    line_starts: Vec<usize>,
}

impl<'a> SourceText<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut char_bytes = Vec::with_capacity(text.len() + 1);
        let mut line_starts = vec![0];

        for (char_idx, (byte_idx, ch)) in text.char_indices().enumerate() {
            char_bytes.push(byte_idx);
            if ch == '\n' {
                line_starts.push(char_idx + 1);
            }
        }
        char_bytes.push(text.len());

        Self {
            text,
            char_bytes,
            line_starts,
        }
    }

    /// The underlying text
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Length in characters
    pub fn len_chars(&self) -> usize {
        self.char_bytes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Clamp a char offset into the document
    pub fn clamp(&self, offset: usize) -> usize {
        offset.min(self.len_chars())
    }

    /// Byte offset of a char offset (clamped to the end of the text)
    pub fn byte_of(&self, offset: usize) -> usize {
        self.char_bytes[self.clamp(offset)]
    }

    /// Char offset of a byte offset (must lie on a char boundary)
    pub fn char_of(&self, byte: usize) -> usize {
        match self.char_bytes.binary_search(&byte) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        }
    }

    /// Text covered by a span
    pub fn slice(&self, span: TextSpan) -> &'a str {
        let from = self.byte_of(span.from);
        let to = self.byte_of(span.to).max(from);
        &self.text[from..to]
    }

    /// Convert a byte range (e.g. a regex match) to a char span
    pub fn span_of_bytes(&self, from: usize, to: usize) -> TextSpan {
        TextSpan::new(self.char_of(from), self.char_of(to))
    }

    /// Number of lines (a trailing newline opens one more, empty line)
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Line index containing a char offset
    pub fn line_of(&self, offset: usize) -> usize {
        let offset = self.clamp(offset);
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line - 1,
        }
    }

    /// Span of a line's content, excluding its newline
    pub fn line_span(&self, line: usize) -> TextSpan {
        let from = self.line_starts[line];
        let to = match self.line_starts.get(line + 1) {
            Some(&next) => next - 1,
            None => self.len_chars(),
        };
        TextSpan::new(from, to)
    }

    /// Content of a line, excluding its newline
    pub fn line_text(&self, line: usize) -> &'a str {
        self.slice(self.line_span(line))
    }

    /// Iterate `(line index, span, text)` over every line
    pub fn lines(&self) -> impl Iterator<Item = (usize, TextSpan, &'a str)> + '_ {
        (0..self.line_count()).map(move |line| {
            let span = self.line_span(line);
            (line, span, self.slice(span))
        })
    }
}
