//! Spans and edit commands
//!
//! Pure text positions with no musical knowledge. Offsets are 0-based
//! character indices, the unit the host editor reports its cursor in.

use serde::{Deserialize, Serialize};

/// A half-open range of character offsets `[from, to)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextSpan {
    pub from: usize,
    pub to: usize,
}

impl TextSpan {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Create an empty span at a position
    pub fn empty_at(pos: usize) -> Self {
        Self { from: pos, to: pos }
    }

    /// Check if this span is empty (from == to)
    pub fn is_empty(&self) -> bool {
        self.from >= self.to
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.to.saturating_sub(self.from)
    }

    /// Check if a position is contained within this span
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.from && pos < self.to
    }

    /// Smallest span covering both
    pub fn cover(&self, other: TextSpan) -> TextSpan {
        TextSpan::new(self.from.min(other.from), self.to.max(other.to))
    }
}

/// The single edit command sent back to the host editor: replace
/// `[from, to)` with `insert`, then put the caret at `cursor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextReplacement {
    pub from: usize,
    pub to: usize,
    pub insert: String,
    pub cursor: usize,
}

impl TextReplacement {
    /// Replace a span, leaving the caret immediately after the inserted text
    pub fn replace(span: TextSpan, insert: impl Into<String>) -> Self {
        let insert = insert.into();
        let (from, to) = if span.from <= span.to {
            (span.from, span.to)
        } else {
            (span.to, span.from)
        };
        let cursor = from + insert.chars().count();

        Self {
            from,
            to,
            insert,
            cursor,
        }
    }

    /// Apply to a string (used by tests and by hosts without their own buffer)
    pub fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + self.insert.len());
        for (i, ch) in text.chars().enumerate() {
            if i == self.from {
                out.push_str(&self.insert);
            }
            if i < self.from || i >= self.to {
                out.push(ch);
            }
        }
        if self.from >= text.chars().count() {
            out.push_str(&self.insert);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_contains() {
        let span = TextSpan::new(2, 5);

        assert!(span.contains(2));
        assert!(span.contains(4));
        assert!(!span.contains(5)); // Exclusive end
        assert!(!span.contains(1));
        assert_eq!(span.len(), 3);
    }

    #[test]
    fn test_empty_span() {
        let span = TextSpan::empty_at(7);
        assert!(span.is_empty());
        assert_eq!(span.len(), 0);
        assert!(!span.contains(7));
    }

    #[test]
    fn test_replacement_places_cursor_after_insert() {
        let edit = TextReplacement::replace(TextSpan::new(4, 4), "[CEG]");
        assert_eq!(edit.cursor, 9);
        assert_eq!(edit.apply("A B C D"), "A B [CEG]C D");
    }

    #[test]
    fn test_replacement_overwrites_selection() {
        let edit = TextReplacement::replace(TextSpan::new(2, 5), "z");
        assert_eq!(edit.apply("A BCD E"), "A z E");
        assert_eq!(edit.cursor, 3);
    }

    #[test]
    fn test_replacement_at_end_of_text() {
        let edit = TextReplacement::replace(TextSpan::empty_at(3), "z");
        assert_eq!(edit.apply("ABC"), "ABCz");
    }

    #[test]
    fn test_backward_selection_is_normalized() {
        let edit = TextReplacement::replace(TextSpan::new(5, 2), "x");
        assert_eq!(edit.from, 2);
        assert_eq!(edit.to, 5);
    }
}
