//! Diagnostics module for document validation
//!
//! Each rule lives in its own file and looks at the syntax tree, the raw
//! text or both. `validate` runs every rule on every pass and returns a
//! fresh list; nothing is diffed against the previous run.
//!
//! - `names`: unknown directives and information fields
//! - `midi`: `%%MIDI` attribute names, value ranges, one attribute per line
//! - `attributes`: `name=value` attributes on `K:` and `V:` fields
//! - `blank_lines`: whitespace-only lines

pub mod attributes;
pub mod blank_lines;
pub mod midi;
pub mod names;

use serde::{Deserialize, Serialize};

use crate::parse::{scan_document, SyntaxTree};
use crate::text::{SourceText, TextSpan};

/// Severity level for diagnostics
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// A diagnostic over a char range of the document
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub from: usize,
    pub to: usize,
    pub severity: DiagnosticSeverity,
    /// Kind identifier (e.g., "unknown_directive", "blank_line")
    pub kind: String,
    /// Human-readable message
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        span: TextSpan,
        severity: DiagnosticSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            from: span.from,
            to: span.to,
            severity,
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn error(span: TextSpan, kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(span, DiagnosticSeverity::Error, kind, message)
    }

    pub fn warning(span: TextSpan, kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(span, DiagnosticSeverity::Warning, kind, message)
    }

    pub fn span(&self) -> TextSpan {
        TextSpan::new(self.from, self.to)
    }
}

/// Collection of diagnostics for an entire document
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Diagnostics {
    pub marks: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self { marks: Vec::new() }
    }

    pub fn extend(&mut self, marks: impl IntoIterator<Item = Diagnostic>) {
        self.marks.extend(marks);
    }

    pub fn has_errors(&self) -> bool {
        self.marks
            .iter()
            .any(|m| m.severity == DiagnosticSeverity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Document order; rules that hit the same span keep their run order
    pub fn into_sorted(mut self) -> Vec<Diagnostic> {
        self.marks.sort_by_key(|m| (m.from, m.to));
        self.marks
    }
}

/// Run every rule over a tree and its document text
pub fn validate<T: SyntaxTree + ?Sized>(tree: &T, text: &str) -> Vec<Diagnostic> {
    let src = SourceText::new(text);
    let mut diagnostics = Diagnostics::new();

    diagnostics.extend(names::check_names(tree, &src));
    diagnostics.extend(midi::check_midi(tree, &src));
    diagnostics.extend(attributes::check_field_attributes(tree, &src));
    diagnostics.extend(blank_lines::check_blank_lines(&src));

    log::debug!(
        "validation: {} diagnostics (errors: {})",
        diagnostics.marks.len(),
        diagnostics.has_errors()
    );
    diagnostics.into_sorted()
}

/// Validate with the built-in line scanner standing in for a host parser
pub fn validate_document(text: &str) -> Vec<Diagnostic> {
    validate(&scan_document(text), text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_has_errors() {
        let mut diags = Diagnostics::new();
        assert!(!diags.has_errors());

        diags.extend([Diagnostic::warning(TextSpan::new(0, 1), "warn", "Warning")]);
        assert!(!diags.has_errors());

        diags.extend([Diagnostic::error(TextSpan::new(0, 1), "err", "Error")]);
        assert!(diags.has_errors());
    }

    #[test]
    fn test_results_in_document_order() {
        let text = "X:1\n\n%%bogus\nY:2";
        let diags = validate_document(text);
        let kinds: Vec<&str> = diags.iter().map(|d| d.kind.as_str()).collect();
        assert_eq!(kinds, ["blank_line", "unknown_directive", "unknown_info_field"]);
    }

    #[test]
    fn test_clean_tune_has_no_diagnostics() {
        let text = "X:1\nT:Reel\nM:4/4\nL:1/8\n%%MIDI program 73\nK:D\n|:ABcd efge|\n";
        assert!(validate_document(text).is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let diag = Diagnostic::error(TextSpan::new(3, 5), "blank_line", "Blank line");
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["severity"], "error");
        assert_eq!(json["from"], 3);
        assert_eq!(json["to"], 5);
    }
}
