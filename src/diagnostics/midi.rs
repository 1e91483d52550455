//! `%%MIDI` line checks
//!
//! A MIDI line carries one attribute, optionally followed by values. Values
//! of numeric attributes are range checked against the attribute table.

use crate::models::tables::{self, MidiAttributeSpec};
use crate::parse::{node_names, SyntaxTree};
use crate::text::{SourceText, TextSpan};

use super::Diagnostic;

/// An attribute node and the value nodes following it on its line
#[derive(Debug)]
struct MidiEntry<'a> {
    line: usize,
    name: &'a str,
    span: TextSpan,
    values: Vec<(TextSpan, &'a str)>,
}

impl MidiEntry<'_> {
    /// Attribute through its last value
    fn full_span(&self) -> TextSpan {
        self.values
            .iter()
            .fold(self.span, |span, (value, _)| span.cover(*value))
    }
}

fn collect_entries<'a, T: SyntaxTree + ?Sized>(tree: &T, src: &SourceText<'a>) -> Vec<MidiEntry<'a>> {
    let mut entries: Vec<MidiEntry<'a>> = Vec::new();

    for node in tree.nodes() {
        let line = src.line_of(node.from);
        let text = src.slice(node.span());

        if node.is(node_names::MIDI_ATTRIBUTE) {
            entries.push(MidiEntry {
                line,
                name: text,
                span: node.span(),
                values: Vec::new(),
            });
        } else if node.is(node_names::MIDI_VALUE) {
            match entries.last_mut() {
                Some(entry) if entry.line == line => entry.values.push((node.span(), text)),
                _ => log::warn!("MIDI value '{}' without an attribute", text),
            }
        }
    }

    entries
}

fn check_value(label: &str, (span, value): (TextSpan, &str), (min, max): (i64, i64), marks: &mut Vec<Diagnostic>) {
    match value.trim().parse::<i64>() {
        Ok(n) if (min..=max).contains(&n) => {}
        Ok(n) => marks.push(Diagnostic::error(
            span,
            "midi_value_out_of_range",
            format!("MIDI {} must be between {} and {}, got {}", label, min, max, n),
        )),
        Err(_) => marks.push(Diagnostic::error(
            span,
            "malformed_midi_value",
            format!("MIDI {} expects a number between {} and {}, got '{}'", label, min, max, value),
        )),
    }
}

/// The last value is the attribute's own; any before it on a
/// channel-prefixed attribute are channel numbers
fn check_range(entry: &MidiEntry<'_>, spec: &MidiAttributeSpec, marks: &mut Vec<Diagnostic>) {
    let Some(range) = spec.range else {
        return;
    };
    let Some((&last, leading)) = entry.values.split_last() else {
        return;
    };

    if spec.channel_prefix {
        let label = format!("{} channel", entry.name);
        for &value in leading {
            check_value(&label, value, tables::MIDI_CHANNEL_RANGE, marks);
        }
    } else {
        for &value in leading {
            check_value(entry.name, value, range, marks);
        }
    }
    check_value(entry.name, last, range, marks);
}

/// Check attribute names, value ranges and the one-attribute-per-line rule
pub fn check_midi<T: SyntaxTree + ?Sized>(tree: &T, src: &SourceText<'_>) -> Vec<Diagnostic> {
    let mut marks = Vec::new();
    let mut previous_line = None;

    for entry in collect_entries(tree, src) {
        if previous_line == Some(entry.line) {
            marks.push(Diagnostic::error(
                entry.full_span(),
                "multiple_midi_attributes",
                format!("Only one attribute per %%MIDI line; move '{}' to its own line", entry.name),
            ));
        }
        previous_line = Some(entry.line);

        match tables::midi_attribute(entry.name) {
            Some(spec) => check_range(&entry, spec, &mut marks),
            None => marks.push(Diagnostic::warning(
                entry.span,
                "unknown_midi_attribute",
                format!("Unknown MIDI attribute '{}'", entry.name),
            )),
        }
    }

    marks
}
