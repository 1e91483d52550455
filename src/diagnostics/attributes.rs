//! `name=value` attributes on `K:` and `V:` fields

use std::collections::HashMap;

use crate::models::tables::{FieldAttributeSpec, KEY_ATTRIBUTES, VOICE_ATTRIBUTES};
use crate::parse::{node_names, SyntaxTree};
use crate::text::{SourceText, TextSpan};

use super::Diagnostic;

fn check_attribute(
    table: &HashMap<&'static str, FieldAttributeSpec>,
    field: &str,
    node_span: TextSpan,
    text: &str,
    marks: &mut Vec<Diagnostic>,
) {
    let (name, value) = match text.split_once('=') {
        Some((name, value)) => (name.trim(), Some(value.trim().trim_matches('"'))),
        None => (text.trim(), None),
    };

    let Some(spec) = table.get(name) else {
        marks.push(Diagnostic::warning(
            node_span,
            "unknown_field_attribute",
            format!("Unknown {} attribute '{}'", field, name),
        ));
        return;
    };

    if let (Some(allowed), Some(value)) = (spec.values, value) {
        if !allowed.iter().any(|v| v.eq_ignore_ascii_case(value)) {
            marks.push(Diagnostic::warning(
                node_span,
                "invalid_attribute_value",
                format!(
                    "Invalid value '{}' for {} (expected one of: {})",
                    value,
                    name,
                    allowed.join(", ")
                ),
            ));
        }
    }
}

/// Warn on unknown attribute names and on values outside enumerated sets
pub fn check_field_attributes<T: SyntaxTree + ?Sized>(tree: &T, src: &SourceText<'_>) -> Vec<Diagnostic> {
    let mut marks = Vec::new();

    for node in tree.nodes() {
        let (table, field) = match node.name.as_str() {
            node_names::KEY_ATTRIBUTE => (&*KEY_ATTRIBUTES, "key"),
            node_names::VOICE_ATTRIBUTE => (&*VOICE_ATTRIBUTES, "voice"),
            _ => continue,
        };
        check_attribute(table, field, node.span(), src.slice(node.span()), &mut marks);
    }

    marks
}
