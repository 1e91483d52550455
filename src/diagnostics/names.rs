//! Unknown directive and information field names

use crate::models::tables;
use crate::parse::{node_names, SyntaxTree};
use crate::text::SourceText;

use super::Diagnostic;

/// Warn on directive keywords and field keys missing from the tables
pub fn check_names<T: SyntaxTree + ?Sized>(tree: &T, src: &SourceText<'_>) -> Vec<Diagnostic> {
    let mut marks = Vec::new();

    for node in tree.nodes() {
        let text = src.slice(node.span());

        match node.name.as_str() {
            node_names::DIRECTIVE_KEYWORD => {
                // Some grammars include the `%%` in the keyword token
                let name = text.trim_start_matches('%');
                if !tables::is_known_directive(name) {
                    marks.push(Diagnostic::warning(
                        node.span(),
                        "unknown_directive",
                        format!("Unknown directive '%%{}'", name),
                    ));
                }
            }
            node_names::INFO_KEY | node_names::KEY_INFO_KEY | node_names::VOICE_INFO_KEY => {
                let key = text.trim_end_matches(':');
                if !tables::is_known_info_field(key) {
                    marks.push(Diagnostic::warning(
                        node.span(),
                        "unknown_info_field",
                        format!("Unknown information field '{}:'", key),
                    ));
                }
            }
            _ => {}
        }
    }

    marks
}
