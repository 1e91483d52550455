// Document validation through the fallback scanner and host trees

use abc_editor_wasm::diagnostics::{validate, validate_document, DiagnosticSeverity};
use abc_editor_wasm::parse::{HostTree, SyntaxNode};

#[test]
fn test_bogus_directive_single_warning() {
    let text = "X:1\n%%bogusdirective\nK:C\nABc|";
    let diags = validate_document(text);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].severity, DiagnosticSeverity::Warning);
    assert_eq!(&text[diags[0].from..diags[0].to], "bogusdirective");
}

#[test]
fn test_whitespace_line_single_error() {
    let text = "X:1\nK:C\n    \nABc|";
    let diags = validate_document(text);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].severity, DiagnosticSeverity::Error);
    assert_eq!((diags[0].from, diags[0].to), (8, 12));
}

#[test]
fn test_midi_program_range_error() {
    let diags = validate_document("X:1\n%%MIDI program=200\nK:C");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind, "midi_value_out_of_range");
    assert!(diags[0].message.contains("program"));
    assert!(diags[0].message.contains("127"));
    assert!(diags[0].message.contains("200"));
}

#[test]
fn test_multiple_midi_attributes_error() {
    let diags = validate_document("%%MIDI program=10 channel=3");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind, "multiple_midi_attributes");
    assert_eq!(diags[0].severity, DiagnosticSeverity::Error);
}

#[test]
fn test_validation_is_idempotent() {
    let text = "X:1\nQ:1/4=120\n%%nope\n\n%%MIDI channel 20\nV:1 clef=banjo\nK:C\nABc|";
    let first = validate_document(text);
    let second = validate_document(text);
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}

#[test]
fn test_host_tree_is_used_as_given() {
    let text = "%%bogus\nYY";
    let tree: HostTree = serde_json::from_value(serde_json::json!([
        {"name": "Document", "from": 0, "to": 10},
        {"name": "DirectiveKeyword", "from": 2, "to": 7},
        {"name": "InfoKey", "from": 8, "to": 9},
    ]))
    .unwrap();

    let diags = validate(&tree, text);
    let kinds: Vec<&str> = diags.iter().map(|d| d.kind.as_str()).collect();
    assert_eq!(kinds, ["unknown_directive", "unknown_info_field"]);
}

#[test]
fn test_nodes_out_of_range_are_tolerated() {
    let tree = HostTree::Flat(vec![SyntaxNode { name: "InfoKey".into(), from: 40, to: 50 }].into());
    let diags = validate(&tree, "K:C");
    // Slicing past the end yields an empty key, which is not a known field
    assert_eq!(diags.len(), 1);
}
