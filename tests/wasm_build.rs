//! WASM build test
//!
//! Checks that the JS surface works when compiled for the browser.

#![cfg(target_arch = "wasm32")]

use abc_editor_wasm::api::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_generate_chord() {
    let token = generate_chord("C", "major", 1, 9, false, false);
    assert_eq!(token.unwrap(), "[CEGBd]");
}

#[wasm_bindgen_test]
fn test_generate_chord_rejects_bad_degree() {
    assert!(generate_chord("C", "major", 9, 3, false, false).is_err());
}

#[wasm_bindgen_test]
fn test_chord_bar_creation() {
    let mut bar = ChordBar::new();
    assert!(bar.set_extension(9).is_ok());
    assert!(bar.set_extension(4).is_err());

    bar.set_additive(true);
    assert!(bar.additive());
    bar.set_extension(7);
    assert!(!bar.additive());
}

#[wasm_bindgen_test]
fn test_chord_bar_header() {
    let mut bar = ChordBar::new();
    let text = "X:1\nK:Bb\nBcd|";
    assert_eq!(bar.header_label(text, 10), "Bb major");
    assert!(bar.observe_key(text, 10));
    assert!(!bar.observe_key(text, 11));
    assert_eq!(bar.button_labels(text, 10).length(), 7);
}

#[wasm_bindgen_test]
fn test_context_and_validation_calls() {
    assert!(resolve_context_js("X:1\nK:D\nABc", 10).is_ok());
    assert!(analyze_cursor_js("X:1\nK:D\nABc", 10).is_ok());
    assert!(measure_duration("(3ABc", "1/8").is_ok());
    assert!(measure_duration("ABc", "eighth").is_err());
    assert!(validate_document_js("%%bogus").is_ok());
}
