//! Validation functions
//!
//! Both entry points return the complete diagnostic list for the document;
//! the host replaces its previous list wholesale.

use wasm_bindgen::prelude::*;

use super::helpers::{deserialize, serialize};
use crate::diagnostics;
use crate::parse::HostTree;

/// Validate using the built-in line scanner
#[wasm_bindgen(js_name = validateDocument)]
pub fn validate_document_js(text: &str) -> Result<JsValue, JsValue> {
    let marks = diagnostics::validate_document(text);
    serialize(&marks, "Failed to serialize diagnostics")
}

/// Validate using the host parser's tree (node array or nested root)
#[wasm_bindgen(js_name = validateTree)]
pub fn validate_tree_js(tree_js: JsValue, text: &str) -> Result<JsValue, JsValue> {
    let tree: HostTree = deserialize(tree_js, "Failed to deserialize syntax tree")?;
    let marks = diagnostics::validate(&tree, text);
    if !marks.is_empty() {
        crate::wasm_log!("validateTree: {} diagnostics", marks.len());
    }
    serialize(&marks, "Failed to serialize diagnostics")
}
