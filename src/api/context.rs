//! Cursor context functions
//!
//! Called on every selection change: which key and measure the cursor is
//! in, and how full that measure is.

use wasm_bindgen::prelude::*;

use super::helpers::{serialize, validation_error};
use super::types::{ContextReport, DurationReport};
use crate::structure::{self, duration::parse_unit_length};
use crate::text::SourceText;

/// Resolve key, measure span, unit length and meter at a char offset
#[wasm_bindgen(js_name = resolveContext)]
pub fn resolve_context_js(text: &str, cursor: usize) -> Result<JsValue, JsValue> {
    let src = SourceText::new(text);
    let context = structure::resolve_in(&src, cursor);
    serialize(&ContextReport::new(&context, &src), "Failed to serialize context")
}

/// Context plus measure duration and bar fill, in one call
#[wasm_bindgen(js_name = analyzeCursor)]
pub fn analyze_cursor_js(text: &str, cursor: usize) -> Result<JsValue, JsValue> {
    let analysis = structure::analyze_cursor(text, cursor);
    serialize(&analysis, "Failed to serialize cursor analysis")
}

/// Duration of a measure's text against a unit length such as `"1/8"`
#[wasm_bindgen(js_name = measureDuration)]
pub fn measure_duration(measure: &str, base_unit: &str) -> Result<JsValue, JsValue> {
    let base_unit = parse_unit_length(base_unit)
        .ok_or_else(|| validation_error(format!("Invalid unit length: '{}'", base_unit)))?;
    let total = structure::duration(measure, base_unit);
    serialize(&DurationReport::from(total), "Failed to serialize duration")
}
