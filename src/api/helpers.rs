//! Shared helpers for WASM API operations
//!
//! Common patterns for serialization, deserialization, error handling and
//! argument checking across the API modules.

use wasm_bindgen::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::AnalysisError;
use crate::text::TextSpan;

// ============================================================================
// Console Logging Functions
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn warn(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn error(s: &str);
}

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with [WASM] prefix
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_debug(&format!($($arg)*))
    };
}

/// Log a warning message with [WASM] ⚠️ prefix
#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_warn(&format!($($arg)*))
    };
}

// ============================================================================
// Logging Helper Functions (called by macros)
// ============================================================================

pub fn log_debug(msg: &str) {
    log(&format!("[WASM] {}", msg));
}

pub fn log_warn(msg: &str) {
    warn(&format!("[WASM] ⚠️ {}", msg));
}

pub fn log_error(msg: &str) {
    error(&format!("[WASM] ❌ {}", msg));
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(
    value: JsValue,
    error_context: &str,
) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        JsValue::from_str(&msg)
    })
}

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        JsValue::from_str(&msg)
    })
}

// ============================================================================
// Validation Helpers
// ============================================================================

/// Build a selection span from JS offsets, clamped into the document.
/// A backwards selection (anchor after head) is normalized.
pub fn selection_span(text: &str, from: usize, to: usize) -> TextSpan {
    let len = text.chars().count();
    let (from, to) = if from <= to { (from, to) } else { (to, from) };
    TextSpan::new(from.min(len), to.min(len))
}

/// Validate that a scale degree is 1-7
pub fn validate_degree(degree: u8) -> Result<(), String> {
    if !(1..=7).contains(&degree) {
        return Err(format!("Invalid degree: {} (must be 1-7)", degree));
    }
    Ok(())
}

// ============================================================================
// Result Conversion Helpers
// ============================================================================

/// Convert a validation error to a JsValue
pub fn validation_error(msg: impl Into<String>) -> JsValue {
    let msg = msg.into();
    log_error(&msg);
    JsValue::from_str(&msg)
}

/// Convert an engine error to a JsValue
pub fn analysis_error(err: AnalysisError) -> JsValue {
    validation_error(err.to_string())
}
