//! ABC Authoring Assistant WASM Module
//!
//! Analysis engine behind an ABC notation editor: cursor context (key,
//! measure, meter), measure duration and bar fill, diatonic chord-button
//! tokens, and document diagnostics. Pure functions over the document text;
//! the `api` module is the thin `wasm-bindgen` layer on top.

pub mod api;
pub mod diagnostics;
pub mod error;
pub mod harmony;
pub mod models;
pub mod parse;
pub mod structure;
pub mod text;

// Re-export commonly used types
pub use diagnostics::{validate, validate_document, Diagnostic, DiagnosticSeverity};
pub use error::{AnalysisError, Result};
pub use harmony::{ChordRequest, ChordSpec, CompositionMode, Extension, Scale};
pub use models::{ChordBarState, Key, Mode, Tonic};
pub use structure::{analyze_cursor, resolve_context, CursorAnalysis, MusicalContext};
pub use text::{TextReplacement, TextSpan};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if console_log::init_with_level(log::Level::Debug).is_err() {
        crate::wasm_warn!("Logger was already initialized");
    }

    log::info!("ABC authoring assistant WASM module initialized");
}
