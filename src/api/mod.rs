//! ABC Authoring Assistant WASM API
//!
//! The JavaScript-facing surface. Every function takes the whole document
//! text and recomputes from scratch; the only state kept between calls is
//! the `ChordBar` widget object owned by the host.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization, error handling, and logging
//! - `types`: Flattened result types
//! - `context`: Cursor context, measure duration, bar fill
//! - `chords`: Chord generation and the `ChordBar` widget
//! - `validation`: Document diagnostics

pub mod helpers;
pub mod types;
pub mod chords;
pub mod context;
pub mod validation;

pub use chords::{generate_chord, ChordBar};
pub use context::{analyze_cursor_js, measure_duration, resolve_context_js};
pub use validation::{validate_document_js, validate_tree_js};
