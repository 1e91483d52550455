//! Musical structure
//!
//! Derives context from the raw text on demand: which tune, key, unit
//! length and meter apply at the cursor, which measure the cursor is in,
//! and how much of that measure is filled. Nothing is stored here.
//!
//! ## Modules
//!
//! - `line_analysis`: Line classification (header, directive, music, ...)
//! - `context`: Key/measure/meter resolution at a cursor offset
//! - `duration`: Measure duration accounting in unit note lengths
//! - `bar_fill`: Per-beat fill of the current measure

pub mod bar_fill;
pub mod context;
pub mod duration;
pub mod line_analysis;

// Re-exports for convenience
pub use bar_fill::{bar_fill, BarFill, FillClass, Meter, MeterField};
pub use context::{analyze_cursor, measure_span, resolve_context, resolve_in, CursorAnalysis, MusicalContext};
pub use duration::{duration, measure_items, unit_count, ItemKind, MeasureItem, Rational};
pub use line_analysis::{classify_line, field_key, LineKind};
