//! Shared types for the WASM API
//!
//! Flattened, string-friendly views of engine results for the JS side.

use crate::structure::{MusicalContext, Rational};
use crate::text::SourceText;

/// Context at a cursor, as sent to the chord bar and status line
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct ContextReport {
    pub tonic: String,
    pub mode: String,
    pub key_label: String,
    pub measure_from: usize,
    pub measure_to: usize,
    pub measure_text: String,
    /// Unit note length as `"1/8"`
    pub base_unit: String,
    /// Meter as `"6/8"`; absent for free meter
    pub meter: Option<String>,
}

impl ContextReport {
    pub fn new(context: &MusicalContext, src: &SourceText<'_>) -> Self {
        Self {
            tonic: context.key.tonic.to_string(),
            mode: context.key.mode.as_str().to_string(),
            key_label: context.key.label(),
            measure_from: context.measure.from,
            measure_to: context.measure.to,
            measure_text: src.slice(context.measure).to_string(),
            base_unit: context.base_unit.to_string(),
            meter: context
                .meter
                .map(|m| format!("{}/{}", m.beats, m.beat_unit)),
        }
    }
}

/// An exact duration plus a float for display
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct DurationReport {
    pub numer: i64,
    pub denom: i64,
    pub value: f64,
}

impl From<Rational> for DurationReport {
    fn from(r: Rational) -> Self {
        Self {
            numer: *r.numer(),
            denom: *r.denom(),
            value: *r.numer() as f64 / *r.denom() as f64,
        }
    }
}
