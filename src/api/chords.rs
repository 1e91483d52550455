//! Chord generation and the chord-bar widget
//!
//! `ChordBar` wraps `ChordBarState` for the host: it owns the modifier
//! flags and the last rendered key, and turns button clicks into text
//! replacements.

use wasm_bindgen::prelude::*;

use super::helpers::{analysis_error, selection_span, serialize, validate_degree, validation_error};
use crate::harmony::{self, ChordSpec, Extension};
use crate::models::{ChordBarState, Key};
use crate::structure;

/// Chord token for a degree of a key, e.g. `("C", "major", 1, 9, false, false)` → `[CEGBd]`
#[wasm_bindgen(js_name = generateChord)]
pub fn generate_chord(
    tonic: &str,
    mode: &str,
    degree: u8,
    extension: u8,
    additive: bool,
    octave_boost: bool,
) -> Result<String, JsValue> {
    let key = Key::from_names(tonic, mode).map_err(analysis_error)?;
    let extension = Extension::from_number(extension).map_err(analysis_error)?;
    validate_degree(degree).map_err(validation_error)?;

    let spec = ChordSpec::new(key, degree, extension)
        .additive(additive)
        .octave_boost(octave_boost);
    harmony::generate_chord(&spec).map_err(analysis_error)
}

/// Chord-bar widget state, one per editor
#[wasm_bindgen]
pub struct ChordBar {
    state: ChordBarState,
}

impl Default for ChordBar {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl ChordBar {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ChordBar {
        ChordBar {
            state: ChordBarState::new(),
        }
    }

    /// Select 3 (triad), 7, 9, 11 or 13
    #[wasm_bindgen(js_name = setExtension)]
    pub fn set_extension(&mut self, extension: u8) -> Result<(), JsValue> {
        let extension = Extension::from_number(extension).map_err(analysis_error)?;
        self.state.set_extension(extension);
        Ok(())
    }

    #[wasm_bindgen(js_name = setAdditive)]
    pub fn set_additive(&mut self, additive: bool) {
        self.state.set_additive(additive);
    }

    #[wasm_bindgen(js_name = setOctaveBoost)]
    pub fn set_octave_boost(&mut self, enabled: bool) {
        self.state.set_octave_boost(enabled);
    }

    /// Whether the additive toggle is currently on (it is forced off for
    /// triads and sevenths)
    #[wasm_bindgen(getter)]
    pub fn additive(&self) -> bool {
        self.state.additive
    }

    /// True when the key at the cursor differs from the last rendered one
    #[wasm_bindgen(js_name = observeKey)]
    pub fn observe_key(&mut self, text: &str, cursor: usize) -> bool {
        let key = structure::resolve_context(text, cursor).key;
        self.state.observe_key(key)
    }

    /// "D major" style label for the key at the cursor
    #[wasm_bindgen(js_name = headerLabel)]
    pub fn header_label(&self, text: &str, cursor: usize) -> String {
        structure::resolve_context(text, cursor).key.label()
    }

    /// Roman-numeral labels for the seven degree buttons
    #[wasm_bindgen(js_name = buttonLabels)]
    pub fn button_labels(&self, text: &str, cursor: usize) -> js_sys::Array {
        let key = structure::resolve_context(text, cursor).key;
        self.state
            .button_labels(key)
            .into_iter()
            .map(|label| JsValue::from_str(&label))
            .collect()
    }

    /// Replace the selection with the chord for `degree`
    #[wasm_bindgen(js_name = chordClick)]
    pub fn chord_click(&self, text: &str, from: usize, to: usize, degree: u8) -> Result<JsValue, JsValue> {
        let selection = selection_span(text, from, to);
        let edit = self
            .state
            .chord_click(text, selection, degree)
            .map_err(analysis_error)?;
        serialize(&edit, "Failed to serialize chord insertion")
    }

    /// Replace the selection with a rest
    #[wasm_bindgen(js_name = restClick)]
    pub fn rest_click(&self, text: &str, from: usize, to: usize) -> Result<JsValue, JsValue> {
        let edit = self.state.rest_click(selection_span(text, from, to));
        serialize(&edit, "Failed to serialize rest insertion")
    }

    /// Current flags, for persisting the widget across reloads
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        serialize(&self.state, "Failed to serialize chord bar state")
    }
}
