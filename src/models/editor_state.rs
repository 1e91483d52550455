//! Chord-bar widget state
//!
//! The only mutable state in the engine: the chord bar's modifier flags and
//! the key it last rendered. Owned by one widget instance; the chord
//! generator reads the flags at click time.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::harmony::{
    chord_label, render_request, ChordRequest, ChordSpec, CompositionMode, Extension, REST_TOKEN,
};
use crate::models::key::Key;
use crate::structure::context::resolve_in;
use crate::text::{SourceText, TextReplacement, TextSpan};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ChordBarState {
    /// Extension level applied to the next click
    pub extension: Extension,

    /// Additive (`add9`) instead of cumulative stacking; only for 9/11/13
    pub additive: bool,

    /// Leave chord tones in their base octave
    pub octave_boost: bool,

    /// Key of the last render, for skipping redundant re-layout
    pub last_rendered_key: Option<Key>,
}

impl ChordBarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select an extension level. Additive mode is not offered for triads
    /// and sevenths, so choosing one of those clears it.
    pub fn set_extension(&mut self, extension: Extension) {
        self.extension = extension;
        if !extension.allows_additive() {
            self.additive = false;
        }
    }

    /// Toggle additive mode; ignored while the extension does not allow it
    pub fn set_additive(&mut self, additive: bool) {
        self.additive = additive && self.extension.allows_additive();
    }

    pub fn set_octave_boost(&mut self, enabled: bool) {
        self.octave_boost = enabled;
    }

    pub fn composition_mode(&self) -> CompositionMode {
        if self.additive {
            CompositionMode::Additive
        } else {
            CompositionMode::Cumulative
        }
    }

    /// Record a freshly resolved key. Returns true when it differs from the
    /// last rendered key, i.e. when the bar needs to be laid out again.
    pub fn observe_key(&mut self, key: Key) -> bool {
        if self.last_rendered_key == Some(key) {
            return false;
        }
        self.last_rendered_key = Some(key);
        true
    }

    /// Chord request for a degree button under the current flags
    pub fn chord_request(&self, key: Key, degree: u8) -> ChordRequest {
        ChordRequest::Chord(
            ChordSpec::new(key, degree, self.extension)
                .additive(self.additive)
                .octave_boost(self.octave_boost),
        )
    }

    /// Labels for the seven degree buttons
    pub fn button_labels(&self, key: Key) -> Vec<String> {
        (1..=7)
            .map(|degree| {
                chord_label(key, degree, self.extension, self.composition_mode())
                    .unwrap_or_else(|_| degree.to_string())
            })
            .collect()
    }

    /// Replace the selection with the chord for `degree`, in the key in
    /// force at the selection start
    pub fn chord_click(&self, text: &str, selection: TextSpan, degree: u8) -> Result<TextReplacement> {
        let src = SourceText::new(text);
        let start = src.clamp(selection.from.min(selection.to));
        let key = resolve_in(&src, start).key;

        let token = render_request(&self.chord_request(key, degree))?;
        log::debug!("chord click: degree {} in {} -> {}", degree, key, token);
        Ok(TextReplacement::replace(selection, token))
    }

    /// Replace the selection with a rest
    pub fn rest_click(&self, selection: TextSpan) -> TextReplacement {
        TextReplacement::replace(selection, REST_TOKEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harmony::render_request;

    #[test]
    fn test_observe_key_only_reports_changes() {
        let mut state = ChordBarState::new();
        let d = Key::from_field_value("D").unwrap();
        let g = Key::from_field_value("G").unwrap();

        assert!(state.observe_key(d));
        assert!(!state.observe_key(d));
        assert!(state.observe_key(g));
        assert!(!state.observe_key(g));
        assert!(state.observe_key(d));
    }

    #[test]
    fn test_additive_requires_upper_extension() {
        let mut state = ChordBarState::new();
        state.set_additive(true);
        assert!(!state.additive);

        state.set_extension(Extension::Ninth);
        state.set_additive(true);
        assert!(state.additive);

        state.set_extension(Extension::Seventh);
        assert!(!state.additive);
    }

    #[test]
    fn test_request_uses_flags() {
        let mut state = ChordBarState::new();
        state.set_extension(Extension::Ninth);
        state.set_additive(true);

        let request = state.chord_request(Key::c_major(), 1);
        assert_eq!(render_request(&request).unwrap(), "[CEGd]");
    }

    #[test]
    fn test_button_labels() {
        let state = ChordBarState::new();
        let labels = state.button_labels(Key::c_major());
        assert_eq!(labels, ["I", "ii", "iii", "IV", "V", "vi", "vii°"]);
    }

    #[test]
    fn test_chord_click_uses_key_at_selection() {
        let text = "X:1\nK:C\nAB|\nX:2\nK:D\ncd|";
        let at = text.find("cd").unwrap();
        let state = ChordBarState::new();

        let edit = state.chord_click(text, TextSpan::empty_at(at), 5).unwrap();
        assert_eq!(edit.insert, "[A^ce]");
        assert_eq!(edit.cursor, at + 6);
        assert_eq!(edit.apply(text), "X:1\nK:C\nAB|\nX:2\nK:D\n[A^ce]cd|");
    }

    #[test]
    fn test_chord_click_rejects_bad_degree() {
        let state = ChordBarState::new();
        assert!(state.chord_click("K:C\nAB", TextSpan::empty_at(4), 8).is_err());
    }

    #[test]
    fn test_rest_click_replaces_selection() {
        let state = ChordBarState::new();
        let edit = state.rest_click(TextSpan::new(4, 6));
        assert_eq!(edit.apply("K:C\nABcd"), "K:C\nzcd");
        assert_eq!(edit.cursor, 5);
    }
}
