// Chord-button tokens, labels and insertion

use abc_editor_wasm::harmony::{generate_chord, render_request, scale, ChordRequest, ChordSpec, Extension};
use abc_editor_wasm::models::{ChordBarState, Key, Mode, Tonic};
use abc_editor_wasm::text::TextSpan;
use abc_editor_wasm::AnalysisError;

fn key(tonic: &str, mode: &str) -> Key {
    Key::from_names(tonic, mode).unwrap()
}

fn chord(key: Key, degree: u8, extension: Extension, additive: bool, boost: bool) -> String {
    generate_chord(
        &ChordSpec::new(key, degree, extension)
            .additive(additive)
            .octave_boost(boost),
    )
    .unwrap()
}

#[test]
fn test_ninth_cumulative_and_additive() {
    let c = key("C", "major");
    assert_eq!(chord(c, 1, Extension::Ninth, false, false), "[CEGBd]");
    assert_eq!(chord(c, 1, Extension::Ninth, true, false), "[CEGd]");
}

#[test]
fn test_triads_follow_key_signature() {
    let d = key("D", "major");
    assert_eq!(chord(d, 1, Extension::Triad, false, false), "[D^FA]");
    assert_eq!(chord(d, 5, Extension::Seventh, false, false), "[A^ceg]");

    let f = key("F", "major");
    assert_eq!(chord(f, 4, Extension::Triad, false, false), "[_Bdf]");
}

#[test]
fn test_minor_key_degrees() {
    let a = key("A", "minor");
    assert_eq!(chord(a, 1, Extension::Triad, false, false), "[Ace]");
    assert_eq!(chord(a, 3, Extension::Triad, false, false), "[CEG]");
}

#[test]
fn test_scale_has_seven_distinct_classes() {
    for tonic in ["C", "G", "F#", "Bb", "Eb"] {
        for mode in ["major", "dorian", "lydian", "minor", "locrian"] {
            let tonic: Tonic = tonic.parse().unwrap();
            let mode: Mode = mode.parse().unwrap();
            let degrees = scale(tonic, mode).unwrap();
            let mut chromas: Vec<i32> = degrees.degrees().iter().map(|p| p.chroma()).collect();
            chromas.sort();
            chromas.dedup();
            assert_eq!(chromas.len(), 7, "{} {}", tonic, mode.as_str());
        }
    }
}

#[test]
fn test_unknown_key_names_are_errors() {
    assert!(matches!(Key::from_names("H", "major"), Err(AnalysisError::InvalidKey(_))));
    assert!(matches!(Key::from_names("C", "bebop"), Err(AnalysisError::InvalidKey(_))));
}

#[test]
fn test_rest_request() {
    assert_eq!(render_request(&ChordRequest::Rest).unwrap(), "z");
}

#[test]
fn test_chord_bar_click_inserts_token() {
    let text = "X:1\nK:G\n|GABc|";
    let cursor = text.find("GABc").unwrap();

    let mut bar = ChordBarState::new();
    bar.set_extension(Extension::Seventh);
    let edit = bar.chord_click(text, TextSpan::empty_at(cursor), 5).unwrap();

    assert_eq!(edit.insert, "[D^FAc]");
    assert_eq!(edit.cursor, cursor + edit.insert.chars().count());
    assert!(edit.apply(text).contains("|[D^FAc]GABc|"));
}

#[test]
fn test_chord_bar_labels_track_extension() {
    let mut bar = ChordBarState::new();
    let g = key("G", "major");

    bar.set_extension(Extension::Seventh);
    assert_eq!(bar.button_labels(g)[4], "V7");

    bar.set_extension(Extension::Eleventh);
    bar.set_additive(true);
    assert_eq!(bar.button_labels(g)[1], "iiadd11");
}

#[test]
fn test_chord_bar_skips_rerender_for_same_key() {
    let mut bar = ChordBarState::new();
    assert!(bar.observe_key(key("D", "major")));
    assert!(!bar.observe_key(key("D", "major")));
    assert!(bar.observe_key(key("D", "minor")));
}
