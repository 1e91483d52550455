//! Diatonic chord generation
//!
//! Builds a bracketed ABC chord token (`[CEGBd]`) from a key, a scale
//! degree, an extension level and a composition mode.
//!
//! - Cumulative mode stacks every third up to the extension (a 9th chord
//!   carries the 7th too).
//! - Additive mode puts only the requested upper tone on top of the triad
//!   (`add9`, `add11`, `add13`).
//!
//! Tones are voiced strictly ascending by lifting each one octave at a time
//! until it clears its predecessor; additive upper tones are further forced
//! to a compound interval above the root. The octave-boost flag turns both
//! adjustments off and leaves every tone in its base octave.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::models::key::Key;
use crate::models::pitch::VoicedPitch;

use super::scale::Scale;

/// The fixed token inserted for a rest request
pub const REST_TOKEN: &str = "z";

/// How far up the stack of thirds a chord reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Extension {
    #[default]
    Triad,
    Seventh,
    Ninth,
    Eleventh,
    Thirteenth,
}

impl Extension {
    /// From a button id: 3 (or 5) for a triad, otherwise 7/9/11/13
    pub fn from_number(n: u8) -> Result<Self> {
        match n {
            3 | 5 => Ok(Extension::Triad),
            7 => Ok(Extension::Seventh),
            9 => Ok(Extension::Ninth),
            11 => Ok(Extension::Eleventh),
            13 => Ok(Extension::Thirteenth),
            other => Err(AnalysisError::InvalidExtension(other)),
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Extension::Triad => 3,
            Extension::Seventh => 7,
            Extension::Ninth => 9,
            Extension::Eleventh => 11,
            Extension::Thirteenth => 13,
        }
    }

    /// Additive mode only exists for 9, 11 and 13
    pub fn allows_additive(&self) -> bool {
        matches!(
            self,
            Extension::Ninth | Extension::Eleventh | Extension::Thirteenth
        )
    }

    /// Degree steps above the root, beyond the triad, for each mode
    fn upper_steps(&self, mode: CompositionMode) -> &'static [i32] {
        static STACK: [i32; 4] = [6, 8, 10, 12];

        match (mode, self) {
            (_, Extension::Triad) => &[],
            (_, Extension::Seventh) => &STACK[..1],
            (CompositionMode::Cumulative, Extension::Ninth) => &STACK[..2],
            (CompositionMode::Cumulative, Extension::Eleventh) => &STACK[..3],
            (CompositionMode::Cumulative, Extension::Thirteenth) => &STACK[..4],
            (CompositionMode::Additive, Extension::Ninth) => &STACK[1..2],
            (CompositionMode::Additive, Extension::Eleventh) => &STACK[2..3],
            (CompositionMode::Additive, Extension::Thirteenth) => &STACK[3..4],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositionMode {
    #[default]
    Cumulative,
    Additive,
}

/// Everything one chord-button click needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordSpec {
    pub key: Key,
    /// Scale degree 1-7
    pub degree: u8,
    pub extension: Extension,
    pub mode: CompositionMode,
    pub octave_boost: bool,
}

impl ChordSpec {
    pub fn new(key: Key, degree: u8, extension: Extension) -> Self {
        Self {
            key,
            degree,
            extension,
            mode: CompositionMode::Cumulative,
            octave_boost: false,
        }
    }

    pub fn additive(mut self, additive: bool) -> Self {
        self.mode = if additive {
            CompositionMode::Additive
        } else {
            CompositionMode::Cumulative
        };
        self
    }

    pub fn octave_boost(mut self, enabled: bool) -> Self {
        self.octave_boost = enabled;
        self
    }

    /// Degree steps above the root, root first
    fn steps(&self) -> Vec<i32> {
        let mut steps = vec![0, 2, 4];
        steps.extend_from_slice(self.extension.upper_steps(self.mode));
        steps
    }

    /// Whether the compound-interval rule applies to the top tone
    fn forces_compound_top(&self) -> bool {
        self.mode == CompositionMode::Additive
            && self.extension.allows_additive()
            && !self.octave_boost
    }
}

/// A chord or a rest, as requested by the chord bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChordRequest {
    Chord(ChordSpec),
    Rest,
}

/// Spell and voice the tones of a chord, root first
pub fn voice_chord(spec: &ChordSpec) -> Result<Vec<VoicedPitch>> {
    if !(1..=7).contains(&spec.degree) {
        return Err(AnalysisError::InvalidDegree(spec.degree));
    }

    let scale = Scale::new(spec.key)?;
    let root = spec.degree as i32;
    let mut tones: Vec<VoicedPitch> = spec
        .steps()
        .iter()
        .map(|step| VoicedPitch::base(scale.note(root + step)))
        .collect();

    if !spec.octave_boost {
        for i in 1..tones.len() {
            let floor = tones[i - 1].value;
            while tones[i].value <= floor {
                tones[i].value += 12;
            }
        }
    }

    if spec.forces_compound_top() {
        let root_value = tones[0].value;
        if let Some(top) = tones.last_mut() {
            while top.value < root_value + 12 {
                top.value += 12;
            }
        }
    }

    Ok(tones)
}

/// Render a chord as a bracketed ABC token
pub fn generate_chord(spec: &ChordSpec) -> Result<String> {
    let tones = voice_chord(spec)?;
    let body: String = tones.iter().map(VoicedPitch::to_abc).collect();
    Ok(format!("[{}]", body))
}

/// Render a chord-bar request; rests skip chord generation entirely
pub fn render_request(request: &ChordRequest) -> Result<String> {
    match request {
        ChordRequest::Chord(spec) => generate_chord(spec),
        ChordRequest::Rest => Ok(REST_TOKEN.to_string()),
    }
}

/// Quality of the triad built on a degree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriadQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
}

pub fn triad_quality(key: Key, degree: u8) -> Result<TriadQuality> {
    let tones = voice_chord(&ChordSpec::new(key, degree, Extension::Triad))?;
    let third = tones[1].value - tones[0].value;
    let fifth = tones[2].value - tones[0].value;

    Ok(match (third, fifth) {
        (3, 6) => TriadQuality::Diminished,
        (4, 8) => TriadQuality::Augmented,
        (3, _) => TriadQuality::Minor,
        _ => TriadQuality::Major,
    })
}

const NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

/// Button label for a degree: roman numeral by triad quality plus the
/// extension suffix (`V7`, `ii9`, `IVadd11`, `vii°`)
pub fn chord_label(key: Key, degree: u8, extension: Extension, mode: CompositionMode) -> Result<String> {
    let quality = triad_quality(key, degree)?;
    let numeral = NUMERALS[(degree - 1) as usize];

    let mut label = match quality {
        TriadQuality::Major => numeral.to_string(),
        TriadQuality::Minor => numeral.to_lowercase(),
        TriadQuality::Diminished => format!("{}°", numeral.to_lowercase()),
        TriadQuality::Augmented => format!("{}+", numeral),
    };

    match extension {
        Extension::Triad => {}
        ext if mode == CompositionMode::Additive && ext.allows_additive() => {
            label.push_str(&format!("add{}", ext.number()));
        }
        ext => label.push_str(&ext.number().to_string()),
    }

    Ok(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(value: &str) -> Key {
        Key::from_field_value(value).unwrap()
    }

    #[test]
    fn test_triads_in_c() {
        let c = key("C");
        assert_eq!(generate_chord(&ChordSpec::new(c, 1, Extension::Triad)).unwrap(), "[CEG]");
        assert_eq!(generate_chord(&ChordSpec::new(c, 2, Extension::Triad)).unwrap(), "[DFA]");
        assert_eq!(generate_chord(&ChordSpec::new(c, 5, Extension::Triad)).unwrap(), "[GBd]");
        assert_eq!(generate_chord(&ChordSpec::new(c, 7, Extension::Triad)).unwrap(), "[Bdf]");
    }

    #[test]
    fn test_cumulative_ninth() {
        let spec = ChordSpec::new(key("C"), 1, Extension::Ninth);
        assert_eq!(generate_chord(&spec).unwrap(), "[CEGBd]");
    }

    #[test]
    fn test_additive_ninth_drops_seventh() {
        let spec = ChordSpec::new(key("C"), 1, Extension::Ninth).additive(true);
        assert_eq!(generate_chord(&spec).unwrap(), "[CEGd]");
    }

    #[test]
    fn test_thirteenth_stacks_all_thirds() {
        let spec = ChordSpec::new(key("C"), 1, Extension::Thirteenth);
        assert_eq!(generate_chord(&spec).unwrap(), "[CEGBdfa]");
    }

    #[test]
    fn test_additive_top_is_compound() {
        // G B d plus E: E lands at 16 after the ascending pass, one octave
        // short of a compound interval over G (7 + 12)
        let spec = ChordSpec::new(key("C"), 5, Extension::Thirteenth).additive(true);
        assert_eq!(generate_chord(&spec).unwrap(), "[GBde']");
    }

    #[test]
    fn test_sharp_key_carries_accidentals() {
        let spec = ChordSpec::new(key("D"), 1, Extension::Triad);
        assert_eq!(generate_chord(&spec).unwrap(), "[D^FA]");

        let spec = ChordSpec::new(key("D"), 5, Extension::Seventh);
        assert_eq!(generate_chord(&spec).unwrap(), "[A^ceg]");
    }

    #[test]
    fn test_octave_boost_keeps_base_octave() {
        let spec = ChordSpec::new(key("C"), 1, Extension::Ninth).octave_boost(true);
        assert_eq!(generate_chord(&spec).unwrap(), "[CEGBD]");

        let spec = ChordSpec::new(key("C"), 1, Extension::Ninth)
            .additive(true)
            .octave_boost(true);
        assert_eq!(generate_chord(&spec).unwrap(), "[CEGD]");
    }

    #[test]
    fn test_voicing_strictly_ascends() {
        for value in ["C", "Am", "F#", "Bb", "Ebdor", "Gmix", "Bloc"] {
            for degree in 1..=7 {
                for ext in [3, 7, 9, 11, 13] {
                    for additive in [false, true] {
                        let spec = ChordSpec::new(key(value), degree, Extension::from_number(ext).unwrap())
                            .additive(additive);
                        let tones = voice_chord(&spec).unwrap();
                        assert!(
                            tones.windows(2).all(|w| w[0].value < w[1].value),
                            "{:?} not ascending",
                            spec
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_invalid_degree() {
        let spec = ChordSpec::new(key("C"), 8, Extension::Triad);
        assert_eq!(generate_chord(&spec), Err(AnalysisError::InvalidDegree(8)));
        let spec = ChordSpec::new(key("C"), 0, Extension::Triad);
        assert!(generate_chord(&spec).is_err());
    }

    #[test]
    fn test_rest_request() {
        assert_eq!(render_request(&ChordRequest::Rest).unwrap(), "z");
    }

    #[test]
    fn test_labels() {
        let c = key("C");
        let cumulative = CompositionMode::Cumulative;
        assert_eq!(chord_label(c, 1, Extension::Triad, cumulative).unwrap(), "I");
        assert_eq!(chord_label(c, 2, Extension::Triad, cumulative).unwrap(), "ii");
        assert_eq!(chord_label(c, 5, Extension::Seventh, cumulative).unwrap(), "V7");
        assert_eq!(chord_label(c, 7, Extension::Triad, cumulative).unwrap(), "vii°");
        assert_eq!(
            chord_label(c, 4, Extension::Eleventh, CompositionMode::Additive).unwrap(),
            "IVadd11"
        );
        // Additive is meaningless for a seventh; label it plainly
        assert_eq!(
            chord_label(c, 5, Extension::Seventh, CompositionMode::Additive).unwrap(),
            "V7"
        );
    }
}
