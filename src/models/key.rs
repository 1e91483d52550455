//! Key signatures: tonic plus one of the seven diatonic modes
//!
//! Keys are parsed from `K:` field values and re-derived on every context
//! update; they are never stored apart from the document.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::tonic::Tonic;
use crate::error::{self, AnalysisError};

/// Diatonic mode, in rotation order of the major scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Major,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Minor,
    Locrian,
}

impl Mode {
    /// Which degree of the major scale this mode starts on (0-based)
    pub fn rotation(&self) -> usize {
        match self {
            Mode::Major => 0,
            Mode::Dorian => 1,
            Mode::Phrygian => 2,
            Mode::Lydian => 3,
            Mode::Mixolydian => 4,
            Mode::Minor => 5,
            Mode::Locrian => 6,
        }
    }

    /// Modes with a major third display as major, the rest as minor
    pub fn has_major_third(&self) -> bool {
        matches!(self, Mode::Major | Mode::Lydian | Mode::Mixolydian)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Dorian => "dorian",
            Mode::Phrygian => "phrygian",
            Mode::Lydian => "lydian",
            Mode::Mixolydian => "mixolydian",
            Mode::Minor => "minor",
            Mode::Locrian => "locrian",
        }
    }

    /// Parse the mode word of a key field. ABC only looks at the first
    /// three letters, case-insensitively; a lone `m` means minor.
    pub fn from_abc(word: &str) -> Option<Mode> {
        let lower = word.trim().to_ascii_lowercase();
        if lower.is_empty() {
            return Some(Mode::Major);
        }
        if lower == "m" {
            return Some(Mode::Minor);
        }

        let prefix: String = lower.chars().take(3).collect();
        match prefix.as_str() {
            "maj" | "ion" => Some(Mode::Major),
            "min" | "aeo" => Some(Mode::Minor),
            "dor" => Some(Mode::Dorian),
            "phr" => Some(Mode::Phrygian),
            "lyd" => Some(Mode::Lydian),
            "mix" => Some(Mode::Mixolydian),
            "loc" => Some(Mode::Locrian),
            _ => None,
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::from_abc(s).ok_or_else(|| format!("Invalid mode: '{}'", s))
    }
}

/// A key signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Key {
    pub tonic: Tonic,
    pub mode: Mode,
}

impl Key {
    pub fn new(tonic: Tonic, mode: Mode) -> Self {
        Self { tonic, mode }
    }

    /// C major, used whenever a tune declares no usable key
    pub fn c_major() -> Self {
        Self::default()
    }

    /// Strict construction from names (`"F#"`, `"minor"`). Unlike
    /// `from_field_value` this rejects anything it cannot read.
    pub fn from_names(tonic: &str, mode: &str) -> error::Result<Key> {
        let tonic: Tonic = tonic.parse().map_err(AnalysisError::InvalidKey)?;
        let mode: Mode = mode.parse().map_err(AnalysisError::InvalidKey)?;
        Ok(Key::new(tonic, mode))
    }

    /// Parse a `K:` field value such as `G`, `Dmix`, `F# minor`, `Bb clef=bass`.
    ///
    /// Returns `None` for values without a tonic (`none`, `HP`, clef-only
    /// fields) and for unknown mode words; callers fall back to C major.
    pub fn from_field_value(value: &str) -> Option<Key> {
        let value = value.split('%').next().unwrap_or("").trim();
        let (tonic, rest) = Tonic::parse_prefix(value)?;

        // The mode word, if any, is whatever follows the tonic up to the
        // first explicit accidental or attribute
        let mode_word = rest
            .split_whitespace()
            .next()
            .filter(|w| !w.contains('=') && !w.starts_with(['^', '_', '=']))
            .unwrap_or("");
        let mode = Mode::from_abc(mode_word)?;

        Some(Key::new(tonic, mode))
    }

    /// Header label, modes normalised to major/minor ("D major", "E minor")
    pub fn label(&self) -> String {
        let quality = if self.mode.has_major_third() {
            "major"
        } else {
            "minor"
        };
        format!("{} {}", self.tonic, quality)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic, self.mode.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pitch::{Accidental, NoteLetter};

    #[test]
    fn test_plain_major_keys() {
        let key = Key::from_field_value("G").unwrap();
        assert_eq!(key.tonic.letter, NoteLetter::G);
        assert_eq!(key.mode, Mode::Major);

        let key = Key::from_field_value(" Bb ").unwrap();
        assert_eq!(key.tonic.accidental, Accidental::Flat);
    }

    #[test]
    fn test_mode_words() {
        assert_eq!(Key::from_field_value("Em").unwrap().mode, Mode::Minor);
        assert_eq!(Key::from_field_value("A minor").unwrap().mode, Mode::Minor);
        assert_eq!(Key::from_field_value("Dmix").unwrap().mode, Mode::Mixolydian);
        assert_eq!(Key::from_field_value("E Dorian").unwrap().mode, Mode::Dorian);
        assert_eq!(Key::from_field_value("F#aeolian").unwrap().mode, Mode::Minor);
        assert_eq!(Key::from_field_value("CLoc").unwrap().mode, Mode::Locrian);
    }

    #[test]
    fn test_attributes_and_comments_are_ignored() {
        let key = Key::from_field_value("D clef=bass").unwrap();
        assert_eq!(key.mode, Mode::Major);
        let key = Key::from_field_value("Am % relative minor").unwrap();
        assert_eq!(key.mode, Mode::Minor);
        let key = Key::from_field_value("D ^c").unwrap();
        assert_eq!(key.tonic.letter, NoteLetter::D);
    }

    #[test]
    fn test_values_without_a_key() {
        assert!(Key::from_field_value("none").is_none());
        assert!(Key::from_field_value("").is_none());
        assert!(Key::from_field_value("clef=treble").is_none());
        assert!(Key::from_field_value("G bogus").is_none());
    }

    #[test]
    fn test_label_normalises_modes() {
        assert_eq!(Key::from_field_value("D").unwrap().label(), "D major");
        assert_eq!(Key::from_field_value("Em").unwrap().label(), "E minor");
        assert_eq!(Key::from_field_value("Gmix").unwrap().label(), "G major");
        assert_eq!(Key::from_field_value("Ador").unwrap().label(), "A minor");
    }
}
