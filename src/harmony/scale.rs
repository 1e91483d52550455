//! Diatonic scale spelling for a key
//!
//! Degrees are spelled by letter first: degree N of a scale always uses the
//! letter N-1 steps above the tonic letter, and the accidental is whatever
//! it takes to land on the semitone the mode's step pattern asks for.
//!
//! Example: in E major, degree 2 is F#; in Eb major, degree 4 is Ab.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::models::key::{Key, Mode};
use crate::models::pitch::{Accidental, PitchClass};
use crate::models::tonic::Tonic;

/// Whole/half step pattern of the major scale: W W H W W W H
const MAJOR_STEPS: [i32; 7] = [2, 2, 1, 2, 2, 2, 1];

/// Seven spelled degrees, degree 1 first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    degrees: [PitchClass; 7],
}

impl Scale {
    /// Spell the scale of a key
    pub fn new(key: Key) -> Result<Self> {
        let offsets = mode_offsets(key.mode);
        let tonic_value = key.tonic.letter.semitone() + key.tonic.accidental.semitone_offset();

        let mut degrees = [key.tonic.pitch_class(); 7];
        for (i, offset) in offsets.iter().enumerate() {
            let letter = key.tonic.letter.step(i);
            let target = tonic_value + offset;
            // Distance from the natural letter, folded into -6..=5
            let delta = (target - letter.semitone() + 6).rem_euclid(12) - 6;
            let accidental = Accidental::from_offset(delta)
                .ok_or_else(|| AnalysisError::InvalidKey(key.to_string()))?;
            degrees[i] = PitchClass::new(letter, accidental);
        }

        Ok(Self { degrees })
    }

    /// Spell a scale from tonic and mode names (e.g. `"F#"`, `"minor"`)
    pub fn from_names(tonic: &str, mode: &str) -> Result<Self> {
        Self::new(Key::from_names(tonic, mode)?)
    }

    /// The seven degrees in order
    pub fn degrees(&self) -> &[PitchClass; 7] {
        &self.degrees
    }

    /// Pitch class of a 1-based degree; wraps modulo 7 (degree 8 = degree 1)
    pub fn note(&self, degree: i32) -> PitchClass {
        self.degrees[(degree - 1).rem_euclid(7) as usize]
    }
}

/// Semitone offsets from the tonic for each degree of a mode
fn mode_offsets(mode: Mode) -> [i32; 7] {
    let rotation = mode.rotation();
    let mut offsets = [0i32; 7];
    let mut acc = 0;
    for (i, offset) in offsets.iter_mut().enumerate() {
        *offset = acc;
        acc += MAJOR_STEPS[(rotation + i) % 7];
    }
    offsets
}

/// Scale of a key as an ordered list of seven pitch classes
pub fn scale(tonic: Tonic, mode: Mode) -> Result<Scale> {
    Scale::new(Key::new(tonic, mode))
}

/// Pitch class of a 1-based scale degree (octave is left to the caller)
pub fn note(tonic: Tonic, mode: Mode, degree: i32) -> Result<PitchClass> {
    Ok(scale(tonic, mode)?.note(degree))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(scale: &Scale) -> Vec<String> {
        scale.degrees().iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_c_major() {
        let s = Scale::from_names("C", "major").unwrap();
        assert_eq!(names(&s), ["C", "D", "E", "F", "G", "A", "B"]);
    }

    #[test]
    fn test_sharp_and_flat_keys() {
        let s = Scale::from_names("E", "major").unwrap();
        assert_eq!(names(&s), ["E", "F#", "G#", "A", "B", "C#", "D#"]);

        let s = Scale::from_names("Eb", "major").unwrap();
        assert_eq!(names(&s), ["Eb", "F", "G", "Ab", "Bb", "C", "D"]);
    }

    #[test]
    fn test_modes_are_rotations() {
        let s = Scale::from_names("A", "minor").unwrap();
        assert_eq!(names(&s), ["A", "B", "C", "D", "E", "F", "G"]);

        let s = Scale::from_names("D", "dorian").unwrap();
        assert_eq!(names(&s), ["D", "E", "F", "G", "A", "B", "C"]);

        let s = Scale::from_names("G", "mixolydian").unwrap();
        assert_eq!(names(&s), ["G", "A", "B", "C", "D", "E", "F"]);

        let s = Scale::from_names("F#", "minor").unwrap();
        assert_eq!(names(&s), ["F#", "G#", "A", "B", "C#", "D", "E"]);
    }

    #[test]
    fn test_theoretical_keys_use_double_accidentals() {
        let s = Scale::from_names("D#", "major").unwrap();
        assert_eq!(names(&s), ["D#", "E#", "F##", "G#", "A#", "B#", "C##"]);
    }

    #[test]
    fn test_degree_wraps() {
        let s = Scale::from_names("G", "major").unwrap();
        assert_eq!(s.note(7).to_string(), "F#");

        for tonic in ["C", "G", "F#", "Bb", "Eb"] {
            for mode in ["major", "dorian", "lydian", "minor", "locrian"] {
                let s = Scale::from_names(tonic, mode).unwrap();
                for degree in 1..=7 {
                    assert_eq!(s.note(degree), s.degrees()[(degree - 1) as usize], "{} {}", tonic, mode);
                    assert_eq!(s.note(degree), s.note(degree + 7), "{} {}", tonic, mode);
                    assert_eq!(s.note(degree), s.note(degree - 7), "{} {}", tonic, mode);
                }
            }
        }
    }

    #[test]
    fn test_unknown_names_fail() {
        assert!(matches!(
            Scale::from_names("H", "major"),
            Err(AnalysisError::InvalidKey(_))
        ));
        assert!(matches!(
            Scale::from_names("C", "bogus"),
            Err(AnalysisError::InvalidKey(_))
        ));
    }
}
