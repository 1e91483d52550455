//! Tonic pitch of a key (key center)
//!
//! Any of the seven letters with an optional single sharp or flat. ABC key
//! fields spell them `G`, `F#`, `Bb`; theoretical tonics such as `Fb` or
//! `E#` parse too, the scale model spells their degrees with double
//! accidentals where needed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::pitch::{Accidental, NoteLetter, PitchClass};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tonic {
    pub letter: NoteLetter,
    pub accidental: Accidental,
}

impl Tonic {
    pub const C: Tonic = Tonic {
        letter: NoteLetter::C,
        accidental: Accidental::None,
    };

    pub fn new(letter: NoteLetter, accidental: Accidental) -> Self {
        Self { letter, accidental }
    }

    /// The tonic as a pitch class
    pub fn pitch_class(&self) -> PitchClass {
        PitchClass::new(self.letter, self.accidental)
    }

    /// Split the longest tonic prefix off a key field value (`"F#m"` → `F#`, `"m"`)
    pub fn parse_prefix(s: &str) -> Option<(Tonic, &str)> {
        let first = s.chars().next()?;
        if !first.is_ascii_uppercase() {
            return None;
        }
        let letter = NoteLetter::from_char(first)?;

        let rest = &s[first.len_utf8()..];
        let mut rest_chars = rest.chars();
        let accidental = match rest_chars.next() {
            Some('#') | Some('♯') => Accidental::Sharp,
            Some('b') | Some('♭') => Accidental::Flat,
            _ => Accidental::None,
        };
        let rest = if accidental == Accidental::None {
            rest
        } else {
            rest_chars.as_str()
        };

        Some((Tonic::new(letter, accidental), rest))
    }
}

impl Default for Tonic {
    fn default() -> Self {
        Tonic::C
    }
}

impl fmt::Display for Tonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter.upper(), self.accidental.symbol())
    }
}

impl FromStr for Tonic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Letter case is not significant for a bare tonic name
        let mut chars = s.trim().chars();
        let invalid = || format!("Invalid tonic: '{}'. Expected a letter A-G with optional # or b", s);

        let letter = chars.next().and_then(NoteLetter::from_char).ok_or_else(invalid)?;
        let accidental = match chars.next() {
            None => Accidental::None,
            Some('#') | Some('♯') => Accidental::Sharp,
            Some('b') | Some('B') | Some('♭') => Accidental::Flat,
            Some(_) => return Err(invalid()),
        };
        if chars.next().is_some() {
            return Err(invalid());
        }

        Ok(Tonic::new(letter, accidental))
    }
}
