//! Pitch letters, accidentals and the integer pitch value used for voicing
//!
//! A pitch value is a semitone offset from the C of the base (upper-case)
//! octave: `C=0 D=2 E=4 F=5 G=7 A=9 B=11`, accidentals add their delta, and
//! every octave up adds 12. Rendering goes back to ABC spelling: upper-case
//! letters for the base octave, lower-case one octave up, and one `'` per
//! further octave.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The seven natural pitch letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NoteLetter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteLetter {
    pub const ALL: [NoteLetter; 7] = [
        NoteLetter::C,
        NoteLetter::D,
        NoteLetter::E,
        NoteLetter::F,
        NoteLetter::G,
        NoteLetter::A,
        NoteLetter::B,
    ];

    /// Parse a letter, case-insensitive
    pub fn from_char(ch: char) -> Option<NoteLetter> {
        match ch.to_ascii_uppercase() {
            'C' => Some(NoteLetter::C),
            'D' => Some(NoteLetter::D),
            'E' => Some(NoteLetter::E),
            'F' => Some(NoteLetter::F),
            'G' => Some(NoteLetter::G),
            'A' => Some(NoteLetter::A),
            'B' => Some(NoteLetter::B),
            _ => None,
        }
    }

    /// Semitones above C of the natural letter
    pub fn semitone(&self) -> i32 {
        match self {
            NoteLetter::C => 0,
            NoteLetter::D => 2,
            NoteLetter::E => 4,
            NoteLetter::F => 5,
            NoteLetter::G => 7,
            NoteLetter::A => 9,
            NoteLetter::B => 11,
        }
    }

    /// Position in C D E F G A B order
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The letter `steps` positions above this one (wrapping)
    pub fn step(&self, steps: usize) -> NoteLetter {
        NoteLetter::ALL[(self.index() + steps) % 7]
    }

    pub fn upper(&self) -> char {
        match self {
            NoteLetter::C => 'C',
            NoteLetter::D => 'D',
            NoteLetter::E => 'E',
            NoteLetter::F => 'F',
            NoteLetter::G => 'G',
            NoteLetter::A => 'A',
            NoteLetter::B => 'B',
        }
    }

    pub fn lower(&self) -> char {
        self.upper().to_ascii_lowercase()
    }
}

/// Accidental attached to a spelled pitch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Accidental {
    #[default]
    None,
    Sharp,
    Flat,
    DoubleSharp,
    DoubleFlat,
}

impl Accidental {
    /// Semitone delta applied to the natural letter
    pub fn semitone_offset(&self) -> i32 {
        match self {
            Accidental::None => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
            Accidental::DoubleSharp => 2,
            Accidental::DoubleFlat => -2,
        }
    }

    /// Accidental for a semitone delta, if it is one we can spell
    pub fn from_offset(offset: i32) -> Option<Accidental> {
        match offset {
            0 => Some(Accidental::None),
            1 => Some(Accidental::Sharp),
            -1 => Some(Accidental::Flat),
            2 => Some(Accidental::DoubleSharp),
            -2 => Some(Accidental::DoubleFlat),
            _ => None,
        }
    }

    /// ABC prefix (`^`, `_`, `^^`, `__`)
    pub fn abc_prefix(&self) -> &'static str {
        match self {
            Accidental::None => "",
            Accidental::Sharp => "^",
            Accidental::Flat => "_",
            Accidental::DoubleSharp => "^^",
            Accidental::DoubleFlat => "__",
        }
    }

    /// Human-readable suffix (`#`, `b`) used in key names
    pub fn symbol(&self) -> &'static str {
        match self {
            Accidental::None => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
            Accidental::DoubleSharp => "##",
            Accidental::DoubleFlat => "bb",
        }
    }
}

/// A letter plus accidental, without octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PitchClass {
    pub letter: NoteLetter,
    pub accidental: Accidental,
}

impl PitchClass {
    pub fn new(letter: NoteLetter, accidental: Accidental) -> Self {
        Self { letter, accidental }
    }

    /// Pitch value in the base octave (may fall outside 0-11 for Cb, B#, ...)
    pub fn base_value(&self) -> i32 {
        self.letter.semitone() + self.accidental.semitone_offset()
    }

    /// Chromatic class 0-11
    pub fn chroma(&self) -> i32 {
        self.base_value().rem_euclid(12)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter.upper(), self.accidental.symbol())
    }
}

/// A spelled pitch with an absolute pitch value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoicedPitch {
    pub class: PitchClass,
    pub value: i32,
}

impl VoicedPitch {
    /// Place a pitch class in the base octave
    pub fn base(class: PitchClass) -> Self {
        Self {
            class,
            value: class.base_value(),
        }
    }

    /// Octaves above the base octave, measured on the letter so that
    /// B# and Cb stay in the octave their letter belongs to
    pub fn octave(&self) -> i32 {
        (self.value - self.class.base_value()).div_euclid(12)
    }

    /// ABC spelling: accidental prefix, letter case, octave markers
    pub fn to_abc(&self) -> String {
        let octave = self.octave();
        let mut out = String::from(self.class.accidental.abc_prefix());

        if octave <= 0 {
            out.push(self.class.letter.upper());
            for _ in 0..(-octave) {
                out.push(',');
            }
        } else {
            out.push(self.class.letter.lower());
            for _ in 1..octave {
                out.push('\'');
            }
        }
        out
    }
}
