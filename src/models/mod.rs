//! Models module for the ABC authoring assistant
//!
//! Plain data: pitches, tonics, keys, the lookup tables and the chord-bar
//! widget state.

pub mod editor_state;
pub mod key;
pub mod pitch;
pub mod tables;
pub mod tonic;

// Re-export commonly used types
pub use editor_state::ChordBarState;
pub use key::{Key, Mode};
pub use pitch::{Accidental, NoteLetter, PitchClass, VoicedPitch};
pub use tonic::Tonic;
