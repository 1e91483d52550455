//! Harmony: scale spelling and diatonic chord generation
//!
//! Degree-based rather than semitone-based: every key spells its seven
//! degrees by letter, and chords are built by stacking degrees on top of
//! that spelling.
//!
//! ## Modules
//!
//! - `scale`: the seven-note scale of a key, per-degree pitch class
//! - `chord`: chord-button tokens (triads through 13ths, cumulative/additive)

pub mod chord;
pub mod scale;

pub use chord::{
    chord_label, generate_chord, render_request, voice_chord, ChordRequest, ChordSpec,
    CompositionMode, Extension, TriadQuality, REST_TOKEN,
};
pub use scale::{note, scale, Scale};
