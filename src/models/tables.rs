//! Canonical lookup tables for ABC names
//!
//! One table per concern, each a plain key → description map built once.
//! Both the validator and the JS surface (for completion/hover text) read
//! these; there are no other copies.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Channels a `%%MIDI` line can address
pub const MIDI_CHANNEL_RANGE: (i64, i64) = (1, 16);

/// A `%%MIDI` attribute; numeric ones carry an inclusive value range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiAttributeSpec {
    pub description: &'static str,
    pub range: Option<(i64, i64)>,
    /// Accepts an optional channel before the value (`program 10 73`)
    pub channel_prefix: bool,
}

/// A `name=value` attribute on a `K:` or `V:` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAttributeSpec {
    pub description: &'static str,
    /// Enumerated valid values; `None` means free-form
    pub values: Option<&'static [&'static str]>,
}

const CLEF_VALUES: &[&str] = &[
    "treble", "bass", "alto", "tenor", "baritone", "soprano", "mezzosoprano", "perc", "none",
    "treble+8", "treble-8", "treble8", "bass+8", "bass-8", "bass3", "alto1", "alto2", "tab",
];

const STEM_VALUES: &[&str] = &["up", "down", "auto"];

const BOOL_VALUES: &[&str] = &["0", "1", "true", "false", "yes", "no"];

lazy_static! {
    /// Stylesheet and processing directives (`%%name ...`)
    pub static ref DIRECTIVES: HashMap<&'static str, &'static str> = [
        ("MIDI", "MIDI playback instruction"),
        ("abc-charset", "Character set of the file"),
        ("abc-version", "ABC standard version of the file"),
        ("abc-include", "Include another ABC file"),
        ("abc-creator", "Program that created the file"),
        ("pagewidth", "Page width"),
        ("pageheight", "Page height"),
        ("topmargin", "Top page margin"),
        ("botmargin", "Bottom page margin"),
        ("leftmargin", "Left page margin"),
        ("rightmargin", "Right page margin"),
        ("indent", "Indentation of the first staff"),
        ("landscape", "Landscape page orientation"),
        ("scale", "Page scale factor"),
        ("staffwidth", "Staff width"),
        ("staffsep", "Space between systems"),
        ("sysstaffsep", "Space between staves of a system"),
        ("titlefont", "Font of the title"),
        ("subtitlefont", "Font of subtitles"),
        ("composerfont", "Font of the composer line"),
        ("partsfont", "Font of part names"),
        ("tempofont", "Font of tempo markings"),
        ("gchordfont", "Font of chord symbols"),
        ("annotationfont", "Font of annotations"),
        ("infofont", "Font of info lines"),
        ("textfont", "Font of free text"),
        ("vocalfont", "Font of lyrics under the staff"),
        ("wordsfont", "Font of lyrics after the tune"),
        ("voicefont", "Font of voice names"),
        ("footerfont", "Font of the page footer"),
        ("headerfont", "Font of the page header"),
        ("setfont-1", "User font 1"),
        ("setfont-2", "User font 2"),
        ("setfont-3", "User font 3"),
        ("setfont-4", "User font 4"),
        ("newpage", "Start a new page"),
        ("text", "Line of free text"),
        ("center", "Centered line of text"),
        ("begintext", "Start of a free text block"),
        ("endtext", "End of a free text block"),
        ("sep", "Separator line"),
        ("vskip", "Vertical space"),
        ("score", "Voice grouping on the score"),
        ("staves", "Voice grouping on staves"),
        ("transpose", "Transpose the tune"),
        ("propagate-accidentals", "Accidental propagation rule"),
        ("writeout-accidentals", "Write out key signature accidentals"),
        ("linebreak", "Line break behaviour"),
        ("continueall", "Ignore line ends in the music"),
        ("measurenb", "Measure numbering"),
        ("barnumbers", "Bar numbering"),
        ("measurebox", "Draw boxes around measure numbers"),
        ("titlecaps", "Upper-case titles"),
        ("titleleft", "Left-align titles"),
        ("stretchlast", "Stretch the last staff"),
        ("stretchstaff", "Stretch staves to the full width"),
        ("graceslurs", "Slurs on grace notes"),
        ("partsbox", "Draw boxes around part labels"),
        ("header", "Page header text"),
        ("footer", "Page footer text"),
        ("format", "Load a format file"),
        ("deco", "Define a decoration"),
        ("ornament", "Ornament style"),
        ("percmap", "Percussion note mapping"),
        ("postscript", "Raw PostScript"),
        ("beginps", "Start of a PostScript block"),
        ("endps", "End of a PostScript block"),
        ("gchord", "Chord symbol placement"),
        ("vocal", "Lyrics placement"),
        ("infoline", "Rhythm and origin on one line"),
        ("composerspace", "Space before the composer line"),
        ("musicspace", "Space before the music"),
        ("titlespace", "Space before the title"),
        ("subtitlespace", "Space before subtitles"),
        ("wordsspace", "Space before trailing lyrics"),
        ("textspace", "Space before free text"),
        ("partsspace", "Space before part labels"),
        ("vocalspace", "Space before lyrics under the staff"),
    ]
    .into_iter()
    .collect();

    /// Information field keys (`K:`, `M:`, `L:`, ...)
    pub static ref INFO_FIELDS: HashMap<&'static str, &'static str> = [
        ("A", "Area"),
        ("B", "Book"),
        ("C", "Composer"),
        ("D", "Discography"),
        ("F", "File URL"),
        ("G", "Group"),
        ("H", "History"),
        ("I", "Instruction"),
        ("K", "Key"),
        ("L", "Unit note length"),
        ("M", "Meter"),
        ("m", "Macro"),
        ("N", "Notes"),
        ("O", "Origin"),
        ("P", "Parts"),
        ("Q", "Tempo"),
        ("R", "Rhythm"),
        ("r", "Remark"),
        ("S", "Source"),
        ("s", "Symbol line"),
        ("T", "Title"),
        ("U", "User defined symbol"),
        ("V", "Voice"),
        ("W", "Words after the tune"),
        ("w", "Words under the staff"),
        ("X", "Reference number"),
        ("Z", "Transcription"),
        ("+", "Field continuation"),
    ]
    .into_iter()
    .collect();

    /// `%%MIDI` attributes
    pub static ref MIDI_ATTRIBUTES: HashMap<&'static str, MidiAttributeSpec> = [
        ("program", MidiAttributeSpec { description: "Instrument (General MIDI program)", range: Some((0, 127)), channel_prefix: true }),
        ("chordprog", MidiAttributeSpec { description: "Instrument for accompaniment chords", range: Some((0, 127)), channel_prefix: false }),
        ("channel", MidiAttributeSpec { description: "MIDI channel of the voice", range: Some(MIDI_CHANNEL_RANGE), channel_prefix: false }),
        ("bassprog", MidiAttributeSpec { description: "Instrument for accompaniment bass", range: None, channel_prefix: false }),
        ("transpose", MidiAttributeSpec { description: "Playback transposition in semitones", range: None, channel_prefix: false }),
        ("gchord", MidiAttributeSpec { description: "Accompaniment pattern", range: None, channel_prefix: false }),
        ("gchordon", MidiAttributeSpec { description: "Enable accompaniment", range: None, channel_prefix: false }),
        ("gchordoff", MidiAttributeSpec { description: "Disable accompaniment", range: None, channel_prefix: false }),
        ("chordvol", MidiAttributeSpec { description: "Accompaniment chord volume", range: None, channel_prefix: false }),
        ("bassvol", MidiAttributeSpec { description: "Accompaniment bass volume", range: None, channel_prefix: false }),
        ("drum", MidiAttributeSpec { description: "Drum pattern", range: None, channel_prefix: false }),
        ("drumon", MidiAttributeSpec { description: "Enable drum pattern", range: None, channel_prefix: false }),
        ("drumoff", MidiAttributeSpec { description: "Disable drum pattern", range: None, channel_prefix: false }),
        ("beat", MidiAttributeSpec { description: "Note velocities by beat position", range: None, channel_prefix: false }),
        ("nobarlines", MidiAttributeSpec { description: "Do not reset accidentals at bar lines", range: None, channel_prefix: false }),
        ("ratio", MidiAttributeSpec { description: "Broken rhythm ratio", range: None, channel_prefix: false }),
        ("grace", MidiAttributeSpec { description: "Grace note length fraction", range: None, channel_prefix: false }),
        ("temperamentnormal", MidiAttributeSpec { description: "Equal temperament", range: None, channel_prefix: false }),
        ("chordname", MidiAttributeSpec { description: "Define a chord shape", range: None, channel_prefix: false }),
    ]
    .into_iter()
    .collect();

    /// Attributes accepted on `V:` fields
    pub static ref VOICE_ATTRIBUTES: HashMap<&'static str, FieldAttributeSpec> = [
        ("name", FieldAttributeSpec { description: "Voice name shown on the first staff", values: None }),
        ("nm", FieldAttributeSpec { description: "Voice name (short form)", values: None }),
        ("subname", FieldAttributeSpec { description: "Voice name shown on later staves", values: None }),
        ("snm", FieldAttributeSpec { description: "Voice subname (short form)", values: None }),
        ("clef", FieldAttributeSpec { description: "Clef of the voice", values: Some(CLEF_VALUES) }),
        ("stem", FieldAttributeSpec { description: "Stem direction", values: Some(STEM_VALUES) }),
        ("octave", FieldAttributeSpec { description: "Octave shift", values: None }),
        ("transpose", FieldAttributeSpec { description: "Transposition in semitones", values: None }),
        ("middle", FieldAttributeSpec { description: "Note on the middle staff line", values: None }),
        ("stafflines", FieldAttributeSpec { description: "Number of staff lines", values: None }),
        ("merge", FieldAttributeSpec { description: "Share the previous voice's staff", values: Some(BOOL_VALUES) }),
    ]
    .into_iter()
    .collect();

    /// Attributes accepted on `K:` fields
    pub static ref KEY_ATTRIBUTES: HashMap<&'static str, FieldAttributeSpec> = [
        ("clef", FieldAttributeSpec { description: "Clef", values: Some(CLEF_VALUES) }),
        ("middle", FieldAttributeSpec { description: "Note on the middle staff line", values: None }),
        ("transpose", FieldAttributeSpec { description: "Transposition in semitones", values: None }),
        ("octave", FieldAttributeSpec { description: "Octave shift", values: None }),
        ("stafflines", FieldAttributeSpec { description: "Number of staff lines", values: None }),
    ]
    .into_iter()
    .collect();
}

pub fn is_known_directive(name: &str) -> bool {
    DIRECTIVES.contains_key(name)
}

pub fn is_known_info_field(key: &str) -> bool {
    INFO_FIELDS.contains_key(key)
}

pub fn midi_attribute(name: &str) -> Option<&'static MidiAttributeSpec> {
    MIDI_ATTRIBUTES.get(name)
}
