//! Duration accounting for a single measure
//!
//! Turns the raw text of a measure into its elapsed duration, counted in
//! unit note lengths (`L:`). The pipeline is:
//!
//! 1. strip everything that can look like a note but isn't one (quoted
//!    chord symbols/annotations, `!deco!`/`+deco+`, `{grace}` groups,
//!    inline fields, `%` remnants)
//! 2. one left-to-right pass over tuplet markers, bracketed chords and
//!    single notes/rests, in that priority
//! 3. sum the item durations, scaled by any pending tuplet factor
//!
//! Input is whatever the user has typed so far, so nothing here fails: a
//! suffix that does not parse counts as a multiplier of 1, and an item
//! whose length cannot be added to the running total without overflowing
//! is left out of it.

use num_rational::Ratio;
use num_traits::{CheckedAdd, CheckedMul};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Exact duration arithmetic. Sums of coprime divisors grow fast, so the
/// totals are 64-bit and accumulated with checked operations.
pub type Rational = Ratio<i64>;

/// Unit note length when a tune has no `L:` field
pub fn default_unit_length() -> Rational {
    Rational::new(1, 8)
}

/// Numbers in suffixes and tuplet markers above this are treated as typos
const MAX_SUFFIX_NUMBER: i64 = 4096;

/// More slashes than this is not a duration anyone means
const MAX_SLASHES: usize = 8;

static STRIP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#""[^"]*"?"#,
        r"|![^!]*!",
        r"|\+[^+]*\+",
        r"|\{[^}]*\}?",
        r"|\[[A-Za-z+]:[^\]]*\]?",
        r"|%.*",
    ))
    .expect("strip pattern is valid")
});

static ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?P<tuplet>\((?P<p>\d+)(?::(?P<q>\d*))?(?::(?P<r>\d*))?)",
        r"|(?P<chord>\[(?P<inner>[^\[\]|]*)\](?P<chord_len>\d*/*\d*))",
        r"|(?P<note>(?:\^\^|\^|__|_|=)?(?P<letter>[A-Ga-gzZxX])[,']*(?P<note_len>\d*/*\d*))",
    ))
    .expect("item pattern is valid")
});

static NOTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\^\^|\^|__|_|=)?[A-Ga-g][,']*(?P<len>\d*/*\d*)").expect("note pattern is valid")
});

/// Kind of a timed item in a measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Note,
    Rest,
    Chord,
}

/// One timed item after preprocessing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasureItem {
    pub kind: ItemKind,
    /// Item text as it appears in the preprocessed measure
    pub text: String,
    /// Duration in unit note lengths, tuplet scaling applied
    pub duration: Rational,
}

/// Remove annotations, decorations, grace notes, inline fields and comment
/// remnants. Removed text is replaced by a space so neighbours stay apart.
pub fn preprocess(measure: &str) -> String {
    STRIP.replace_all(measure, " ").into_owned()
}

/// Parse a duration suffix (`""`, `2`, `/`, `//`, `/4`, `3/2`) into a
/// multiplier of the unit note length
pub fn parse_length_suffix(suffix: &str) -> Rational {
    let digits_end = suffix
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(suffix.len());
    let (num_str, rest) = suffix.split_at(digits_end);
    let slashes = rest.chars().take_while(|&c| c == '/').count();
    let den_str = &rest[slashes..];

    let numerator = match parse_bounded(num_str) {
        Some(n) => n,
        None if num_str.is_empty() => 1,
        None => return malformed(suffix),
    };

    if slashes == 0 {
        if !den_str.is_empty() {
            return malformed(suffix);
        }
        return Rational::from_integer(numerator);
    }
    if slashes > MAX_SLASHES {
        return malformed(suffix);
    }

    let denominator = if den_str.is_empty() {
        1 << slashes
    } else {
        match parse_bounded(den_str) {
            Some(d) => d,
            None => return malformed(suffix),
        }
    };

    Rational::new(numerator, denominator)
}

fn parse_bounded(digits: &str) -> Option<i64> {
    digits
        .parse::<i64>()
        .ok()
        .filter(|n| (1..=MAX_SUFFIX_NUMBER).contains(n))
}

fn malformed(suffix: &str) -> Rational {
    log::warn!("Unreadable duration suffix '{}', counting it as 1", suffix);
    Rational::from_integer(1)
}

/// Default `q` of a `(p` tuplet
fn default_tuplet_q(p: i64) -> i64 {
    match p {
        3 | 6 | 9 => 2,
        2 | 4 | 8 => 3,
        _ => p,
    }
}

/// A tuplet still waiting for items to compress
#[derive(Debug, Clone, Copy)]
struct PendingTuplet {
    factor: Rational,
    remaining: i64,
}

impl PendingTuplet {
    fn from_captures(caps: &Captures<'_>) -> Option<Self> {
        let p = caps.name("p").and_then(|m| parse_bounded(m.as_str()))?;
        let q = caps
            .name("q")
            .and_then(|m| parse_bounded(m.as_str()))
            .unwrap_or_else(|| default_tuplet_q(p));
        let r = caps
            .name("r")
            .and_then(|m| parse_bounded(m.as_str()))
            .unwrap_or(p);

        Some(Self {
            factor: Rational::new(q, p),
            remaining: r,
        })
    }

    /// Scale one item; returns false once the tuplet is used up
    fn apply(&mut self, duration: Rational) -> (Rational, bool) {
        self.remaining -= 1;
        (duration * self.factor, self.remaining > 0)
    }
}

/// Split a measure into timed items
pub fn measure_items(measure: &str) -> Vec<MeasureItem> {
    let cleaned = preprocess(measure);
    let mut items = Vec::new();
    let mut tuplet: Option<PendingTuplet> = None;

    for caps in ITEM.captures_iter(&cleaned) {
        if caps.name("tuplet").is_some() {
            tuplet = PendingTuplet::from_captures(&caps);
            continue;
        }

        let (kind, text, duration) = if let Some(chord) = caps.name("chord") {
            let inner = caps.name("inner").map_or("", |m| m.as_str());
            // The first pitch's own length, times the chord's trailing length
            let Some(first) = NOTE.captures(inner) else {
                continue;
            };
            let inner_len = parse_length_suffix(first.name("len").map_or("", |m| m.as_str()));
            let outer_len = parse_length_suffix(caps.name("chord_len").map_or("", |m| m.as_str()));
            (ItemKind::Chord, chord.as_str(), inner_len * outer_len)
        } else if let Some(note) = caps.name("note") {
            let is_rest = caps
                .name("letter")
                .map_or(false, |m| matches!(m.as_str(), "z" | "Z" | "x" | "X"));
            let kind = if is_rest { ItemKind::Rest } else { ItemKind::Note };
            let len = parse_length_suffix(caps.name("note_len").map_or("", |m| m.as_str()));
            (kind, note.as_str(), len)
        } else {
            continue;
        };

        let duration = match tuplet.as_mut() {
            Some(pending) => {
                let (scaled, still_pending) = pending.apply(duration);
                if !still_pending {
                    tuplet = None;
                }
                scaled
            }
            None => duration,
        };

        items.push(MeasureItem {
            kind,
            text: text.to_string(),
            duration,
        });
    }

    items
}

/// Sum of the item durations, each scaled by `scale`. Items that would
/// overflow the total are skipped with a warning.
fn scaled_total(items: &[MeasureItem], scale: Rational) -> Rational {
    items.iter().fold(Rational::from_integer(0), |total, item| {
        match item
            .duration
            .checked_mul(&scale)
            .and_then(|scaled| total.checked_add(&scaled))
        {
            Some(sum) => sum,
            None => {
                log::warn!("Duration of '{}' overflows the measure total, skipping it", item.text);
                total
            }
        }
    })
}

/// Total duration of a measure in unit note lengths
pub fn unit_count(measure: &str) -> Rational {
    scaled_total(&measure_items(measure), Rational::from_integer(1))
}

/// Elapsed duration of a measure in multiples of `base_unit`: the unit
/// count scaled by the unit. With `base_unit = 1` this is the unit count
/// itself; with the tune's `L:` value it is a fraction of a whole note,
/// directly comparable with the meter.
pub fn duration(measure: &str, base_unit: Rational) -> Rational {
    let total = scaled_total(&measure_items(measure), base_unit);
    log::debug!("duration('{}') = {}", measure, total);
    total
}

/// Parse an `L:` value (`1/8`, `1/16`, `1`); `None` if it is not a
/// positive fraction
pub fn parse_unit_length(value: &str) -> Option<Rational> {
    let value = value.split('%').next().unwrap_or("").trim();
    let (num, den) = match value.split_once('/') {
        Some((num, den)) => (num.trim(), den.trim()),
        None => (value, "1"),
    };
    let num = parse_bounded(num)?;
    let den = parse_bounded(den)?;
    Some(Rational::new(num, den))
}
