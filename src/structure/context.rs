//! Cursor context resolution
//!
//! Maps a cursor offset to the musical context in force there: the key,
//! unit note length and meter of the enclosing tune, and the span of the
//! measure under the cursor.
//!
//! ## Field lookup
//!
//! A tune starts at an `X:` line and runs to the next one. Within those
//! bounds the last matching field before the cursor wins, whether it is a
//! standalone `K:` line or an inline `[K:...]`. When nothing precedes the
//! cursor, the first one after it is used instead, so a chord bar shown on
//! the header lines already reflects the tune's key.
//!
//! ## Measure span
//!
//! Only music lines have a measure. The span runs from just after the
//! nearest `|` or `::` before the cursor (or the line start) to just before
//! the nearest one after it (or the line end).
//!
//! Nothing here is cached; the host re-runs it on every cursor move.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::models::key::Key;
use crate::text::{SourceText, TextSpan};

use super::bar_fill::{bar_fill, BarFill, Meter};
use super::duration::{default_unit_length, duration, parse_unit_length, unit_count, Rational};
use super::line_analysis::{classify_line, LineKind};

static INLINE_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(?P<key>[A-Za-z]):(?P<value>[^\]]*)\]").expect("inline field pattern is valid")
});

/// Everything the editor needs to know about the cursor position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MusicalContext {
    pub key: Key,
    /// Measure under the cursor; empty on non-music lines
    pub measure: TextSpan,
    /// Unit note length (`L:`) as a fraction of a whole note
    pub base_unit: Rational,
    /// Meter (`M:`); `None` for free meter
    pub meter: Option<Meter>,
}

/// A field assignment found in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldOccurrence<'a> {
    offset: usize,
    value: &'a str,
}

/// Lines `[start, end)` of the tune containing `line`
pub fn tune_lines(src: &SourceText<'_>, line: usize) -> Range<usize> {
    let is_start = |l: usize| classify_line(src.line_text(l)).is_tune_start();

    let start = (0..=line).rev().find(|&l| is_start(l)).unwrap_or(0);
    let end = (line + 1..src.line_count())
        .find(|&l| is_start(l))
        .unwrap_or(src.line_count());

    start..end
}

/// Every assignment of field `key` within some lines, in document order
fn field_occurrences<'a>(src: &SourceText<'a>, lines: Range<usize>, key: char) -> Vec<FieldOccurrence<'a>> {
    let mut found = Vec::new();

    for line in lines {
        let span = src.line_span(line);
        let text = src.line_text(line);

        match classify_line(text) {
            LineKind::Header(k) if k == key => {
                found.push(FieldOccurrence {
                    offset: span.from,
                    value: &text[2..],
                });
            }
            LineKind::Music => {
                let line_byte = src.byte_of(span.from);
                for caps in INLINE_FIELD.captures_iter(text) {
                    let (Some(whole), Some(k), Some(value)) =
                        (caps.get(0), caps.name("key"), caps.name("value"))
                    else {
                        continue;
                    };
                    if k.as_str().starts_with(key) {
                        found.push(FieldOccurrence {
                            offset: src.char_of(line_byte + whole.start()),
                            value: value.as_str(),
                        });
                    }
                }
            }
            _ => {}
        }
    }

    found
}

/// The last occurrence before the cursor, else the first after it
fn value_in_scope<'a>(occurrences: &[FieldOccurrence<'a>], cursor: usize) -> Option<&'a str> {
    occurrences
        .iter()
        .rev()
        .find(|o| o.offset < cursor)
        .or_else(|| occurrences.iter().find(|o| o.offset >= cursor))
        .map(|o| o.value)
}

fn field_in_scope<'a>(src: &SourceText<'a>, cursor: usize, key: char) -> Option<&'a str> {
    let cursor = src.clamp(cursor);
    let tune = tune_lines(src, src.line_of(cursor));
    value_in_scope(&field_occurrences(src, tune, key), cursor)
}

/// Key in force at the cursor (C major if the tune has none)
pub fn resolve_key(src: &SourceText<'_>, cursor: usize) -> Key {
    match field_in_scope(src, cursor, 'K') {
        Some(value) => Key::from_field_value(value).unwrap_or_else(|| {
            log::warn!("Unreadable key field 'K:{}', using C major", value.trim());
            Key::c_major()
        }),
        None => Key::c_major(),
    }
}

/// Unit note length in force at the cursor (1/8 if the tune has none)
pub fn resolve_unit_length(src: &SourceText<'_>, cursor: usize) -> Rational {
    field_in_scope(src, cursor, 'L')
        .and_then(|value| {
            parse_unit_length(value).or_else(|| {
                log::warn!("Unreadable unit length 'L:{}', using 1/8", value.trim());
                None
            })
        })
        .unwrap_or_else(default_unit_length)
}

/// Meter in force at the cursor (4/4 if the tune has none, `None` if free)
pub fn resolve_meter(src: &SourceText<'_>, cursor: usize) -> Option<Meter> {
    match field_in_scope(src, cursor, 'M') {
        Some(value) => match Meter::from_field_value(value) {
            Some(field) => field.meter(),
            None => {
                log::warn!("Unreadable meter 'M:{}', using 4/4", value.trim());
                Some(Meter::common_time())
            }
        },
        None => Some(Meter::common_time()),
    }
}

/// Span of the measure under the cursor, delimiters excluded. Header,
/// directive, comment, lyric and blank lines yield an empty span.
pub fn measure_span(src: &SourceText<'_>, cursor: usize) -> TextSpan {
    let cursor = src.clamp(cursor);
    let line = src.line_span(src.line_of(cursor));
    if !classify_line(src.slice(line)).is_music() {
        return TextSpan::empty_at(cursor);
    }

    let chars: Vec<char> = src.slice(line).chars().collect();
    let local = cursor - line.from;
    let is_double_colon = |i: usize| chars[i] == ':' && chars.get(i + 1) == Some(&':');

    let mut start = 0;
    let mut i = 0;
    while i < local {
        if chars[i] == '|' {
            start = i + 1;
        } else if i + 2 <= local && is_double_colon(i) {
            start = i + 2;
            i += 1;
        }
        i += 1;
    }

    // A cursor inside `::` sits on the delimiter and belongs to the left measure
    let end = if local > 0 && local < chars.len() && is_double_colon(local - 1) {
        local - 1
    } else {
        (local..chars.len())
            .find(|&j| chars[j] == '|' || is_double_colon(j))
            .unwrap_or(chars.len())
    };

    TextSpan::new(line.from + start, line.from + end)
}

/// Resolve key, measure, unit length and meter at a cursor offset
pub fn resolve_context(text: &str, cursor: usize) -> MusicalContext {
    let src = SourceText::new(text);
    resolve_in(&src, cursor)
}

/// `resolve_context` over an already indexed document
pub fn resolve_in(src: &SourceText<'_>, cursor: usize) -> MusicalContext {
    let context = MusicalContext {
        key: resolve_key(src, cursor),
        measure: measure_span(src, cursor),
        base_unit: resolve_unit_length(src, cursor),
        meter: resolve_meter(src, cursor),
    };
    log::debug!(
        "context at {}: key={}, measure={:?}",
        cursor,
        context.key,
        context.measure
    );
    context
}

/// Context plus the duration and bar fill of the measure under the cursor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorAnalysis {
    pub key: Key,
    pub key_label: String,
    pub measure: TextSpan,
    /// Measure duration in unit note lengths
    pub units: (i64, i64),
    /// Measure duration as a fraction of a whole note
    pub elapsed: (i64, i64),
    pub fill: BarFill,
}

/// Everything the editor re-renders on a cursor move, in one pass
pub fn analyze_cursor(text: &str, cursor: usize) -> CursorAnalysis {
    let src = SourceText::new(text);
    let context = resolve_in(&src, cursor);
    let measure_text = src.slice(context.measure);

    let units = unit_count(measure_text);
    let elapsed = duration(measure_text, context.base_unit);

    CursorAnalysis {
        key: context.key,
        key_label: context.key.label(),
        measure: context.measure,
        units: (*units.numer(), *units.denom()),
        elapsed: (*elapsed.numer(), *elapsed.denom()),
        fill: bar_fill(elapsed, context.meter),
    }
}
