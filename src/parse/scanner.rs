//! Line-based fallback scanner
//!
//! Builds a `FlatTree` carrying just the nodes the validator reads, for
//! hosts that have no ABC grammar of their own (and for tests). It works a
//! line at a time through `classify_line`; music is only searched for
//! inline `[K:...]` style fields.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::tables;
use crate::structure::line_analysis::{classify_line, LineKind};
use crate::text::{SourceText, TextSpan};

use super::tree::{node_names, FlatTree};

static INLINE_FIELD_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([A-Za-z+]):").expect("inline field key pattern is valid"));

/// Whitespace-separated words of `text` with document char spans. A word
/// starting with `%` ends the scan (trailing comment).
fn words(text: &str, offset: usize) -> Vec<(TextSpan, &str)> {
    let mut out = Vec::new();
    let mut start: Option<(usize, usize)> = None;
    let mut chars = 0;

    for (ci, (bi, ch)) in text.char_indices().enumerate() {
        chars = ci + 1;
        if ch.is_whitespace() {
            if let Some((cs, bs)) = start.take() {
                out.push((TextSpan::new(offset + cs, offset + ci), &text[bs..bi]));
            }
        } else if start.is_none() {
            if ch == '%' {
                return out;
            }
            start = Some((ci, bi));
        }
    }
    if let Some((cs, bs)) = start {
        out.push((TextSpan::new(offset + cs, offset + chars), &text[bs..]));
    }
    out
}

/// Split `name=value` into the two spans; `None` without a leading name
fn split_assignment(span: TextSpan, word: &str) -> Option<(TextSpan, TextSpan)> {
    let (name, _) = word.split_once('=')?;
    if name.is_empty() {
        return None;
    }
    let eq = span.from + name.chars().count();
    Some((TextSpan::new(span.from, eq), TextSpan::new(eq + 1, span.to)))
}

fn scan_midi(tree: &mut FlatTree, args: &[(TextSpan, &str)]) {
    let mut has_attribute = false;

    for &(span, word) in args {
        if let Some((name, value)) = split_assignment(span, word) {
            tree.push(node_names::MIDI_ATTRIBUTE, name);
            if !value.is_empty() {
                tree.push(node_names::MIDI_VALUE, value);
            }
            has_attribute = true;
        } else if !has_attribute || tables::midi_attribute(word).is_some() {
            tree.push(node_names::MIDI_ATTRIBUTE, span);
            has_attribute = true;
        } else {
            tree.push(node_names::MIDI_VALUE, span);
        }
    }
}

fn scan_directive(tree: &mut FlatTree, text: &str, line: TextSpan) {
    let body = &text[2..];
    let mut parts = words(body, line.from + 2).into_iter();

    let Some((span, keyword)) = parts.next() else {
        return;
    };
    // Only a keyword glued to the `%%` is a directive name
    if span.from != line.from + 2 {
        return;
    }
    tree.push(node_names::DIRECTIVE_KEYWORD, span);

    if keyword == "MIDI" {
        let args: Vec<_> = parts.collect();
        scan_midi(tree, &args);
    }
}

fn scan_field(tree: &mut FlatTree, text: &str, line: TextSpan, key: char) {
    let key_span = TextSpan::new(line.from, line.from + 1);
    let (key_node, attribute_node) = match key {
        'K' => (node_names::KEY_INFO_KEY, Some(node_names::KEY_ATTRIBUTE)),
        'V' => (node_names::VOICE_INFO_KEY, Some(node_names::VOICE_ATTRIBUTE)),
        _ => (node_names::INFO_KEY, None),
    };
    tree.push(key_node, key_span);

    if let Some(attribute_node) = attribute_node {
        for (span, word) in words(&text[2..], line.from + 2) {
            // `=f` is a natural in an explicit key signature, not an attribute
            if split_assignment(span, word).is_some() {
                tree.push(attribute_node, span);
            }
        }
    }
}

fn scan_inline_fields(tree: &mut FlatTree, src: &SourceText<'_>, text: &str, line: TextSpan) {
    let line_byte = src.byte_of(line.from);
    for caps in INLINE_FIELD_KEY.captures_iter(text) {
        let Some(key) = caps.get(1) else { continue };
        let span = src.span_of_bytes(line_byte + key.start(), line_byte + key.end());
        let name = match key.as_str() {
            "K" => node_names::KEY_INFO_KEY,
            "V" => node_names::VOICE_INFO_KEY,
            _ => node_names::INFO_KEY,
        };
        tree.push(name, span);
    }
}

/// Scan a whole document into validator nodes, in document order
pub fn scan_document(text: &str) -> FlatTree {
    let src = SourceText::new(text);
    let mut tree = FlatTree::new();

    for (_, span, line) in src.lines() {
        match classify_line(line) {
            LineKind::Directive => scan_directive(&mut tree, line, span),
            LineKind::Header(key) => scan_field(&mut tree, line, span, key),
            LineKind::Lyric => tree.push(node_names::INFO_KEY, TextSpan::new(span.from, span.from + 1)),
            LineKind::Music => scan_inline_fields(&mut tree, &src, line, span),
            LineKind::Comment | LineKind::Blank => {}
        }
    }

    log::debug!("scanned {} nodes", tree.len());
    tree
}
