// Measure duration accounting against a unit note length

use abc_editor_wasm::structure::duration::{duration, measure_items, unit_count, ItemKind, Rational};

fn units(measure: &str) -> Rational {
    duration(measure, Rational::from_integer(1))
}

#[test]
fn test_plain_lengths() {
    assert_eq!(units("C"), Rational::from_integer(1));
    assert_eq!(units("C2"), Rational::from_integer(2));
    assert_eq!(units("C/2"), Rational::new(1, 2));
    assert_eq!(units("C/"), Rational::new(1, 2));
    assert_eq!(units("C//"), Rational::new(1, 4));
    assert_eq!(units("C3/2"), Rational::new(3, 2));
}

#[test]
fn test_chord_uses_outer_length() {
    assert_eq!(units("[CEG]2"), Rational::from_integer(2));
    assert_eq!(units("[CEG]"), Rational::from_integer(1));
}

#[test]
fn test_triplet_compresses_three_into_two() {
    assert_eq!(units("(3CDE"), Rational::from_integer(2));
    // Only the next three notes are affected
    assert_eq!(units("(3CDE F"), Rational::from_integer(3));
}

#[test]
fn test_rests_count() {
    assert_eq!(units("z2 C z"), Rational::from_integer(4));
}

#[test]
fn test_base_unit_scales_total() {
    let eighth = Rational::new(1, 8);
    assert_eq!(duration("ABcd efga", eighth), Rational::new(1, 1));
    assert_eq!(unit_count("ABcd efga"), Rational::from_integer(8));
}

#[test]
fn test_decorations_and_annotations_ignored() {
    assert_eq!(units("\"Am\"!trill!A {g}B"), Rational::from_integer(2));
}

#[test]
fn test_item_kinds() {
    let kinds: Vec<ItemKind> = measure_items("A z [CE]").iter().map(|i| i.kind).collect();
    assert_eq!(kinds, [ItemKind::Note, ItemKind::Rest, ItemKind::Chord]);
}

#[test]
fn test_malformed_suffix_falls_back_to_one() {
    assert_eq!(units("C0"), Rational::from_integer(1));
}
