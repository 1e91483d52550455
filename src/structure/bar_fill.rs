//! Bar fill: how full the current measure is against the meter
//!
//! Feeds the bar-fill widget: one segment per beat, each 0-100 %, plus an
//! under/exact/over classification that picks the fill color.

use num_traits::{CheckedMul, CheckedSub};
use serde::{Deserialize, Serialize};

use super::duration::Rational;

/// A time signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meter {
    pub beats: i32,
    pub beat_unit: i32,
}

impl Meter {
    pub fn new(beats: i32, beat_unit: i32) -> Self {
        Self { beats, beat_unit }
    }

    pub fn common_time() -> Self {
        Self::new(4, 4)
    }

    /// Parse an `M:` value. `C` is 4/4, `C|` is 2/2, additive numerators
    /// (`2+3/8`) are summed, `none` is free meter. `None` if unreadable.
    pub fn from_field_value(value: &str) -> Option<MeterField> {
        let value = value.split('%').next().unwrap_or("").trim();

        match value {
            "C" => return Some(MeterField::Fixed(Meter::new(4, 4))),
            "C|" => return Some(MeterField::Fixed(Meter::new(2, 2))),
            "none" | "" => return Some(MeterField::Free),
            _ => {}
        }

        let (num, den) = value.split_once('/')?;
        let beats = num
            .trim()
            .trim_matches(|c| c == '(' || c == ')')
            .split('+')
            .map(|n| n.trim().parse::<i32>().ok())
            .sum::<Option<i32>>()?;
        let beat_unit = den.trim().parse::<i32>().ok()?;

        if !(1..=64).contains(&beats) || !(1..=64).contains(&beat_unit) {
            return None;
        }
        Some(MeterField::Fixed(Meter::new(beats, beat_unit)))
    }

    /// Length of one measure as a fraction of a whole note
    pub fn capacity(&self) -> Rational {
        Rational::new(i64::from(self.beats), i64::from(self.beat_unit))
    }

    /// Length of one beat as a fraction of a whole note
    pub fn beat(&self) -> Rational {
        Rational::new(1, i64::from(self.beat_unit))
    }
}

/// A parsed `M:` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeterField {
    Fixed(Meter),
    Free,
}

impl MeterField {
    pub fn meter(&self) -> Option<Meter> {
        match self {
            MeterField::Fixed(meter) => Some(*meter),
            MeterField::Free => None,
        }
    }
}

/// How the measure compares with its capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillClass {
    Under,
    Exact,
    Over,
}

impl FillClass {
    pub fn classify(elapsed: Rational, capacity: Rational) -> Self {
        if elapsed < capacity {
            FillClass::Under
        } else if elapsed == capacity {
            FillClass::Exact
        } else {
            FillClass::Over
        }
    }

    /// Color slot for the widget
    pub fn css_class(&self) -> &'static str {
        match self {
            FillClass::Under => "bar-fill-under",
            FillClass::Exact => "bar-fill-exact",
            FillClass::Over => "bar-fill-over",
        }
    }
}

/// Widget data for one measure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarFill {
    /// Percent filled, one entry per beat
    pub segments: Vec<u8>,
    pub class: FillClass,
}

/// Percent of `[start, end)` covered by `elapsed`. Comparisons cannot
/// overflow; only a partly filled beat needs arithmetic on `elapsed`.
fn beat_percent(elapsed: Rational, start: Rational, end: Rational, beat_unit: i32) -> u8 {
    if elapsed <= start {
        return 0;
    }
    if elapsed >= end {
        return 100;
    }

    // (elapsed - start) / beat * 100, with beat = 1/beat_unit
    let scale = Rational::from_integer(100 * i64::from(beat_unit));
    match elapsed.checked_sub(&start).and_then(|d| d.checked_mul(&scale)) {
        Some(percent) => percent.floor().to_integer().clamp(0, 100) as u8,
        None => {
            log::warn!("Bar fill of {} is too fine to compute, showing the beat empty", elapsed);
            0
        }
    }
}

/// Compute bar fill for an elapsed duration (fraction of a whole note)
pub fn bar_fill(elapsed: Rational, meter: Option<Meter>) -> BarFill {
    let Some(meter) = meter else {
        return BarFill {
            segments: Vec::new(),
            class: FillClass::Under,
        };
    };

    let beat = meter.beat();
    let segments = (0..meter.beats)
        .map(|i| {
            let start = beat * Rational::from_integer(i64::from(i));
            beat_percent(elapsed, start, start + beat, meter.beat_unit)
        })
        .collect();

    BarFill {
        segments,
        class: FillClass::classify(elapsed, meter.capacity()),
    }
}
