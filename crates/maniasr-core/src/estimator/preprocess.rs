//! Rate scaling, ordering and per-chart constants.

use crate::chart::Chart;
use crate::error::{Error, Result};
use crate::estimator::cross::MAX_KEY_COUNT;

/// A note after rate scaling, times in integral milliseconds.
///
/// `end` is `Some` only for long notes (`end > start`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaledNote {
    pub column: usize,
    pub start: i64,
    pub end: Option<i64>,
}

impl ScaledNote {
    pub fn is_long(&self) -> bool {
        self.end.is_some()
    }

    /// Release time: the tail of a long note, the head of a tap.
    pub fn release(&self) -> i64 {
        self.end.unwrap_or(self.start)
    }

    pub fn duration(&self) -> i64 {
        self.release() - self.start
    }
}

/// Chart state shared by every stage of the pipeline.
#[derive(Debug, Clone)]
pub struct Prepared {
    /// All notes sorted by `(start, column)`.
    pub notes: Vec<ScaledNote>,
    /// Notes of each column, sorted by start.
    pub by_column: Vec<Vec<ScaledNote>>,
    /// Long notes sorted by tail.
    pub tails: Vec<ScaledNote>,
    pub key_count: usize,
    /// Chart length `T`: latest start or end plus one.
    pub duration: i64,
    /// Hit leniency `x` in seconds.
    pub leniency: f64,
}

impl Prepared {
    pub fn long_notes(&self) -> impl Iterator<Item = &ScaledNote> {
        self.notes.iter().filter(|n| n.is_long())
    }
}

/// Timing tolerance for a key count, in seconds. Shrinks as keys are added.
pub fn hit_leniency(key_count: usize) -> f64 {
    let radicand = ((64.5 - (3.0 * key_count as f64).ceil()) / 500.0).max(0.0);
    let x = 0.3 * radicand.sqrt();
    x.min(0.6 * (x - 0.09) + 0.09)
}

/// Largest scaled time magnitude (ms). Grid and window offsets are added to
/// scaled times without overflow checks.
pub const MAX_SCALED_TIME_MS: i64 = i64::MAX / 4;

fn scale_time(time: f64, rate: f64) -> Result<i64> {
    if !time.is_finite() {
        return Err(Error::NonFinite {
            stage: "preprocess",
        });
    }
    let scaled = (time / rate).floor();
    if !scaled.is_finite() || scaled.abs() > MAX_SCALED_TIME_MS as f64 {
        return Err(Error::TimeOutOfRange(scaled));
    }
    Ok(scaled as i64)
}

pub fn prepare(chart: &Chart, rate: f64) -> Result<Prepared> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(Error::InvalidRate(rate));
    }
    let key_count = chart.key_count();
    if key_count == 0 {
        return Err(Error::InvalidKeyCount(key_count));
    }
    if key_count > MAX_KEY_COUNT {
        return Err(Error::UnsupportedKeyCount {
            key_count,
            max: MAX_KEY_COUNT,
        });
    }
    match chart.note_count() {
        0 => return Err(Error::EmptyChart),
        n @ 1 => return Err(Error::TooFewNotes(n)),
        _ => {}
    }

    let mut notes = Vec::with_capacity(chart.note_count());
    for note in chart.notes() {
        if note.column >= key_count {
            return Err(Error::ColumnOutOfRange {
                column: note.column,
                key_count,
            });
        }
        let start = scale_time(note.start, rate)?;
        let end = match note.end {
            Some(end) => Some(scale_time(end, rate)?).filter(|&end| end > start),
            None => None,
        };
        notes.push(ScaledNote {
            column: note.column,
            start,
            end,
        });
    }
    notes.sort_by_key(|n| (n.start, n.column));

    let mut by_column = vec![Vec::new(); key_count];
    for note in &notes {
        by_column[note.column].push(*note);
    }

    let mut tails: Vec<ScaledNote> = notes.iter().filter(|n| n.is_long()).copied().collect();
    tails.sort_by_key(|n| n.release());

    let duration = notes
        .iter()
        .map(|n| n.start.max(n.release()))
        .max()
        .unwrap_or(0)
        + 1;

    Ok(Prepared {
        notes,
        by_column,
        tails,
        key_count,
        duration,
        leniency: hit_leniency(key_count),
    })
}
