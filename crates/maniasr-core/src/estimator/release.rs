//! Long-note release strain (Rbar).

use crate::estimator::grid::{Base, Corners, Series};
use crate::estimator::math::pow_floor;
use crate::estimator::preprocess::{Prepared, ScaledNote};
use crate::estimator::smooth::{Smoothing, smooth};

/// Start time used when a column has no note after a long note.
const NO_NEXT_NOTE: i64 = 1_000_000_000;

/// Start of the first note in the same column after `note`'s head.
fn next_in_column(prepared: &Prepared, note: &ScaledNote) -> i64 {
    let column = &prepared.by_column[note.column];
    let next = column.partition_point(|n| n.start <= note.start);
    column.get(next).map_or(NO_NEXT_NOTE, |n| n.start)
}

/// Release index of a long note: how awkward its hold length and the gap to
/// the next note in its column are at leniency `x`.
pub fn release_index(hold_ms: i64, gap_ms: i64, leniency: f64) -> f64 {
    let head = 0.001 * (hold_ms - 80).abs() as f64 / leniency;
    let tail = 0.001 * (gap_ms - 80).abs() as f64 / leniency;
    2.0 / (2.0 + (-5.0 * (head - 0.75)).exp() + (-5.0 * (tail - 0.75)).exp())
}

pub fn compute(prepared: &Prepared, corners: &Corners<Base>) -> Series<Base> {
    let x = prepared.leniency;
    let mut step = corners.zeros();

    let indices: Vec<f64> = prepared
        .tails
        .iter()
        .map(|note| {
            let end = note.release();
            release_index(end - note.start, next_in_column(prepared, note) - end, x)
        })
        .collect();

    for (i, pair) in prepared.tails.windows(2).enumerate() {
        let (from, to) = (pair[0].release(), pair[1].release());
        let span = corners.span(from as f64, to as f64);
        if span.is_empty() {
            continue;
        }
        let delta = 0.001 * (to - from) as f64;
        let strain =
            0.08 * pow_floor(delta, -0.5) / x * (1.0 + 0.8 * (indices[i] + indices[i + 1]));
        for j in span {
            step[j] = strain;
        }
    }

    smooth(corners, &step, Smoothing::STRAIN)
}
