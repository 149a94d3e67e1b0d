//! Cross-column / trill strain (Xbar).

use crate::error::{Error, Result};
use crate::estimator::grid::{Base, Corners, Series};
use crate::estimator::key_usage::KeyUsage;
use crate::estimator::math::pow_floor;
use crate::estimator::preprocess::{Prepared, ScaledNote};
use crate::estimator::smooth::{Smoothing, smooth};

/// Largest key count with ergonomic coefficients.
pub const MAX_KEY_COUNT: usize = 10;

/// Coefficients of the `K + 1` slots (outer edges and gaps between adjacent
/// columns), indexed by `K - 1`.
const CROSS_MATRIX: [&[f64]; MAX_KEY_COUNT] = [
    &[0.075, 0.075],
    &[0.125, 0.05, 0.125],
    &[0.125, 0.125, 0.125, 0.125],
    &[0.175, 0.25, 0.05, 0.25, 0.175],
    &[0.175, 0.25, 0.175, 0.175, 0.25, 0.175],
    &[0.225, 0.35, 0.25, 0.05, 0.25, 0.35, 0.225],
    &[0.225, 0.35, 0.25, 0.225, 0.225, 0.25, 0.35, 0.225],
    &[0.275, 0.45, 0.35, 0.25, 0.05, 0.25, 0.35, 0.45, 0.275],
    &[0.275, 0.45, 0.35, 0.25, 0.275, 0.275, 0.25, 0.35, 0.45, 0.275],
    &[0.625, 0.55, 0.45, 0.35, 0.25, 0.05, 0.25, 0.35, 0.45, 0.55, 0.625],
];

pub fn cross_coefficients(key_count: usize) -> Result<&'static [f64]> {
    match key_count {
        1..=MAX_KEY_COUNT => Ok(CROSS_MATRIX[key_count - 1]),
        _ => Err(Error::UnsupportedKeyCount {
            key_count,
            max: MAX_KEY_COUNT,
        }),
    }
}

/// Notes of both columns around slot `slot`, merged by start time.
///
/// Slot 0 and slot `K` see only the outermost column.
fn slot_notes(by_column: &[Vec<ScaledNote>], slot: usize) -> Vec<ScaledNote> {
    let key_count = by_column.len();
    if slot == 0 {
        return by_column[0].clone();
    }
    if slot == key_count {
        return by_column[key_count - 1].clone();
    }

    let (left, right) = (&by_column[slot - 1], &by_column[slot]);
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        if left[i].start <= right[j].start {
            merged.push(left[i]);
            i += 1;
        } else {
            merged.push(right[j]);
            j += 1;
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    merged
}

pub fn compute(
    prepared: &Prepared,
    corners: &Corners<Base>,
    usage: &KeyUsage,
) -> Result<Series<Base>> {
    let key_count = prepared.key_count;
    let coeffs = cross_coefficients(key_count)?;
    let x = prepared.leniency;

    let mut cross: Vec<Series<Base>> = Vec::with_capacity(key_count + 1);
    let mut fast_cross: Vec<Series<Base>> = Vec::with_capacity(key_count + 1);

    for (slot, &coeff) in coeffs.iter().enumerate() {
        let mut slot_cross = corners.zeros();
        let mut slot_fast = corners.zeros();
        let left_active = |i: usize| slot > 0 && usage.is_active(i, slot - 1);
        let right_active = |i: usize| slot < key_count && usage.is_active(i, slot);

        for pair in slot_notes(&prepared.by_column, slot).windows(2) {
            let (start, end) = (pair[0].start, pair[1].start);
            let span = corners.span(start as f64, end as f64);
            if span.is_empty() {
                continue;
            }
            let (first, last) = (span.start, span.end);
            let delta = 0.001 * (end - start) as f64;

            let mut value = 0.16 * pow_floor(x.max(delta), -2.0);
            if (!left_active(first) && !left_active(last))
                || (!right_active(first) && !right_active(last))
            {
                value *= 1.0 - coeff;
            }
            let fast = (0.4 * pow_floor(delta.max(0.06).max(0.75 * x), -2.0) - 80.0).max(0.0);

            for i in span {
                slot_cross[i] = value;
                slot_fast[i] = fast;
            }
        }

        cross.push(slot_cross);
        fast_cross.push(slot_fast);
    }

    let values = (0..corners.len())
        .map(|i| {
            let weighted: f64 = cross
                .iter()
                .zip(coeffs)
                .map(|(slot, &coeff)| slot[i] * coeff)
                .sum();
            let fast: f64 = (0..key_count)
                .map(|k| {
                    (fast_cross[k][i] * coeffs[k] * fast_cross[k + 1][i] * coeffs[k + 1]).sqrt()
                })
                .sum();
            weighted + fast
        })
        .collect();

    Ok(smooth(
        corners,
        &Series::from_values(corners, values),
        Smoothing::STRAIN,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Chart, Note};
    use crate::estimator::grid::CornerGrids;
    use crate::estimator::preprocess::prepare;

    #[test]
    fn test_cross_matrix_shape() {
        for k in 1..=MAX_KEY_COUNT {
            let row = cross_coefficients(k).unwrap();
            assert_eq!(row.len(), k + 1);
            // Rows are mirror images
            let reversed: Vec<f64> = row.iter().rev().copied().collect();
            assert_eq!(row, reversed.as_slice());
        }
    }

    #[test]
    fn test_cross_coefficients_out_of_range() {
        assert!(matches!(
            cross_coefficients(0),
            Err(Error::UnsupportedKeyCount { key_count: 0, .. })
        ));
        assert!(matches!(
            cross_coefficients(11),
            Err(Error::UnsupportedKeyCount { key_count: 11, max: 10 })
        ));
    }

    #[test]
    fn test_slot_notes_merges_adjacent_columns() {
        let chart = Chart::new(
            vec![
                Note::tap(0, 0.0),
                Note::tap(1, 100.0),
                Note::tap(0, 200.0),
                Note::tap(2, 300.0),
            ],
            3,
        )
        .unwrap();
        let prepared = prepare(&chart, 1.0).unwrap();

        let starts = |slot| -> Vec<i64> {
            slot_notes(&prepared.by_column, slot)
                .iter()
                .map(|n| n.start)
                .collect()
        };
        assert_eq!(starts(0), vec![0, 200]);
        assert_eq!(starts(1), vec![0, 100, 200]);
        assert_eq!(starts(2), vec![100, 300]);
        assert_eq!(starts(3), vec![300]);
    }

    fn trill_peak(interval: f64) -> f64 {
        let notes = (0..16)
            .map(|i| Note::tap(i % 2, 1000.0 + i as f64 * interval))
            .collect();
        let prepared = prepare(&Chart::new(notes, 4).unwrap(), 1.0).unwrap();
        let grids = CornerGrids::build(&prepared);
        let usage = KeyUsage::compute(&prepared, &grids.base);
        let bar = compute(&prepared, &grids.base, &usage).unwrap();
        bar.iter().copied().fold(0.0, f64::max)
    }

    #[test]
    fn test_faster_trill_has_more_cross_strain() {
        let slow = trill_peak(250.0);
        let fast = trill_peak(80.0);
        assert!(fast > slow, "fast {} <= slow {}", fast, slow);
        assert!(slow > 0.0);
    }
}
