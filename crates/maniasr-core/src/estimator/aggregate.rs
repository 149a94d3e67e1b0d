//! Percentile-weighted aggregation of the difficulty curve.

use crate::config::aggregation::{
    COMPRESSION_DIVISOR, COMPRESSION_THRESHOLD, LENGTH_PADDING_NOTES, LOWER_PERCENTILES,
    POWER_MEAN_EXPONENT, UPPER_PERCENTILES,
};
use crate::error::{Error, Result};
use crate::estimator::combine::Combined;
use crate::estimator::grid::{Corners, Union};
use crate::estimator::math::pow_floor;
use crate::estimator::preprocess::Prepared;
use crate::estimator::step::lower_bound;

/// Summary statistics of the weighted difficulty distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub upper_percentile: f64,
    pub lower_percentile: f64,
    pub power_mean: f64,
    /// Blend of the three, before length scaling.
    pub raw: f64,
}

/// Half the distance to the neighbouring corners, one-sided at the ends.
fn corner_gaps(times: &[f64]) -> Vec<f64> {
    let n = times.len();
    (0..n)
        .map(|i| {
            let left = times[i.saturating_sub(1)];
            let right = times[(i + 1).min(n - 1)];
            (right - left) / 2.0
        })
        .collect()
}

pub fn aggregate(corners: &Corners<Union>, combined: &Combined) -> Result<Aggregate> {
    let times = corners.times();
    if times.len() < 2 {
        return Err(Error::NonFinite { stage: "aggregate" });
    }

    let weights: Vec<f64> = corner_gaps(times)
        .iter()
        .zip(combined.density.iter())
        .map(|(gap, density)| gap * density)
        .collect();
    let difficulty = combined.difficulty.values();

    let mut order: Vec<usize> = (0..difficulty.len()).collect();
    order.sort_by(|&a, &b| difficulty[a].total_cmp(&difficulty[b]));
    let sorted: Vec<f64> = order.iter().map(|&i| difficulty[i]).collect();
    let sorted_weights: Vec<f64> = order.iter().map(|&i| weights[i]).collect();

    let mut cumulative = Vec::with_capacity(sorted_weights.len());
    let mut running = 0.0;
    for w in &sorted_weights {
        running += w;
        cumulative.push(running);
    }
    let total = running;
    if total <= 0.0 || !total.is_finite() {
        return Err(Error::NonFinite { stage: "aggregate" });
    }
    for c in &mut cumulative {
        *c /= total;
    }

    let percentile_mean = |targets: &[f64]| {
        let last = sorted.len() - 1;
        targets
            .iter()
            .map(|&p| sorted[lower_bound(&cumulative, p).min(last)])
            .sum::<f64>()
            / targets.len() as f64
    };
    let upper_percentile = percentile_mean(&UPPER_PERCENTILES);
    let lower_percentile = percentile_mean(&LOWER_PERCENTILES);

    let weighted: f64 = sorted
        .iter()
        .zip(&sorted_weights)
        .map(|(d, w)| pow_floor(*d, POWER_MEAN_EXPONENT) * w)
        .sum();
    let power_mean = pow_floor(weighted / total, POWER_MEAN_EXPONENT.recip());

    let raw = 0.25 * 0.88 * upper_percentile + 0.2 * 0.94 * lower_percentile + 0.55 * power_mean;

    Ok(Aggregate {
        upper_percentile,
        lower_percentile,
        power_mean,
        raw,
    })
}

/// Note count with long notes credited for their (capped) hold length.
pub fn total_note_weight(prepared: &Prepared) -> f64 {
    let hold_credit: f64 = prepared
        .long_notes()
        .map(|n| n.duration().min(1000) as f64 / 200.0)
        .sum();
    prepared.notes.len() as f64 + 0.5 * hold_credit
}

/// Suppression factor for short charts.
pub fn length_factor(total_notes: f64) -> f64 {
    total_notes / (total_notes + LENGTH_PADDING_NOTES)
}

/// Compress ratings above the top of the scale.
pub fn compress_high(rating: f64) -> f64 {
    if rating > COMPRESSION_THRESHOLD {
        COMPRESSION_THRESHOLD + (rating - COMPRESSION_THRESHOLD) / COMPRESSION_DIVISOR
    } else {
        rating
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_gaps() {
        assert_eq!(corner_gaps(&[0.0, 10.0, 30.0, 31.0]), vec![5.0, 15.0, 10.5, 0.5]);
    }

    #[test]
    fn test_compress_high() {
        assert_eq!(compress_high(5.0), 5.0);
        assert_eq!(compress_high(9.0), 9.0);
        assert_eq!(compress_high(12.0), 9.0 + (12.0 - 9.0) / 1.2);
    }

    #[test]
    fn test_length_factor_ratio() {
        let short = length_factor(10.0);
        let long = length_factor(200.0);
        assert!((short - 10.0 / 70.0).abs() < 1e-15);
        assert!((short / long - (10.0 / 70.0) / (200.0 / 260.0)).abs() < 1e-12);
    }
}
