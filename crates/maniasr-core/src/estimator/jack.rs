//! Same-column jack strain (Jbar).

use crate::estimator::grid::{Base, Corners, Series};
use crate::estimator::math::pow_floor;
use crate::estimator::preprocess::Prepared;
use crate::estimator::smooth::{Smoothing, smooth};

/// Interval recorded where a column has no following note.
pub const NO_NEIGHBOR_DELTA: f64 = 1e9;

#[derive(Debug, Clone)]
pub struct JackStrain {
    /// Power-mean of the smoothed per-column jack strain.
    pub bar: Series<Base>,
    /// Interval (s) to the next note of each column, per base corner.
    pub deltas: Vec<Series<Base>>,
}

/// Penalty applied to a jack interval, strongest around 80 ms.
pub fn jack_nerfer(delta: f64) -> f64 {
    1.0 - 7e-5 * (0.15 + (delta - 0.08).abs()).powi(-4)
}

/// Strain of one jack interval `delta` (s) at leniency `x`.
pub fn jack_strain(delta: f64, leniency: f64) -> f64 {
    let val = delta.recip() * (delta + 0.11 * pow_floor(leniency, 0.25)).recip();
    val * jack_nerfer(delta)
}

pub fn compute(prepared: &Prepared, corners: &Corners<Base>) -> JackStrain {
    let key_count = prepared.key_count;
    let mut per_column = Vec::with_capacity(key_count);
    let mut deltas = Vec::with_capacity(key_count);

    for column in &prepared.by_column {
        let mut strain = corners.zeros();
        let mut delta_series = corners.filled(NO_NEIGHBOR_DELTA);

        for pair in column.windows(2) {
            let (start, end) = (pair[0].start, pair[1].start);
            let span = corners.span(start as f64, end as f64);
            if span.is_empty() {
                continue;
            }
            let delta = 0.001 * (end - start) as f64;
            let value = jack_strain(delta, prepared.leniency);
            for i in span {
                strain[i] = value;
                delta_series[i] = delta;
            }
        }

        per_column.push(smooth(corners, &strain, Smoothing::STRAIN));
        deltas.push(delta_series);
    }

    let values = (0..corners.len())
        .map(|i| {
            let mut numerator = 0.0;
            let mut denominator = 0.0;
            for (smoothed, delta) in per_column.iter().zip(&deltas) {
                let weight = delta[i].recip();
                numerator += pow_floor(smoothed[i], 5.0) * weight;
                denominator += weight;
            }
            pow_floor(numerator / denominator.max(1e-9), 0.2)
        })
        .collect();

    JackStrain {
        bar: Series::from_values(corners, values),
        deltas,
    }
}
