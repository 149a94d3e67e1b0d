//! Inter-column imbalance (Abar).
//!
//! Adjacent held columns moving at similar speeds are easier than columns
//! moving at different speeds, so matching pairs scale the value below 1.

use crate::estimator::grid::{Base, CornerGrids, Series, Wide};
use crate::estimator::key_usage::KeyUsage;
use crate::estimator::smooth::{Smoothing, smooth};

/// Speed mismatch of two adjacent columns with jack intervals `d0`, `d1` (s).
pub fn pair_mismatch(d0: f64, d1: f64) -> f64 {
    (d0 - d1).abs() + 0.4 * (d0.max(d1) - 0.11).max(0.0)
}

/// Multiplier for one adjacent pair.
pub fn pair_factor(d0: f64, d1: f64) -> f64 {
    let mismatch = pair_mismatch(d0, d1);
    let slowest = d0.max(d1);
    if mismatch < 0.02 {
        (0.75 + 0.5 * slowest).min(1.0)
    } else if mismatch < 0.07 {
        (0.65 + 5.0 * mismatch + 0.5 * slowest).min(1.0)
    } else {
        1.0
    }
}

pub fn compute(
    grids: &CornerGrids,
    usage: &KeyUsage,
    deltas: &[Series<Base>],
) -> Series<Wide> {
    let values = grids
        .wide
        .times()
        .iter()
        .map(|&t| {
            let i = grids.base.floor_index(t);
            usage
                .active_at(i)
                .windows(2)
                .map(|pair| pair_factor(deltas[pair[0]][i], deltas[pair[1]][i]))
                .product::<f64>()
        })
        .collect();

    smooth(
        &grids.wide,
        &Series::from_values(&grids.wide, values),
        Smoothing::IMBALANCE,
    )
}
