//! Anchor multiplier: load concentrated on few columns is harder.

use crate::estimator::grid::{Base, Corners, Series};
use crate::estimator::key_usage::KeyUsage;

/// Balance of the sustained usage across columns at one corner, in `[0, 1]`.
///
/// Zero when fewer than two columns carry any load.
pub fn usage_balance(counts: &mut Vec<f64>) -> f64 {
    counts.retain(|&c| c != 0.0);
    if counts.len() < 2 {
        return 0.0;
    }
    counts.sort_by(|a, b| b.total_cmp(a));

    let mut walk = 0.0;
    let mut max_walk = 0.0;
    for pair in counts.windows(2) {
        let ratio = pair[1] / pair[0];
        walk += pair[0] * (1.0 - 4.0 * (0.5 - ratio).powi(2));
        max_walk += pair[0];
    }
    walk / max_walk
}

pub fn compute(corners: &Corners<Base>, usage: &KeyUsage) -> Series<Base> {
    let mut counts = Vec::with_capacity(usage.sustained.len());
    let values = (0..corners.len())
        .map(|i| {
            counts.clear();
            counts.extend(usage.sustained.iter().map(|column| column[i]));
            let anchor = usage_balance(&mut counts);
            1.0 + (anchor - 0.18).min(5.0 * (anchor - 0.22).powi(3))
        })
        .collect();
    Series::from_values(corners, values)
}
