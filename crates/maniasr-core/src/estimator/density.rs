//! Local note density (C) and chord width (Ks).

use crate::config::usage::DENSITY_RADIUS_MS;
use crate::estimator::grid::{Base, Corners, Series};
use crate::estimator::key_usage::KeyUsage;
use crate::estimator::preprocess::Prepared;
use crate::estimator::step::lower_bound;

/// Number of note onsets within `[t - 500, t + 500)` of each corner.
pub fn note_density(prepared: &Prepared, corners: &Corners<Base>) -> Series<Base> {
    let onsets: Vec<f64> = prepared.notes.iter().map(|n| n.start as f64).collect();
    let radius = DENSITY_RADIUS_MS as f64;
    let values = corners
        .times()
        .iter()
        .map(|&t| (lower_bound(&onsets, t + radius) - lower_bound(&onsets, t - radius)) as f64)
        .collect();
    Series::from_values(corners, values)
}

/// Number of occupied columns at each corner, at least 1.
pub fn active_width(usage: &KeyUsage) -> Series<Base> {
    usage.active.map(|columns| columns.len().max(1) as f64)
}
