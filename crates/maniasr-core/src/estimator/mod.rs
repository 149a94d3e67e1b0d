//! Skill-difficulty estimator.
//!
//! The pipeline turns a chart into one rating in a single pure pass:
//! - `preprocess` - rate scaling, ordering, hit leniency
//! - `grid` - corner grids and grid-tagged series
//! - `smooth`, `step` - windowed integrals over step functions
//! - `key_usage`, `anchor` - finger occupation and load concentration
//! - `jack`, `cross`, `stream`, `imbalance`, `release` - strain bars
//! - `density`, `combine`, `aggregate` - fusion into the final number
//!
//! Nothing is cached between calls; each call is independent and safe to run
//! concurrently.

mod aggregate;
mod anchor;
mod combine;
mod cross;
mod density;
mod grid;
mod imbalance;
mod jack;
mod key_usage;
mod ln;
mod math;
mod preprocess;
mod release;
mod smooth;
mod step;
mod stream;

pub use aggregate::{compress_high, length_factor};
pub use cross::MAX_KEY_COUNT;
pub use preprocess::hit_leniency;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chart::{Chart, Note};
use crate::config::aggregation::FINAL_SCALE;
use crate::config::sentinel::UNAVAILABLE;
use crate::error::{Error, Result};

use combine::Bars;
use grid::CornerGrids;
use key_usage::KeyUsage;
use ln::LnDensity;

/// A computed rating with the intermediate aggregates it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Final rating.
    pub value: f64,
    /// Mean of the ~93rd weighted percentiles of the difficulty curve.
    pub p93: f64,
    /// Mean of the ~83rd weighted percentiles.
    pub p83: f64,
    /// Weighted power mean (p = 5).
    pub mean5: f64,
    /// Blend of the three before length scaling.
    pub raw: f64,
    /// Note count with long-note hold credit.
    pub total_notes: f64,
    /// `raw` after short-chart suppression, before compression.
    pub length_scaled: f64,
    pub note_count: usize,
    pub ln_count: usize,
    pub key_count: usize,
    pub rate: f64,
}

/// Rate a chart, returning the full breakdown or the reason it is unavailable.
pub fn try_rate(chart: &Chart, rate: f64) -> Result<Rating> {
    let prepared = preprocess::prepare(chart, rate)?;
    let grids = CornerGrids::build(&prepared);
    debug!(
        "Rating {} notes ({}K, rate {}): {} base / {} wide / {} union corners",
        prepared.notes.len(),
        prepared.key_count,
        rate,
        grids.base.len(),
        grids.wide.len(),
        grids.all.len()
    );

    let usage = KeyUsage::compute(&prepared, &grids.base);
    let anchor = anchor::compute(&grids.base, &usage);
    let jack = jack::compute(&prepared, &grids.base);
    let cross = cross::compute(&prepared, &grids.base, &usage)?;
    let ln = LnDensity::build(&prepared);
    let stream = stream::compute(&prepared, &grids.base, &ln, &anchor);
    let imbalance = imbalance::compute(&grids, &usage, &jack.deltas);
    let release = release::compute(&prepared, &grids.base);

    let bars = Bars {
        jack: jack.bar,
        cross,
        stream,
        release,
        imbalance,
        density: density::note_density(&prepared, &grids.base),
        width: density::active_width(&usage),
    };
    let combined = combine::combine(&grids, &bars);
    let summary = aggregate::aggregate(&grids.all, &combined)?;

    let total_notes = aggregate::total_note_weight(&prepared);
    let length_scaled = summary.raw * length_factor(total_notes);
    let value = compress_high(length_scaled) * FINAL_SCALE;
    if !value.is_finite() {
        return Err(Error::NonFinite { stage: "rating" });
    }

    Ok(Rating {
        value,
        p93: summary.upper_percentile,
        p83: summary.lower_percentile,
        mean5: summary.power_mean,
        raw: summary.raw,
        total_notes,
        length_scaled,
        note_count: prepared.notes.len(),
        ln_count: prepared.tails.len(),
        key_count: prepared.key_count,
        rate,
    })
}

/// Rate a chart; `-1.0` when it cannot be rated.
pub fn rate_chart(chart: &Chart, rate: f64) -> f64 {
    match try_rate(chart, rate) {
        Ok(rating) => rating.value,
        Err(e) => {
            debug!("Chart not rated: {}", e);
            UNAVAILABLE
        }
    }
}

/// Rate a note list with `key_count` columns at `rate`; `-1.0` when it
/// cannot be rated.
pub fn rate(notes: &[Note], key_count: usize, rate: f64) -> f64 {
    match Chart::new(notes.to_vec(), key_count) {
        Ok(chart) => rate_chart(&chart, rate),
        Err(e) => {
            debug!("Chart not rated: {}", e);
            UNAVAILABLE
        }
    }
}
