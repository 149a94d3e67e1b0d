//! Estimator configuration constants.
//!
//! This module groups the calibrated constants of the rating pipeline:
//! - Smoothing windows and scale for the strain bars
//! - Finger-usage windows for key usage and anchors
//! - Weights of the per-instant combiner
//! - Percentiles and weights of the final aggregation

/// Sliding-window smoothing of step functions.
pub mod smoothing {
    /// Half-width (ms) of the window used by every sum-mode bar.
    pub const SUM_WINDOW_MS: f64 = 500.0;

    /// Half-width (ms) of the averaging window for the imbalance bar.
    pub const AVG_WINDOW_MS: f64 = 250.0;

    /// Scale applied to windowed integrals in sum mode (ms to seconds).
    pub const SUM_SCALE: f64 = 0.001;
}

/// Finger occupation windows.
pub mod usage {
    /// Margin (ms) around a note during which its column counts as active.
    pub const ACTIVE_MARGIN_MS: i64 = 150;

    /// Falloff length (ms) of the anticipatory/residual usage.
    pub const FALLOFF_MS: i64 = 400;

    /// Base usage weight of an occupied column.
    pub const BASE_WEIGHT: f64 = 3.75;

    /// Hold durations beyond this (ms) add no further usage.
    pub const MAX_HOLD_MS: i64 = 1500;

    /// Radius (ms) of the local note density count.
    pub const DENSITY_RADIUS_MS: i64 = 500;
}

/// Per-instant difficulty combination.
pub mod combine {
    /// Weight of the jack/anchor term against the stream/release term.
    pub const JACK_WEIGHT: f64 = 0.4;

    /// Coefficient of the cross-column term.
    pub const CROSS_COEFF: f64 = 2.7;

    /// Exponent of the cross-column ratio.
    pub const CROSS_EXPONENT: f64 = 1.5;

    /// Linear weight of the fused strain.
    pub const STRAIN_COEFF: f64 = 0.27;
}

/// Final aggregation into a single rating.
pub mod aggregation {
    /// Percentiles averaged into the upper quantile.
    pub const UPPER_PERCENTILES: [f64; 4] = [0.945, 0.935, 0.925, 0.915];

    /// Percentiles averaged into the lower quantile.
    pub const LOWER_PERCENTILES: [f64; 4] = [0.845, 0.835, 0.825, 0.815];

    /// Exponent of the weighted power mean.
    pub const POWER_MEAN_EXPONENT: f64 = 5.0;

    /// Notes worth of padding in the short-chart suppression factor.
    pub const LENGTH_PADDING_NOTES: f64 = 60.0;

    /// Ratings above this are compressed.
    pub const COMPRESSION_THRESHOLD: f64 = 9.0;

    /// Divisor applied to the excess above the compression threshold.
    pub const COMPRESSION_DIVISOR: f64 = 1.2;

    /// Final global scale.
    pub const FINAL_SCALE: f64 = 0.975;
}

/// Value returned when a chart cannot be rated.
pub mod sentinel {
    pub const UNAVAILABLE: f64 = -1.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentiles_are_descending() {
        for pair in aggregation::UPPER_PERCENTILES.windows(2) {
            assert!(pair[0] > pair[1]);
        }
        for pair in aggregation::LOWER_PERCENTILES.windows(2) {
            assert!(pair[0] > pair[1]);
        }
        assert!(aggregation::LOWER_PERCENTILES[0] < aggregation::UPPER_PERCENTILES[3]);
    }

    #[test]
    fn test_sentinel_is_negative() {
        assert!(sentinel::UNAVAILABLE < 0.0);
    }
}
