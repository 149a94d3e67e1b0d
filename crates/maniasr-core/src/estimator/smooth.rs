//! Sliding-window smoothing of step functions defined on a corner grid.

use crate::config::smoothing::{AVG_WINDOW_MS, SUM_SCALE, SUM_WINDOW_MS};
use crate::estimator::grid::{Corners, GridKind, Series};
use crate::estimator::step::StepIntegral;

/// How a windowed integral is turned into a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Smoothing {
    /// `scale * ∫[s-w, s+w]`
    Sum { window: f64, scale: f64 },
    /// `∫[s-w, s+w] / |window|`, with the window clipped to the grid
    Average { window: f64 },
}

impl Smoothing {
    /// Sum mode shared by the jack, cross, stream and release bars.
    pub const STRAIN: Smoothing = Smoothing::Sum {
        window: SUM_WINDOW_MS,
        scale: SUM_SCALE,
    };

    /// Average mode used by the imbalance bar.
    pub const IMBALANCE: Smoothing = Smoothing::Average {
        window: AVG_WINDOW_MS,
    };

    fn window(&self) -> f64 {
        match *self {
            Self::Sum { window, .. } | Self::Average { window } => window,
        }
    }
}

/// Smooth a step function, treating `step[i]` as constant on
/// `[corners[i], corners[i + 1])`.
pub fn smooth<G: GridKind>(corners: &Corners<G>, step: &Series<G>, mode: Smoothing) -> Series<G> {
    let integral = StepIntegral::new(corners.times().to_vec(), step.values().to_vec());
    let (first, last) = (corners.first(), corners.last());
    let window = mode.window();

    let values = corners
        .times()
        .iter()
        .map(|&s| {
            let a = (s - window).max(first);
            let b = (s + window).min(last);
            let total = integral.integral(a, b);
            match mode {
                Smoothing::Sum { scale, .. } => scale * total,
                Smoothing::Average { .. } if b > a => total / (b - a),
                Smoothing::Average { .. } => 0.0,
            }
        })
        .collect();

    Series::from_values(corners, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Chart, Note};
    use crate::estimator::grid::CornerGrids;
    use crate::estimator::preprocess::prepare;

    fn base_grid() -> CornerGrids {
        let chart = Chart::new(vec![Note::tap(0, 1000.0), Note::tap(1, 3000.0)], 2).unwrap();
        CornerGrids::build(&prepare(&chart, 1.0).unwrap())
    }

    #[test]
    fn test_sum_of_constant_function() {
        let grids = base_grid();
        let ones = grids.base.filled(1.0);
        let smoothed = smooth(&grids.base, &ones, Smoothing::STRAIN);

        // Fully inside the domain the window integrates 1000 ms of value 1
        let i = grids.base.lower_bound(1501.0);
        assert!((smoothed[i] - 1.0).abs() < 1e-12);

        // At t = 0 only the right half of the window is inside
        assert!((smoothed[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_average_of_constant_function() {
        let grids = base_grid();
        let twos = grids.base.filled(2.0);
        let smoothed = smooth(&grids.base, &twos, Smoothing::IMBALANCE);
        for v in smoothed.iter() {
            assert!((v - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_sum_of_impulse_spreads_over_window() {
        let grids = base_grid();
        let mut step = grids.base.zeros();
        // Value 1000 held on [1000, 1001)
        let i = grids.base.lower_bound(1000.0);
        step[i] = 1000.0;
        let smoothed = smooth(&grids.base, &step, Smoothing::STRAIN);

        let inside = grids.base.lower_bound(1000.0);
        assert!((smoothed[inside] - 1.0).abs() < 1e-12);
        let outside = grids.base.lower_bound(3000.0);
        assert_eq!(smoothed[outside], 0.0);
    }
}
