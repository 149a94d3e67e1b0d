//! Per-instant fusion of the strain bars.

use crate::config::combine::{CROSS_COEFF, CROSS_EXPONENT, JACK_WEIGHT, STRAIN_COEFF};
use crate::estimator::grid::{Base, CornerGrids, Series, Union, Wide};
use crate::estimator::math::pow_floor;

/// Every bar on its own grid, ready to be fused.
#[derive(Debug, Clone)]
pub struct Bars {
    pub jack: Series<Base>,
    pub cross: Series<Base>,
    pub stream: Series<Base>,
    pub release: Series<Base>,
    pub imbalance: Series<Wide>,
    pub density: Series<Base>,
    pub width: Series<Base>,
}

/// Bar values at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub jack: f64,
    pub cross: f64,
    pub stream: f64,
    pub release: f64,
    pub imbalance: f64,
    pub density: f64,
    pub width: f64,
}

impl Sample {
    /// Fused strain of jacks/anchors and streams/releases.
    pub fn strain(&self) -> f64 {
        let jack_term = pow_floor(self.imbalance, 3.0 / self.width)
            * self.jack.min(8.0 + 0.85 * self.jack);
        let stream_term = pow_floor(self.imbalance, 2.0 / 3.0)
            * (0.8 * self.stream + self.release * 35.0 / (self.density + 8.0));
        pow_floor(
            JACK_WEIGHT * pow_floor(jack_term, 1.5)
                + (1.0 - JACK_WEIGHT) * pow_floor(stream_term, 1.5),
            2.0 / 3.0,
        )
    }

    pub fn difficulty(&self) -> f64 {
        let strain = self.strain();
        let cross = pow_floor(self.imbalance, 3.0 / self.width) * self.cross
            / (self.cross + strain + 1.0);
        CROSS_COEFF * pow_floor(strain, 0.5) * pow_floor(cross, CROSS_EXPONENT)
            + STRAIN_COEFF * strain
    }
}

/// Difficulty and density on the union grid.
#[derive(Debug, Clone)]
pub struct Combined {
    pub difficulty: Series<Union>,
    pub density: Series<Union>,
}

pub fn combine(grids: &CornerGrids, bars: &Bars) -> Combined {
    let (base, wide, all) = (&grids.base, &grids.wide, &grids.all);

    let jack = bars.jack.resample_linear(base, all);
    let cross = bars.cross.resample_linear(base, all);
    let stream = bars.stream.resample_linear(base, all);
    let release = bars.release.resample_linear(base, all);
    let imbalance = bars.imbalance.resample_linear(wide, all);
    let density = bars.density.resample_step(base, all);
    let width = bars.width.resample_step(base, all);

    let difficulty = (0..all.len())
        .map(|i| {
            Sample {
                jack: jack[i],
                cross: cross[i],
                stream: stream[i],
                release: release[i],
                imbalance: imbalance[i],
                density: density[i],
                width: width[i],
            }
            .difficulty()
        })
        .collect();

    Combined {
        difficulty: Series::from_values(all, difficulty),
        density,
    }
}
