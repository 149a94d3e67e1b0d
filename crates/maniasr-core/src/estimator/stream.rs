//! Stream and chord strain (Pbar).

use crate::estimator::grid::{Base, Corners, Series};
use crate::estimator::ln::LnDensity;
use crate::estimator::math::pow_floor;
use crate::estimator::preprocess::Prepared;
use crate::estimator::smooth::{Smoothing, smooth};

/// Extra weight for intervals in the 160-360 "notes per 7.5 s" band.
pub fn stream_booster(delta: f64) -> f64 {
    let rate = 7.5 / delta;
    if 160.0 < rate && rate < 360.0 {
        1.0 + 1.7e-7 * (rate - 160.0) * (360.0 - rate).powi(2)
    } else {
        1.0
    }
}

/// Impulse added for each note struck together with the previous one.
pub fn chord_impulse(leniency: f64) -> f64 {
    1000.0 * pow_floor(0.02 * (4.0 / leniency - 24.0), 0.25)
}

/// Base stream strain of one interval `delta` (s), before boosts.
///
/// Steep below `2x/3`, flat above.
pub fn stream_strain(delta: f64, leniency: f64) -> f64 {
    let x = leniency;
    let offset = if delta < 2.0 * x / 3.0 {
        delta - x / 2.0
    } else {
        x / 6.0
    };
    delta.recip() * pow_floor(0.08 / x * (1.0 - 24.0 / x * offset.powi(2)), 0.25)
}

pub fn compute(
    prepared: &Prepared,
    corners: &Corners<Base>,
    ln: &LnDensity,
    anchor: &Series<Base>,
) -> Series<Base> {
    let x = prepared.leniency;
    let mut step = corners.zeros();

    for pair in prepared.notes.windows(2) {
        let (left, right) = (pair[0].start, pair[1].start);

        if right == left {
            let impulse = chord_impulse(x);
            let at = left as f64;
            for i in corners.lower_bound(at)..corners.upper_bound(at) {
                step[i] += impulse;
            }
            continue;
        }

        let span = corners.span(left as f64, right as f64);
        if span.is_empty() {
            continue;
        }
        let delta = 0.001 * (right - left) as f64;
        let ln_overlap = 1.0 + 0.006 * ln.sum(left as f64, right as f64);
        let inc = stream_strain(delta, x) * stream_booster(delta) * ln_overlap;

        for i in span {
            step[i] += (inc * anchor[i]).min(inc.max(2.0 * inc - 10.0));
        }
    }

    smooth(corners, &step, Smoothing::STRAIN)
}
