//! Long-note body density as a sparse step function.

use std::collections::BTreeMap;

use crate::estimator::preprocess::Prepared;
use crate::estimator::step::StepIntegral;

/// Number of concurrently held bodies, weighted by hold age.
///
/// A body ramps to 1.3 over its first 60 ms, settles at 1.0 after 120 ms and
/// drops at the tail. The running total is softened above 5 concurrent units.
#[derive(Debug, Clone)]
pub struct LnDensity {
    integral: StepIntegral,
}

impl LnDensity {
    pub fn build(prepared: &Prepared) -> Self {
        let mut diff: BTreeMap<i64, f64> = BTreeMap::new();
        for note in prepared.long_notes() {
            let (start, end) = (note.start, note.release());
            *diff.entry((start + 60).min(end)).or_default() += 1.3;
            *diff.entry((start + 120).min(end)).or_default() += -1.3 + 1.0;
            *diff.entry(end).or_default() -= 1.0;
        }

        let mut points: Vec<i64> = diff.keys().copied().collect();
        points.extend([0, prepared.duration]);
        points.sort_unstable();
        points.dedup();

        let mut current = 0.0;
        let values = points[..points.len() - 1]
            .iter()
            .map(|t| {
                if let Some(change) = diff.get(t) {
                    current += change;
                }
                current.min(2.5 + 0.5 * current)
            })
            .collect();

        Self {
            integral: StepIntegral::new(points.into_iter().map(|t| t as f64).collect(), values),
        }
    }

    /// Integral of the density over `[a, b]`.
    pub fn sum(&self, a: f64, b: f64) -> f64 {
        self.integral.integral(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Chart, Note};
    use crate::estimator::preprocess::prepare;

    fn density(notes: Vec<Note>) -> LnDensity {
        LnDensity::build(&prepare(&Chart::new(notes, 4).unwrap(), 1.0).unwrap())
    }

    #[test]
    fn test_single_body_profile() {
        let ln = density(vec![Note::long(0, 1000.0, 2000.0), Note::tap(1, 3000.0)]);
        // Nothing before the head's ramp point
        assert_eq!(ln.sum(0.0, 1060.0), 0.0);
        // 1.3 on [1060, 1120)
        assert!((ln.sum(1060.0, 1120.0) - 60.0 * 1.3).abs() < 1e-9);
        // 1.0 on [1120, 2000)
        assert!((ln.sum(1120.0, 2000.0) - 880.0).abs() < 1e-9);
        // Nothing after the tail
        assert_eq!(ln.sum(2000.0, 3000.0), 0.0);
    }

    #[test]
    fn test_sum_within_one_segment() {
        let ln = density(vec![Note::long(0, 1000.0, 2000.0), Note::tap(1, 3000.0)]);
        assert!((ln.sum(1500.0, 1600.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_body_collapses_ramp() {
        // A 50 ms hold ends before the ramp point: +1.3 - 0.3 - 1 all at the tail
        let ln = density(vec![Note::long(0, 1000.0, 1050.0), Note::tap(1, 3000.0)]);
        assert!(ln.sum(0.0, 3000.0).abs() < 1e-9);
    }

    #[test]
    fn test_density_is_softened_when_stacked() {
        let notes = (0..8)
            .map(|k| Note::long(k % 4, 1000.0 + k as f64, 5000.0 + k as f64))
            .chain([Note::tap(0, 6000.0)])
            .collect();
        let ln = density(notes);
        // 8 settled bodies: min(8, 2.5 + 4) = 6.5
        assert!((ln.sum(2000.0, 3000.0) - 6500.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_long_notes() {
        let ln = density(vec![Note::tap(0, 0.0), Note::tap(1, 100.0)]);
        assert_eq!(ln.sum(0.0, 100.0), 0.0);
    }
}
