//! Finger occupation per column.

use crate::config::usage::{ACTIVE_MARGIN_MS, BASE_WEIGHT, FALLOFF_MS, MAX_HOLD_MS};
use crate::estimator::grid::{Base, Corners, Series};
use crate::estimator::preprocess::Prepared;

#[derive(Debug, Clone)]
pub struct KeyUsage {
    /// Columns whose finger is occupied at each base corner, ascending.
    pub active: Series<Base, Vec<usize>>,
    /// Continuous usage per column, including the anticipatory/residual falloff.
    pub sustained: Vec<Series<Base>>,
}

impl KeyUsage {
    pub fn compute(prepared: &Prepared, corners: &Corners<Base>) -> Self {
        Self {
            active: active_columns(prepared, corners),
            sustained: sustained_usage(prepared, corners),
        }
    }

    pub fn active_at(&self, index: usize) -> &[usize] {
        &self.active[index]
    }

    pub fn is_active(&self, index: usize, column: usize) -> bool {
        self.active[index].binary_search(&column).is_ok()
    }
}

fn active_columns(prepared: &Prepared, corners: &Corners<Base>) -> Series<Base, Vec<usize>> {
    let duration = prepared.duration;
    let mut in_use: Vec<Series<Base, bool>> = (0..prepared.key_count)
        .map(|_| corners.filled(false))
        .collect();

    for note in &prepared.notes {
        let from = (note.start - ACTIVE_MARGIN_MS).max(0);
        let to = match note.end {
            Some(end) => (end + ACTIVE_MARGIN_MS).min(duration - 1),
            None => note.start + ACTIVE_MARGIN_MS,
        };
        for i in corners.span(from as f64, to as f64) {
            in_use[note.column][i] = true;
        }
    }

    let active = (0..corners.len())
        .map(|i| {
            (0..prepared.key_count)
                .filter(|&k| in_use[k][i])
                .collect::<Vec<_>>()
        })
        .collect();
    Series::from_values(corners, active)
}

fn sustained_usage(prepared: &Prepared, corners: &Corners<Base>) -> Vec<Series<Base>> {
    let duration = prepared.duration;
    let times = corners.times();
    let mut usage: Vec<Series<Base>> = (0..prepared.key_count).map(|_| corners.zeros()).collect();
    let falloff = BASE_WEIGHT / (FALLOFF_MS * FALLOFF_MS) as f64;

    for note in &prepared.notes {
        let start = note.start;
        let end = match note.end {
            Some(end) => end.min(duration - 1),
            None => start,
        };
        let column = &mut usage[note.column];

        let held = BASE_WEIGHT + (end - start).min(MAX_HOLD_MS) as f64 / 150.0;
        for i in corners.span(start as f64, end as f64) {
            column[i] += held;
        }
        for i in corners.span((start - FALLOFF_MS) as f64, start as f64) {
            column[i] += BASE_WEIGHT - falloff * (times[i] - start as f64).powi(2);
        }
        for i in corners.span(end as f64, (end + FALLOFF_MS) as f64) {
            column[i] += BASE_WEIGHT - falloff * (times[i] - end as f64).powi(2);
        }
    }

    usage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Chart, Note};
    use crate::estimator::grid::CornerGrids;
    use crate::estimator::preprocess::prepare;

    fn usage_for(notes: Vec<Note>) -> (CornerGrids, KeyUsage) {
        let prepared = prepare(&Chart::new(notes, 4).unwrap(), 1.0).unwrap();
        let grids = CornerGrids::build(&prepared);
        let usage = KeyUsage::compute(&prepared, &grids.base);
        (grids, usage)
    }

    #[test]
    fn test_active_columns_around_tap() {
        let (grids, usage) = usage_for(vec![Note::tap(0, 1000.0), Note::tap(2, 3000.0)]);
        let at = |t: f64| usage.active_at(grids.base.lower_bound(t)).to_vec();

        assert_eq!(at(1000.0), vec![0]);
        assert_eq!(at(1001.0), vec![0]);
        assert!(at(501.0).is_empty());
        assert_eq!(at(3000.0), vec![2]);
        assert!(usage.is_active(grids.base.lower_bound(1000.0), 0));
        assert!(!usage.is_active(grids.base.lower_bound(1000.0), 2));
    }

    #[test]
    fn test_active_columns_overlap_for_long_note() {
        let (grids, usage) = usage_for(vec![Note::long(1, 1000.0, 3000.0), Note::tap(3, 2000.0)]);
        let i = grids.base.lower_bound(2000.0);
        assert_eq!(usage.active_at(i), &[1, 3]);
    }

    #[test]
    fn test_sustained_usage_of_hold() {
        let (grids, usage) = usage_for(vec![Note::long(0, 1000.0, 2000.0), Note::tap(1, 5000.0)]);
        let i = grids.base.lower_bound(1000.0);
        // 3.75 + 1000 / 150
        assert!((usage.sustained[0][i] - (3.75 + 1000.0 / 150.0)).abs() < 1e-12);
    }

    #[test]
    fn test_sustained_usage_falloff() {
        let (grids, usage) = usage_for(vec![Note::tap(0, 1000.0), Note::tap(1, 5000.0)]);
        // Right after a tap the usage starts at the base weight and decays
        let at_note = grids.base.lower_bound(1000.0);
        assert!((usage.sustained[0][at_note] - 3.75).abs() < 1e-12);
        let after = grids.base.lower_bound(1001.0);
        assert!(usage.sustained[0][after] < 3.75);
        assert!(usage.sustained[0][after] > 0.0);
        // 501 ms before the tap is outside the 400 ms falloff
        let before = grids.base.lower_bound(501.0);
        assert_eq!(usage.sustained[0][before], 0.0);
    }
}
