//! Corner grids and grid-tagged value series.
//!
//! Strain quantities live on three different grids. Each grid and each array
//! defined on it carries a zero-sized tag, so an array can only be indexed,
//! smoothed or resampled against the grid it was built on.

use std::collections::BTreeSet;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut, Range};

use crate::estimator::preprocess::Prepared;
use crate::estimator::step::{lower_bound, upper_bound};

/// Tag of a corner grid.
pub trait GridKind {
    const NAME: &'static str;
}

/// Note boundaries with the ±500 ms window edges and the +1 ms impulse corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {}

/// Note boundaries with ±1000 ms margins, used by the imbalance bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wide {}

/// Union of the base and wide grids, where the final difficulty is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Union {}

impl GridKind for Base {
    const NAME: &'static str = "base";
}

impl GridKind for Wide {
    const NAME: &'static str = "wide";
}

impl GridKind for Union {
    const NAME: &'static str = "union";
}

/// Strictly ascending time points (ms) containing `0` and `T`.
#[derive(Debug, Clone)]
pub struct Corners<G> {
    times: Vec<f64>,
    _grid: PhantomData<G>,
}

impl<G: GridKind> Corners<G> {
    fn from_set(set: &BTreeSet<i64>) -> Self {
        Self {
            times: set.iter().map(|&t| t as f64).collect(),
            _grid: PhantomData,
        }
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn first(&self) -> f64 {
        self.times.first().copied().unwrap_or(0.0)
    }

    pub fn last(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// First corner index at or after `t`.
    pub fn lower_bound(&self, t: f64) -> usize {
        lower_bound(&self.times, t)
    }

    /// First corner index strictly after `t`.
    pub fn upper_bound(&self, t: f64) -> usize {
        upper_bound(&self.times, t)
    }

    /// Index of the last corner at or before `t` (0 if none).
    pub fn floor_index(&self, t: f64) -> usize {
        self.upper_bound(t).saturating_sub(1)
    }

    /// Corner indices covering the half-open interval `[start, end)`.
    pub fn span(&self, start: f64, end: f64) -> Range<usize> {
        let left = self.lower_bound(start);
        let right = self.lower_bound(end).max(left);
        left..right
    }

    pub fn zeros(&self) -> Series<G> {
        self.filled(0.0)
    }

    pub fn filled<T: Clone>(&self, value: T) -> Series<G, T> {
        Series::from_values(self, vec![value; self.len()])
    }
}

/// Values parallel to a `Corners<G>`.
#[derive(Debug, Clone)]
pub struct Series<G, T = f64> {
    values: Vec<T>,
    _grid: PhantomData<G>,
}

impl<G: GridKind, T> Series<G, T> {
    pub fn from_values(corners: &Corners<G>, values: Vec<T>) -> Self {
        debug_assert_eq!(
            corners.len(),
            values.len(),
            "series length does not match the {} grid",
            G::NAME
        );
        Self {
            values,
            _grid: PhantomData,
        }
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Series<G, U> {
        Series {
            values: self.values.iter().map(f).collect(),
            _grid: PhantomData,
        }
    }

    /// Sample-and-hold onto another grid: each target corner takes the value
    /// of the last source corner at or before it.
    pub fn resample_step<H: GridKind>(&self, from: &Corners<G>, to: &Corners<H>) -> Series<H, T>
    where
        T: Clone,
    {
        let values = to
            .times()
            .iter()
            .map(|&t| {
                let i = from.floor_index(t).min(self.values.len().saturating_sub(1));
                self.values[i].clone()
            })
            .collect();
        Series::from_values(to, values)
    }
}

impl<G: GridKind> Series<G, f64> {
    /// Piecewise-linear interpolation onto another grid, holding the end
    /// values outside the source range.
    pub fn resample_linear<H: GridKind>(&self, from: &Corners<G>, to: &Corners<H>) -> Series<H> {
        let xs = from.times();
        let ys = &self.values;
        let values = to
            .times()
            .iter()
            .map(|&t| interpolate(xs, ys, t))
            .collect();
        Series::from_values(to, values)
    }
}

fn interpolate(xs: &[f64], ys: &[f64], t: f64) -> f64 {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return 0.0;
    }
    if t <= xs[0] {
        return ys[0];
    }
    if t >= xs[n - 1] {
        return ys[n - 1];
    }
    let right = upper_bound(&xs[..n], t);
    let left = right - 1;
    if xs[left] == t {
        return ys[left];
    }
    let ratio = (t - xs[left]) / (xs[right] - xs[left]);
    ys[left] + (ys[right] - ys[left]) * ratio
}

impl<G, T> Index<usize> for Series<G, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.values[index]
    }
}

impl<G, T> IndexMut<usize> for Series<G, T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.values[index]
    }
}

/// The three evaluation grids of one chart.
#[derive(Debug, Clone)]
pub struct CornerGrids {
    pub base: Corners<Base>,
    pub wide: Corners<Wide>,
    pub all: Corners<Union>,
}

impl CornerGrids {
    pub fn build(prepared: &Prepared) -> Self {
        let duration = prepared.duration;

        let mut boundaries = BTreeSet::new();
        for note in &prepared.notes {
            boundaries.insert(note.start);
            if let Some(end) = note.end {
                boundaries.insert(end);
            }
        }

        let mut base = BTreeSet::from([0, duration]);
        let mut wide = BTreeSet::from([0, duration]);
        for &s in &boundaries {
            base.extend([s, s + 501, s - 499, s + 1]);
            wide.extend([s, s + 1000, s - 1000]);
        }
        base.retain(|&t| (0..=duration).contains(&t));
        wide.retain(|&t| (0..=duration).contains(&t));

        let all: BTreeSet<i64> = base.union(&wide).copied().collect();

        Self {
            base: Corners::from_set(&base),
            wide: Corners::from_set(&wide),
            all: Corners::from_set(&all),
        }
    }
}
