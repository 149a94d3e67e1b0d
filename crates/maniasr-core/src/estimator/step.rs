//! Sorted breakpoints + prefix sums + binary search.
//!
//! Every windowed quantity of the estimator is a step function: constant on
//! `[points[i], points[i + 1])`. Integrals over arbitrary ranges are answered
//! from one prefix-sum array in `O(log n)`.

/// First index whose value is `>= value` (numpy `searchsorted` left).
#[inline]
pub fn lower_bound(sorted: &[f64], value: f64) -> usize {
    sorted.partition_point(|&p| p < value)
}

/// First index whose value is `> value` (numpy `searchsorted` right).
#[inline]
pub fn upper_bound(sorted: &[f64], value: f64) -> usize {
    sorted.partition_point(|&p| p <= value)
}

/// Step function with a precomputed running integral.
#[derive(Debug, Clone)]
pub struct StepIntegral {
    points: Vec<f64>,
    values: Vec<f64>,
    cumulative: Vec<f64>,
}

impl StepIntegral {
    /// `values[i]` holds on `[points[i], points[i + 1])`. A value for the last
    /// point may be supplied but never contributes.
    pub fn new(points: Vec<f64>, values: Vec<f64>) -> Self {
        debug_assert!(values.len() + 1 >= points.len());

        let mut cumulative = Vec::with_capacity(points.len());
        if !points.is_empty() {
            cumulative.push(0.0);
        }
        for i in 1..points.len() {
            let width = points[i] - points[i - 1];
            cumulative.push(cumulative[i - 1] + values[i - 1] * width);
        }

        Self {
            points,
            values,
            cumulative,
        }
    }

    pub fn first(&self) -> Option<f64> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.points.last().copied()
    }

    /// Integral from the first breakpoint up to `q`, clamped to the domain.
    pub fn integral_to(&self, q: f64) -> f64 {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return 0.0;
        };
        if q <= first {
            return 0.0;
        }
        if q >= last {
            return self.cumulative[self.cumulative.len() - 1];
        }
        let i = lower_bound(&self.points, q) - 1;
        self.cumulative[i] + self.values[i] * (q - self.points[i])
    }

    /// Integral over `[a, b]`.
    pub fn integral(&self, a: f64, b: f64) -> f64 {
        self.integral_to(b) - self.integral_to(a)
    }
}
