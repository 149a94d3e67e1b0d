//! Numeric helpers shared by the strain formulas.

/// `base^exponent` with a negative base floored at 0.
///
/// NaN is left as is so the boundary check can reject it.
#[inline]
pub fn pow_floor(base: f64, exponent: f64) -> f64 {
    let base = if base < 0.0 { 0.0 } else { base };
    base.powf(exponent)
}
