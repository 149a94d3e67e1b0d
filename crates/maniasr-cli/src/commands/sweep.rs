//! Sweep command: one chart across a range of rates.
//!
//! Rates are rated on a dedicated rayon pool; the chart is shared read-only
//! and results come back in rate order.

use anyhow::{Context, Result, bail};
use maniasr_core::{Chart, RatedChart};
use rayon::prelude::*;
use tracing::debug;

use super::{chart_label, emit, load_chart, rate_entry};
use crate::cli::SweepArgs;
use crate::config::CliConfig;

/// Upper bound on the number of rates in one sweep.
pub const MAX_SWEEP_RATES: usize = 10_000;

/// Rates from `from` to `to` inclusive in increments of `step`, rounded to
/// 1/1000 so that accumulated error does not leak into labels.
pub fn sweep_rates(from: f64, to: f64, step: f64) -> Result<Vec<f64>> {
    if !(from.is_finite() && to.is_finite() && step.is_finite()) {
        bail!("Sweep bounds must be finite");
    }
    if from <= 0.0 || step <= 0.0 {
        bail!("Sweep rates and step must be positive");
    }
    if to < from {
        bail!("Sweep end {} is below start {}", to, from);
    }

    let count = ((to - from) / step + 1e-9).floor() + 1.0;
    if count > MAX_SWEEP_RATES as f64 {
        bail!(
            "Sweep of {} to {} by {} gives {} rates (max {})",
            from,
            to,
            step,
            count,
            MAX_SWEEP_RATES
        );
    }
    Ok((0..count as usize)
        .map(|i| ((from + step * i as f64) * 1000.0).round() / 1000.0)
        .collect())
}

/// Rate `chart` at every rate on `jobs` threads (0 picks rayon's default).
fn rate_all(label: &str, chart: &Chart, rates: &[f64], jobs: usize) -> Result<Vec<RatedChart>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("Failed to build rating thread pool")?;
    debug!(
        "Sweeping {} rates on {} threads",
        rates.len(),
        pool.current_num_threads()
    );

    Ok(pool.install(|| {
        rates
            .par_iter()
            .map(|&rate| rate_entry(label, chart, rate))
            .collect()
    }))
}

pub fn run(args: &SweepArgs) -> Result<()> {
    let config = CliConfig::load(args.output.config.as_deref())?;
    let rates = sweep_rates(args.from, args.to, args.step)?;
    let chart = load_chart(&args.chart)
        .with_context(|| format!("Failed to load chart {}", args.chart.display()))?;

    let jobs = args.jobs.unwrap_or(0);
    let entries = rate_all(&chart_label(&args.chart), &chart, &rates, jobs)?;

    emit(&entries, &args.output, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maniasr_core::{Note, rate_chart};

    #[test]
    fn test_sweep_rates_inclusive() {
        assert_eq!(sweep_rates(0.5, 1.0, 0.1).unwrap(), vec![0.5, 0.6, 0.7, 0.8, 0.9, 1.0]);
        assert_eq!(sweep_rates(1.0, 1.0, 0.25).unwrap(), vec![1.0]);
        assert_eq!(sweep_rates(1.0, 1.6, 0.25).unwrap(), vec![1.0, 1.25, 1.5]);
    }

    #[test]
    fn test_sweep_rates_rejects_bad_bounds() {
        assert!(sweep_rates(1.5, 1.0, 0.1).is_err());
        assert!(sweep_rates(0.0, 1.0, 0.1).is_err());
        assert!(sweep_rates(1.0, 2.0, 0.0).is_err());
        assert!(sweep_rates(1.0, f64::INFINITY, 0.1).is_err());
    }

    #[test]
    fn test_sweep_rates_caps_count() {
        assert!(sweep_rates(1.0, 2.0, 1e-12).is_err());
        assert!(sweep_rates(0.001, 1e6, 0.001).is_err());
        let widest = sweep_rates(0.1, 0.1 + 0.001 * (MAX_SWEEP_RATES - 1) as f64, 0.001).unwrap();
        assert_eq!(widest.len(), MAX_SWEEP_RATES);
    }

    #[test]
    fn test_rate_all_keeps_order() {
        let notes = (0..40)
            .map(|i| Note::tap(i % 4, 300.0 + 110.0 * i as f64))
            .collect();
        let chart = Chart::new(notes, 4).unwrap();
        let rates = sweep_rates(0.8, 1.6, 0.1).unwrap();

        let entries = rate_all("stream", &chart, &rates, 3).unwrap();
        assert_eq!(entries.len(), rates.len());
        for (entry, &rate) in entries.iter().zip(&rates) {
            assert_eq!(entry.rate, rate);
            assert_eq!(entry.value().to_bits(), rate_chart(&chart, rate).to_bits());
        }
    }

    #[test]
    fn test_rate_all_more_jobs_than_rates() {
        let chart = Chart::new(vec![Note::tap(0, 0.0), Note::tap(1, 200.0)], 2).unwrap();
        let entries = rate_all("pair", &chart, &[1.0, 1.5], 16).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_rate_all_default_pool() {
        let chart = Chart::new(vec![Note::tap(0, 0.0), Note::tap(1, 200.0)], 2).unwrap();
        let entries = rate_all("pair", &chart, &[1.0, 1.5, 2.0], 0).unwrap();
        let rates: Vec<f64> = entries.iter().map(|e| e.rate).collect();
        assert_eq!(rates, vec![1.0, 1.5, 2.0]);
    }
}
