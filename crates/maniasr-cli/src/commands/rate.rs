//! Rate command: every chart at every requested rate.

use anyhow::{Result, bail};

use super::{chart_label, emit, load_chart, load_failure, rate_entry};
use crate::cli::RateArgs;
use crate::config::CliConfig;

pub fn run(args: &RateArgs) -> Result<()> {
    if args.charts.is_empty() {
        bail!("No chart files given (see --help)");
    }

    let config = CliConfig::load(args.output.config.as_deref())?;
    let rates = config.rates(&args.rates);

    let mut entries = Vec::with_capacity(args.charts.len() * rates.len());
    for path in &args.charts {
        let label = chart_label(path);
        match load_chart(path) {
            Ok(chart) => {
                for &rate in &rates {
                    entries.push(rate_entry(&label, &chart, rate));
                }
            }
            Err(e) => {
                eprintln!("Failed to load {}: {}", path.display(), e);
                entries.extend(rates.iter().map(|&rate| load_failure(&label, rate, &e)));
            }
        }
    }

    emit(&entries, &args.output, &config)
}
