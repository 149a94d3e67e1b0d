//! CLI argument definitions for maniasr.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "maniasr")]
#[command(about = "Skill-difficulty rating for vertical-scrolling rhythm game charts", version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(flatten)]
    pub rate: RateArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Rate one or more charts (default)
    Rate(RateArgs),
    /// Rate one chart across a range of playback rates
    Sweep(SweepArgs),
}

#[derive(clap::Args, Clone)]
pub struct RateArgs {
    /// Chart files (JSON note lists)
    #[arg(value_name = "CHART")]
    pub charts: Vec<PathBuf>,

    /// Playback rate; repeat for several rates
    #[arg(short, long = "rate", value_name = "RATE")]
    pub rates: Vec<f64>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(clap::Args, Clone)]
pub struct SweepArgs {
    /// Chart file (JSON note list)
    #[arg(value_name = "CHART")]
    pub chart: PathBuf,

    /// First rate of the sweep
    #[arg(long, default_value = "0.5")]
    pub from: f64,

    /// Last rate of the sweep (inclusive)
    #[arg(long, default_value = "2.0")]
    pub to: f64,

    /// Rate increment
    #[arg(long, default_value = "0.1")]
    pub step: f64,

    /// Worker threads (default: available parallelism)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(clap::Args, Clone)]
pub struct OutputArgs {
    /// Output format (default: config file, then console)
    #[arg(long, short, value_enum)]
    pub format: Option<ExportFormat>,

    /// Write output to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Include intermediate aggregates in console output
    #[arg(long)]
    pub breakdown: bool,

    /// Config file (default: <config dir>/maniasr/config.toml)
    #[arg(long, value_name = "FILE", env = "MANIASR_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Console,
    Tsv,
    Json,
}
