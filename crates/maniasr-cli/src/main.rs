mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (warn unless RUST_LOG says otherwise)
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("maniasr=warn,maniasr_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Some(Command::Rate(rate)) => commands::rate::run(&rate),
        Some(Command::Sweep(sweep)) => commands::sweep::run(&sweep),
        None => commands::rate::run(&args.rate),
    }
}
