//! Optional TOML configuration for the CLI.
//!
//! ```toml
//! default_rates = [1.0, 1.5]
//! format = "tsv"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::cli::ExportFormat;

const DEFAULT_RATE: f64 = 1.0;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Rates used when none are given on the command line.
    pub default_rates: Vec<f64>,
    /// Output format used when `--format` is absent.
    pub format: Option<ExportFormat>,
}

impl CliConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("maniasr").join("config.toml"))
    }

    /// Load `path`, or the default location when `None`.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            if explicit {
                warn!("Config file {} not found, using defaults", path.display());
            } else {
                debug!("No config file at {}", path.display());
            }
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        if let Some(bad) = config
            .default_rates
            .iter()
            .find(|r| !(r.is_finite() && **r > 0.0))
        {
            anyhow::bail!("default_rates contains invalid rate {}", bad);
        }
        Ok(config)
    }

    /// Rates to evaluate: the requested ones, else the configured defaults,
    /// else 1.0.
    pub fn rates(&self, requested: &[f64]) -> Vec<f64> {
        if !requested.is_empty() {
            requested.to_vec()
        } else if !self.default_rates.is_empty() {
            self.default_rates.clone()
        } else {
            vec![DEFAULT_RATE]
        }
    }

    pub fn format(&self, requested: Option<ExportFormat>) -> ExportFormat {
        requested.or(self.format).unwrap_or(ExportFormat::Console)
    }
}
