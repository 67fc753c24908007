//! Calculator configuration

use std::env;
use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use swroll_domain::{DomainError, OutcomeChart};

/// How charts are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One column per roll, percentages
    Table,
    /// Array of `{ formula, chart }` objects
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(DomainError::parse(format!("Unknown output format: '{}'", other))),
        }
    }
}

/// Calculator configuration loaded from environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Highest tier with its own bar; everything above lands in the tail
    pub max_tier: u32,
    /// Default output format
    pub output_format: OutputFormat,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            max_tier: lookup("SWROLL_MAX_TIER")
                .unwrap_or_else(|| OutcomeChart::DEFAULT_MAX_TIER.to_string())
                .trim()
                .parse()
                .context("SWROLL_MAX_TIER must be a non-negative integer")?,
            output_format: lookup("SWROLL_OUTPUT_FORMAT")
                .unwrap_or_else(|| OutputFormat::Table.to_string())
                .parse()
                .context("SWROLL_OUTPUT_FORMAT must be 'table' or 'json'")?,
        })
    }
}
