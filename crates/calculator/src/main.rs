//! SW Roll Calculator - command line entry point.
//!
//! Prints the probability of each trait roll outcome (critical failure,
//! failure, success, raises) for one or more roll formulas.

mod config;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swroll_domain::{DomainError, OutcomeChart, TraitRollFormula};

use config::{AppConfig, OutputFormat};
use output::RollReport;

/// Outcome probabilities for Savage Worlds trait rolls
#[derive(Parser)]
#[command(name = "swroll")]
#[command(about = "Outcome probabilities for Savage Worlds trait rolls", long_about = None)]
#[command(version)]
struct Cli {
    /// Highest tier with its own bar [env: SWROLL_MAX_TIER, default 4]
    #[arg(long)]
    max_tier: Option<u32>,

    /// Output format [env: SWROLL_OUTPUT_FORMAT, default table]
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Roll formulas: trait die, optional wild die, modifier and rerolls,
    /// e.g. "d8", "d10/d8+1", "d6-2 r1"
    #[arg(required = true, value_parser = parse_formula)]
    formulas: Vec<TraitRollFormula>,
}

fn parse_formula(input: &str) -> Result<TraitRollFormula, DomainError> {
    TraitRollFormula::parse(input).map_err(DomainError::from)
}

fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swroll_calculator=info,swroll_domain=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    let max_tier = cli.max_tier.unwrap_or(config.max_tier);
    let format = cli.format.unwrap_or(config.output_format);
    tracing::debug!(max_tier, %format, rolls = cli.formulas.len(), "computing outcome charts");

    let reports = cli
        .formulas
        .iter()
        .map(|formula| {
            let roll = formula.build();
            OutcomeChart::from_stochastic(&roll, max_tier)
                .map(|chart| RollReport::new(formula, chart))
                .with_context(|| format!("building outcome chart for '{}'", formula))
        })
        .collect::<Result<Vec<_>>>()?;

    let rendered = match format {
        OutputFormat::Table => output::render_table(&reports),
        OutputFormat::Json => output::render_json(&reports)?,
    };
    println!("{}", rendered);

    Ok(())
}
