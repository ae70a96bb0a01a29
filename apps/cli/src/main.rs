//! # pricer
//!
//! Entry point: logging, configuration, then one subcommand.
//!
//! ```text
//! init_tracing ─► Cli::parse ─► PricerConfig::load ─► flags ─► validate ─► command
//! ```

use anyhow::Context;
use clap::Parser;
use tracing::{info, info_span};
use uuid::Uuid;

use pricer_cli::cli::Command;
use pricer_cli::config::FeeOverrides;
use pricer_cli::{commands, init_tracing, Cli, PricerConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let run_id = Uuid::new_v4();
    let span = info_span!("run", %run_id);
    let _enter = span.enter();

    let mut config = PricerConfig::load(cli.config.clone()).context("Failed to load configuration")?;
    config.apply_overrides(&FeeOverrides::from(&cli.fees));
    config.validate()?;
    info!(fees = ?config.fees, mandatory_default = config.defaults.mandatory_discount_pct, "Configuration loaded");

    match cli.command {
        Command::Solve(args) => {
            let row = commands::solve(&args, &config);
            println!("{}", serde_json::to_string_pretty(&row)?);
        }
        Command::Batch(args) => {
            commands::batch(&args, &config)?;
        }
        Command::Template { output } => {
            commands::template(&output)?;
        }
    }

    Ok(())
}
