//! Inspect CLI command.
//!
//! Prints the derived index queries the selectors work from: the expiries
//! of an underlying, or the strike ladder of one expiry with its step.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

use dhan_agent_core::AppConfig;
use dhan_agent_instruments::{infer_step, Underlying};

use super::{dataset_path, load_index};

/// Arguments for the inspect command.
#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Underlying index (NIFTY, BANKNIFTY, FINNIFTY)
    #[arg(long)]
    pub underlying: Underlying,

    /// Show strikes for this expiry (YYYY-MM-DD) instead of listing expiries
    #[arg(long)]
    pub expiry: Option<NaiveDate>,

    /// Master script CSV (overrides dataset.path from config)
    #[arg(long)]
    pub dataset: Option<PathBuf>,
}

/// Runs the inspect command.
///
/// # Errors
/// Returns an error if the master script cannot be loaded.
pub fn run_inspect(args: &InspectArgs, config: &AppConfig) -> Result<()> {
    let index = load_index(dataset_path(args.dataset.as_ref(), config))?;

    match args.expiry {
        None => {
            let expiries = index.expiries(args.underlying);
            println!("{} expiries ({}):", args.underlying, expiries.len());
            for expiry in expiries {
                println!("  {expiry}");
            }
        }
        Some(expiry) => {
            let strikes = index.strikes(args.underlying, expiry);
            println!(
                "{} {} strikes ({}, step {}):",
                args.underlying,
                expiry,
                strikes.len(),
                infer_step(&strikes)
            );
            for strike in strikes {
                println!("  {strike}");
            }
        }
    }

    Ok(())
}
