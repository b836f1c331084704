//! Validate CLI command.
//!
//! Loads the master script with full field validation and summarizes it.
//! Exits non-zero on the first malformed row.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use dhan_agent_core::AppConfig;
use dhan_agent_instruments::Underlying;

use super::{dataset_path, load_index};

/// Arguments for the validate command.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Master script CSV (overrides dataset.path from config)
    #[arg(long)]
    pub dataset: Option<PathBuf>,
}

/// Runs the validate command.
///
/// # Errors
/// Returns an error if the master script cannot be loaded or a row fails validation.
pub fn run_validate(args: &ValidateArgs, config: &AppConfig) -> Result<()> {
    let path = dataset_path(args.dataset.as_ref(), config);
    let index = load_index(path)?;

    println!("{}: {} instruments", path.display(), index.len());
    for (symbol, count) in index.counts_by_underlying() {
        println!("  {symbol:<12} {count:>8}");
    }

    for underlying in Underlying::ALL {
        let expiries = index.expiries(underlying);
        match (expiries.first(), expiries.last()) {
            (Some(first), Some(last)) => println!(
                "{underlying}: {} expiries, {first} .. {last}",
                expiries.len()
            ),
            _ => tracing::warn!(%underlying, "No rows for underlying"),
        }
    }

    Ok(())
}
