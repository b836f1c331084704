//! Resolve CLI command.
//!
//! Resolves one trade intent against the master script and prints the
//! matching contract as JSON on stdout.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::Args;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;

use dhan_agent_core::AppConfig;
use dhan_agent_instruments::{
    ExpiryKind, OptionType, ResolutionRequest, Resolver, StrikeSelector, Underlying,
};

use super::{dataset_path, load_index};

/// Arguments for the resolve command.
#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Underlying index (NIFTY, BANKNIFTY, FINNIFTY)
    #[arg(long)]
    pub underlying: Underlying,

    /// Expiry bucket (current_week, next_week, monthly)
    #[arg(long, default_value = "current_week")]
    pub expiry_kind: ExpiryKind,

    /// Option type (CE or PE)
    #[arg(long)]
    pub option_type: OptionType,

    /// Strike mode (ATM, OTM, ITM, ABSOLUTE, DELTA)
    #[arg(long, default_value = "ATM")]
    pub mode: String,

    /// Steps for OTM/ITM, target price for ABSOLUTE
    #[arg(long, allow_negative_numbers = true)]
    pub value: Option<Decimal>,

    /// Reference spot price used to centre the ATM strike
    #[arg(long)]
    pub spot: Option<Decimal>,

    /// Resolve as of this date instead of today (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Master script CSV (overrides dataset.path from config)
    #[arg(long)]
    pub dataset: Option<PathBuf>,
}

impl ResolveArgs {
    /// Builds the request these arguments describe.
    ///
    /// # Errors
    /// Returns an error for an unknown strike mode.
    pub fn to_request(&self) -> Result<ResolutionRequest> {
        Ok(ResolutionRequest {
            underlying: self.underlying,
            expiry_kind: self.expiry_kind,
            option_type: self.option_type,
            strike_selector: StrikeSelector::from_parts(&self.mode, self.value)?,
            spot: self.spot,
        })
    }
}

/// Runs the resolve command.
///
/// # Errors
/// Returns an error if the master script cannot be loaded or the intent
/// resolves to no instrument.
pub fn run_resolve(args: &ResolveArgs, config: &AppConfig) -> Result<()> {
    let request = args.to_request()?;
    let index = load_index(dataset_path(args.dataset.as_ref(), config))?;
    let today = args.today.unwrap_or_else(|| Utc::now().date_naive());

    tracing::info!(
        underlying = %request.underlying,
        expiry_kind = %request.expiry_kind,
        option_type = %request.option_type,
        mode = request.strike_selector.mode(),
        %today,
        "Resolving instrument"
    );

    let record = Resolver::new(Arc::new(index)).resolve_on(&request, today)?;
    println!("{}", serde_json::to_string_pretty(&record)?);

    Ok(())
}
