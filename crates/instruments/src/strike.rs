//! Strike selection over the strike ladder of one expiry.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::ResolveError;
use crate::index::InstrumentIndex;
use crate::types::{StrikeSelector, Underlying};

/// Step used when the ladder has fewer than two strikes.
pub const DEFAULT_STRIKE_STEP: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Maps `selector` to a strike for `(underlying, expiry)`.
///
/// The result is step-aligned but not checked against the dataset.
///
/// # Errors
///
/// Returns [`ResolveError::NoStrikes`] when no spot is given and the index
/// has no strikes to centre on, and [`ResolveError::StrikeOutOfRange`] when
/// the spot or selector value pushes the arithmetic past `Decimal`'s range.
pub fn select_strike(
    index: &InstrumentIndex,
    underlying: Underlying,
    expiry: NaiveDate,
    selector: &StrikeSelector,
    spot: Option<Decimal>,
) -> Result<Decimal, ResolveError> {
    let out_of_range = || ResolveError::StrikeOutOfRange {
        underlying,
        expiry,
        mode: selector.mode(),
    };

    let strikes = index.strikes(underlying, expiry);
    let step = infer_step(&strikes);
    let atm = match effective_spot(spot) {
        Some(spot) => round_to_step(spot, step).ok_or_else(out_of_range)?,
        None => middle_strike(&strikes).ok_or(ResolveError::NoStrikes { underlying, expiry })?,
    };

    if let StrikeSelector::Delta { value } = selector {
        warn!(%underlying, %expiry, delta = ?value, "Delta strike selection unsupported, using ATM");
    }

    let strike = apply_selector(atm, step, selector).ok_or_else(out_of_range)?;
    debug!(
        %underlying,
        %expiry,
        mode = selector.mode(),
        %step,
        %atm,
        %strike,
        "Selected strike"
    );
    Ok(strike)
}

/// Smallest positive gap between adjacent strikes of an ascending ladder.
#[must_use]
pub fn infer_step(strikes: &[Decimal]) -> Decimal {
    strikes
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .filter(|gap| *gap > Decimal::ZERO)
        .min()
        .unwrap_or(DEFAULT_STRIKE_STEP)
}

/// A zero spot counts as no spot.
fn effective_spot(spot: Option<Decimal>) -> Option<Decimal> {
    spot.filter(|s| !s.is_zero())
}

/// Centre of the ladder; the upper middle for an even count.
fn middle_strike(strikes: &[Decimal]) -> Option<Decimal> {
    strikes.get(strikes.len() / 2).copied()
}

/// Applies the selector offset to `atm`. Always adds for OTM and subtracts
/// for ITM, whatever the option type.
///
/// Returns `None` if the offset overflows.
#[must_use]
pub fn apply_selector(atm: Decimal, step: Decimal, selector: &StrikeSelector) -> Option<Decimal> {
    let steps = |value: Option<Decimal>| round_half_up(value.unwrap_or(Decimal::ONE))?.checked_mul(step);
    let strike = match *selector {
        StrikeSelector::Atm | StrikeSelector::Delta { .. } => atm,
        StrikeSelector::Otm { value } => atm.checked_add(steps(value)?)?,
        StrikeSelector::Itm { value } => atm.checked_sub(steps(value)?)?,
        StrikeSelector::Absolute { value } => round_to_step(value.unwrap_or(atm), step)?,
    };
    Some(strike.normalize())
}

fn round_to_step(price: Decimal, step: Decimal) -> Option<Decimal> {
    round_half_up(price.checked_div(step)?)?.checked_mul(step)
}

/// Rounds to the nearest integer, halves toward positive infinity.
fn round_half_up(value: Decimal) -> Option<Decimal> {
    value.checked_add(Decimal::new(5, 1)).map(|v| v.floor())
}
