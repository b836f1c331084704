//! Expiry bucket selection.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::error::ResolveError;
use crate::index::InstrumentIndex;
use crate::types::{ExpiryKind, Underlying};

/// Maps `kind` to a concrete expiry present in the index for `underlying`.
///
/// # Errors
///
/// Returns [`ResolveError::NoExpiries`] if the index holds no rows for `underlying`.
pub fn select_expiry(
    index: &InstrumentIndex,
    underlying: Underlying,
    kind: ExpiryKind,
    today: NaiveDate,
) -> Result<NaiveDate, ResolveError> {
    let expiries = index.expiries(underlying);
    let expiry = pick_expiry(&expiries, kind, today).ok_or(ResolveError::NoExpiries { underlying })?;
    debug!(%underlying, %kind, %today, %expiry, "Selected expiry");
    Ok(expiry)
}

/// Picks from `expiries`, which must be sorted ascending.
///
/// When the dataset's horizon is short the pick degrades instead of failing:
/// - `CurrentWeek`: first expiry on or after `today`, else the earliest one.
/// - `NextWeek`: the expiry after the current one, else the current one.
/// - `Monthly`: first month-end expiry on or after `today`, else the latest one.
///
/// Returns `None` only for an empty list.
#[must_use]
pub fn pick_expiry(expiries: &[NaiveDate], kind: ExpiryKind, today: NaiveDate) -> Option<NaiveDate> {
    let last = *expiries.last()?;

    if kind == ExpiryKind::Monthly {
        let monthly = expiries
            .iter()
            .copied()
            .find(|d| *d >= today && is_month_end(*d));
        return Some(monthly.unwrap_or(last));
    }

    let current_pos = expiries.iter().position(|d| *d >= today).unwrap_or(0);
    match kind {
        ExpiryKind::CurrentWeek => Some(expiries[current_pos]),
        _ => Some(expiries[(current_pos + 1).min(expiries.len() - 1)]),
    }
}

/// True when the next calendar day falls in a different month.
#[must_use]
pub fn is_month_end(date: NaiveDate) -> bool {
    date.succ_opt().map_or(true, |next| next.month() != date.month())
}
