//! Resolution of trade intents to concrete contracts.

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::debug;

use crate::error::ResolveError;
use crate::expiry::select_expiry;
use crate::index::InstrumentIndex;
use crate::strike::select_strike;
use crate::types::{InstrumentKey, InstrumentRecord, ResolutionRequest};

/// Resolves requests against a shared, read-only index.
///
/// Cloning is cheap; every clone reads the same index.
#[derive(Debug, Clone)]
pub struct Resolver {
    index: Arc<InstrumentIndex>,
}

impl Resolver {
    #[must_use]
    pub const fn new(index: Arc<InstrumentIndex>) -> Self {
        Self { index }
    }

    #[must_use]
    pub fn index(&self) -> &InstrumentIndex {
        &self.index
    }

    /// Resolves `request` relative to today's UTC date.
    ///
    /// # Errors
    ///
    /// See [`Resolver::resolve_on`].
    pub fn resolve(&self, request: &ResolutionRequest) -> Result<InstrumentRecord, ResolveError> {
        self.resolve_on(request, Utc::now().date_naive())
    }

    /// Resolves `request` as if `today` were the current date.
    ///
    /// A miss is final: there is no retry and no substitution of a nearby
    /// strike.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InstrumentNotFound`] with the composed key when
    /// no record matches, or the selector errors for an underlying or expiry
    /// with nothing to select from.
    pub fn resolve_on(
        &self,
        request: &ResolutionRequest,
        today: NaiveDate,
    ) -> Result<InstrumentRecord, ResolveError> {
        let expiry = select_expiry(&self.index, request.underlying, request.expiry_kind, today)?;
        let strike = select_strike(
            &self.index,
            request.underlying,
            expiry,
            &request.strike_selector,
            request.spot,
        )?;

        let key = InstrumentKey::new(request.underlying, expiry, request.option_type, strike);
        let record = self
            .index
            .first(&key)
            .cloned()
            .ok_or(ResolveError::InstrumentNotFound { key })?;

        debug!(
            security_id = record.security_id,
            trading_symbol = %record.trading_symbol,
            "Resolved instrument"
        );
        Ok(record)
    }
}
