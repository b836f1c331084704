//! Immutable lookup structure over the loaded master script.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use crate::error::DatasetError;
use crate::loader::load_dataset;
use crate::types::{InstrumentKey, InstrumentRecord, Underlying};

/// Records keyed by `(underlying, expiry, option_type, strike)`.
///
/// Each key maps to record positions in load order, so the first candidate
/// of a duplicated key is always the first row that carried it.
#[derive(Debug, Clone, Default)]
pub struct InstrumentIndex {
    records: Vec<InstrumentRecord>,
    by_key: HashMap<InstrumentKey, Vec<usize>>,
}

impl InstrumentIndex {
    #[must_use]
    pub fn new(records: Vec<InstrumentRecord>) -> Self {
        let mut by_key: HashMap<InstrumentKey, Vec<usize>> = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            by_key.entry(record.key()).or_default().push(pos);
        }
        Self { records, by_key }
    }

    /// Loads the master script at `path` and indexes it.
    ///
    /// # Errors
    ///
    /// Propagates any [`DatasetError`] from the loader.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        load_dataset(path).map(Self::new)
    }

    /// All records matching `key`, in load order.
    pub fn candidates<'a>(
        &'a self,
        key: &InstrumentKey,
    ) -> impl Iterator<Item = &'a InstrumentRecord> + 'a {
        self.by_key
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|&pos| &self.records[pos])
    }

    /// First record loaded for `key`.
    #[must_use]
    pub fn first(&self, key: &InstrumentKey) -> Option<&InstrumentRecord> {
        self.candidates(key).next()
    }

    /// Distinct expiries for `underlying`, ascending.
    #[must_use]
    pub fn expiries(&self, underlying: Underlying) -> Vec<NaiveDate> {
        self.records
            .iter()
            .filter(|r| r.underlying_symbol == underlying.as_str())
            .map(|r| r.expiry)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct strikes for `(underlying, expiry)`, ascending.
    #[must_use]
    pub fn strikes(&self, underlying: Underlying, expiry: NaiveDate) -> Vec<Decimal> {
        self.records
            .iter()
            .filter(|r| r.underlying_symbol == underlying.as_str() && r.expiry == expiry)
            .map(|r| r.strike.normalize())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Row counts per underlying symbol, as found in the file.
    #[must_use]
    pub fn counts_by_underlying(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.underlying_symbol.clone()).or_insert(0) += 1;
        }
        counts
    }

    #[must_use]
    pub fn records(&self) -> &[InstrumentRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
