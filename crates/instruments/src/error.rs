//! Error types for dataset loading and instrument resolution.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

use crate::types::{InstrumentKey, Underlying};

/// Errors raised while turning a master script file into records.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The file is missing, unreadable, or not a CSV with the expected header.
    #[error("failed to load dataset {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A row carries a field that does not parse to its required type.
    #[error("invalid {column} `{value}` at line {line}: {reason}")]
    Validation {
        line: u64,
        column: &'static str,
        value: String,
        reason: String,
    },
}

/// Errors raised while resolving a request against a loaded index.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The resolved key has no matching record.
    #[error("no instrument in master script for {key}")]
    InstrumentNotFound { key: InstrumentKey },

    /// The dataset holds no rows at all for the underlying.
    #[error("no expiries in master script for {underlying}")]
    NoExpiries { underlying: Underlying },

    /// A centred strike was requested over an empty strike list.
    #[error("no strikes in master script for {underlying} {expiry}")]
    NoStrikes {
        underlying: Underlying,
        expiry: NaiveDate,
    },

    /// The selector or spot puts the strike outside the representable range.
    #[error("{mode} strike for {underlying} {expiry} is out of range")]
    StrikeOutOfRange {
        underlying: Underlying,
        expiry: NaiveDate,
        mode: &'static str,
    },
}

/// A wire or command-line name that does not map to a known variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} `{value}`")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
