//! Deterministic resolution of index option intents against the Dhan master script.
//!
//! Given an underlying, an expiry bucket, an option type and a strike rule,
//! the [`Resolver`] picks exactly one contract from an immutable
//! [`InstrumentIndex`] or fails with a typed [`ResolveError`]:
//! - `loader` parses the master script CSV into typed records
//! - `index` keys records by `(underlying, expiry, option_type, strike)`
//! - `expiry` maps current week / next week / monthly to a dataset expiry
//! - `strike` maps ATM / OTM / ITM / ABSOLUTE / DELTA to a step-aligned strike
//! - `reload` swaps in a freshly loaded index when the file changes
//!
//! Resolution does no I/O and never mutates the index, so one index can be
//! shared behind an `Arc` by any number of concurrent callers.

pub mod error;
pub mod expiry;
pub mod index;
pub mod loader;
pub mod reload;
pub mod resolver;
pub mod strike;
pub mod types;

pub use error::{DatasetError, ParseError, ResolveError};
pub use expiry::select_expiry;
pub use index::InstrumentIndex;
pub use loader::{load_dataset, parse_dataset};
pub use reload::{DatasetWatcher, IndexHandle};
pub use resolver::Resolver;
pub use strike::{infer_step, select_strike, DEFAULT_STRIKE_STEP};
pub use types::{
    ExpiryKind, InstrumentKey, InstrumentRecord, OptionType, ResolutionRequest, StrikeSelector,
    Underlying,
};
