//! Domain types for instrument resolution.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Index underlyings a resolution request may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Underlying {
    #[serde(rename = "NIFTY")]
    Nifty,
    #[serde(rename = "BANKNIFTY")]
    BankNifty,
    #[serde(rename = "FINNIFTY")]
    FinNifty,
}

impl Underlying {
    pub const ALL: [Self; 3] = [Self::Nifty, Self::BankNifty, Self::FinNifty];

    /// Symbol as it appears in the master script `underlying_symbol` column.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nifty => "NIFTY",
            Self::BankNifty => "BANKNIFTY",
            Self::FinNifty => "FINNIFTY",
        }
    }
}

impl fmt::Display for Underlying {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Underlying {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|u| u.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::new("underlying", s))
    }
}

/// Option right in NSE notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionType {
    /// Call.
    #[serde(rename = "CE")]
    Ce,
    /// Put.
    #[serde(rename = "PE")]
    Pe,
}

impl OptionType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ce => "CE",
            Self::Pe => "PE",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CE" => Ok(Self::Ce),
            "PE" => Ok(Self::Pe),
            _ => Err(ParseError::new("option type", s)),
        }
    }
}

/// Abstract expiry horizon mapped onto a concrete dataset expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryKind {
    CurrentWeek,
    NextWeek,
    Monthly,
}

impl ExpiryKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentWeek => "current_week",
            Self::NextWeek => "next_week",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for ExpiryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpiryKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "current_week" => Ok(Self::CurrentWeek),
            "next_week" => Ok(Self::NextWeek),
            "monthly" => Ok(Self::Monthly),
            _ => Err(ParseError::new("expiry kind", s)),
        }
    }
}

/// Rule for picking a strike relative to the at-the-money strike.
///
/// Serialized as `{ "mode": "OTM", "value": 2 }`. `value` is read by
/// `Otm`/`Itm` (number of steps, default 1) and `Absolute` (target price,
/// default ATM). `Delta` carries its target for callers but selection
/// falls back to ATM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "UPPERCASE")]
pub enum StrikeSelector {
    Atm,
    Otm {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Decimal>,
    },
    Itm {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Decimal>,
    },
    Absolute {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Decimal>,
    },
    Delta {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Decimal>,
    },
}

impl StrikeSelector {
    /// Builds a selector from a mode name and optional value, as entered on
    /// a command line.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` for a mode other than ATM, OTM, ITM, ABSOLUTE or DELTA.
    pub fn from_parts(mode: &str, value: Option<Decimal>) -> Result<Self, ParseError> {
        match mode.trim().to_ascii_uppercase().as_str() {
            "ATM" => Ok(Self::Atm),
            "OTM" => Ok(Self::Otm { value }),
            "ITM" => Ok(Self::Itm { value }),
            "ABSOLUTE" => Ok(Self::Absolute { value }),
            "DELTA" => Ok(Self::Delta { value }),
            _ => Err(ParseError::new("strike mode", mode)),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> &'static str {
        match self {
            Self::Atm => "ATM",
            Self::Otm { .. } => "OTM",
            Self::Itm { .. } => "ITM",
            Self::Absolute { .. } => "ABSOLUTE",
            Self::Delta { .. } => "DELTA",
        }
    }
}

/// Abstract trade intent to be resolved to one tradeable contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolutionRequest {
    pub underlying: Underlying,
    pub expiry_kind: ExpiryKind,
    pub option_type: OptionType,
    pub strike_selector: StrikeSelector,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot: Option<Decimal>,
}

/// One row of the master script.
///
/// Serializes `strike`, `lot_size` and `tick_size` as JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentRecord {
    pub security_id: u64,
    pub trading_symbol: String,
    pub exchange_segment: i32,
    pub instrument_type: String,
    pub underlying_symbol: String,
    pub expiry: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub strike: Decimal,
    pub option_type: OptionType,
    #[serde(with = "rust_decimal::serde::float")]
    pub lot_size: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tick_size: Decimal,
}

impl InstrumentRecord {
    #[must_use]
    pub fn key(&self) -> InstrumentKey {
        InstrumentKey {
            underlying: self.underlying_symbol.clone(),
            expiry: self.expiry,
            option_type: self.option_type,
            strike: self.strike,
        }
    }

    /// Human-readable contract description (e.g., "NIFTY 22500CE 2024-01-04").
    #[must_use]
    pub fn display_name(&self) -> String {
        format!(
            "{} {}{} {}",
            self.underlying_symbol,
            self.strike.normalize(),
            self.option_type,
            self.expiry
        )
    }
}

/// Composite address of an instrument in the index.
///
/// `Decimal` hashes by value, so `22500` and `22500.0` are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstrumentKey {
    pub underlying: String,
    pub expiry: NaiveDate,
    pub option_type: OptionType,
    pub strike: Decimal,
}

impl InstrumentKey {
    #[must_use]
    pub fn new(
        underlying: Underlying,
        expiry: NaiveDate,
        option_type: OptionType,
        strike: Decimal,
    ) -> Self {
        Self {
            underlying: underlying.as_str().to_string(),
            expiry,
            option_type,
            strike,
        }
    }
}

impl fmt::Display for InstrumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.underlying,
            self.expiry,
            self.option_type,
            self.strike.normalize()
        )
    }
}
