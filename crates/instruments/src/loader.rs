//! Master script CSV loader.
//!
//! Columns are matched by header name, so field order is free and extra
//! columns are ignored. Every required field is parsed into its typed form;
//! the first row that fails aborts the load with [`DatasetError::Validation`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt::Display;
use std::io;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use crate::error::DatasetError;
use crate::types::{InstrumentRecord, OptionType};

/// Raw row as it appears in the file, before typing.
#[derive(Debug, Deserialize)]
struct RawRow {
    security_id: String,
    trading_symbol: String,
    exchange_segment: String,
    instrument_type: String,
    underlying_symbol: String,
    expiry: String,
    strike: String,
    option_type: String,
    lot_size: String,
    tick_size: String,
}

/// Loads every row of the master script at `path`, in file order.
///
/// # Errors
///
/// Returns [`DatasetError::Load`] if the file cannot be opened or is not a
/// CSV with the required header, and [`DatasetError::Validation`] for the
/// first row with a malformed field.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<InstrumentRecord>, DatasetError> {
    let path = path.as_ref();
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| DatasetError::Load {
            path: path.to_path_buf(),
            source,
        })?;

    let records = read_records(reader, path)?;
    info!(path = %path.display(), records = records.len(), "Loaded master script");
    Ok(records)
}

/// Parses master script CSV from any reader. Used for in-memory datasets.
///
/// # Errors
///
/// Same as [`load_dataset`].
pub fn parse_dataset<R: io::Read>(input: R) -> Result<Vec<InstrumentRecord>, DatasetError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);
    read_records(reader, Path::new("<input>"))
}

fn read_records<R: io::Read>(
    mut reader: csv::Reader<R>,
    path: &Path,
) -> Result<Vec<InstrumentRecord>, DatasetError> {
    let load_err = |source| DatasetError::Load {
        path: path.to_path_buf(),
        source,
    };

    let headers = reader.headers().map_err(load_err)?.clone();
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result.map_err(load_err)?;
        let line = record.position().map_or(0, csv::Position::line);
        let raw: RawRow = record.deserialize(Some(&headers)).map_err(load_err)?;
        records.push(to_record(&raw, line)?);
    }

    Ok(records)
}

fn to_record(raw: &RawRow, line: u64) -> Result<InstrumentRecord, DatasetError> {
    if raw.underlying_symbol.is_empty() {
        return Err(invalid(line, "underlying_symbol", "", "must not be empty"));
    }

    Ok(InstrumentRecord {
        security_id: parse_field(line, "security_id", &raw.security_id)?,
        trading_symbol: raw.trading_symbol.clone(),
        exchange_segment: parse_field(line, "exchange_segment", &raw.exchange_segment)?,
        instrument_type: raw.instrument_type.clone(),
        underlying_symbol: raw.underlying_symbol.to_ascii_uppercase(),
        expiry: parse_expiry(line, &raw.expiry)?,
        strike: parse_field(line, "strike", &raw.strike)?,
        option_type: parse_field::<OptionType>(line, "option_type", &raw.option_type)?,
        lot_size: parse_positive(line, "lot_size", &raw.lot_size)?,
        tick_size: parse_positive(line, "tick_size", &raw.tick_size)?,
    })
}

fn parse_field<T>(line: u64, column: &'static str, value: &str) -> Result<T, DatasetError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse::<T>()
        .map_err(|e| invalid(line, column, value, e))
}

fn parse_positive(line: u64, column: &'static str, value: &str) -> Result<Decimal, DatasetError> {
    let parsed: Decimal = parse_field(line, column, value)?;
    if parsed <= Decimal::ZERO {
        return Err(invalid(line, column, value, "must be positive"));
    }
    Ok(parsed)
}

/// Accepts `YYYY-MM-DD`, ignoring any time suffix some master dumps carry.
fn parse_expiry(line: u64, value: &str) -> Result<NaiveDate, DatasetError> {
    let date = value.split([' ', 'T']).next().unwrap_or_default();
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| invalid(line, "expiry", value, e))
}

fn invalid(line: u64, column: &'static str, value: &str, reason: impl Display) -> DatasetError {
    DatasetError::Validation {
        line,
        column,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
