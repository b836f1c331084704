use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use dhan_agent_instruments::{
    IndexHandle, InstrumentRecord, ParseError, ResolutionRequest, ResolveError, Underlying,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub instruments: usize,
    pub underlyings: BTreeMap<String, usize>,
}

#[derive(Debug, Serialize)]
pub struct ExpiriesResponse {
    pub underlying: Underlying,
    pub expiries: Vec<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct StrikesResponse {
    pub underlying: Underlying,
    pub expiry: NaiveDate,
    pub strikes: Vec<Decimal>,
}

/// Error body returned by every handler.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        let (status, key) = match &err {
            ResolveError::InstrumentNotFound { key } => (StatusCode::NOT_FOUND, Some(key.to_string())),
            ResolveError::NoExpiries { .. } | ResolveError::NoStrikes { .. } => (StatusCode::NOT_FOUND, None),
            ResolveError::StrikeOutOfRange { .. } => (StatusCode::BAD_REQUEST, None),
        };
        Self {
            status,
            error: err.to_string(),
            key,
        }
    }
}

impl From<ParseError> for ApiError {
    fn from(err: ParseError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: err.to_string(),
            key: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Reports the size of the index currently being served.
pub async fn health(State(index): State<IndexHandle>) -> Json<HealthResponse> {
    let index = index.current();
    Json(HealthResponse {
        status: "ok",
        instruments: index.len(),
        underlyings: index.counts_by_underlying(),
    })
}

/// Resolves a trade intent to one contract from the master script.
///
/// # Errors
/// Returns `StatusCode::NOT_FOUND` if the intent resolves to no instrument,
/// `StatusCode::BAD_REQUEST` if its numbers put the strike out of range.
pub async fn resolve_instrument(
    State(index): State<IndexHandle>,
    Json(req): Json<ResolutionRequest>,
) -> Result<Json<InstrumentRecord>, ApiError> {
    let record = index.resolver().resolve(&req).map_err(|e| {
        tracing::info!(error = %e, "Instrument resolution failed");
        ApiError::from(e)
    })?;
    Ok(Json(record))
}

/// Lists the expiries available for an underlying.
///
/// # Errors
/// Returns `StatusCode::BAD_REQUEST` for an unknown underlying.
pub async fn list_expiries(
    State(index): State<IndexHandle>,
    Path(underlying): Path<String>,
) -> Result<Json<ExpiriesResponse>, ApiError> {
    let underlying: Underlying = underlying.parse()?;
    Ok(Json(ExpiriesResponse {
        underlying,
        expiries: index.current().expiries(underlying),
    }))
}

/// Lists the strikes available for an underlying and expiry.
///
/// # Errors
/// Returns `StatusCode::BAD_REQUEST` for an unknown underlying.
pub async fn list_strikes(
    State(index): State<IndexHandle>,
    Path((underlying, expiry)): Path<(String, NaiveDate)>,
) -> Result<Json<StrikesResponse>, ApiError> {
    let underlying: Underlying = underlying.parse()?;
    Ok(Json(StrikesResponse {
        underlying,
        expiry,
        strikes: index.current().strikes(underlying, expiry),
    }))
}
