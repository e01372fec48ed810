//! Incident HTTP Routes
//!
//! Endpoints for counting, listing, and paginating delay incident records.
//!
//! Count endpoints answer `{"count": n}` and treat zero matches as a valid
//! answer. Record endpoints run the empty check instead: a selection with
//! zero rows comes back as 404 `{"message": "No Records"}`, so callers can
//! tell an empty result from a malformed request.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::encode::{encode_selection, OutputFormat};
use crate::observability::{Logger, MetricsRegistry};
use crate::query::{parse_id, require_records, PageParams, QueryEngine, QueryError};
use crate::schema::{BORO_COLUMN, DATE_COLUMN, REASON_COLUMN};
use crate::store::Selection;

use super::errors::{ApiError, ApiResult};

// ==================
// Shared State
// ==================

/// Incident state shared across handlers
pub struct IncidentState {
    pub engine: QueryEngine,
    pub metrics: Arc<MetricsRegistry>,
}

impl IncidentState {
    pub fn new(engine: QueryEngine, metrics: Arc<MetricsRegistry>) -> Self {
        Self { engine, metrics }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct DateCountQuery {
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReasonCountQuery {
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BoroCountQuery {
    #[serde(default)]
    pub boro: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecordsQuery {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
}

/// Listing filter plus paging. Limit and offset stay raw strings here so
/// broken values surface as the structured paging error, not a generic
/// deserialization failure.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub offset: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FormatQuery {
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: usize,
}

// ==================
// Incident Routes
// ==================

/// Create incident routes
pub fn incident_routes(state: Arc<IncidentState>) -> Router {
    Router::new()
        .route("/", get(greeting_handler))
        .route("/echo", get(echo_handler))
        // Count endpoints
        .route("/date", get(count_by_date_handler))
        .route("/reason", get(count_by_reason_handler))
        .route("/boro", get(count_by_boro_handler))
        // Record endpoints
        .route("/records", get(records_by_date_handler))
        .route("/breakdowns", get(list_breakdowns_handler))
        .route("/breakdowns/:id", get(breakdown_by_id_handler))
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// Run a count query, recording the outcome
fn count_exact(state: &IncidentState, column: &str, value: &str) -> ApiResult<CountResponse> {
    let count = state
        .engine
        .count_by_exact(column, value)
        .map_err(ApiError::from)?;

    state.metrics.record_query_executed();
    let matches = count.to_string();
    Logger::info(
        "QUERY_EXECUTED",
        &[
            ("op", "count"),
            ("column", column),
            ("value", value),
            ("matches", &matches),
        ],
    );

    Ok(CountResponse { count })
}

/// Encode a non-empty selection in the requested format, recording the
/// outcome
fn respond(
    state: &IncidentState,
    op: &str,
    selection: Selection,
    format: OutputFormat,
) -> ApiResult<Response> {
    let body = encode_selection(&selection, format)?;

    state.metrics.record_query_executed();
    let rows = selection.len().to_string();
    Logger::info("QUERY_EXECUTED", &[("op", op), ("rows", &rows)]);

    Ok(([(header::CONTENT_TYPE, format.content_type())], body).into_response())
}

/// Record a failed request in the metrics and the log, then pass the
/// error on to the response mapping
fn observe_rejection(state: &IncidentState, err: ApiError) -> ApiError {
    match &err {
        ApiError::Query(QueryError::NoRecords) => {
            state.metrics.record_empty_result();
            Logger::info("NO_RECORDS", &[]);
        }
        ApiError::Query(QueryError::Load(load)) => {
            // The provider already counted the failed load.
            let detail = load.to_string();
            Logger::error("DATASET_LOAD_FAILED", &[("error", &detail)]);
        }
        other => {
            state.metrics.record_query_rejected();
            let detail = other.to_string();
            Logger::error("QUERY_REJECTED", &[("error", &detail)]);
        }
    }
    err
}

// ==================
// Root Handlers
// ==================

async fn greeting_handler() -> &'static str {
    "Hello, Welcome to our app!"
}

/// Logs the request line, headers, and body, then points the caller at
/// the console
async fn echo_handler(method: Method, uri: Uri, headers: HeaderMap, body: String) -> &'static str {
    let method_text = method.to_string();
    let uri_text = uri.to_string();
    let header_text = headers
        .iter()
        .map(|(name, value)| {
            format!("{}={}", name, String::from_utf8_lossy(value.as_bytes()))
        })
        .collect::<Vec<_>>()
        .join(", ");

    Logger::info(
        "REQUEST_ECHO",
        &[
            ("method", &method_text),
            ("uri", &uri_text),
            ("headers", &header_text),
            ("body", &body),
        ],
    );

    "see console"
}

// ==================
// Count Handlers
// ==================

async fn count_by_date_handler(
    State(state): State<Arc<IncidentState>>,
    Query(query): Query<DateCountQuery>,
) -> Result<Json<CountResponse>, ApiError> {
    let outcome = query
        .date
        .as_deref()
        .ok_or(ApiError::MissingParam("date"))
        .and_then(|date| count_exact(&state, DATE_COLUMN, date));

    outcome.map(Json).map_err(|err| observe_rejection(&state, err))
}

async fn count_by_reason_handler(
    State(state): State<Arc<IncidentState>>,
    Query(query): Query<ReasonCountQuery>,
) -> Result<Json<CountResponse>, ApiError> {
    let outcome = query
        .reason
        .as_deref()
        .ok_or(ApiError::MissingParam("reason"))
        .and_then(|reason| count_exact(&state, REASON_COLUMN, reason));

    outcome.map(Json).map_err(|err| observe_rejection(&state, err))
}

async fn count_by_boro_handler(
    State(state): State<Arc<IncidentState>>,
    Query(query): Query<BoroCountQuery>,
) -> Result<Json<CountResponse>, ApiError> {
    let outcome = query
        .boro
        .as_deref()
        .ok_or(ApiError::MissingParam("boro"))
        .and_then(|boro| count_exact(&state, BORO_COLUMN, boro));

    outcome.map(Json).map_err(|err| observe_rejection(&state, err))
}

// ==================
// Record Handlers
// ==================

async fn records_by_date_handler(
    State(state): State<Arc<IncidentState>>,
    Query(query): Query<RecordsQuery>,
) -> Result<Response, ApiError> {
    records_by_date(&state, &query).map_err(|err| observe_rejection(&state, err))
}

fn records_by_date(state: &IncidentState, query: &RecordsQuery) -> ApiResult<Response> {
    let date = query.date.as_deref().ok_or(ApiError::MissingParam("date"))?;
    let format = OutputFormat::parse(query.format.as_deref())?;

    let selection = state.engine.select_by_exact(DATE_COLUMN, date)?;
    let selection = require_records(selection)?;

    respond(state, "records", selection, format)
}

async fn list_breakdowns_handler(
    State(state): State<Arc<IncidentState>>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    list_breakdowns(&state, &query).map_err(|err| observe_rejection(&state, err))
}

fn list_breakdowns(state: &IncidentState, query: &ListQuery) -> ApiResult<Response> {
    let format = OutputFormat::parse(query.format.as_deref())?;
    let page = PageParams::parse(query.limit.as_deref(), query.offset.as_deref())?;

    // No filter means the full table; half a filter is rejected.
    let filter = match (query.column.as_deref(), query.value.as_deref()) {
        (Some(column), Some(value)) => Some((column, value)),
        (None, None) => None,
        (Some(_), None) => return Err(ApiError::MissingParam("value")),
        (None, Some(_)) => return Err(ApiError::MissingParam("column")),
    };

    let selection = state.engine.select_by_arbitrary(filter)?;
    let selection = require_records(selection.paginate(page.limit, page.offset))?;

    respond(state, "list", selection, format)
}

async fn breakdown_by_id_handler(
    State(state): State<Arc<IncidentState>>,
    Path(raw_id): Path<String>,
    Query(query): Query<FormatQuery>,
) -> Result<Response, ApiError> {
    breakdown_by_id(&state, &raw_id, &query).map_err(|err| observe_rejection(&state, err))
}

fn breakdown_by_id(state: &IncidentState, raw_id: &str, query: &FormatQuery) -> ApiResult<Response> {
    let id = parse_id(raw_id)?;
    let format = OutputFormat::parse(query.format.as_deref())?;

    let selection = require_records(state.engine.select_by_id(id)?)?;

    respond(state, "by_id", selection, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_response_serialization() {
        let response = CountResponse { count: 2 };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"count":2}"#);
    }

    #[test]
    fn test_list_query_accepts_partial_params() {
        let query: ListQuery =
            serde_json::from_str(r#"{"column": "reason", "value": "Mechanical"}"#).unwrap();
        assert_eq!(query.column.as_deref(), Some("reason"));
        assert!(query.limit.is_none());
        assert!(query.format.is_none());
    }
}
