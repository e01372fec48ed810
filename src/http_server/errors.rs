//! # API Errors
//!
//! Error types for the HTTP boundary.
//!
//! Every domain error maps to one status code here. `NoRecords` is the
//! designed empty-result outcome and gets its own body shape,
//! `{"message": "No Records"}`, so callers can tell "nothing matched"
//! from "your request was malformed".

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::encode::EncodeError;
use crate::query::QueryError;
use crate::users::UserError;

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP boundary errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Missing required query parameter
    #[error("Missing required parameter: {0}")]
    MissingParam(&'static str),

    /// Request body was not a well-formed record
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    // ==================
    // Domain Errors
    // ==================
    /// Query rejected or answered empty by the engine
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Output encoding failed
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// User record rejected or user store failed
    #[error(transparent)]
    User(#[from] UserError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            ApiError::MissingParam(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,

            ApiError::Query(err) => match err {
                // 404: well-formed query, zero rows
                QueryError::NoRecords => StatusCode::NOT_FOUND,
                // 500: the dataset itself could not be read
                QueryError::Load(_) => StatusCode::INTERNAL_SERVER_ERROR,
                // 400: unknown column, bad date, bad value, bad paging
                _ => StatusCode::BAD_REQUEST,
            },

            ApiError::Encode(err) => match err {
                EncodeError::Csv(_) | EncodeError::Io(_) | EncodeError::Json(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                _ => StatusCode::BAD_REQUEST,
            },

            ApiError::User(err) => match err {
                UserError::Validation(_) => StatusCode::BAD_REQUEST,
                UserError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if matches!(self, ApiError::Query(QueryError::NoRecords)) {
            let body = Json(serde_json::json!({ "message": "No Records" }));
            return (StatusCode::NOT_FOUND, body).into_response();
        }

        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::MissingParam("date").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(QueryError::BadDate("Febuary".to_string())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(QueryError::NoRecords).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(QueryError::Load(crate::store::LoadError::Empty)).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(EncodeError::UnknownFormat("xml".to_string())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(EncodeError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "writer buffer gone"
            )))
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_no_records_response_is_404() {
        let response = ApiError::from(QueryError::NoRecords).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_response_carries_message() {
        let body = ErrorResponse::from(ApiError::MissingParam("date"));
        assert_eq!(body.code, 400);
        assert!(body.error.contains("date"));
    }
}
