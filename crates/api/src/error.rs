//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fulfillment::UnknownAction;
use ledger::{ErrorKind, LedgerError};

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client.
    BadRequest(String),
    /// Ledger or fulfillment failure.
    Ledger(LedgerError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Ledger(err) => (ledger_status(&err), err.to_string()),
        };
        tracing::debug!(%status, error = %message, "request failed");

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn ledger_status(err: &LedgerError) -> StatusCode {
    match err.kind() {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::AlreadyExists | ErrorKind::InsufficientStock | ErrorKind::StockOverflow => {
            StatusCode::CONFLICT
        }
        ErrorKind::UnknownField => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError::Ledger(err)
    }
}

impl From<UnknownAction> for ApiError {
    fn from(err: UnknownAction) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
