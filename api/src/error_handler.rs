use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use places_service::PlacesError;
use thiserror::Error;

use crate::core::http::response_envelope::ErrorBody;

/// Message returned when the query parameter is missing or unusable.
pub const QUERY_REQUIRED: &str = "Query parameter is required";

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Startup(#[from] PlacesError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request ---
    /// Missing/malformed input; no outbound call was made.
    #[error("{0}")]
    InvalidRequest(&'static str),

    /// The places provider rejected the search.
    #[error("Places provider error: {0}")]
    Provider(String),

    /// Transport failure or unreadable provider payload.
    #[error("Failed to search places")]
    Upstream,
}

impl AppError {
    /// Maps a failed search onto the request-level error kinds.
    pub fn from_search_failure(err: &PlacesError) -> Self {
        match err {
            PlacesError::ProviderStatus {
                status,
                message: Some(message),
            } => AppError::Provider(format!("{status} ({message})")),
            PlacesError::ProviderStatus { status, .. } => AppError::Provider(status.clone()),
            PlacesError::HttpStatus { status, .. } => AppError::Provider(format!("HTTP {status}")),
            _ => AppError::Upstream,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Startup(_)
            | AppError::Bind(_)
            | AppError::Server(_)
            | AppError::Provider(_)
            | AppError::Upstream => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        ErrorBody::new(self.to_string()).into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<axum::extract::rejection::QueryRejection> for AppError {
    fn from(_: axum::extract::rejection::QueryRejection) -> Self {
        AppError::InvalidRequest(QUERY_REQUIRED)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn provider_status_keeps_status_name() {
        let err = AppError::from_search_failure(&PlacesError::ProviderStatus {
            status: "OVER_QUERY_LIMIT".into(),
            message: None,
        });
        assert_eq!(err.to_string(), "Places provider error: OVER_QUERY_LIMIT");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn http_status_is_a_provider_error() {
        let err = AppError::from_search_failure(&PlacesError::HttpStatus {
            status: StatusCode::FORBIDDEN,
            url: "http://x/textsearch/json".into(),
            snippet: String::new(),
        });
        assert_eq!(err.to_string(), "Places provider error: HTTP 403 Forbidden");
    }

    #[test]
    fn decode_failure_is_generic() {
        let err = AppError::from_search_failure(&PlacesError::Decode("bad".into()));
        assert_eq!(err.to_string(), "Failed to search places");
    }

    #[test]
    fn invalid_request_is_400() {
        let err = AppError::InvalidRequest(QUERY_REQUIRED);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Query parameter is required");
    }
}
