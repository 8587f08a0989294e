//! Error types for the HTTP API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that
//! can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.
//!
//! | Kind | Status |
//! |------|--------|
//! | board not found | 404 |
//! | invalid board, malformed body or path, limit exceeded | 400 |
//! | board kept changing under concurrent updates | 409 |
//! | no still life within `max_attempts` | 422 |
//! | storage or simulation task failure | 500 |

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::service::ServiceError;

/// Message returned to clients for failures whose details stay in the logs.
const INTERNAL_MESSAGE: &str = "An error occurred while processing your request.";

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested board was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request body or path was malformed or the board was rejected.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A board id could not be parsed from the request path.
    #[error("invalid UUID: {0}")]
    InvalidUuid(String),

    /// The board kept changing under concurrent writers.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The board did not reach a stable state within the budget.
    #[error("unprocessable: {0}")]
    Unprocessable(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(_) => Self::NotFound(err.to_string()),
            ServiceError::InvalidBoard(_) | ServiceError::LimitExceeded { .. } => {
                Self::BadRequest(err.to_string())
            }
            ServiceError::Contended { .. } => Self::Conflict(err.to_string()),
            ServiceError::Unstable(_) => Self::Unprocessable(err.to_string()),
            ServiceError::Storage(ref e) => {
                tracing::error!(error = %e, "Storage failure while handling request");
                Self::Internal(INTERNAL_MESSAGE.to_owned())
            }
            ServiceError::Worker(ref e) => {
                tracing::error!(error = %e, "Simulation task failed while handling request");
                Self::Internal(INTERNAL_MESSAGE.to_owned())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) | Self::InvalidUuid(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use conway_db::DbError;
    use conway_types::BoardId;
    use serde_json::Value;

    use super::*;

    async fn render(err: ServiceError) -> (StatusCode, String) {
        let response = ApiError::from(err).into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn storage_failure_hides_details() {
        let err = ServiceError::Storage(DbError::Config(
            "postgresql://conway:s3cret@db/conway unreachable".to_owned(),
        ));
        let (status, body) = render(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("s3cret"));
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], INTERNAL_MESSAGE);
        assert_eq!(json["status"], 500);
    }

    #[tokio::test]
    async fn contended_board_is_conflict() {
        let err = ServiceError::Contended {
            id: BoardId::new(),
            attempts: 16,
        };
        let (status, body) = render(err).await;

        assert_eq!(status, StatusCode::CONFLICT);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], 409);
    }

    #[tokio::test]
    async fn limit_exceeded_is_bad_request() {
        let err = ServiceError::LimitExceeded {
            what: "generations",
            requested: 20,
            limit: 10,
        };
        let (status, body) = render(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("exceeds the limit of 10"));
    }
}
