//! Error types for resolution and the HTTP boundary.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::domain::repositories::RepositoryError;
use crate::infrastructure::cache::CacheError;

/// Infrastructure failure during a single resolve call.
///
/// Never a domain decision: nothing is cached because of one of these.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("{0} timed out")]
    Timeout(&'static str),

    #[error("password verification task failed: {0}")]
    Verifier(String),
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

/// Errors returned to HTTP clients.
///
/// The first three mirror the denied
/// [`ResolutionOutcome`](crate::domain::resolution::ResolutionOutcome)s.
/// `InvalidQuery` covers query strings that do not parse, such as a repeated
/// `password`. `Internal` hides the cause, which is logged when the error is
/// created.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Short link not found.")]
    NotFound,

    #[error("Short link is inactive.")]
    Inactive,

    #[error("Password required or incorrect password.")]
    Unauthorized,

    #[error("Invalid query string.")]
    InvalidQuery,

    #[error("Internal server error.")]
    Internal,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Inactive => StatusCode::FORBIDDEN,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::InvalidQuery => StatusCode::BAD_REQUEST,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        error!("Resolution failed: {}", e);
        AppError::Internal
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Inactive.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidQuery.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Internal.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_detail_messages() {
        assert_eq!(AppError::NotFound.to_string(), "Short link not found.");
        assert_eq!(AppError::Inactive.to_string(), "Short link is inactive.");
        assert_eq!(
            AppError::Unauthorized.to_string(),
            "Password required or incorrect password."
        );
    }

    #[test]
    fn test_infrastructure_errors_are_opaque() {
        let err = AppError::from(ResolveError::Timeout("repository lookup"));
        assert!(matches!(err, AppError::Internal));
        assert!(!err.to_string().contains("repository"));
    }
}
