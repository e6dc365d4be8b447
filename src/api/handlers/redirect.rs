//! Handler for short link redirect.

use axum::{
    extract::{Path, Query, State, rejection::QueryRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::api::dto::redirect::RedirectQuery;
use crate::domain::resolution::ResolutionOutcome;
use crate::error::AppError;
use crate::state::AppState;
use tracing::{error, warn};

/// Redirects a slug to its original URL.
///
/// # Endpoint
///
/// `GET /r/{slug}?password=...`
///
/// # Response Codes
///
/// - **302 Found**: `Location` set to the original URL, one click event emitted
/// - **404 Not Found**: unknown slug
/// - **403 Forbidden**: link is inactive
/// - **401 Unauthorized**: password missing or wrong
/// - **400 Bad Request**: query string does not parse (e.g. `password` given twice)
/// - **500 Internal Server Error**: cache or database unavailable, or the
///   stored URL cannot be sent as a `Location` header
///
/// Error bodies are `{"detail": "..."}`.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    query: Result<Query<RedirectQuery>, QueryRejection>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(|e| {
        warn!("Rejected query string for {}: {}", slug, e.status());
        AppError::InvalidQuery
    })?;

    let outcome = state
        .resolution_service
        .resolve(&slug, query.password.as_deref())
        .await?;

    match outcome {
        ResolutionOutcome::Redirect(url) => {
            let location = HeaderValue::try_from(url).map_err(|e| {
                error!("Stored URL for {} is not a valid Location header: {}", slug, e);
                AppError::Internal
            })?;

            Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
        }
        ResolutionOutcome::NotFound => Err(AppError::NotFound),
        ResolutionOutcome::Inactive => Err(AppError::Inactive),
        ResolutionOutcome::Unauthorized => Err(AppError::Unauthorized),
    }
}
