use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::repository::RepoError;

/// ApiError
///
/// The error taxonomy for the JSON API surface. The access gate itself never
/// produces one of these (its only outcomes are allowed and redirected); this
/// covers the CRUD collaborators, where failures are logged and surfaced as a
/// generic `{"error": ...}` payload.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,

    #[error("premium must be a numeric string")]
    InvalidPremium,

    #[error("unknown submitter")]
    UnknownSubmitter,

    #[error("internal error")]
    Internal,
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::UnknownSubmitter(_) => ApiError::UnknownSubmitter,
            RepoError::NotFound => ApiError::NotFound,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidPremium | ApiError::UnknownSubmitter => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
