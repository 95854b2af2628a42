pub mod content_handler;
pub mod user_handler;

use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, RepositoryError};

#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// Single place where the error taxonomy meets HTTP: validation → 400,
/// missing entity → 404, duplicate phone → 409, everything else → 500.
pub(crate) fn error_response(err: DomainError) -> Response {
    let status = match &err {
        DomainError::EmptyUsername | DomainError::InvalidPhone | DomainError::MissingUserId => {
            StatusCode::BAD_REQUEST
        }
        DomainError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        DomainError::Repository(RepositoryError::DuplicatePhone) => StatusCode::CONFLICT,
        DomainError::Repository(RepositoryError::DatabaseError(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
        .into_response()
}
