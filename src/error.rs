//! Error taxonomy: service-level failures and their HTTP projections.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;

use crate::{dao::storage::StorageError, services::draw_engine::DrawError};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage backend is unavailable.
    #[error("storage unavailable")]
    Unavailable(#[source] StorageError),
    /// Application is running in degraded mode without storage.
    #[error("storage unavailable (degraded mode)")]
    Degraded,
    /// Caller is not allowed to perform the operation.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// The operation needs a completed draw but none has run yet.
    #[error("the draw has not been executed yet")]
    DrawPending,
    /// The event roster is too small for a self-avoiding assignment.
    #[error("at least 2 participants are required to draw (got {found})")]
    InsufficientParticipants {
        /// Number of participants currently registered for the event.
        found: usize,
    },
    /// Assignments were persisted but the event flag write failed.
    ///
    /// The store already holds a complete valid assignment set, so the
    /// operator can simply re-run the draw: both writes are pure overwrites.
    #[error("draw partially applied: {assignments} assignments stored but the event flag write failed")]
    PartialDraw {
        /// Number of assignments that were durably written.
        assignments: usize,
        /// Underlying storage failure for the event flag write.
        #[source]
        source: StorageError,
    },
    /// The draw engine violated its own post-condition.
    #[error("draw failed: {0}")]
    DrawFailed(#[source] DrawError),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Unavailable(err)
    }
}

impl From<DrawError> for ServiceError {
    fn from(err: DrawError) -> Self {
        match err {
            DrawError::InsufficientParticipants { found } => {
                ServiceError::InsufficientParticipants { found }
            }
            other => ServiceError::DrawFailed(other),
        }
    }
}

/// Application-level errors that are converted to HTTP responses.
///
/// Each variant carries the machine-readable reason string placed in the
/// `{"error": …}` response body.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Unauthorized access attempt.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Conflict with current state.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unavailable(source) => AppError::Internal(source.to_string()),
            ServiceError::Degraded => AppError::Internal("storage unavailable".into()),
            ServiceError::Unauthorized(_) => AppError::Unauthorized("unauthorized".into()),
            ServiceError::NotFound(message) => AppError::NotFound(message),
            ServiceError::DrawPending => AppError::Conflict("draw_pending".into()),
            ServiceError::InsufficientParticipants { .. } => AppError::BadRequest(err.to_string()),
            ServiceError::PartialDraw { .. } => AppError::Internal(err.to_string()),
            ServiceError::DrawFailed(_) => AppError::Internal(err.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, reason) = match self {
            AppError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason),
            AppError::Unauthorized(reason) => (StatusCode::UNAUTHORIZED, reason),
            AppError::NotFound(reason) => (StatusCode::NOT_FOUND, reason),
            AppError::Conflict(reason) => (StatusCode::CONFLICT, reason),
            AppError::Internal(reason) => (StatusCode::INTERNAL_SERVER_ERROR, reason),
        };

        (status, Json(ErrorBody { error: reason })).into_response()
    }
}
