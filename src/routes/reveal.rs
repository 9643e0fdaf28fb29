use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::reveal::{RevealResponse, TrackResponse},
    error::{AppError, ServiceError},
    routes::identity::Identity,
    services::reveal_service,
    state::SharedState,
};

/// Reveal endpoints for the authenticated participant.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/reveal", post(commit_reveal))
        .route("/reveal/track", get(reveal_track))
}

#[utoipa::path(
    post,
    path = "/api/reveal",
    tag = "reveal",
    responses(
        (status = 200, description = "Reveal recorded", body = RevealResponse),
        (status = 401, description = "No authenticated participant"),
        (status = 404, description = "Email does not match a participant"),
        (status = 500, description = "Flag write failed")
    )
)]
/// Record that the calling participant has seen their receiver.
pub async fn commit_reveal(
    State(state): State<SharedState>,
    identity: Identity,
) -> Result<Json<RevealResponse>, AppError> {
    match reveal_service::commit_reveal(&state, &identity.email).await {
        Ok(()) => Ok(Json(RevealResponse::ok())),
        // Clients key their retry banner off this exact reason string.
        Err(ServiceError::Unavailable(_) | ServiceError::Degraded) => {
            Err(AppError::Internal("update_failed".into()))
        }
        Err(err) => Err(err.into()),
    }
}

#[utoipa::path(
    get,
    path = "/api/reveal/track",
    tag = "reveal",
    responses(
        (status = 200, description = "Carousel track for the caller", body = TrackResponse),
        (status = 401, description = "No authenticated participant"),
        (status = 404, description = "No participant or assignment for the caller"),
        (status = 409, description = "Draw has not been executed yet")
    )
)]
/// Return the randomized carousel track the caller's reveal animates over.
pub async fn reveal_track(
    State(state): State<SharedState>,
    identity: Identity,
) -> Result<Json<TrackResponse>, AppError> {
    let track = reveal_service::viewer_track(&state, &identity.email).await?;
    Ok(Json(track))
}
