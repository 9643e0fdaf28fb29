use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::public::{EventOverviewResponse, MeResponse},
    error::AppError,
    routes::identity::Identity,
    services::public_service,
    state::SharedState,
};

/// Read-only endpoints exposing the event and the caller's own view.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/event", get(get_event_overview))
        .route("/me", get(get_me))
}

#[utoipa::path(
    get,
    path = "/api/event",
    tag = "public",
    responses(
        (status = 200, description = "Event and roster", body = EventOverviewResponse),
        (status = 404, description = "Event not found")
    )
)]
/// Return the event and its roster sorted by name.
pub async fn get_event_overview(
    State(state): State<SharedState>,
) -> Result<Json<EventOverviewResponse>, AppError> {
    let payload = public_service::get_event_overview(&state).await?;
    Ok(Json(payload))
}

#[utoipa::path(
    get,
    path = "/api/me",
    tag = "public",
    responses(
        (status = 200, description = "The caller's own view", body = MeResponse),
        (status = 401, description = "No authenticated participant"),
        (status = 404, description = "Email does not match a participant")
    )
)]
/// Return the calling participant's identity, reveal flag and receiver.
pub async fn get_me(
    State(state): State<SharedState>,
    identity: Identity,
) -> Result<Json<MeResponse>, AppError> {
    let payload = public_service::get_me(&state, &identity.email).await?;
    Ok(Json(payload))
}
