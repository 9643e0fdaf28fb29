use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::draw::{DrawQuery, DrawResponse},
    error::AppError,
    services::draw_service,
    state::SharedState,
};

/// Operator endpoint that executes (or re-executes) the draw.
pub fn router() -> Router<SharedState> {
    Router::new().route("/draw", get(run_draw).post(run_draw))
}

#[utoipa::path(
    post,
    path = "/api/draw",
    tag = "draw",
    params(DrawQuery),
    responses(
        (status = 200, description = "Draw executed", body = DrawResponse),
        (status = 400, description = "Fewer than two participants"),
        (status = 401, description = "Missing or wrong secret"),
        (status = 500, description = "Storage failure; re-run to repair a partial draw")
    )
)]
/// Generate a fresh derangement for the event and persist it.
pub async fn run_draw(
    State(state): State<SharedState>,
    Query(query): Query<DrawQuery>,
) -> Result<Json<DrawResponse>, AppError> {
    let outcome = draw_service::run_draw(&state, query.secret.as_deref()).await?;
    Ok(Json(DrawResponse::new(outcome.count)))
}
