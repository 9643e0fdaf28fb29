use axum::Router;

use crate::state::SharedState;

pub mod docs;
pub mod draw;
pub mod health;
pub mod identity;
pub mod public;
pub mod reveal;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = draw::router().merge(reveal::router()).merge(public::router());

    let docs_router = docs::router(state.clone());

    health::router()
        .nest("/api", api_router)
        .merge(docs_router)
        .with_state(state)
}
