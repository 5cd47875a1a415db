use axum::Router;

use crate::state::SharedState;

/// Swagger UI.
pub mod docs;
/// Game control endpoints.
pub mod game;
/// Health check.
pub mod health;
/// Past scores.
pub mod scores;
/// Event stream.
pub mod sse;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(sse::router())
        .merge(game::router())
        .merge(scores::router());

    api_router.merge(docs::router()).with_state(state)
}
