use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Probe the score store and report whether a session is held.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let session_active = state.game().lock().await.is_some();

    match state.score_store().health_check().await {
        Ok(()) => HealthResponse::ok(session_active),
        Err(err) => {
            warn!(error = %err, "score store health check failed");
            HealthResponse::degraded(session_active)
        }
    }
}
