use serde::Serialize;
use utoipa::ToSchema;

/// Health payload returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
    /// Whether a game session is currently held by the server.
    pub session_active: bool,
}

impl HealthResponse {
    /// Score store reachable.
    pub fn ok(session_active: bool) -> Self {
        Self {
            status: "ok".to_string(),
            session_active,
        }
    }

    /// Score store failing; games still run but scores may be lost.
    pub fn degraded(session_active: bool) -> Self {
        Self {
            status: "degraded".to_string(),
            session_active,
        }
    }

    /// Whether the score store check failed.
    pub fn is_degraded(&self) -> bool {
        self.status == "degraded"
    }
}
