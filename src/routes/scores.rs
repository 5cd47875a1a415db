use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::scores::ScoresResponse, error::AppError, services::score_service, state::SharedState,
};

/// Read-only history of finished games.
pub fn router() -> Router<SharedState> {
    Router::new().route("/scores", get(list_scores))
}

#[utoipa::path(
    get,
    path = "/scores",
    tag = "scores",
    responses(
        (status = 200, description = "Past scores, newest first", body = ScoresResponse),
        (status = 503, description = "Score store unavailable")
    )
)]
/// List past scores.
pub async fn list_scores(State(state): State<SharedState>) -> Result<Json<ScoresResponse>, AppError> {
    let payload = score_service::list_past_scores(&state).await?;
    Ok(Json(payload))
}
