use std::time::SystemTime;

use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    dao::models::ScoreEntity,
    dto::scores::ScoresResponse,
    error::ServiceError,
    state::SharedState,
};

/// Persist the final score of a session.
///
/// Failures are logged and not retried; the session keeps its final score in
/// memory either way.
pub async fn record_final_score(state: &SharedState, session_id: Uuid, score: u32) {
    let entry = ScoreEntity::new(score, SystemTime::now());
    let entry_id = entry.id;

    match state.score_store().save_score(entry).await {
        Ok(()) => info!(%session_id, %entry_id, score, "final score saved"),
        Err(err) => warn!(
            %session_id,
            score,
            error = %err,
            "failed to save final score; it will be missing from history"
        ),
    }
}

/// Past scores, most recent first.
pub async fn list_past_scores(state: &SharedState) -> Result<ScoresResponse, ServiceError> {
    let scores = state.score_store().list_scores().await?;
    Ok(ScoresResponse {
        scores: scores.into_iter().map(Into::into).collect(),
    })
}
