use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{dao::models::ScoreEntity, dto::format_system_time};

/// One past game.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScoreEntry {
    /// Record identifier.
    pub id: Uuid,
    /// Final score.
    pub score: u32,
    /// RFC 3339 timestamp of the end of the game.
    pub recorded_at: String,
}

impl From<ScoreEntity> for ScoreEntry {
    fn from(value: ScoreEntity) -> Self {
        Self {
            id: value.id,
            score: value.score,
            recorded_at: format_system_time(value.recorded_at),
        }
    }
}

/// Past scores, most recent first.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScoresResponse {
    /// Newest first.
    pub scores: Vec<ScoreEntry>,
}
