use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

/// Final score of a completed session, as stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreEntity {
    /// Stable identifier for the record.
    pub id: Uuid,
    /// Score reached when the session finished.
    pub score: u32,
    /// When the session finished.
    pub recorded_at: SystemTime,
}

impl ScoreEntity {
    /// Build a record with a fresh identifier.
    pub fn new(score: u32, recorded_at: SystemTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            score,
            recorded_at,
        }
    }
}
