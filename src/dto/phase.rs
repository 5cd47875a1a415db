use serde::Serialize;
use utoipa::ToSchema;

use crate::state::state_machine::GamePhase;

/// Publicly visible game phase exposed to clients (REST/SSE).
#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisibleGamePhase {
    /// Session created but not started.
    NotStarted,
    /// Sequence displayed for memorization.
    ShowingSequence,
    /// Waiting for color taps.
    AwaitingInput,
    /// Showing whether the round was correct.
    Feedback,
    /// Shake for bonus points.
    BonusRound,
    /// Game over.
    Finished,
}

impl From<GamePhase> for VisibleGamePhase {
    fn from(value: GamePhase) -> Self {
        match value {
            GamePhase::NotStarted => VisibleGamePhase::NotStarted,
            GamePhase::ShowingSequence => VisibleGamePhase::ShowingSequence,
            GamePhase::AwaitingInput => VisibleGamePhase::AwaitingInput,
            GamePhase::Feedback => VisibleGamePhase::Feedback,
            GamePhase::BonusRound => VisibleGamePhase::BonusRound,
            GamePhase::Finished => VisibleGamePhase::Finished,
        }
    }
}
