use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::{common::FeedbackDto, game::GameSnapshot};

#[derive(Clone, Debug)]
/// Dispatched payload carried across SSE channels.
pub struct ServerEvent {
    /// SSE event name; unnamed events use the default `message` type.
    pub event: Option<String>,
    /// Serialized payload.
    pub data: String,
}

impl ServerEvent {
    /// Build an event from an already serialised payload.
    pub fn new(event: Option<String>, data: String) -> Self {
        Self { event, data }
    }

    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
/// Broadcast whenever the session changes phase.
pub struct PhaseChangedEvent(pub GameSnapshot);

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast every tick with the countdowns.
pub struct TickEvent {
    /// Session that ticked.
    pub session_id: Uuid,
    /// Seconds left in the main countdown.
    pub main_time_remaining: u32,
    /// Seconds left in the bonus countdown.
    pub bonus_time_remaining: u32,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a round is judged.
pub struct FeedbackEvent {
    /// Session that was judged.
    pub session_id: Uuid,
    /// Round outcome.
    pub feedback: FeedbackDto,
    /// Score after judging.
    pub score: u32,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the shake bonus is granted.
pub struct BonusAwardedEvent {
    /// Session receiving the bonus.
    pub session_id: Uuid,
    /// Points added.
    pub points: u32,
    /// Score including the bonus.
    pub score: u32,
}

#[derive(Debug, Serialize, ToSchema)]
/// Asks the client to vibrate.
pub struct HapticEvent {
    /// Pattern name, e.g. `error`.
    pub pattern: String,
}

#[derive(Debug, Serialize, ToSchema)]
/// Tells the client to start or stop streaming motion samples.
pub struct SensorEvent {
    /// Whether samples should be sent.
    pub active: bool,
    /// Expected delay between two samples.
    pub poll_interval_ms: u64,
}

#[derive(Debug, Serialize, ToSchema)]
/// Sent once when the session is over.
pub struct GameFinishedEvent {
    /// Session that ended.
    pub session_id: Uuid,
    /// Final score.
    pub score: u32,
}
