use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::{
    dto::sse::{
        BonusAwardedEvent, FeedbackEvent, GameFinishedEvent, PhaseChangedEvent, SensorEvent,
        ServerEvent, TickEvent,
    },
    state::{
        SharedState,
        session::{Feedback, SessionSnapshot},
    },
};

const EVENT_PHASE_CHANGED: &str = "phase_changed";
const EVENT_TICK: &str = "tick";
const EVENT_FEEDBACK: &str = "feedback";
const EVENT_BONUS_AWARDED: &str = "bonus_awarded";
const EVENT_SENSOR: &str = "sensor";
const EVENT_GAME_FINISHED: &str = "game_finished";

/// Broadcast a full snapshot after a phase change.
pub fn broadcast_phase_changed(state: &SharedState, snapshot: &SessionSnapshot) {
    let payload = PhaseChangedEvent(snapshot.clone().into());
    send_event(state, EVENT_PHASE_CHANGED, &payload);
}

/// Broadcast the countdowns after a tick.
pub fn broadcast_tick(state: &SharedState, snapshot: &SessionSnapshot) {
    let payload = TickEvent {
        session_id: snapshot.id,
        main_time_remaining: snapshot.main_time_remaining,
        bonus_time_remaining: snapshot.bonus_time_remaining,
    };
    send_event(state, EVENT_TICK, &payload);
}

/// Broadcast the judgement of a round.
pub fn broadcast_feedback(state: &SharedState, snapshot: &SessionSnapshot, feedback: Feedback) {
    let payload = FeedbackEvent {
        session_id: snapshot.id,
        feedback: feedback.into(),
        score: snapshot.score,
    };
    send_event(state, EVENT_FEEDBACK, &payload);
}

/// Broadcast that shake bonus points were granted.
pub fn broadcast_bonus_awarded(state: &SharedState, snapshot: &SessionSnapshot, points: u32) {
    let payload = BonusAwardedEvent {
        session_id: snapshot.id,
        points,
        score: snapshot.score,
    };
    send_event(state, EVENT_BONUS_AWARDED, &payload);
}

/// Ask clients to start or stop streaming motion samples.
pub fn broadcast_sensor(state: &SharedState, active: bool) {
    let payload = SensorEvent {
        active,
        poll_interval_ms: state.config().timing.motion_poll_interval.as_millis() as u64,
    };
    send_event(state, EVENT_SENSOR, &payload);
}

/// Broadcast the final score.
pub fn broadcast_game_finished(state: &SharedState, session_id: Uuid, score: u32) {
    let payload = GameFinishedEvent { session_id, score };
    send_event(state, EVENT_GAME_FINISHED, &payload);
}

fn send_event(state: &SharedState, event: &str, payload: &impl Serialize) {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => state.sse().broadcast(event),
        Err(err) => warn!(event, error = %err, "failed to serialize SSE payload"),
    }
}
