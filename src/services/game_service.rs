use tokio::{task::JoinHandle, time::sleep};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    dto::game::{GameSnapshot, MotionResponse},
    error::ServiceError,
    services::{
        haptics::HapticPattern, score_service, shake_detector::ShakeDetector, sse_events, ticker,
    },
    state::{
        ActiveGame, SharedState,
        color::{Color, RandomColors},
        session::{GameSession, SessionEvent, SessionSnapshot, Transition},
        state_machine::GamePhase,
    },
};

/// Whether the ticker of a session should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// Session still counting down.
    Running,
    /// Session finished or was replaced.
    Stopped,
}

/// Construct and start a new session, replacing a finished one.
pub async fn start_game(state: &SharedState) -> Result<GameSnapshot, ServiceError> {
    let (events, snapshot) = {
        let mut slot = state.game().lock().await;
        if let Some(active) = slot.as_ref() {
            if active.session.phase() != GamePhase::Finished {
                return Err(ServiceError::InvalidState(
                    "a game is already running; abandon it first".into(),
                ));
            }
        }

        let mut session = GameSession::new(
            state.config().rules,
            Box::new(RandomColors::from_os_rng()),
        )
        .with_shake_signal(state.shake().clone());
        let events = session.start()?;
        let snapshot = session.snapshot();

        let mut active = ActiveGame::new(session);
        active.set_ticker(ticker::spawn(state.clone(), snapshot.id));
        *slot = Some(active);

        (events, snapshot)
    };

    dispatch_events(state, &snapshot, events).await;
    Ok(snapshot.into())
}

/// Current state of the session.
pub async fn snapshot(state: &SharedState) -> Result<GameSnapshot, ServiceError> {
    let slot = state.game().lock().await;
    let active = slot.as_ref().ok_or_else(no_active_game)?;
    Ok(active.session.snapshot().into())
}

/// Stop showing the sequence.
pub async fn hide_sequence(state: &SharedState) -> Result<GameSnapshot, ServiceError> {
    apply(state, |active| active.session.hide_sequence()).await
}

/// Record one tap; schedules the next round when the input gets judged.
pub async fn submit_color(state: &SharedState, color: Color) -> Result<GameSnapshot, ServiceError> {
    let dwell_state = state.clone();
    apply(state, move |active| {
        let events = active.session.submit_color(color)?;
        if events
            .iter()
            .any(|event| matches!(event, SessionEvent::Judged(_)))
        {
            let handle =
                schedule_dwell(dwell_state, active.session.id(), active.session.version());
            active.set_dwell(handle);
        }
        Ok(events)
    })
    .await
}

/// Move on from feedback without waiting for the dwell.
pub async fn advance_round(state: &SharedState) -> Result<GameSnapshot, ServiceError> {
    apply(state, |active| active.session.advance_round()).await
}

/// Raise the shake flag; it only counts during the bonus round.
///
/// Sensor-path counterpart of [`GameSession::signal_shake`]: the flag in
/// [`AppState::shake`](crate::state::AppState::shake) is the one every session
/// is built with, so no session lock is taken.
pub fn signal_shake(state: &SharedState) {
    state.shake().raise();
    debug!("shake signaled");
}

/// Threshold an accelerometer sample and raise the shake flag when it qualifies.
pub fn submit_motion(
    state: &SharedState,
    x: f64,
    y: f64,
    z: f64,
) -> Result<MotionResponse, ServiceError> {
    if ![x, y, z].iter().all(|axis| axis.is_finite()) {
        return Err(ServiceError::InvalidInput(
            "motion sample must contain finite values".into(),
        ));
    }

    let detector = ShakeDetector::new(state.config().timing.shake_threshold);
    let shake_detected = detector.is_shake(x, y, z);
    if shake_detected {
        signal_shake(state);
    }

    Ok(MotionResponse { shake_detected })
}

/// Discard the current session; its ticker and dwell are cancelled.
pub async fn abandon_game(state: &SharedState) -> Result<(), ServiceError> {
    let abandoned = state.game().lock().await.take().ok_or_else(no_active_game)?;

    let snapshot = abandoned.session.snapshot();
    drop(abandoned);

    if snapshot.phase != GamePhase::Finished {
        info!(session_id = %snapshot.id, score = snapshot.score, "game session abandoned");
        sse_events::broadcast_sensor(state, false);
    }
    Ok(())
}

/// Advance the session by one tick. Called by the session ticker.
pub async fn tick(state: &SharedState, session_id: Uuid) -> TickStatus {
    let (events, snapshot) = {
        let mut slot = state.game().lock().await;
        let Some(active) = slot
            .as_mut()
            .filter(|active| active.session.id() == session_id)
        else {
            return TickStatus::Stopped;
        };
        let events = active.session.tick();
        (events, active.session.snapshot())
    };

    sse_events::broadcast_tick(state, &snapshot);
    dispatch_events(state, &snapshot, events).await;

    if snapshot.phase.is_ticking() {
        TickStatus::Running
    } else {
        TickStatus::Stopped
    }
}

/// Run `operation` on the current session under the lock, then publish its events.
async fn apply<F>(state: &SharedState, operation: F) -> Result<GameSnapshot, ServiceError>
where
    F: FnOnce(&mut ActiveGame) -> Transition,
{
    let (events, snapshot) = {
        let mut slot = state.game().lock().await;
        let active = slot.as_mut().ok_or_else(no_active_game)?;
        let events = operation(active)?;
        (events, active.session.snapshot())
    };

    dispatch_events(state, &snapshot, events).await;
    Ok(snapshot.into())
}

/// Advance to the next round once the feedback has been on screen long enough.
///
/// Does nothing if the session changed in the meantime (replaced, advanced by
/// hand, or moved to the bonus round).
fn schedule_dwell(state: SharedState, session_id: Uuid, version: usize) -> JoinHandle<()> {
    let dwell = state.config().timing.feedback_dwell;
    tokio::spawn(async move {
        sleep(dwell).await;

        let (events, snapshot) = {
            let mut slot = state.game().lock().await;
            let Some(active) = slot.as_mut().filter(|active| {
                active.session.id() == session_id && active.session.version() == version
            }) else {
                debug!(%session_id, "session moved on during feedback dwell");
                return;
            };
            match active.session.advance_round() {
                Ok(events) => (events, active.session.snapshot()),
                Err(err) => {
                    debug!(%session_id, error = %err, "feedback dwell could not advance");
                    return;
                }
            }
        };

        dispatch_events(&state, &snapshot, events).await;
    })
}

/// Turn session events into broadcasts, haptics and persistence.
async fn dispatch_events(state: &SharedState, snapshot: &SessionSnapshot, events: Vec<SessionEvent>) {
    for event in events {
        match event {
            SessionEvent::PhaseChanged { from, to } => {
                debug!(session_id = %snapshot.id, ?from, ?to, "phase changed");
                sse_events::broadcast_phase_changed(state, snapshot);
            }
            SessionEvent::ShakeDetection { active } => {
                sse_events::broadcast_sensor(state, active);
            }
            SessionEvent::Judged(feedback) => {
                sse_events::broadcast_feedback(state, snapshot, feedback);
            }
            SessionEvent::BonusAwarded { points } => {
                state.haptics().pulse(HapticPattern::Error);
                sse_events::broadcast_bonus_awarded(state, snapshot, points);
            }
            SessionEvent::Finished { score } => {
                score_service::record_final_score(state, snapshot.id, score).await;
                sse_events::broadcast_game_finished(state, snapshot.id, score);
            }
        }
    }
}

fn no_active_game() -> ServiceError {
    ServiceError::NotFound("no active game".into())
}
