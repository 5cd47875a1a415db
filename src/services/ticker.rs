use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    services::game_service::{self, TickStatus},
    state::SharedState,
};

/// Spawn the clock of one session: the first tick lands one period after start.
///
/// The task ends by itself when the session finishes or is replaced.
pub fn spawn(state: SharedState, session_id: Uuid) -> JoinHandle<()> {
    let period = state.config().timing.tick_interval;
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if game_service::tick(&state, session_id).await == TickStatus::Stopped {
                break;
            }
        }

        debug!(%session_id, "session ticker stopped");
    })
}
