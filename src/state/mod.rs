/// Palette, color sources and sequences.
pub mod color;
/// The game session core.
pub mod session;
mod sse;
/// Phases and legal transitions.
pub mod state_machine;

use std::sync::Arc;

use tokio::{sync::Mutex, task::JoinHandle};

use crate::{
    config::AppConfig,
    dao::score_store::ScoreStore,
    services::haptics::{HapticSink, SseHapticSink},
    state::{
        session::{GameSession, ShakeSignal},
        state_machine::GamePhase,
    },
};

pub use self::sse::SseHub;

/// Handle on the application state shared by handlers and tasks.
pub type SharedState = Arc<AppState>;

/// Capacity of the SSE broadcast channel.
const SSE_CAPACITY: usize = 64;

/// The session currently owned by the host, with the tasks driving it.
///
/// Dropping it cancels the ticker and any pending feedback dwell.
pub struct ActiveGame {
    /// The session itself.
    pub session: GameSession,
    ticker: Option<JoinHandle<()>>,
    dwell: Option<JoinHandle<()>>,
}

impl ActiveGame {
    /// Wrap a freshly built session; tasks are attached afterwards.
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            ticker: None,
            dwell: None,
        }
    }

    /// Attach the ticker task of this session.
    pub fn set_ticker(&mut self, handle: JoinHandle<()>) {
        if let Some(previous) = self.ticker.replace(handle) {
            previous.abort();
        }
    }

    /// Attach the pending feedback dwell, replacing an older one.
    pub fn set_dwell(&mut self, handle: JoinHandle<()>) {
        if let Some(previous) = self.dwell.replace(handle) {
            previous.abort();
        }
    }
}

impl Drop for ActiveGame {
    fn drop(&mut self) {
        // A finished session's ticker ends by itself once the final score is stored.
        if let Some(ticker) = self.ticker.take() {
            if self.session.phase() != GamePhase::Finished {
                ticker.abort();
            }
        }
        if let Some(dwell) = self.dwell.take() {
            dwell.abort();
        }
    }
}

/// Central application state shared by routes and background tasks.
pub struct AppState {
    config: AppConfig,
    score_store: Arc<dyn ScoreStore>,
    haptics: Arc<dyn HapticSink>,
    sse: SseHub,
    shake: ShakeSignal,
    game: Mutex<Option<ActiveGame>>,
}

impl AppState {
    /// Construct the state with haptic notifications sent over SSE.
    pub fn new(config: AppConfig, score_store: Arc<dyn ScoreStore>) -> SharedState {
        let sse = SseHub::new(SSE_CAPACITY);
        let haptics = Arc::new(SseHapticSink::new(sse.clone()));
        Self::assemble(config, score_store, haptics, sse)
    }

    /// Construct the state with a caller-provided haptic sink.
    pub fn with_haptics(
        config: AppConfig,
        score_store: Arc<dyn ScoreStore>,
        haptics: Arc<dyn HapticSink>,
    ) -> SharedState {
        Self::assemble(config, score_store, haptics, SseHub::new(SSE_CAPACITY))
    }

    fn assemble(
        config: AppConfig,
        score_store: Arc<dyn ScoreStore>,
        haptics: Arc<dyn HapticSink>,
        sse: SseHub,
    ) -> SharedState {
        Arc::new(Self {
            config,
            score_store,
            haptics,
            sse,
            shake: ShakeSignal::default(),
            game: Mutex::new(None),
        })
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Store receiving final scores.
    pub fn score_store(&self) -> Arc<dyn ScoreStore> {
        self.score_store.clone()
    }

    /// Sink notified when bonus points are awarded.
    pub fn haptics(&self) -> &dyn HapticSink {
        self.haptics.as_ref()
    }

    /// Broadcast hub used for the SSE stream.
    pub fn sse(&self) -> &SseHub {
        &self.sse
    }

    /// Shake flag handed to every session, raised without locking the game.
    pub fn shake(&self) -> &ShakeSignal {
        &self.shake
    }

    /// Slot holding the current game, if any.
    pub fn game(&self) -> &Mutex<Option<ActiveGame>> {
        &self.game
    }
}
