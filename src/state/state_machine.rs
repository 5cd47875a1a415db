use thiserror::Error;

/// Discrete phases a game session goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Session constructed but not started yet.
    NotStarted,
    /// The target sequence is displayed for memorization.
    ShowingSequence,
    /// The sequence is hidden and the player taps colors.
    AwaitingInput,
    /// The round was judged; the host displays the outcome before the next round.
    Feedback,
    /// Main timer expired; shaking the device may award bonus points.
    BonusRound,
    /// Terminal phase, the score is final.
    Finished,
}

impl GamePhase {
    /// Whether the per-second tick has any effect in this phase.
    pub fn is_ticking(self) -> bool {
        !matches!(self, GamePhase::NotStarted | GamePhase::Finished)
    }

    /// Phases during which the main countdown runs.
    pub fn is_main_round(self) -> bool {
        matches!(
            self,
            GamePhase::ShowingSequence | GamePhase::AwaitingInput | GamePhase::Feedback
        )
    }
}

/// Events that can be applied to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Begin the first round.
    Start,
    /// Player is done memorizing.
    HideSequence,
    /// Player entered as many colors as the target holds.
    SequenceCompleted,
    /// Feedback dwell elapsed; start a new round.
    AdvanceRound,
    /// Main countdown reached zero.
    MainTimerExpired,
    /// Bonus countdown reached zero.
    BonusTimerExpired,
}

/// Error returned when attempting to apply an invalid transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition: {event:?} cannot be applied while in {from:?}")]
pub struct InvalidTransition {
    /// The phase the state machine was in when the invalid event was received.
    pub from: GamePhase,
    /// The event that cannot be applied from this phase.
    pub event: GameEvent,
}

/// Phase holder enforcing the legal transitions of a session.
#[derive(Debug, Clone)]
pub struct GameStateMachine {
    phase: GamePhase,
    version: usize,
}

impl Default for GameStateMachine {
    fn default() -> Self {
        Self {
            phase: GamePhase::NotStarted,
            version: 0,
        }
    }
}

impl GameStateMachine {
    /// Create a new state machine in [`GamePhase::NotStarted`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect the current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Number of transitions applied so far.
    pub fn version(&self) -> usize {
        self.version
    }

    /// Check whether `event` is legal without applying it.
    #[cfg(test)]
    fn can_apply(&self, event: GameEvent) -> bool {
        self.compute_transition(event).is_ok()
    }

    /// Apply `event`, returning the new phase. The phase is untouched on error.
    pub fn apply(&mut self, event: GameEvent) -> Result<GamePhase, InvalidTransition> {
        let next = self.compute_transition(event)?;
        self.phase = next;
        self.version += 1;
        Ok(next)
    }

    /// Compute a transition from an event if the transition is valid.
    fn compute_transition(&self, event: GameEvent) -> Result<GamePhase, InvalidTransition> {
        let next = match (self.phase, event) {
            (GamePhase::NotStarted, GameEvent::Start) => GamePhase::ShowingSequence,
            (GamePhase::ShowingSequence, GameEvent::HideSequence) => GamePhase::AwaitingInput,
            (GamePhase::AwaitingInput, GameEvent::SequenceCompleted) => GamePhase::Feedback,
            (GamePhase::Feedback, GameEvent::AdvanceRound) => GamePhase::ShowingSequence,
            (phase, GameEvent::MainTimerExpired) if phase.is_main_round() => GamePhase::BonusRound,
            (GamePhase::BonusRound, GameEvent::BonusTimerExpired) => GamePhase::Finished,
            (from, event) => return Err(InvalidTransition { from, event }),
        };

        Ok(next)
    }
}
