//! Game session aggregate: rounds, countdowns, scoring and the bonus round.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tracing::{debug, info};
use uuid::Uuid;

use crate::state::{
    color::{Color, ColorSource, Sequence},
    state_machine::{GameEvent, GamePhase, GameStateMachine, InvalidTransition},
};

/// Tunable rules of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    /// Number of colors in every target sequence.
    pub sequence_length: usize,
    /// Length of the main countdown, in ticks.
    pub main_seconds: u32,
    /// Length of the bonus countdown, in ticks.
    pub bonus_seconds: u32,
    /// Points for a correctly reproduced sequence.
    pub correct_points: u32,
    /// Points for shaking during the bonus round.
    pub bonus_points: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            sequence_length: 4,
            main_seconds: 60,
            bonus_seconds: 5,
            correct_points: 1,
            bonus_points: 3,
        }
    }
}

/// Outcome of a judged round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// Input matched the target sequence.
    Correct,
    /// At least one color differed.
    Incorrect,
}

/// Notifications produced by session operations for the host to act upon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The session moved to another phase.
    PhaseChanged {
        /// Phase before the transition.
        from: GamePhase,
        /// Phase after the transition.
        to: GamePhase,
    },
    /// Shake detection should start (on start) or stop (on finish).
    ShakeDetection {
        /// Whether the host should poll the motion sensor.
        active: bool,
    },
    /// A full input sequence was judged.
    Judged(Feedback),
    /// Bonus points were awarded; the host fires haptic feedback.
    BonusAwarded {
        /// Points added to the score.
        points: u32,
    },
    /// Emitted once, on the transition into [`GamePhase::Finished`].
    Finished {
        /// Final score to persist.
        score: u32,
    },
}

/// Flag raised by the shake detector and consumed by bonus ticks.
///
/// Clones share the same flag, so the sensor side can hold one without
/// borrowing the session.
#[derive(Debug, Clone, Default)]
pub struct ShakeSignal(Arc<AtomicBool>);

impl ShakeSignal {
    /// Record a shake.
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether a shake is pending.
    #[cfg(test)]
    pub(crate) fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Read and clear in one step.
    fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }

    fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Read-only view of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Session identifier.
    pub id: Uuid,
    /// Current phase.
    pub phase: GamePhase,
    /// Number of transitions applied so far.
    pub version: usize,
    /// Accumulated score.
    pub score: u32,
    /// Sequence of the current round.
    pub target: Sequence,
    /// Colors tapped so far in the current round.
    pub input: Vec<Color>,
    /// Outcome of the last judged round while in [`GamePhase::Feedback`].
    pub feedback: Option<Feedback>,
    /// Seconds left on the main countdown.
    pub main_time_remaining: u32,
    /// Seconds left on the bonus countdown.
    pub bonus_time_remaining: u32,
    /// Whether the bonus was already granted this bonus round.
    pub bonus_awarded: bool,
}

/// Result of a player/host driven operation.
pub type Transition = Result<Vec<SessionEvent>, InvalidTransition>;

/// One game, from the first round to the final score.
pub struct GameSession {
    id: Uuid,
    rules: GameRules,
    colors: Box<dyn ColorSource + Send>,
    machine: GameStateMachine,
    target: Sequence,
    input: Vec<Color>,
    score: u32,
    feedback: Option<Feedback>,
    main_time_remaining: u32,
    bonus_time_remaining: u32,
    shake: ShakeSignal,
    bonus_awarded: bool,
}

impl GameSession {
    /// Build a session in [`GamePhase::NotStarted`].
    pub fn new(rules: GameRules, colors: Box<dyn ColorSource + Send>) -> Self {
        Self {
            id: Uuid::new_v4(),
            rules,
            colors,
            machine: GameStateMachine::new(),
            target: Sequence::default(),
            input: Vec::with_capacity(rules.sequence_length),
            score: 0,
            feedback: None,
            main_time_remaining: rules.main_seconds,
            bonus_time_remaining: rules.bonus_seconds,
            shake: ShakeSignal::default(),
            bonus_awarded: false,
        }
    }

    /// Share an externally owned shake flag instead of a private one.
    pub fn with_shake_signal(mut self, shake: ShakeSignal) -> Self {
        self.shake = shake;
        self
    }

    /// Session identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current phase.
    pub fn phase(&self) -> GamePhase {
        self.machine.phase()
    }

    /// Number of transitions applied so far.
    pub fn version(&self) -> usize {
        self.machine.version()
    }

    /// Accumulated score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Outcome of the last judged round, if feedback is showing.
    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    /// Handle that lets another execution context signal shakes.
    pub fn shake_signal(&self) -> ShakeSignal {
        self.shake.clone()
    }

    /// Record a shake. Only bonus ticks consume it.
    pub fn signal_shake(&self) {
        self.shake.raise();
    }

    /// Reset the game state and show the first sequence.
    pub fn start(&mut self) -> Transition {
        let from = self.phase();
        let to = self.machine.apply(GameEvent::Start)?;

        self.score = 0;
        self.main_time_remaining = self.rules.main_seconds;
        self.bonus_time_remaining = self.rules.bonus_seconds;
        self.bonus_awarded = false;
        self.feedback = None;
        self.input.clear();
        self.shake.clear();
        self.target = self.generate_sequence();

        info!(session_id = %self.id, "game session started");
        Ok(vec![
            SessionEvent::PhaseChanged { from, to },
            SessionEvent::ShakeDetection { active: true },
        ])
    }

    /// Draw a fresh target sequence from the color source.
    pub fn generate_sequence(&mut self) -> Sequence {
        Sequence::generate(self.rules.sequence_length, self.colors.as_mut())
    }

    /// Stop showing the sequence and start accepting taps.
    pub fn hide_sequence(&mut self) -> Transition {
        let from = self.phase();
        let to = self.machine.apply(GameEvent::HideSequence)?;
        Ok(vec![SessionEvent::PhaseChanged { from, to }])
    }

    /// Append one tap; judges the round once the input is complete.
    pub fn submit_color(&mut self, color: Color) -> Transition {
        let from = self.phase();
        if from != GamePhase::AwaitingInput {
            return Err(InvalidTransition {
                from,
                event: GameEvent::SequenceCompleted,
            });
        }

        self.input.push(color);
        if self.input.len() < self.target.len() {
            return Ok(Vec::new());
        }

        let to = self.machine.apply(GameEvent::SequenceCompleted)?;
        let feedback = if self.target.matches(&self.input) {
            self.score += self.rules.correct_points;
            Feedback::Correct
        } else {
            Feedback::Incorrect
        };
        self.feedback = Some(feedback);

        debug!(session_id = %self.id, ?feedback, score = self.score, "round judged");
        Ok(vec![
            SessionEvent::PhaseChanged { from, to },
            SessionEvent::Judged(feedback),
        ])
    }

    /// Leave feedback and begin a new round with a new sequence.
    pub fn advance_round(&mut self) -> Transition {
        let from = self.phase();
        let to = self.machine.apply(GameEvent::AdvanceRound)?;

        self.feedback = None;
        self.input.clear();
        self.target = self.generate_sequence();

        Ok(vec![SessionEvent::PhaseChanged { from, to }])
    }

    /// Advance the countdowns by one second.
    pub fn tick(&mut self) -> Vec<SessionEvent> {
        let phase = self.phase();
        if phase.is_main_round() {
            self.tick_main(phase)
        } else if phase == GamePhase::BonusRound {
            self.tick_bonus()
        } else {
            Vec::new()
        }
    }

    /// Capture the current state for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            phase: self.phase(),
            version: self.machine.version(),
            score: self.score,
            target: self.target.clone(),
            input: self.input.clone(),
            feedback: self.feedback,
            main_time_remaining: self.main_time_remaining,
            bonus_time_remaining: self.bonus_time_remaining,
            bonus_awarded: self.bonus_awarded,
        }
    }

    fn tick_main(&mut self, from: GamePhase) -> Vec<SessionEvent> {
        self.main_time_remaining = self.main_time_remaining.saturating_sub(1);
        if self.main_time_remaining > 0 {
            return Vec::new();
        }

        let Ok(to) = self.machine.apply(GameEvent::MainTimerExpired) else {
            return Vec::new();
        };

        self.bonus_time_remaining = self.rules.bonus_seconds;
        self.bonus_awarded = false;
        self.feedback = None;
        self.input.clear();
        // A shake recorded before the bonus round must not count.
        self.shake.clear();

        info!(session_id = %self.id, score = self.score, "bonus round started");
        vec![SessionEvent::PhaseChanged { from, to }]
    }

    fn tick_bonus(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        self.bonus_time_remaining = self.bonus_time_remaining.saturating_sub(1);

        if self.shake.take() && !self.bonus_awarded {
            self.score += self.rules.bonus_points;
            self.bonus_awarded = true;
            info!(session_id = %self.id, score = self.score, "bonus points awarded");
            events.push(SessionEvent::BonusAwarded {
                points: self.rules.bonus_points,
            });
        }

        if self.bonus_time_remaining == 0 {
            if let Ok(to) = self.machine.apply(GameEvent::BonusTimerExpired) {
                info!(session_id = %self.id, score = self.score, "game session finished");
                events.push(SessionEvent::PhaseChanged {
                    from: GamePhase::BonusRound,
                    to,
                });
                events.push(SessionEvent::ShakeDetection { active: false });
                events.push(SessionEvent::Finished { score: self.score });
            }
        }

        events
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("id", &self.id)
            .field("phase", &self.phase())
            .field("score", &self.score)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Replays the given colors in a loop.
    struct ScriptedColors(VecDeque<Color>);

    impl ScriptedColors {
        fn boxed(colors: &[Color]) -> Box<dyn ColorSource + Send> {
            Box::new(Self(colors.iter().copied().collect()))
        }
    }

    impl ColorSource for ScriptedColors {
        fn next_color(&mut self) -> Color {
            let color = self.0.pop_front().unwrap();
            self.0.push_back(color);
            color
        }
    }

    const TARGET: [Color; 4] = [Color::Red, Color::Red, Color::Green, Color::Blue];

    fn started() -> GameSession {
        let mut session = GameSession::new(GameRules::default(), ScriptedColors::boxed(&TARGET));
        session.start().unwrap();
        session
    }

    fn in_bonus_round() -> GameSession {
        let mut session = started();
        for _ in 0..60 {
            session.tick();
        }
        assert_eq!(session.phase(), GamePhase::BonusRound);
        session
    }

    fn submit_all(session: &mut GameSession, colors: &[Color]) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        for color in colors {
            events.extend(session.submit_color(*color).unwrap());
        }
        events
    }

    #[test]
    fn start_resets_state_and_requests_sensor_polling() {
        let mut session = GameSession::new(GameRules::default(), ScriptedColors::boxed(&TARGET));
        let events = session.start().unwrap();

        assert_eq!(
            events,
            vec![
                SessionEvent::PhaseChanged {
                    from: GamePhase::NotStarted,
                    to: GamePhase::ShowingSequence,
                },
                SessionEvent::ShakeDetection { active: true },
            ]
        );
        let snapshot = session.snapshot();
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.main_time_remaining, 60);
        assert_eq!(snapshot.bonus_time_remaining, 5);
        assert_eq!(snapshot.target.colors(), &TARGET);
        assert!(snapshot.input.is_empty());
    }

    #[test]
    fn start_twice_is_rejected() {
        let mut session = started();
        assert!(session.start().is_err());
        assert_eq!(session.phase(), GamePhase::ShowingSequence);
    }

    #[test]
    fn correct_round_scores_and_next_round_regenerates() {
        let mut session = started();
        session.hide_sequence().unwrap();
        let events = submit_all(&mut session, &TARGET);

        assert_eq!(
            events,
            vec![
                SessionEvent::PhaseChanged {
                    from: GamePhase::AwaitingInput,
                    to: GamePhase::Feedback,
                },
                SessionEvent::Judged(Feedback::Correct),
            ]
        );
        assert_eq!(session.feedback(), Some(Feedback::Correct));
        assert_eq!(session.score(), 1);

        session.advance_round().unwrap();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase, GamePhase::ShowingSequence);
        assert!(snapshot.input.is_empty());
        assert_eq!(snapshot.feedback, None);
        assert_eq!(snapshot.target.len(), 4);
    }

    #[test]
    fn sequence_is_regenerated_every_round() {
        let mut session = GameSession::new(
            GameRules::default(),
            ScriptedColors::boxed(&[
                Color::Red,
                Color::Red,
                Color::Green,
                Color::Blue,
                Color::Purple,
                Color::Yellow,
                Color::Orange,
                Color::Purple,
            ]),
        );
        session.start().unwrap();
        let first = session.snapshot().target;

        session.hide_sequence().unwrap();
        submit_all(&mut session, first.colors());
        session.advance_round().unwrap();

        assert_eq!(
            session.snapshot().target.colors(),
            &[Color::Purple, Color::Yellow, Color::Orange, Color::Purple]
        );
    }

    #[test]
    fn single_wrong_color_is_incorrect() {
        let mut session = started();
        session.hide_sequence().unwrap();

        for position in 0..TARGET.len() {
            let mut attempt = TARGET;
            attempt[position] = Color::Yellow;

            if session.phase() == GamePhase::Feedback {
                session.advance_round().unwrap();
                session.hide_sequence().unwrap();
            }
            let events = submit_all(&mut session, &attempt);
            assert!(events.contains(&SessionEvent::Judged(Feedback::Incorrect)));
            assert_eq!(session.score(), 0);
        }
    }

    #[test]
    fn partial_input_does_not_judge() {
        let mut session = started();
        session.hide_sequence().unwrap();
        let events = submit_all(&mut session, &TARGET[..3]);

        assert!(events.is_empty());
        assert_eq!(session.phase(), GamePhase::AwaitingInput);
        assert_eq!(session.snapshot().input.len(), 3);
    }

    #[test]
    fn submit_outside_awaiting_input_leaves_state_unchanged() {
        let mut session = started();
        let before = session.snapshot();
        assert!(session.submit_color(Color::Red).is_err());
        assert_eq!(session.snapshot(), before);

        session.hide_sequence().unwrap();
        submit_all(&mut session, &TARGET);
        let before = session.snapshot();
        assert!(session.submit_color(Color::Red).is_err());
        assert_eq!(session.snapshot(), before);

        let mut idle = GameSession::new(GameRules::default(), ScriptedColors::boxed(&TARGET));
        let before = idle.snapshot();
        assert!(idle.submit_color(Color::Red).is_err());
        assert_eq!(idle.snapshot(), before);
    }

    #[test]
    fn out_of_phase_navigation_is_rejected() {
        let mut session = started();
        assert!(session.advance_round().is_err());
        session.hide_sequence().unwrap();
        assert!(session.hide_sequence().is_err());
        assert_eq!(session.phase(), GamePhase::AwaitingInput);
    }

    #[test]
    fn tick_is_inert_before_start() {
        let mut session = GameSession::new(GameRules::default(), ScriptedColors::boxed(&TARGET));
        assert!(session.tick().is_empty());
        assert_eq!(session.snapshot().main_time_remaining, 60);
    }

    #[test]
    fn main_timer_expiry_enters_bonus_round() {
        let mut session = started();
        session.hide_sequence().unwrap();
        session.submit_color(Color::Red).unwrap();

        for _ in 0..59 {
            assert!(session.tick().is_empty());
        }
        let events = session.tick();

        assert_eq!(
            events,
            vec![SessionEvent::PhaseChanged {
                from: GamePhase::AwaitingInput,
                to: GamePhase::BonusRound,
            }]
        );
        let snapshot = session.snapshot();
        assert_eq!(snapshot.main_time_remaining, 0);
        assert_eq!(snapshot.bonus_time_remaining, 5);
        assert!(!snapshot.bonus_awarded);
        assert!(snapshot.input.is_empty());
    }

    #[test]
    fn bonus_countdown_does_not_move_during_main_round() {
        let mut session = started();
        for _ in 0..30 {
            session.tick();
        }
        assert_eq!(session.snapshot().bonus_time_remaining, 5);
        assert_eq!(session.snapshot().main_time_remaining, 30);
    }

    #[test]
    fn shake_before_bonus_round_is_discarded() {
        let mut session = started();
        session.signal_shake();
        for _ in 0..60 {
            session.tick();
        }
        session.tick();

        assert_eq!(session.score(), 0);
        assert!(!session.snapshot().bonus_awarded);
    }

    #[test]
    fn bonus_is_awarded_once_per_bonus_round() {
        let mut session = in_bonus_round();
        session.signal_shake();

        let first = session.tick();
        assert_eq!(first, vec![SessionEvent::BonusAwarded { points: 3 }]);
        assert_eq!(session.score(), 3);
        assert_eq!(session.snapshot().bonus_time_remaining, 4);

        session.signal_shake();
        let second = session.tick();
        assert!(second.is_empty());
        assert_eq!(session.score(), 3);
        assert_eq!(session.snapshot().bonus_time_remaining, 3);
        assert!(session.snapshot().bonus_awarded);
    }

    #[test]
    fn repeated_shakes_award_at_most_once() {
        let mut session = in_bonus_round();
        let mut awards = 0;
        while session.phase() == GamePhase::BonusRound {
            for _ in 0..3 {
                session.signal_shake();
            }
            awards += session
                .tick()
                .iter()
                .filter(|event| matches!(event, SessionEvent::BonusAwarded { .. }))
                .count();
        }
        assert_eq!(awards, 1);
        assert_eq!(session.score(), 3);
    }

    #[test]
    fn bonus_expiry_finishes_once_with_final_score() {
        let mut session = started();
        session.hide_sequence().unwrap();
        submit_all(&mut session, &TARGET);
        for _ in 0..60 {
            session.tick();
        }

        let mut finished = Vec::new();
        for _ in 0..10 {
            for event in session.tick() {
                if let SessionEvent::Finished { score } = event {
                    finished.push(score);
                }
            }
        }

        assert_eq!(finished, vec![1]);
        assert_eq!(session.phase(), GamePhase::Finished);
        assert_eq!(session.snapshot().bonus_time_remaining, 0);
    }

    #[test]
    fn finish_stops_shake_detection() {
        let mut session = in_bonus_round();
        for _ in 0..4 {
            session.tick();
        }
        let events = session.tick();
        assert_eq!(
            events,
            vec![
                SessionEvent::PhaseChanged {
                    from: GamePhase::BonusRound,
                    to: GamePhase::Finished,
                },
                SessionEvent::ShakeDetection { active: false },
                SessionEvent::Finished { score: 0 },
            ]
        );
    }

    #[test]
    fn shake_on_last_bonus_tick_still_counts() {
        let mut session = in_bonus_round();
        for _ in 0..4 {
            session.tick();
        }
        session.signal_shake();
        let events = session.tick();
        assert_eq!(events[0], SessionEvent::BonusAwarded { points: 3 });
        assert!(events.contains(&SessionEvent::Finished { score: 3 }));
    }

    #[test]
    fn finished_session_ignores_everything() {
        let mut session = in_bonus_round();
        for _ in 0..5 {
            session.tick();
        }
        let before = session.snapshot();

        session.signal_shake();
        assert!(session.tick().is_empty());
        assert!(session.hide_sequence().is_err());
        assert!(session.submit_color(Color::Red).is_err());
        assert!(session.advance_round().is_err());
        assert!(session.start().is_err());
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn score_never_decreases() {
        let mut session = GameSession::new(
            GameRules::default(),
            Box::new(crate::state::color::RandomColors::seeded(3)),
        );
        session.start().unwrap();
        let mut last = 0;
        let mut step = 0u32;

        while session.phase() != GamePhase::Finished {
            match session.phase() {
                GamePhase::ShowingSequence => {
                    session.hide_sequence().unwrap();
                }
                GamePhase::AwaitingInput => {
                    let color = Color::ALL[(step as usize) % Color::ALL.len()];
                    session.submit_color(color).unwrap();
                }
                GamePhase::Feedback => {
                    session.advance_round().unwrap();
                }
                GamePhase::BonusRound => session.signal_shake(),
                _ => {}
            }
            if step % 3 == 0 {
                session.tick();
            }
            assert!(session.score() >= last);
            last = session.score();
            step += 1;
        }
    }

    #[test]
    fn shake_signal_is_shared_between_clones() {
        let session = started();
        let handle = session.shake_signal();
        std::thread::spawn(move || handle.raise()).join().unwrap();
        assert!(session.shake_signal().is_raised());
    }
}
