use std::{sync::Arc, time::Duration};

use color_repeat::{
    config::{AppConfig, HostTiming},
    dao::score_store::MemoryScoreStore,
    dto::phase::VisibleGamePhase,
    services::{
        game_service::{self, TickStatus},
        score_service, sse_service,
    },
    state::{AppState, SharedState, color::Color, session::GameRules},
};

fn config() -> AppConfig {
    AppConfig {
        rules: GameRules {
            main_seconds: 3,
            bonus_seconds: 2,
            ..GameRules::default()
        },
        timing: HostTiming {
            tick_interval: Duration::from_secs(3600),
            feedback_dwell: Duration::from_secs(3600),
            ..HostTiming::default()
        },
    }
}

fn state() -> SharedState {
    AppState::new(config(), Arc::new(MemoryScoreStore::new()))
}

async fn tick(state: &SharedState) -> TickStatus {
    let id = game_service::snapshot(state).await.unwrap().session_id;
    game_service::tick(state, id).await
}

#[tokio::test]
async fn round_bonus_and_final_score() {
    let state = state();
    let mut events = sse_service::subscribe(&state);

    let started = game_service::start_game(&state).await.unwrap();
    assert_eq!(started.phase, VisibleGamePhase::ShowingSequence);
    let target: Vec<Color> = started
        .sequence
        .expect("sequence is shown after start")
        .into_iter()
        .map(Color::from)
        .collect();
    assert_eq!(target.len(), 4);

    let hidden = game_service::hide_sequence(&state).await.unwrap();
    assert!(hidden.sequence.is_none());

    let mut judged = hidden;
    for color in target {
        judged = game_service::submit_color(&state, color).await.unwrap();
    }
    assert_eq!(judged.phase, VisibleGamePhase::Feedback);
    assert_eq!(judged.score, 1);

    let next = game_service::advance_round(&state).await.unwrap();
    assert_eq!(next.phase, VisibleGamePhase::ShowingSequence);

    assert_eq!(tick(&state).await, TickStatus::Running);
    assert_eq!(tick(&state).await, TickStatus::Running);
    assert_eq!(tick(&state).await, TickStatus::Running);
    let bonus = game_service::snapshot(&state).await.unwrap();
    assert_eq!(bonus.phase, VisibleGamePhase::BonusRound);
    assert_eq!(bonus.bonus_time_remaining, 2);

    let motion = game_service::submit_motion(&state, 0.0, 3.0, 0.0).unwrap();
    assert!(motion.shake_detected);
    assert_eq!(tick(&state).await, TickStatus::Running);
    assert_eq!(tick(&state).await, TickStatus::Stopped);

    let finished = game_service::snapshot(&state).await.unwrap();
    assert_eq!(finished.phase, VisibleGamePhase::Finished);
    assert_eq!(finished.score, 4);

    let history = score_service::list_past_scores(&state).await.unwrap();
    assert_eq!(history.scores.len(), 1);
    assert_eq!(history.scores[0].score, 4);

    let mut names = Vec::new();
    while let Ok(event) = events.try_recv() {
        names.extend(event.event);
    }
    assert!(names.iter().any(|name| name == "bonus_awarded"));
    assert!(names.iter().any(|name| name == "haptic"));
    assert_eq!(
        names.iter().filter(|name| *name == "game_finished").count(),
        1
    );
}

#[tokio::test]
async fn running_game_blocks_start_until_abandoned() {
    let state = state();

    game_service::start_game(&state).await.unwrap();
    assert!(game_service::start_game(&state).await.is_err());

    game_service::abandon_game(&state).await.unwrap();
    assert!(game_service::snapshot(&state).await.is_err());

    let restarted = game_service::start_game(&state).await.unwrap();
    assert_eq!(restarted.score, 0);
    assert!(
        score_service::list_past_scores(&state)
            .await
            .unwrap()
            .scores
            .is_empty()
    );
}

#[tokio::test]
async fn taps_outside_input_phase_are_rejected() {
    let state = state();
    game_service::start_game(&state).await.unwrap();

    assert!(game_service::submit_color(&state, Color::Red).await.is_err());
    assert!(game_service::advance_round(&state).await.is_err());

    let snapshot = game_service::snapshot(&state).await.unwrap();
    assert_eq!(snapshot.phase, VisibleGamePhase::ShowingSequence);
    assert!(snapshot.input.is_empty());
}
