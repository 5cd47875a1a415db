use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use validator::Validate;

use crate::{
    dto::game::{GameSnapshot, MotionResponse, MotionSampleRequest, SubmitColorRequest},
    error::AppError,
    services::game_service,
    state::SharedState,
};

/// Routes driving the game session.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/game", get(get_game))
        .route("/game/start", post(start_game))
        .route("/game/hide", post(hide_sequence))
        .route("/game/colors", post(submit_color))
        .route("/game/advance", post(advance_round))
        .route("/game/shake", post(signal_shake))
        .route("/game/motion", post(submit_motion))
        .route("/game/abandon", post(abandon_game))
}

#[utoipa::path(
    get,
    path = "/game",
    tag = "game",
    responses(
        (status = 200, description = "Current game", body = GameSnapshot),
        (status = 404, description = "No game")
    )
)]
/// Return the current session state.
pub async fn get_game(State(state): State<SharedState>) -> Result<Json<GameSnapshot>, AppError> {
    Ok(Json(game_service::snapshot(&state).await?))
}

#[utoipa::path(
    post,
    path = "/game/start",
    tag = "game",
    responses(
        (status = 200, description = "New game started", body = GameSnapshot),
        (status = 409, description = "A game is still running")
    )
)]
/// Start a new game ("Play Again" once the previous one finished).
pub async fn start_game(State(state): State<SharedState>) -> Result<Json<GameSnapshot>, AppError> {
    Ok(Json(game_service::start_game(&state).await?))
}

#[utoipa::path(
    post,
    path = "/game/hide",
    tag = "game",
    responses(
        (status = 200, description = "Sequence hidden", body = GameSnapshot),
        (status = 409, description = "Sequence not showing")
    )
)]
/// Hide the sequence and start accepting taps.
pub async fn hide_sequence(
    State(state): State<SharedState>,
) -> Result<Json<GameSnapshot>, AppError> {
    Ok(Json(game_service::hide_sequence(&state).await?))
}

#[utoipa::path(
    post,
    path = "/game/colors",
    tag = "game",
    request_body = SubmitColorRequest,
    responses(
        (status = 200, description = "Tap recorded", body = GameSnapshot),
        (status = 409, description = "Not accepting input")
    )
)]
/// Record one color tap.
pub async fn submit_color(
    State(state): State<SharedState>,
    Json(payload): Json<SubmitColorRequest>,
) -> Result<Json<GameSnapshot>, AppError> {
    Ok(Json(
        game_service::submit_color(&state, payload.color.into()).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/game/advance",
    tag = "game",
    responses(
        (status = 200, description = "Next round", body = GameSnapshot),
        (status = 409, description = "No feedback showing")
    )
)]
/// Skip the remaining feedback dwell.
pub async fn advance_round(
    State(state): State<SharedState>,
) -> Result<Json<GameSnapshot>, AppError> {
    Ok(Json(game_service::advance_round(&state).await?))
}

#[utoipa::path(
    post,
    path = "/game/shake",
    tag = "game",
    responses((status = 202, description = "Shake recorded"))
)]
/// Report a shake detected on the device.
pub async fn signal_shake(State(state): State<SharedState>) -> StatusCode {
    game_service::signal_shake(&state);
    StatusCode::ACCEPTED
}

#[utoipa::path(
    post,
    path = "/game/motion",
    tag = "game",
    request_body = MotionSampleRequest,
    responses(
        (status = 200, description = "Sample processed", body = MotionResponse),
        (status = 400, description = "Sample out of range")
    )
)]
/// Forward one accelerometer sample.
pub async fn submit_motion(
    State(state): State<SharedState>,
    Json(payload): Json<MotionSampleRequest>,
) -> Result<Json<MotionResponse>, AppError> {
    payload.validate()?;
    Ok(Json(game_service::submit_motion(
        &state, payload.x, payload.y, payload.z,
    )?))
}

#[utoipa::path(
    post,
    path = "/game/abandon",
    tag = "game",
    responses(
        (status = 204, description = "Game discarded"),
        (status = 404, description = "No game")
    )
)]
/// Discard the current game without recording its score.
pub async fn abandon_game(State(state): State<SharedState>) -> Result<StatusCode, AppError> {
    game_service::abandon_game(&state).await?;
    Ok(StatusCode::NO_CONTENT)
}
