use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Color Repeat.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::stream,
        crate::routes::game::get_game,
        crate::routes::game::start_game,
        crate::routes::game::hide_sequence,
        crate::routes::game::submit_color,
        crate::routes::game::advance_round,
        crate::routes::game::signal_shake,
        crate::routes::game::submit_motion,
        crate::routes::game::abandon_game,
        crate::routes::scores::list_scores,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::common::ColorName,
            crate::dto::common::FeedbackDto,
            crate::dto::phase::VisibleGamePhase,
            crate::dto::game::GameSnapshot,
            crate::dto::game::SubmitColorRequest,
            crate::dto::game::MotionSampleRequest,
            crate::dto::game::MotionResponse,
            crate::dto::scores::ScoreEntry,
            crate::dto::scores::ScoresResponse,
            crate::dto::sse::TickEvent,
            crate::dto::sse::FeedbackEvent,
            crate::dto::sse::BonusAwardedEvent,
            crate::dto::sse::HapticEvent,
            crate::dto::sse::SensorEvent,
            crate::dto::sse::GameFinishedEvent,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sse", description = "Server-sent events stream"),
        (name = "game", description = "Game session control"),
        (name = "scores", description = "Past scores"),
    )
)]
pub struct ApiDoc;
