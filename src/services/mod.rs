/// OpenAPI documentation generation.
pub mod documentation;
/// Game session orchestration: start, input, ticks and dwell.
pub mod game_service;
/// Haptic feedback notifications.
pub mod haptics;
/// Health check service.
pub mod health_service;
/// Final score persistence and history.
pub mod score_service;
/// Accelerometer threshold detection.
pub mod shake_detector;
/// Server-Sent Events message generation.
pub mod sse_events;
/// Server-Sent Events broadcasting service.
pub mod sse_service;
/// Per-session one-second ticker.
pub mod ticker;
