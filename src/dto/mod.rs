use std::time::SystemTime;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Colors and feedback names.
pub mod common;
/// Game snapshots and player requests.
pub mod game;
/// Health check payload.
pub mod health;
/// Client-facing phase names.
pub mod phase;
/// Score history payloads.
pub mod scores;
/// SSE event payloads.
pub mod sse;

fn format_system_time(time: SystemTime) -> String {
    OffsetDateTime::from(time)
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}
