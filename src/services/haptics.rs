use tracing::warn;

use crate::{
    dto::sse::{HapticEvent, ServerEvent},
    state::SseHub,
};

const EVENT_HAPTIC: &str = "haptic";

/// Vibration patterns a client can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticPattern {
    /// Short buzz used when bonus points land.
    Error,
}

impl HapticPattern {
    fn as_str(self) -> &'static str {
        match self {
            HapticPattern::Error => "error",
        }
    }
}

/// Fire-and-forget haptic notification target.
pub trait HapticSink: Send + Sync {
    /// Request a vibration; delivery is not confirmed.
    fn pulse(&self, pattern: HapticPattern);
}

/// Forwards haptic requests to SSE subscribers.
pub struct SseHapticSink {
    hub: SseHub,
}

impl SseHapticSink {
    /// Sink publishing on `hub`.
    pub fn new(hub: SseHub) -> Self {
        Self { hub }
    }
}

impl HapticSink for SseHapticSink {
    fn pulse(&self, pattern: HapticPattern) {
        let payload = HapticEvent {
            pattern: pattern.as_str().to_string(),
        };
        match ServerEvent::json(Some(EVENT_HAPTIC.to_string()), &payload) {
            Ok(event) => self.hub.broadcast(event),
            Err(err) => warn!(error = %err, "failed to serialize haptic payload"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pulse_is_broadcast_as_haptic_event() {
        let hub = SseHub::new(4);
        let mut receiver = hub.subscribe();
        SseHapticSink::new(hub).pulse(HapticPattern::Error);

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.event.as_deref(), Some("haptic"));
        assert_eq!(event.data, r#"{"pattern":"error"}"#);
    }
}
