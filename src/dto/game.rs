use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        common::{ColorName, FeedbackDto},
        phase::VisibleGamePhase,
    },
    state::{session::SessionSnapshot, state_machine::GamePhase},
};

/// Bounds on accelerometer readings accepted from clients, in g.
const MIN_ACCELERATION: f64 = -64.0;
const MAX_ACCELERATION: f64 = 64.0;

/// One color button tap.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitColorRequest {
    /// Tapped color.
    pub color: ColorName,
}

/// Accelerometer reading forwarded by the client at the advertised poll rate.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct MotionSampleRequest {
    #[validate(range(min = MIN_ACCELERATION, max = MAX_ACCELERATION))]
    /// Acceleration along x.
    pub x: f64,
    #[validate(range(min = MIN_ACCELERATION, max = MAX_ACCELERATION))]
    /// Acceleration along y.
    pub y: f64,
    #[validate(range(min = MIN_ACCELERATION, max = MAX_ACCELERATION))]
    /// Acceleration along z.
    pub z: f64,
}

/// Whether the submitted sample crossed the shake threshold.
#[derive(Debug, Serialize, ToSchema)]
pub struct MotionResponse {
    /// A shake was registered for the bonus round.
    pub shake_detected: bool,
}

/// Current state of the game as rendered by clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GameSnapshot {
    /// Identifier of the session.
    pub session_id: Uuid,
    /// Current phase.
    pub phase: VisibleGamePhase,
    /// Bumped on every phase change.
    pub version: usize,
    /// Points so far.
    pub score: u32,
    /// Only present while the sequence is being shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<Vec<ColorName>>,
    /// Number of colors to reproduce.
    pub sequence_length: usize,
    /// Colors tapped this round.
    pub input: Vec<ColorName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Outcome of the last judged round while it is displayed.
    pub feedback: Option<FeedbackDto>,
    /// Seconds left in the main countdown.
    pub main_time_remaining: u32,
    /// Seconds left in the bonus countdown.
    pub bonus_time_remaining: u32,
    /// Whether the shake bonus was already granted.
    pub bonus_awarded: bool,
}

impl From<SessionSnapshot> for GameSnapshot {
    fn from(value: SessionSnapshot) -> Self {
        let sequence = (value.phase == GamePhase::ShowingSequence).then(|| {
            value
                .target
                .colors()
                .iter()
                .copied()
                .map(ColorName::from)
                .collect()
        });

        Self {
            session_id: value.id,
            phase: value.phase.into(),
            version: value.version,
            score: value.score,
            sequence,
            sequence_length: value.target.len(),
            input: value.input.into_iter().map(ColorName::from).collect(),
            feedback: value.feedback.map(Into::into),
            main_time_remaining: value.main_time_remaining,
            bonus_time_remaining: value.bonus_time_remaining,
            bonus_awarded: value.bonus_awarded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::color::{Color, Sequence};

    fn snapshot(phase: GamePhase) -> SessionSnapshot {
        SessionSnapshot {
            id: Uuid::new_v4(),
            phase,
            version: 1,
            score: 2,
            target: Sequence::from(vec![Color::Red, Color::Red, Color::Green, Color::Blue]),
            input: Vec::new(),
            feedback: None,
            main_time_remaining: 42,
            bonus_time_remaining: 5,
            bonus_awarded: false,
        }
    }

    #[test]
    fn sequence_is_revealed_only_while_showing() {
        let showing = GameSnapshot::from(snapshot(GamePhase::ShowingSequence));
        assert_eq!(
            showing.sequence,
            Some(vec![
                ColorName::Red,
                ColorName::Red,
                ColorName::Green,
                ColorName::Blue
            ])
        );

        let hidden = GameSnapshot::from(snapshot(GamePhase::AwaitingInput));
        assert_eq!(hidden.sequence, None);
        assert_eq!(hidden.sequence_length, 4);

        let json = serde_json::to_value(&hidden).unwrap();
        assert!(json.get("sequence").is_none());
        assert_eq!(json["phase"], "awaiting_input");
    }

    #[test]
    fn motion_sample_bounds_are_validated() {
        let sample = MotionSampleRequest {
            x: 0.1,
            y: -3.0,
            z: 1.0,
        };
        assert!(sample.validate().is_ok());

        let sample = MotionSampleRequest {
            x: 500.0,
            y: 0.0,
            z: 0.0,
        };
        assert!(sample.validate().is_err());
    }

    #[test]
    fn color_names_are_snake_case() {
        let request: SubmitColorRequest = serde_json::from_str(r#"{ "color": "purple" }"#).unwrap();
        assert_eq!(Color::from(request.color), Color::Purple);
    }
}
