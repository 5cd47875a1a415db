use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::{color::Color, session::Feedback};

/// Wire name of a color button.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ColorName {
    /// Red button.
    Red,
    /// Orange button.
    Orange,
    /// Yellow button.
    Yellow,
    /// Green button.
    Green,
    /// Blue button.
    Blue,
    /// Purple button.
    Purple,
}

impl From<Color> for ColorName {
    fn from(value: Color) -> Self {
        match value {
            Color::Red => ColorName::Red,
            Color::Orange => ColorName::Orange,
            Color::Yellow => ColorName::Yellow,
            Color::Green => ColorName::Green,
            Color::Blue => ColorName::Blue,
            Color::Purple => ColorName::Purple,
        }
    }
}

impl From<ColorName> for Color {
    fn from(value: ColorName) -> Self {
        match value {
            ColorName::Red => Color::Red,
            ColorName::Orange => Color::Orange,
            ColorName::Yellow => Color::Yellow,
            ColorName::Green => Color::Green,
            ColorName::Blue => Color::Blue,
            ColorName::Purple => Color::Purple,
        }
    }
}

/// Outcome of a judged round as shown to the player.
#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackDto {
    /// Sequence reproduced exactly.
    Correct,
    /// Sequence missed.
    Incorrect,
}

impl From<Feedback> for FeedbackDto {
    fn from(value: Feedback) -> Self {
        match value {
            Feedback::Correct => FeedbackDto::Correct,
            Feedback::Incorrect => FeedbackDto::Incorrect,
        }
    }
}
