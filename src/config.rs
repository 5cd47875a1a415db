//! Application-level configuration loading: game rules and host timings.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use crate::state::session::GameRules;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "COLOR_REPEAT_CONFIG_PATH";

/// Timings owned by the host rather than by the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostTiming {
    /// Period between two session ticks.
    pub tick_interval: Duration,
    /// How long feedback stays on screen before the next round.
    pub feedback_dwell: Duration,
    /// Polling period advertised to clients sending motion samples.
    pub motion_poll_interval: Duration,
    /// Acceleration magnitude above which a sample counts as a shake.
    pub shake_threshold: f64,
}

impl Default for HostTiming {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            feedback_dwell: Duration::from_secs(2),
            motion_poll_interval: Duration::from_millis(200),
            shake_threshold: 2.5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Rules applied to every new session.
    pub rules: GameRules,
    /// Ticker, dwell and sensor settings.
    pub timing: HostTiming,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(app_config) => {
                    info!(
                        path = %path.display(),
                        rules = ?app_config.rules,
                        "loaded game configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse and validate a JSON document; absent fields keep their default.
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(contents)?;
        raw.validate()?;
        Ok(raw.into())
    }
}

/// Reasons a configuration document is rejected.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Not valid JSON or wrong field types.
    #[error("malformed config: {0}")]
    Malformed(#[from] serde_json::Error),
    /// Values out of range.
    #[error("invalid config: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[validate(nested)]
    rules: RawRules,
    #[validate(nested)]
    timing: RawTiming,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
struct RawRules {
    #[validate(range(min = 1, max = 16))]
    sequence_length: Option<usize>,
    #[validate(range(min = 1, max = 3600))]
    main_seconds: Option<u32>,
    #[validate(range(min = 1, max = 600))]
    bonus_seconds: Option<u32>,
    #[validate(range(max = 100))]
    correct_points: Option<u32>,
    #[validate(range(max = 100))]
    bonus_points: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
struct RawTiming {
    #[validate(range(min = 10))]
    tick_interval_ms: Option<u64>,
    feedback_dwell_ms: Option<u64>,
    #[validate(range(min = 10))]
    motion_poll_interval_ms: Option<u64>,
    #[validate(range(exclusive_min = 0.0))]
    shake_threshold: Option<f64>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let rules = GameRules::default();
        let timing = HostTiming::default();
        let RawConfig {
            rules: raw_rules,
            timing: raw_timing,
        } = value;

        Self {
            rules: GameRules {
                sequence_length: raw_rules.sequence_length.unwrap_or(rules.sequence_length),
                main_seconds: raw_rules.main_seconds.unwrap_or(rules.main_seconds),
                bonus_seconds: raw_rules.bonus_seconds.unwrap_or(rules.bonus_seconds),
                correct_points: raw_rules.correct_points.unwrap_or(rules.correct_points),
                bonus_points: raw_rules.bonus_points.unwrap_or(rules.bonus_points),
            },
            timing: HostTiming {
                tick_interval: raw_timing
                    .tick_interval_ms
                    .map_or(timing.tick_interval, Duration::from_millis),
                feedback_dwell: raw_timing
                    .feedback_dwell_ms
                    .map_or(timing.feedback_dwell, Duration::from_millis),
                motion_poll_interval: raw_timing
                    .motion_poll_interval_ms
                    .map_or(timing.motion_poll_interval, Duration::from_millis),
                shake_threshold: raw_timing.shake_threshold.unwrap_or(timing.shake_threshold),
            },
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
