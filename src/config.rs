//! Presentation configuration for the terminal front end.
//!
//! Nothing here reaches the game engine; it only shapes logging, the
//! cosmetic reply delay, and the look of the board.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Environment variable holding a comma-separated feature-flag list.
pub const FEATURE_FLAGS_ENV: &str = "TICTACTOE_FEATURE_FLAGS";

/// Environment variable overriding the default log filter.
pub const LOG_LEVEL_ENV: &str = "TICTACTOE_LOG_LEVEL";

/// Reply delay used when `animations` is on and no explicit delay is set.
const ANIMATED_REPLY_DELAY_MS: u64 = 250;

/// Optional presentation features.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FeatureFlag {
    /// Pause before the computer's reply.
    Animations,
    /// Speckled background behind the board.
    RetroNoiseBg,
}

/// Colour scheme.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    /// Dark text on a light background.
    #[default]
    Light,
    /// Light text on a dark background.
    Dark,
}

impl Theme {
    /// Switches between light and dark.
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Settings read from `tictactoe.toml` and the environment.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PresentationConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    log_level: String,

    /// Explicit delay before the computer replies, in milliseconds.
    #[serde(default)]
    reply_delay_ms: Option<u64>,

    /// Colour scheme.
    #[serde(default)]
    theme: Theme,

    /// Enabled features; unknown names are dropped with a warning.
    #[serde(default, deserialize_with = "lenient_flags")]
    feature_flags: Vec<FeatureFlag>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn lenient_flags<'de, D>(deserializer: D) -> Result<Vec<FeatureFlag>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(parse_flags(raw.iter().map(String::as_str)))
}

/// Parses flag names, skipping blanks and warning on unknown names.
#[instrument(skip(names))]
pub fn parse_flags<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<FeatureFlag> {
    let mut flags = Vec::new();
    for name in names.into_iter().map(str::trim).filter(|n| !n.is_empty()) {
        match name.parse::<FeatureFlag>() {
            Ok(flag) if !flags.contains(&flag) => flags.push(flag),
            Ok(_) => {}
            Err(_) => warn!(flag = name, "Ignoring unknown feature flag"),
        }
    }
    flags
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            reply_delay_ms: None,
            theme: Theme::default(),
            feature_flags: Vec::new(),
        }
    }
}

impl PresentationConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(flags = ?config.feature_flags, theme = %config.theme, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if given, then applies environment overrides.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_env())
    }

    /// Applies [`FEATURE_FLAGS_ENV`] and [`LOG_LEVEL_ENV`].
    pub fn with_env(self) -> Self {
        self.with_overrides(
            std::env::var(FEATURE_FLAGS_ENV).ok().as_deref(),
            std::env::var(LOG_LEVEL_ENV).ok().as_deref(),
        )
    }

    /// Replaces the flag list and log level when values are supplied.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, feature_flags: Option<&str>, log_level: Option<&str>) -> Self {
        if let Some(list) = feature_flags {
            self.feature_flags = parse_flags(list.split(','));
            debug!(flags = ?self.feature_flags, "Feature flags overridden");
        }
        if let Some(level) = log_level.map(str::trim).filter(|l| !l.is_empty()) {
            self.log_level = level.to_string();
        }
        self
    }

    /// True when `flag` is enabled.
    pub fn has_flag(&self, flag: FeatureFlag) -> bool {
        self.feature_flags.contains(&flag)
    }

    /// Delay before the computer's reply is shown.
    pub fn reply_delay(&self) -> Duration {
        let ms = self.reply_delay_ms.unwrap_or(if self.has_flag(FeatureFlag::Animations) {
            ANIMATED_REPLY_DELAY_MS
        } else {
            0
        });
        Duration::from_millis(ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
