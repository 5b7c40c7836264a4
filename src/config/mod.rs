use std::env;
use std::fmt;

use crate::lenses::{LensVersion, ParseLensVersionError};

/// Top-level configuration for the command line tool.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scoring: ScoringConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let default_lens = env::var("VALUES_LENS_DEFAULT_LENS")
            .unwrap_or_else(|_| "v4".to_string())
            .parse::<LensVersion>()
            .map_err(|source| ConfigError::InvalidLens { source })?;

        let match_threshold = match env::var("VALUES_LENS_MATCH_THRESHOLD") {
            Ok(value) => Some(parse_threshold(&value)?),
            Err(_) => None,
        };

        let log_level = env::var("VALUES_LENS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            scoring: ScoringConfig {
                default_lens,
                match_threshold,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Archetype similarity thresholds live in `[-1, 1]`, like cosine similarity itself.
pub fn parse_threshold(value: &str) -> Result<f64, ConfigError> {
    let invalid = || ConfigError::InvalidThreshold {
        value: value.to_string(),
    };
    let threshold = value.trim().parse::<f64>().map_err(|_| invalid())?;
    if (-1.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(invalid())
    }
}

/// Defaults applied when the command line does not choose.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub default_lens: LensVersion,
    /// Overrides each lens's own archetype threshold when set.
    pub match_threshold: Option<f64>,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidLens { source: ParseLensVersionError },
    InvalidThreshold { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLens { source } => {
                write!(f, "VALUES_LENS_DEFAULT_LENS is invalid: {source}")
            }
            ConfigError::InvalidThreshold { value } => write!(
                f,
                "match threshold '{value}' must be a number between -1 and 1"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidLens { source } => Some(source),
            ConfigError::InvalidThreshold { .. } => None,
        }
    }
}
