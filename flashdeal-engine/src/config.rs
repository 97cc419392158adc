//! Engine configuration with serde defaults for every field.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    BASE_DISTANCE_METERS, COUNTDOWN_PERIOD_MS, IMAGE_MODEL, INITIAL_PROGRESS, TEXT_MODEL,
    TICK_INCREMENT, TICK_PERIOD_MS,
};
use crate::numbers::clamp_progress;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Tuning for the progress clock, countdown and derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "SimulationConfig::default_initial_progress")]
    pub initial_progress: f64,
    #[serde(default = "SimulationConfig::default_increment")]
    pub increment: f64,
    #[serde(default = "SimulationConfig::default_tick_period_ms")]
    pub tick_period_ms: u32,
    #[serde(default = "SimulationConfig::default_base_distance")]
    pub base_distance_m: f64,
    #[serde(default = "SimulationConfig::default_countdown_period_ms")]
    pub countdown_period_ms: u32,
}

impl SimulationConfig {
    #[must_use]
    pub const fn default_initial_progress() -> f64 {
        INITIAL_PROGRESS
    }

    #[must_use]
    pub const fn default_increment() -> f64 {
        TICK_INCREMENT
    }

    #[must_use]
    pub const fn default_tick_period_ms() -> u32 {
        TICK_PERIOD_MS
    }

    #[must_use]
    pub const fn default_base_distance() -> f64 {
        BASE_DISTANCE_METERS
    }

    #[must_use]
    pub const fn default_countdown_period_ms() -> u32 {
        COUNTDOWN_PERIOD_MS
    }

    /// Reject values the clock cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for non-positive increments, a zero
    /// tick period or a negative base distance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.increment.is_finite() && self.increment > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "increment must be positive, got {}",
                self.increment
            )));
        }
        if self.tick_period_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_period_ms must be greater than 0".to_string(),
            ));
        }
        if self.countdown_period_ms == 0 {
            return Err(ConfigError::Invalid(
                "countdown_period_ms must be greater than 0".to_string(),
            ));
        }
        if !(self.base_distance_m.is_finite() && self.base_distance_m >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "base_distance_m must be non-negative, got {}",
                self.base_distance_m
            )));
        }
        Ok(())
    }

    /// Initial progress after clamping into the valid domain.
    #[must_use]
    pub fn clamped_initial_progress(&self) -> f64 {
        clamp_progress(self.initial_progress)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_progress: Self::default_initial_progress(),
            increment: Self::default_increment(),
            tick_period_ms: Self::default_tick_period_ms(),
            base_distance_m: Self::default_base_distance(),
            countdown_period_ms: Self::default_countdown_period_ms(),
        }
    }
}

/// Models used by the deal assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "AssistantConfig::default_text_model")]
    pub text_model: String,
    #[serde(default = "AssistantConfig::default_image_model")]
    pub image_model: String,
}

impl AssistantConfig {
    #[must_use]
    pub fn default_text_model() -> String {
        TEXT_MODEL.to_string()
    }

    #[must_use]
    pub fn default_image_model() -> String {
        IMAGE_MODEL.to_string()
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            text_model: Self::default_text_model(),
            image_model: Self::default_image_model(),
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
}

impl EngineConfig {
    /// Parse and validate a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.simulation.validate()?;
        Ok(cfg)
    }

    /// Load the configuration bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled asset fails to parse or validate.
    pub fn try_load_from_static() -> Result<Self, ConfigError> {
        Self::from_json(include_str!("../data/engine.json"))
    }

    /// Bundled configuration, or the defaults (with a warning) when the
    /// bundled asset is broken.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::try_load_from_static().unwrap_or_else(|err| {
            log::warn!("bundled engine config is invalid, using defaults: {err}");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = EngineConfig::from_json("{}").unwrap();
        assert_eq!(cfg, EngineConfig::default());
        assert_eq!(cfg.simulation.tick_period_ms, 50);
        assert_eq!(cfg.assistant.text_model, "gemini-2.5-flash");
    }

    #[test]
    fn partial_document_overrides_single_field() {
        let cfg = EngineConfig::from_json(r#"{"simulation":{"initial_progress":0}}"#).unwrap();
        assert!(cfg.simulation.initial_progress.abs() < f64::EPSILON);
        assert!((cfg.simulation.increment - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let err = EngineConfig::from_json(r#"{"simulation":{"increment":0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = EngineConfig::from_json(r#"{"simulation":{"tick_period_ms":0}}"#).unwrap_err();
        assert!(err.to_string().contains("tick_period_ms"));
        assert!(matches!(
            EngineConfig::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn static_config_matches_defaults() {
        assert_eq!(EngineConfig::load_from_static(), EngineConfig::default());
    }

    #[test]
    fn bundled_config_parses_without_fallback() {
        let cfg = EngineConfig::try_load_from_static().unwrap();
        assert!(cfg.simulation.validate().is_ok());
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn initial_progress_is_clamped() {
        let cfg = SimulationConfig {
            initial_progress: 140.0,
            ..SimulationConfig::default()
        };
        assert!((cfg.clamped_initial_progress() - 100.0).abs() < f64::EPSILON);
    }
}
