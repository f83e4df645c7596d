//! Main configuration types.
//!
//! This module provides the top-level [`OnionConfig`] struct.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, LoggingSection, PipelineSection};
use onion_pipeline::{Pipeline, SharedResolver};
use onion_telemetry::LogFormat;

/// Complete Onion configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from files
/// and environment variables.
///
/// # Example
///
/// ```
/// use onion_config::OnionConfig;
///
/// let config = OnionConfig::default();
/// assert_eq!(config.pipeline.terminal_method, "handle");
/// assert!(config.logging.enabled);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct OnionConfig {
    /// Pipeline configuration.
    #[serde(default)]
    pub pipeline: PipelineSection,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl OnionConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - A layer identifier is empty
    /// - The terminal method, parameter setter or capability name is empty
    /// - The log level is not a valid filter directive
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pipeline = &self.pipeline;

        if pipeline.terminal_method.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "pipeline.terminal_method",
                "must not be empty",
            ));
        }

        if pipeline
            .parameter_setter
            .as_deref()
            .is_some_and(|setter| setter.trim().is_empty())
        {
            return Err(ConfigError::invalid_value(
                "pipeline.parameter_setter",
                "must not be empty when set",
            ));
        }

        if pipeline
            .required_capability
            .as_deref()
            .is_some_and(|capability| capability.trim().is_empty())
        {
            return Err(ConfigError::invalid_value(
                "pipeline.required_capability",
                "must not be empty when set",
            ));
        }

        if let Some(index) = pipeline.layers.iter().position(|entry| entry.id.is_empty()) {
            return Err(ConfigError::invalid_value(
                format!("pipeline.layers[{index}].id"),
                "must not be empty",
            ));
        }

        self.logging
            .to_log_config()
            .validate()
            .map_err(|e| ConfigError::invalid_value("logging.level", e.to_string()))?;

        Ok(())
    }

    /// Builds the configured pipeline.
    pub fn build_pipeline(&self, resolver: SharedResolver) -> Pipeline {
        self.pipeline.build(resolver)
    }

    /// Installs the global log subscriber described by `[logging]`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Telemetry` if a subscriber is already installed.
    pub fn init_logging(&self) -> Result<(), ConfigError> {
        onion_telemetry::init_logging(&self.logging.to_log_config())?;
        Ok(())
    }

    /// Create a development configuration preset.
    ///
    /// Pretty, debug-level logging with span events and source locations.
    ///
    /// # Example
    ///
    /// ```
    /// use onion_config::OnionConfig;
    ///
    /// let config = OnionConfig::development();
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();

        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;
        config.logging.span_events = true;
        config.logging.include_location = true;

        config
    }

    /// Create a production configuration preset.
    ///
    /// JSON, info-level logging.
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();

        config.logging.level = "info".to_string();
        config.logging.format = LogFormat::Json;
        config.logging.span_events = false;
        config.logging.include_location = false;

        config
    }
}
