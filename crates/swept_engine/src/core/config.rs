//! # Unified Configuration System
//!
//! Configuration for the engine core and the physics step. Every structure
//! here is serde-serializable and can be loaded from TOML or RON through the
//! [`Config`] trait.

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};

/// # Physics Configuration
///
/// Controls the per-step collision resolution loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// When false the physics step does nothing (no movement, no resolution)
    pub enabled: bool,
    /// Log every roll-back (shape kind, time of impact, normal) at debug level
    pub log_collisions: bool,
    /// Compose each world matrix with its parent's transform
    pub compose_parent_transforms: bool,
}

impl PhysicsConfig {
    /// Create a new physics configuration
    pub fn new() -> Self {
        Self {
            enabled: true,
            log_collisions: cfg!(debug_assertions),
            compose_parent_transforms: true,
        }
    }

    /// Enable or disable the physics step
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Enable or disable per-collision logging
    pub fn with_collision_logging(mut self, enabled: bool) -> Self {
        self.log_collisions = enabled;
        self
    }

    /// Enable or disable parent transform composition
    pub fn with_parent_transforms(mut self, enabled: bool) -> Self {
        self.compose_parent_transforms = enabled;
        self
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Engine Configuration
///
/// Core engine behavior such as logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level for the engine
    pub log_level: String,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

        if LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            Ok(())
        } else {
            Err(format!("Unknown log level: {}", self.log_level))
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Physics step configuration
    pub physics: PhysicsConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        self.engine.validate()
    }
}

impl Config for ApplicationConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_round_trip_keeps_physics_flags() {
        let text = r#"
            [engine]
            log_level = "debug"

            [physics]
            enabled = false
            log_collisions = true
        "#;

        let config = ApplicationConfig::from_str_with_format(text, "game.toml").unwrap();
        assert_eq!(config.engine.log_level, "debug");
        assert!(!config.physics.enabled);
        assert!(config.physics.log_collisions);
        // Missing keys fall back to defaults
        assert!(config.physics.compose_parent_transforms);
    }

    #[test]
    fn test_ron_parse() {
        let text = "(engine: (log_level: \"warn\"), physics: (enabled: true))";
        let config = ApplicationConfig::from_str_with_format(text, "game.ron").unwrap();
        assert_eq!(config.engine.log_level, "warn");
        assert!(config.physics.enabled);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = ApplicationConfig::from_str_with_format("", "game.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_validate_rejects_unknown_level() {
        let config = ApplicationConfig {
            engine: EngineConfig::new().with_log_level("loud"),
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(ApplicationConfig::default().validate().is_ok());
    }
}
