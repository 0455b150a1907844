//! Demo configuration
//!
//! Loaded from TOML or RON through the engine's [`Config`] trait. Every
//! section falls back to its defaults when missing.

use serde::{Deserialize, Serialize};
use swept_engine::core::config::{Config, EngineConfig, PhysicsConfig};

/// Demo configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Engine core settings
    pub engine: EngineConfig,
    /// Physics step settings
    pub physics: PhysicsConfig,
    /// Gameplay settings
    pub gameplay: GameplayConfig,
}

impl DemoConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), String> {
        self.engine.validate()?;
        self.gameplay.validate()
    }
}

impl Config for DemoConfig {}

/// Gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Balls available before the game is lost
    pub starting_lives: u32,

    /// Ball speed (units per second)
    pub ball_speed: f32,

    /// Paddle speed (units per second)
    pub paddle_speed: f32,

    /// Largest random deviation of the launch angle from straight up (degrees)
    pub launch_jitter_degrees: f32,

    /// Seed for the launch angle; a random seed is drawn when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Physics time step (seconds)
    pub physics_timestep: f32,

    /// Steps to simulate before giving up
    pub max_steps: u32,

    /// Playing field width, walls excluded
    pub field_width: f32,

    /// Playing field height, walls excluded
    pub field_height: f32,

    /// Brick rows
    pub brick_rows: u32,

    /// Bricks per row
    pub brick_columns: u32,

    /// Hits a brick takes before it breaks
    pub brick_lives: u32,
}

impl GameplayConfig {
    /// Validate gameplay settings
    pub fn validate(&self) -> Result<(), String> {
        if self.physics_timestep <= 0.0 {
            return Err(format!("Physics timestep must be positive, got {}", self.physics_timestep));
        }
        if self.paddle_speed < 0.0 {
            return Err(format!("Paddle speed must not be negative, got {}", self.paddle_speed));
        }
        if self.ball_speed <= 0.0 {
            return Err(format!("Ball speed must be positive, got {}", self.ball_speed));
        }
        if self.field_width <= 0.0 || self.field_height <= 0.0 {
            return Err(format!(
                "Field must have a positive size, got {} x {}",
                self.field_width, self.field_height
            ));
        }
        if self.brick_lives == 0 {
            return Err("Bricks need at least one life".to_string());
        }
        Ok(())
    }
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            ball_speed: 20.0,
            paddle_speed: 15.0,
            launch_jitter_degrees: 30.0,
            seed: None,
            physics_timestep: 1.0 / 60.0,
            max_steps: 20_000,
            field_width: 20.0,
            field_height: 30.0,
            brick_rows: 4,
            brick_columns: 8,
            brick_lives: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swept_engine::core::config::ConfigError;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let text = r#"
            [gameplay]
            brick_rows = 2
            seed = 7

            [physics]
            log_collisions = false
        "#;

        let config = DemoConfig::from_str_with_format(text, "arkanoid.toml").unwrap();
        assert_eq!(config.gameplay.brick_rows, 2);
        assert_eq!(config.gameplay.seed, Some(7));
        assert_eq!(config.gameplay.brick_columns, 8);
        assert!(!config.physics.log_collisions);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_gameplay() {
        let mut config = DemoConfig::default();
        config.gameplay.physics_timestep = 0.0;
        assert!(config.validate().is_err());

        let mut config = DemoConfig::default();
        config.gameplay.brick_lives = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_saved_config_loads_back() {
        let mut config = DemoConfig::default();
        config.gameplay.seed = Some(42);
        config.gameplay.ball_speed = 0.35;
        config.physics.log_collisions = true;

        for extension in ["toml", "ron"] {
            let path = std::env::temp_dir().join(format!("arkanoid_demo_resolved_{}.{}", std::process::id(), extension));
            let path = path.to_str().unwrap();

            config.save_to_file(path).unwrap();
            let loaded = DemoConfig::load_from_file(path);
            std::fs::remove_file(path).unwrap();

            assert_eq!(loaded.unwrap(), config, "{}", extension);
        }
    }

    #[test]
    fn test_save_rejects_unknown_extension() {
        let path = std::env::temp_dir().join("arkanoid_demo_resolved.json");
        let result = DemoConfig::default().save_to_file(path.to_str().unwrap());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
        assert!(!path.exists());
    }
}
