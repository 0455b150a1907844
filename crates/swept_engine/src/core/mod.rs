//! # Core Engine Module
//!
//! Shared configuration types used by the physics step and by applications
//! embedding the engine.

pub mod config;

pub use config::{ApplicationConfig, Config, ConfigError, EngineConfig, PhysicsConfig};
