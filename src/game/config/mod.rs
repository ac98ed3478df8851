//! Config Module
//!
//! Centralized configuration for arena layout and gameplay parameters.

pub mod arena_config;

pub use arena_config::{ArenaConfig, ConfigError, MatchSettings, PhysicsSettings, StructureSpec};
