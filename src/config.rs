// Configuration module for reading Tron.toml
// This module provides OOP-style configuration management for the light-cycle bot

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::types::Direction;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub arena: ArenaConfig,
    pub timing: TimingConfig,
    pub fallback: FallbackConfig,
    pub debug: DebugConfig,
}

/// Arena dimensions, fixed for the whole game
#[derive(Debug, Deserialize, Clone)]
pub struct ArenaConfig {
    pub width: i32,
    pub height: i32,
}

/// Search budget per decision
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    pub time_budget_ms: u64,
    pub initial_depth: i32,
}

/// What to answer when the search produces no move
#[derive(Debug, Deserialize, Clone)]
pub struct FallbackConfig {
    pub give_up_direction: Direction,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Tron.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Tron.toml in the working directory
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Tron.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Tron.toml
    pub fn default_hardcoded() -> Self {
        Config {
            arena: ArenaConfig {
                width: 30,
                height: 20,
            },
            timing: TimingConfig {
                time_budget_ms: 95,
                initial_depth: 25,
            },
            fallback: FallbackConfig {
                give_up_direction: Direction::Up,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "tron_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Tron.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
