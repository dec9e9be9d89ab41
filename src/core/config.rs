//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. A TOML file may override any
//! subset of them; missing keys keep their defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::{CounterError, Result};

/// Configuration for the simulation and dashboard systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === FRAME ===
    /// Width of the camera frame in frame units (pixels on the dashboard)
    pub frame_width: f32,

    /// Height of the camera frame in frame units
    pub frame_height: f32,

    // === ENTITIES ===
    /// Number of simulated people wandering the frame
    pub entity_count: usize,

    /// Period between ticks in milliseconds
    ///
    /// At 50ms the live loop runs at 20 ticks per second.
    pub tick_interval_ms: u64,

    /// Distance moved per tick per unit of velocity
    ///
    /// Velocity components are drawn from [-1, 1], so at 3.0 an entity
    /// moves at most ~4.2 units per tick diagonally.
    pub speed: f32,

    /// Fixed RNG seed for reproducible runs; drawn at random when unset
    pub seed: Option<u64>,

    // === OCCUPANCY ===
    /// Number of total-count samples kept for the trend line
    pub history_capacity: usize,

    /// Threshold used when the stored settings carry zero
    pub default_threshold: i64,

    /// Minimum entity count before counting occupancy in parallel
    ///
    /// Below this threshold, thread overhead exceeds benefits.
    pub parallel_threshold: usize,

    // === HEAT MAP ===
    /// Radius of the heat blob painted around each entity
    pub heat_radius: f32,

    /// Heat added at the centre of a blob; falls off linearly to zero at the radius
    pub heat_intensity: f32,

    /// Multiplier applied to every cell once per tick
    ///
    /// At 0.9 a cell loses ~65% of its heat in 10 ticks (half a second),
    /// so the map tracks recent positions rather than all history.
    pub heat_decay: f32,

    /// Side length of one heat map cell
    pub heat_cell_size: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frame_width: 640.0,
            frame_height: 360.0,

            entity_count: 14,
            tick_interval_ms: 50,
            speed: 3.0,
            seed: None,

            history_capacity: 60,
            default_threshold: 5,
            parallel_threshold: 1000,

            heat_radius: 28.0,
            heat_intensity: 0.5,
            heat_decay: 0.9,
            heat_cell_size: 8.0,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file and validate it
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a config from a TOML string and validate it
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(self.frame_width > 0.0 && self.frame_height > 0.0) {
            return Err(CounterError::InvalidConfig(format!(
                "frame size must be positive, got {}x{}",
                self.frame_width, self.frame_height
            )));
        }

        if self.tick_interval_ms == 0 {
            return Err(CounterError::InvalidConfig(
                "tick_interval_ms must be at least 1".into(),
            ));
        }

        if self.history_capacity == 0 {
            return Err(CounterError::InvalidConfig(
                "history_capacity must be at least 1".into(),
            ));
        }

        if self.default_threshold <= 0 {
            return Err(CounterError::InvalidConfig(
                "default_threshold must be positive".into(),
            ));
        }

        // Decay above 1.0 would make heat grow without bound
        if !(0.0..=1.0).contains(&self.heat_decay) {
            return Err(CounterError::InvalidConfig(format!(
                "heat_decay ({}) must be within [0, 1]",
                self.heat_decay
            )));
        }

        if self.heat_cell_size <= 0.0 || self.heat_radius < 0.0 {
            return Err(CounterError::InvalidConfig(
                "heat_cell_size must be positive and heat_radius non-negative".into(),
            ));
        }

        Ok(())
    }
}
