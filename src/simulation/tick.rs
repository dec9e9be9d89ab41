//! Tick system - orchestrates one simulation step
//!
//! This is the core loop that ties together:
//! entity source -> occupancy count -> total history -> heat map -> alerts
//!
//! Zones and settings are read-only here; their stores own them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alerts::{evaluate_alerts, ZoneAlert};
use crate::core::config::SimulationConfig;
use crate::core::error::{CounterError, Result};
use crate::core::types::Tick;
use crate::heatmap::HeatMap;
use crate::occupancy::{count_occupancy, OccupancyCounts, TotalHistory, TotalSample};
use crate::settings::Settings;
use crate::simulation::entity::FrameSize;
use crate::simulation::source::{Detection, EntitySource, RandomWalkSource};
use crate::zones::Zone;

/// Everything observed during one tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: Tick,
    pub timestamp: DateTime<Utc>,
    pub detections: Vec<Detection>,
    pub counts: OccupancyCounts,
    /// Effective alert threshold
    pub threshold: i64,
    /// Configured threshold as stored, used for fill ratios
    pub fill_threshold: i64,
    pub alerts: Vec<ZoneAlert>,
}

/// Simulation state driven one tick at a time
pub struct Simulation<E: EntitySource> {
    pub current_tick: Tick,
    config: SimulationConfig,
    source: E,
    history: TotalHistory,
    heat: HeatMap,
}

impl Simulation<RandomWalkSource> {
    /// Simulation over a random walk built from the config
    pub fn random_walk(config: SimulationConfig) -> Self {
        let source = RandomWalkSource::new(&config);
        Self::new(config, source)
    }
}

impl<E: EntitySource> Simulation<E> {
    pub fn new(config: SimulationConfig, source: E) -> Self {
        Self {
            current_tick: 0,
            history: TotalHistory::new(config.history_capacity),
            heat: HeatMap::new(&config),
            config,
            source,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn source(&self) -> &E {
        &self.source
    }

    pub fn history(&self) -> &TotalHistory {
        &self.history
    }

    pub fn heat(&self) -> &HeatMap {
        &self.heat
    }

    /// Run a single tick
    ///
    /// 1. Advance the entity source
    /// 2. Count occupancy for every zone
    /// 3. Append the total to the trend history
    /// 4. Update the heat map
    /// 5. Evaluate alerts against the effective threshold
    pub fn run_tick(&mut self, zones: &[Zone], settings: &Settings) -> TickReport {
        let detections = self.source.next_tick();

        let counts = count_occupancy(zones, &detections, self.config.parallel_threshold);

        let timestamp = Utc::now();
        self.history.push(TotalSample {
            timestamp,
            total: counts.total,
        });

        self.heat.update(&detections);

        let threshold = settings.effective_threshold(self.config.default_threshold);
        let alerts = evaluate_alerts(zones, &counts, threshold);

        self.current_tick += 1;

        tracing::debug!(
            tick = self.current_tick,
            total = counts.total,
            distinct = counts.distinct_total,
            alerts = alerts.len(),
            "tick complete"
        );

        TickReport {
            tick: self.current_tick,
            timestamp,
            detections,
            counts,
            threshold,
            fill_threshold: settings.threshold,
            alerts,
        }
    }

    /// Frame resize notification; bounds and heat map follow the new size.
    /// A non-positive frame is rejected and the simulation is left unchanged.
    pub fn resize(&mut self, frame: FrameSize) -> Result<()> {
        if !frame.is_positive() {
            tracing::warn!(width = frame.width, height = frame.height, "ignoring invalid frame size");
            return Err(CounterError::InvalidConfig(format!(
                "frame size must be positive, got {}x{}",
                frame.width, frame.height
            )));
        }

        tracing::info!(width = frame.width, height = frame.height, "frame resized");
        self.config.frame_width = frame.width;
        self.config.frame_height = frame.height;
        self.source.resize(frame);
        self.heat.resize(frame);
        Ok(())
    }
}
