//! Run summary and serialization

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::types::ZoneId;
use crate::occupancy::{fill_percent, TotalSample};
use crate::simulation::source::EntitySource;
use crate::simulation::tick::{Simulation, TickReport};
use crate::zones::Zone;

/// Final state of a headless run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub zones: Vec<ZoneSummary>,
    pub history: Vec<TotalSample>,
    pub statistics: RunStats,
}

/// One zone's occupancy at the last tick
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ZoneSummary {
    pub id: ZoneId,
    pub name: String,
    pub color: String,
    pub count: usize,
    pub fill_percent: f32,
    pub in_alert: bool,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunStats {
    pub ticks: u64,
    pub run_time_ms: u64,
    pub final_total: usize,
    pub final_distinct_total: usize,
    pub peak_total: usize,
    pub threshold: i64,
    /// Zone-ticks spent over threshold across the whole run
    pub alert_ticks: u64,
}

impl RunSummary {
    /// Summarize a run from its last report
    pub fn new<E: EntitySource>(
        sim: &Simulation<E>,
        zones: &[Zone],
        last: Option<&TickReport>,
        alert_ticks: u64,
        elapsed: Duration,
    ) -> Self {
        let threshold = last
            .map(|r| r.threshold)
            .unwrap_or(sim.config().default_threshold);
        let fill_threshold = last.map(|r| r.fill_threshold).unwrap_or(threshold);

        let zone_summaries = zones
            .iter()
            .map(|zone| {
                let count = last.map(|r| r.counts.get(&zone.id)).unwrap_or(0);
                ZoneSummary {
                    id: zone.id.clone(),
                    name: zone.name.clone(),
                    color: zone.color.clone(),
                    count,
                    fill_percent: fill_percent(count, fill_threshold),
                    in_alert: last
                        .map(|r| r.alerts.iter().any(|a| a.zone_id == zone.id))
                        .unwrap_or(false),
                }
            })
            .collect();

        Self {
            zones: zone_summaries,
            history: sim.history().iter().copied().collect(),
            statistics: RunStats {
                ticks: sim.current_tick,
                run_time_ms: elapsed.as_millis() as u64,
                final_total: last.map(|r| r.counts.total).unwrap_or(0),
                final_distinct_total: last.map(|r| r.counts.distinct_total).unwrap_or(0),
                peak_total: sim.history().peak(),
                threshold,
                alert_ticks,
            },
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn summary(&self) -> String {
        format!(
            "Ran {} ticks in {}ms\nTotal {} ({} distinct), peak {}, {} zone-ticks over threshold {}",
            self.statistics.ticks,
            self.statistics.run_time_ms,
            self.statistics.final_total,
            self.statistics.final_distinct_total,
            self.statistics.peak_total,
            self.statistics.alert_ticks,
            self.statistics.threshold,
        )
    }
}
