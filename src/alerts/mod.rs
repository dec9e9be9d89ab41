//! Threshold alerts
//!
//! Stateless: alerts are recomputed from the current counts every tick,
//! with no debouncing or memory of earlier ticks.

use serde::{Deserialize, Serialize};

use crate::core::types::ZoneId;
use crate::occupancy::OccupancyCounts;
use crate::zones::Zone;

/// A zone whose count exceeds the threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneAlert {
    pub zone_id: ZoneId,
    pub name: String,
    pub color: String,
    pub count: usize,
    pub threshold: i64,
}

/// True when `count` is strictly greater than `threshold`
#[inline]
pub fn is_over_threshold(count: usize, threshold: i64) -> bool {
    count as i64 > threshold
}

/// Zones in violation, in zone order
pub fn evaluate_alerts(zones: &[Zone], counts: &OccupancyCounts, threshold: i64) -> Vec<ZoneAlert> {
    zones
        .iter()
        .filter_map(|zone| {
            let count = counts.get(&zone.id);
            is_over_threshold(count, threshold).then(|| ZoneAlert {
                zone_id: zone.id.clone(),
                name: zone.name.clone(),
                color: zone.color.clone(),
                count,
                threshold,
            })
        })
        .collect()
}
