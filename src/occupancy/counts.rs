//! Per-zone occupancy counting

use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, ZoneId};
use crate::simulation::source::Detection;
use crate::zones::Zone;

/// Occupancy of every zone at one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OccupancyCounts {
    counts: AHashMap<ZoneId, usize>,
    /// Sum of per-zone counts. An entity inside two overlapping zones
    /// contributes twice.
    pub total: usize,
    /// Entities inside at least one zone, each counted once
    pub distinct_total: usize,
}

impl OccupancyCounts {
    /// Count for a zone; zero for unknown zones
    pub fn get(&self, id: &ZoneId) -> usize {
        self.counts.get(id).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ZoneId, usize)> + '_ {
        self.counts.iter().map(|(id, &count)| (id, count))
    }
}

/// Count detections inside each zone, edges inclusive.
///
/// Every zone gets an entry, zero when empty. Counting runs on the rayon
/// pool once there are at least `parallel_threshold` detections.
pub fn count_occupancy(
    zones: &[Zone],
    detections: &[Detection],
    parallel_threshold: usize,
) -> OccupancyCounts {
    let parallel = detections.len() >= parallel_threshold;

    let count_zone = |zone: &Zone| -> usize {
        if parallel {
            detections
                .par_iter()
                .filter(|d| zone.contains(d.position))
                .count()
        } else {
            detections
                .iter()
                .filter(|d| zone.contains(d.position))
                .count()
        }
    };

    let mut counts = AHashMap::with_capacity(zones.len());
    let mut total = 0;
    for zone in zones {
        let count = count_zone(zone);
        total += count;
        // Duplicate ids accumulate rather than overwrite
        *counts.entry(zone.id.clone()).or_insert(0) += count;
    }

    let inside: AHashSet<EntityId> = detections
        .iter()
        .filter(|d| zones.iter().any(|z| z.contains(d.position)))
        .map(|d| d.id)
        .collect();

    OccupancyCounts {
        counts,
        total,
        distinct_total: inside.len(),
    }
}

/// Percentage of the threshold reached, capped at 100
///
/// Thresholds below 1 are treated as 1.
pub fn fill_percent(count: usize, threshold: i64) -> f32 {
    let denominator = threshold.max(1) as f32;
    (count as f32 / denominator * 100.0).min(100.0)
}
