//! Bounded history of total occupancy for the trend line

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of samples the dashboard trend keeps
pub const DEFAULT_HISTORY_CAPACITY: usize = 60;

/// Total occupancy at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalSample {
    pub timestamp: DateTime<Utc>,
    pub total: usize,
}

/// Append-only ring of samples; the oldest is evicted once full
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalHistory {
    samples: VecDeque<TotalSample>,
    capacity: usize,
}

impl TotalHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, sample: TotalSample) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn record(&mut self, total: usize) {
        self.push(TotalSample {
            timestamp: Utc::now(),
            total,
        });
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&TotalSample> {
        self.samples.back()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &TotalSample> + '_ {
        self.samples.iter()
    }

    pub fn peak(&self) -> usize {
        self.samples.iter().map(|s| s.total).max().unwrap_or(0)
    }

    /// Chart coordinates for a `width x height` trend line.
    ///
    /// Samples are spread evenly across the width with 5 units of padding on
    /// every side; y grows downward and is scaled by the larger of 1 and the
    /// peak total.
    pub fn polyline(&self, width: f32, height: f32) -> Vec<(f32, f32)> {
        const PAD: f32 = 5.0;

        let max_y = self.peak().max(1) as f32;
        let steps = self.samples.len().saturating_sub(1).max(1) as f32;

        self.samples
            .iter()
            .enumerate()
            .map(|(i, sample)| {
                let x = (i as f32 / steps) * (width - 2.0 * PAD) + PAD;
                let y = height - (sample.total as f32 / max_y) * (height - 2.0 * PAD) - PAD;
                (x, y)
            })
            .collect()
    }
}

impl Default for TotalHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
