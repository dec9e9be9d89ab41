//! Occupancy aggregation: per-zone counts and the total-count trend

pub mod counts;
pub mod history;

pub use counts::{count_occupancy, fill_percent, OccupancyCounts};
pub use history::{TotalHistory, TotalSample, DEFAULT_HISTORY_CAPACITY};
