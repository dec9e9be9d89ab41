//! People Counter - zone occupancy over a simulated crowd

pub mod alerts;
pub mod core;
pub mod export;
pub mod heatmap;
pub mod occupancy;
pub mod settings;
pub mod simulation;
pub mod storage;
pub mod zones;
