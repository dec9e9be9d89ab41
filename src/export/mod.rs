//! Admin exports: placeholder CSV and PDF reports plus the activity log

pub mod activity;
pub mod csv_report;
pub mod pdf_report;

pub use activity::{ActivityEntry, ActivityLog};
pub use csv_report::{csv_export, write_csv};
pub use pdf_report::pdf_export;

use std::path::{Path, PathBuf};

use chrono::{Local, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::error::Result;
use crate::zones::Zone;

/// A generated file ready for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// Write into `dir` under the file's own name
    pub fn save_in(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        self.save_as(&path)?;
        Ok(path)
    }

    pub fn save_as(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// Produces exports and records each one in the activity log
pub struct Exporter {
    activity: ActivityLog,
    rng: ChaCha8Rng,
}

impl Exporter {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            activity: ActivityLog::new(),
            rng: ChaCha8Rng::seed_from_u64(seed.unwrap_or_else(rand::random)),
        }
    }

    pub fn export_csv(&mut self, zones: &[Zone]) -> Result<ExportFile> {
        let file = csv_export(zones, Utc::now(), &mut self.rng)?;
        self.activity.log("Exported CSV");
        Ok(file)
    }

    pub fn export_pdf(&mut self) -> ExportFile {
        let file = pdf_export(Local::now());
        self.activity.log("Exported PDF");
        file
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }
}
