use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use dmpgen_core::FileCountRange;

use crate::errors::GenerationError;
use crate::summary::CatalogSummary;

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Number of datasets; ids run from 1 to `datasets`.
    pub datasets: u32,
    /// Bounds on the number of files per dataset.
    pub files: FileCountRange,
    /// Date the acquisition windows are anchored on.
    pub today: NaiveDate,
    /// RNG seed. A fresh seed is drawn (and reported) when absent.
    pub seed: Option<u64>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            datasets: 1000,
            files: FileCountRange::default(),
            today: chrono::Local::now().date_naive(),
            seed: None,
        }
    }
}

impl GenerateOptions {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.files.min > self.files.max {
            return Err(GenerationError::InvalidOptions(format!(
                "min files ({}) must be <= max files ({})",
                self.files.min, self.files.max
            )));
        }
        Ok(())
    }
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    pub seed: u64,
    pub today: NaiveDate,
    pub datasets: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_path: Option<String>,
    pub bytes_written: u64,
    pub duration_ms: u64,
    pub summary: CatalogSummary,
}
