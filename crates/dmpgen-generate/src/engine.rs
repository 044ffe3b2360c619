use std::time::Instant;

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use dmpgen_core::{AcquisitionWindow, DatasetRecord, validate_catalog_with_windows};

use crate::errors::GenerationError;
use crate::faker::Faker;
use crate::generators::build_dataset;
use crate::model::GenerateOptions;

/// Records of a run, with the acquisition window each was drawn from.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedCatalog {
    pub records: Vec<DatasetRecord>,
    /// `windows[i]` belongs to `records[i]`.
    pub windows: Vec<AcquisitionWindow>,
}

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub run_id: String,
    pub seed: u64,
    pub catalog: GeneratedCatalog,
    pub duration_ms: u64,
}

/// Entry point for generating a dataset catalog.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Generate and check the catalog using a ChaCha RNG seeded from the
    /// options (or from a freshly drawn seed).
    pub fn run(&self) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let seed = self.options.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        info!(
            event = "generation_started",
            run_id = %run_id,
            datasets = self.options.datasets,
            min_files = self.options.files.min,
            max_files = self.options.files.max,
            today = %self.options.today,
            seed
        );

        let catalog = self.generate(&mut rng)?;
        validate_catalog_with_windows(&catalog.records, &catalog.windows, self.options.files)?;

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            event = "generation_completed",
            run_id = %run_id,
            datasets = catalog.records.len(),
            files = catalog.records.iter().map(|r| r.files.len()).sum::<usize>(),
            duration_ms
        );

        Ok(GenerationResult {
            run_id,
            seed,
            catalog,
            duration_ms,
        })
    }

    /// Generate datasets `1..=datasets` from `rng`, in id order.
    pub fn generate(&self, rng: &mut dyn RngCore) -> Result<GeneratedCatalog, GenerationError> {
        self.options.validate()?;

        let mut faker = Faker::new(rng, self.options.today);
        let capacity = self.options.datasets as usize;
        let mut records = Vec::with_capacity(capacity);
        let mut windows = Vec::with_capacity(capacity);

        for dataset_id in 1..=self.options.datasets {
            let (record, window) = build_dataset(&mut faker, dataset_id, self.options.files)?;
            debug!(
                event = "dataset_generated",
                dataset_id,
                files = record.files.len(),
                window_start = %window.start(),
                window_end = %window.end()
            );
            records.push(record);
            windows.push(window);
        }

        Ok(GeneratedCatalog { records, windows })
    }
}
