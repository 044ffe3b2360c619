use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use dmpgen_core::DatasetRecord;

/// Volume and count of the files sharing a metadata type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeVolume {
    pub total_bytes: u64,
    pub files: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilesPerDataset {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
}

/// Aggregates over a catalog: volume per file type and files per dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub datasets: u64,
    pub files: u64,
    pub total_bytes: u64,
    /// Keyed by metadata type tag (`csv`, `image`, `audio`, `geotiff`, `pdf`).
    pub volume_by_type: BTreeMap<String, TypeVolume>,
    /// Absent for an empty catalog.
    pub files_per_dataset: Option<FilesPerDataset>,
}

impl CatalogSummary {
    pub fn from_records(records: &[DatasetRecord]) -> Self {
        let mut volume_by_type: BTreeMap<String, TypeVolume> = BTreeMap::new();
        let mut files = 0_u64;
        let mut total_bytes = 0_u64;

        for file in records.iter().flat_map(|record| &record.files) {
            let entry = volume_by_type.entry(file.kind_tag().to_string()).or_default();
            entry.total_bytes = entry.total_bytes.saturating_add(file.size_bytes);
            entry.files += 1;
            files += 1;
            total_bytes = total_bytes.saturating_add(file.size_bytes);
        }

        let counts = records.iter().map(|record| record.files.len());
        let files_per_dataset = match (counts.clone().min(), counts.max()) {
            (Some(min), Some(max)) => Some(FilesPerDataset {
                min,
                max,
                mean: files as f64 / records.len() as f64,
            }),
            _ => None,
        };

        Self {
            datasets: records.len() as u64,
            files,
            total_bytes,
            volume_by_type,
            files_per_dataset,
        }
    }

    /// Plain-text rendering for terminals.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!("datasets: {}", self.datasets));
        lines.push(format!("files: {}", self.files));
        lines.push(format!("total_bytes: {}", self.total_bytes));
        if let Some(per_dataset) = &self.files_per_dataset {
            lines.push(format!(
                "files per dataset: min {} / mean {:.2} / max {}",
                per_dataset.min, per_dataset.mean, per_dataset.max
            ));
        }
        if !self.volume_by_type.is_empty() {
            lines.push("| type | files | total_bytes |".to_string());
            lines.push("| --- | --- | --- |".to_string());
            for (kind, volume) in &self.volume_by_type {
                lines.push(format!(
                    "| {kind} | {} | {} |",
                    volume.files, volume.total_bytes
                ));
            }
        }
        lines.join("\n")
    }
}
