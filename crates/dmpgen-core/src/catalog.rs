use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::metadata::TechnicalMetadata;

/// One dataset of the catalog: its management plan and attached files.
///
/// Serialized keys follow the collection layout queried downstream
/// (`id_jeu_de_donnees`, `plan_de_gestion`, `fichiers`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DatasetRecord {
    /// Sequential identifier, starting at 1.
    #[serde(rename = "id_jeu_de_donnees")]
    pub dataset_id: u32,
    #[serde(rename = "plan_de_gestion")]
    pub management_plan: ManagementPlanDoc,
    /// Files in generation order.
    #[serde(rename = "fichiers")]
    pub files: Vec<FileDoc>,
}

/// The data management plan document of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ManagementPlanDoc {
    #[serde(rename = "nom_fichier")]
    pub file_name: String,
    #[serde(rename = "chemin_fichier")]
    pub file_path: String,
    #[serde(rename = "taille_fichier_octets")]
    pub size_bytes: u64,
    #[serde(rename = "type_mime")]
    pub mime_type: String,
    #[serde(rename = "version_pgd")]
    pub plan_version: String,
    #[serde(rename = "modele_utilise")]
    pub template_used: String,
}

/// A file attached to a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FileDoc {
    #[serde(rename = "nom_fichier")]
    pub file_name: String,
    #[serde(rename = "chemin_fichier")]
    pub file_path: String,
    #[serde(rename = "taille_fichier_octets")]
    pub size_bytes: u64,
    #[serde(rename = "type_mime")]
    pub mime_type: String,
    #[serde(rename = "date_acquisition")]
    pub acquisition_date: NaiveDate,
    pub version: String,
    /// Empty, or exactly one annotation.
    pub annotations: Vec<Annotation>,
    #[serde(rename = "metadonnees_techniques")]
    pub technical_metadata: TechnicalMetadata,
}

impl FileDoc {
    /// Tag of the technical metadata variant (`csv`, `image`, ...).
    pub fn kind_tag(&self) -> &'static str {
        self.technical_metadata.type_tag()
    }
}

/// Reviewer note attached to a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Annotation {
    #[serde(rename = "auteur")]
    pub author: String,
    pub date: NaiveDate,
    #[serde(rename = "commentaire")]
    pub comment: String,
}

/// Inclusive date range in which the files of a dataset were acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquisitionWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl AcquisitionWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidWindow(format!("{start} is after {end}")));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Inclusive bounds on the number of files per dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCountRange {
    pub min: usize,
    pub max: usize,
}

impl FileCountRange {
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if min > max {
            return Err(Error::InvalidCatalog(format!(
                "file count min ({min}) must be <= max ({max})"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, count: usize) -> bool {
        self.min <= count && count <= self.max
    }
}

impl Default for FileCountRange {
    fn default() -> Self {
        Self { min: 5, max: 10 }
    }
}

/// Storage path of a dataset file: `/data/<dataset_id>/<file_name>`.
pub fn file_path(dataset_id: u32, file_name: &str) -> String {
    format!("/data/{dataset_id}/{file_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn window_rejects_reversed_bounds() {
        let result = AcquisitionWindow::new(date(2024, 5, 2), date(2024, 5, 1));
        assert!(matches!(result, Err(Error::InvalidWindow(_))));
    }

    #[test]
    fn single_day_window_contains_its_day() {
        let day = date(2023, 2, 28);
        let window = AcquisitionWindow::new(day, day).expect("window");
        assert!(window.contains(day));
        assert!(!window.contains(date(2023, 3, 1)));
    }

    #[test]
    fn file_count_range_bounds_are_inclusive() {
        let range = FileCountRange::default();
        assert!(range.contains(5));
        assert!(range.contains(10));
        assert!(!range.contains(4));
        assert!(!range.contains(11));
        assert!(FileCountRange::new(3, 2).is_err());
    }

    #[test]
    fn file_path_is_rooted_in_dataset_dir() {
        assert_eq!(file_path(42, "carte_007.tiff"), "/data/42/carte_007.tiff");
    }
}
