//! Record builders: the shared file fields, one module per file kind, the
//! management plan, and the dataset assembly.

pub mod common;
pub mod csv;
pub mod dataset;
pub mod geotiff;
pub mod pdf;
pub mod plan;
pub mod png;
pub mod wav;

use std::fmt;

use dmpgen_core::{AcquisitionWindow, FileDoc};

use crate::errors::GenerationError;
use crate::faker::Faker;

pub use common::{FileCommon, build_common};
pub use dataset::{build_dataset, build_window};
pub use plan::build_management_plan;

/// File kinds a dataset may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Csv,
    Png,
    Wav,
    Geotiff,
    Pdf,
}

impl FileKind {
    pub const ALL: [FileKind; 5] = [
        FileKind::Csv,
        FileKind::Png,
        FileKind::Wav,
        FileKind::Geotiff,
        FileKind::Pdf,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Png => "png",
            Self::Wav => "wav",
            Self::Geotiff => "geotiff",
            Self::Pdf => "pdf",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => csv::MIME_TYPE,
            Self::Png => png::MIME_TYPE,
            Self::Wav => wav::MIME_TYPE,
            Self::Geotiff => geotiff::MIME_TYPE,
            Self::Pdf => pdf::MIME_TYPE,
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build one file of a uniformly drawn kind.
pub fn build_file(
    faker: &mut Faker<'_>,
    dataset_id: u32,
    window: AcquisitionWindow,
) -> Result<FileDoc, GenerationError> {
    let kind = *faker.pick("file_kind", &FileKind::ALL)?;
    build_file_of_kind(kind, faker, dataset_id, window)
}

pub fn build_file_of_kind(
    kind: FileKind,
    faker: &mut Faker<'_>,
    dataset_id: u32,
    window: AcquisitionWindow,
) -> Result<FileDoc, GenerationError> {
    match kind {
        FileKind::Csv => csv::build(faker, dataset_id, window),
        FileKind::Png => png::build(faker, dataset_id, window),
        FileKind::Wav => wav::build(faker, dataset_id, window),
        FileKind::Geotiff => geotiff::build(faker, dataset_id, window),
        FileKind::Pdf => pdf::build(faker, dataset_id, window),
    }
}
