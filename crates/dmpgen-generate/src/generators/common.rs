use chrono::NaiveDate;

use dmpgen_core::{AcquisitionWindow, Annotation, FileDoc, TechnicalMetadata, file_path};

use crate::errors::GenerationError;
use crate::faker::Faker;

pub const FILE_VERSIONS: &[&str] = &["1.0", "1.1", "2.0"];
pub const ANNOTATION_COMMENTS: &[&str] = &[
    "Valeur aberrante à vérifier",
    "Donnée validée",
    "Nécessite un traitement complémentaire",
    "Anomalie détectée lors de l'acquisition",
];
/// Probability that a file carries an annotation.
pub const ANNOTATION_PROBABILITY: f64 = 0.3;
const SIZE_RANGE: (u64, u64) = (2_000, 150_000_000);

/// Fields every file kind shares. Kind builders turn it into a [`FileDoc`]
/// once they have drawn their own size and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct FileCommon {
    pub file_name: String,
    pub file_path: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub acquisition_date: NaiveDate,
    pub version: String,
    pub annotations: Vec<Annotation>,
}

impl FileCommon {
    pub fn into_file(self, size_bytes: u64, technical_metadata: TechnicalMetadata) -> FileDoc {
        FileDoc {
            file_name: self.file_name,
            file_path: self.file_path,
            size_bytes,
            mime_type: self.mime_type,
            acquisition_date: self.acquisition_date,
            version: self.version,
            annotations: self.annotations,
            technical_metadata,
        }
    }
}

pub fn build_common(
    faker: &mut Faker<'_>,
    dataset_id: u32,
    file_name: String,
    mime_type: &str,
    window: AcquisitionWindow,
) -> Result<FileCommon, GenerationError> {
    let acquisition_date = faker.date_between("acquisition_date", window.start(), window.end())?;
    let size_bytes = faker.int_in("size_bytes", SIZE_RANGE.0, SIZE_RANGE.1)?;
    let version = faker.pick_string("version", FILE_VERSIONS)?;

    let annotations = if faker.chance("annotations", ANNOTATION_PROBABILITY)? {
        vec![build_annotation(faker, acquisition_date, window.end())?]
    } else {
        Vec::new()
    };

    Ok(FileCommon {
        file_path: file_path(dataset_id, &file_name),
        file_name,
        size_bytes,
        mime_type: mime_type.to_string(),
        acquisition_date,
        version,
        annotations,
    })
}

// `acquired` is never after `window_end`, so the range may shrink to one day
// but never inverts.
fn build_annotation(
    faker: &mut Faker<'_>,
    acquired: NaiveDate,
    window_end: NaiveDate,
) -> Result<Annotation, GenerationError> {
    Ok(Annotation {
        author: faker.name(),
        date: faker.date_between("annotation.date", acquired, window_end)?,
        comment: faker.pick_string("annotation.comment", ANNOTATION_COMMENTS)?,
    })
}
