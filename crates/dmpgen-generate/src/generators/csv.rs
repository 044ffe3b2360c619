use chrono::NaiveDate;

use dmpgen_core::{AcquisitionWindow, CsvMetadata, FileDoc, GeoPoint, TechnicalMetadata};

use crate::errors::GenerationError;
use crate::faker::{Faker, round_to};
use crate::generators::common::build_common;

pub const MIME_TYPE: &str = "text/csv";
const SIZE_RANGE: (u64, u64) = (2_000, 600_000);
const DELIMITERS: &[&str] = &[",", ";", "\t"];
const ENCODING: &str = "UTF-8";
pub const COLUMN_SETS: &[&[&str]] = &[
    &["timestamp", "pH", "temperature"],
    &["date", "nitrates", "phosphates", "temperature"],
    &["timestamp", "concentration_hcl", "conductivite"],
];
const ANALYSIS_METHODS: &[&str] = &[
    "Chromatographie",
    "Spectrophotométrie",
    "ISO",
    "Mesure électrochimique",
];
const COORDINATE_PLACES: i32 = 5;

/// `mesures_<date>.csv`, with any space replaced by `_`.
pub fn file_name(measured_on: NaiveDate) -> String {
    format!("mesures_{measured_on}.csv").replace(' ', "_")
}

pub fn build(
    faker: &mut Faker<'_>,
    dataset_id: u32,
    window: AcquisitionWindow,
) -> Result<FileDoc, GenerationError> {
    let name = file_name(faker.date_this_decade()?);
    let common = build_common(faker, dataset_id, name, MIME_TYPE, window)?;
    let size_bytes = faker.int_in("csv.size_bytes", SIZE_RANGE.0, SIZE_RANGE.1)?;
    let columns = faker
        .pick("csv.columns", COLUMN_SETS)?
        .iter()
        .map(|column| column.to_string())
        .collect();
    let metadata = metadata_for_columns(faker, columns)?;
    Ok(common.into_file(size_bytes, TechnicalMetadata::Csv(metadata)))
}

/// Metadata for a file with the given columns; units follow the columns.
pub fn metadata_for_columns(
    faker: &mut Faker<'_>,
    columns: Vec<String>,
) -> Result<CsvMetadata, GenerationError> {
    let units = CsvMetadata::units_for(&columns);
    let sampling_site = GeoPoint::new(
        round_to(faker.longitude(), COORDINATE_PLACES),
        round_to(faker.latitude(), COORDINATE_PLACES),
    );
    Ok(CsvMetadata {
        delimiter: faker.pick_string("csv.delimiter", DELIMITERS)?,
        encoding: ENCODING.to_string(),
        columns,
        units,
        sampling_site,
        analysis_method: faker.pick_string("csv.analysis_method", ANALYSIS_METHODS)?,
    })
}
