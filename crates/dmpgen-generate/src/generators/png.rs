use dmpgen_core::metadata::IMAGE_SIDES;
use dmpgen_core::{AcquisitionWindow, FileDoc, ImageMetadata, TechnicalMetadata};

use crate::errors::GenerationError;
use crate::faker::Faker;
use crate::generators::common::build_common;

pub const MIME_TYPE: &str = "image/png";
const SIZE_RANGE: (u64, u64) = (50_000, 9_000_000);
const NUMBER_RANGE: (u32, u32) = (1, 999);
const WIDTHS: &[Option<u32>] = &[Some(512), Some(1024), Some(2048), Some(4096), None];
const RESOLUTIONS: &[&str] = &["72dpi", "150dpi", "300dpi"];
const EXAM_TYPES: &[&str] = &[
    "Radiographie Thoracique",
    "IRM Cérébrale",
    "Scanner Abdominal",
];

pub fn file_name(number: u32) -> String {
    format!("radiographie_{number:03}.png")
}

/// `P<NNN>-<LLL>`, letters upper-cased.
pub fn patient_pseudo_id(number: u32, letters: &str) -> String {
    format!("P{number:03}-{}", letters.to_uppercase())
}

pub fn build(
    faker: &mut Faker<'_>,
    dataset_id: u32,
    window: AcquisitionWindow,
) -> Result<FileDoc, GenerationError> {
    let number = faker.int_in("png.number", NUMBER_RANGE.0, NUMBER_RANGE.1)?;
    let common = build_common(faker, dataset_id, file_name(number), MIME_TYPE, window)?;
    let size_bytes = faker.int_in("png.size_bytes", SIZE_RANGE.0, SIZE_RANGE.1)?;

    let width = *faker.pick("png.width", WIDTHS)?;
    // Square images; an unknown width still gets a concrete height.
    let height = match width {
        Some(width) => width,
        None => *faker.pick("png.height", &IMAGE_SIDES)?,
    };

    let patient_number = faker.int_in("png.patient", NUMBER_RANGE.0, NUMBER_RANGE.1)?;
    let letters = faker.lexify(3);
    let metadata = ImageMetadata {
        width,
        height,
        resolution: faker.pick_string("png.resolution", RESOLUTIONS)?,
        patient_pseudo_id: patient_pseudo_id(patient_number, &letters),
        exam_type: faker.pick_string("png.exam_type", EXAM_TYPES)?,
    };
    Ok(common.into_file(size_bytes, TechnicalMetadata::Image(metadata)))
}
