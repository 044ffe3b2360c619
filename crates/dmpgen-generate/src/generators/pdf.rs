use dmpgen_core::{AcquisitionWindow, FileDoc, PdfMetadata, TechnicalMetadata};

use crate::errors::GenerationError;
use crate::faker::Faker;
use crate::generators::common::build_common;

pub const MIME_TYPE: &str = dmpgen_core::PDF_MIME;
/// Document type of every attached pdf: a data management plan.
pub const DOCUMENT_TYPE: &str = "Plan de Gestion de Données";
const SIZE_RANGE: (u64, u64) = (80_000, 8_000_000);
const NUMBER_RANGE: (u32, u32) = (1, 200);
const PLAN_VERSIONS: &[&str] = &["1.0", "2.1", "2.0"];
const TEMPLATES: &[&str] = &["Science Europe", "DMP OPIDoR v3"];

pub fn file_name(number: u32) -> String {
    format!("document_{number:03}.pdf")
}

pub fn build(
    faker: &mut Faker<'_>,
    dataset_id: u32,
    window: AcquisitionWindow,
) -> Result<FileDoc, GenerationError> {
    let number = faker.int_in("pdf.number", NUMBER_RANGE.0, NUMBER_RANGE.1)?;
    let common = build_common(faker, dataset_id, file_name(number), MIME_TYPE, window)?;
    let size_bytes = faker.int_in("pdf.size_bytes", SIZE_RANGE.0, SIZE_RANGE.1)?;

    let metadata = PdfMetadata {
        document_type: DOCUMENT_TYPE.to_string(),
        plan_version: faker.pick_string("pdf.plan_version", PLAN_VERSIONS)?,
        template_used: faker.pick_string("pdf.template", TEMPLATES)?,
    };
    Ok(common.into_file(size_bytes, TechnicalMetadata::Pdf(metadata)))
}
