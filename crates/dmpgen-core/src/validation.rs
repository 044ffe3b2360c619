use crate::catalog::{AcquisitionWindow, DatasetRecord, FileCountRange, FileDoc, file_path};
use crate::error::{Error, Result};
use crate::metadata::{IMAGE_SIDES, TechnicalMetadata, unit_for_column};

/// Validate the structural invariants of a generated catalog.
///
/// This checks:
/// - dataset ids are exactly `1..=records.len()`, in order
/// - file counts are within `files`
/// - file paths, MIME types and metadata variants agree
/// - annotation count and dating
/// - csv units against columns, image height against width
/// - management plan naming
pub fn validate_catalog(records: &[DatasetRecord], files: FileCountRange) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        let expected_id = index as u64 + 1;
        if u64::from(record.dataset_id) != expected_id {
            return Err(Error::InvalidCatalog(format!(
                "dataset at position {index} has id {} (expected {expected_id})",
                record.dataset_id
            )));
        }

        if !files.contains(record.files.len()) {
            return Err(Error::InvalidCatalog(format!(
                "dataset {} has {} files (expected {}..={})",
                record.dataset_id,
                record.files.len(),
                files.min,
                files.max
            )));
        }

        validate_plan(record)?;
        for file in &record.files {
            validate_file(record.dataset_id, file)?;
        }
    }

    Ok(())
}

/// Like [`validate_catalog`], also checking every date against the
/// acquisition window of its dataset. `windows[i]` belongs to `records[i]`.
pub fn validate_catalog_with_windows(
    records: &[DatasetRecord],
    windows: &[AcquisitionWindow],
    files: FileCountRange,
) -> Result<()> {
    if records.len() != windows.len() {
        return Err(Error::InvalidCatalog(format!(
            "{} records but {} acquisition windows",
            records.len(),
            windows.len()
        )));
    }

    validate_catalog(records, files)?;

    for (record, window) in records.iter().zip(windows) {
        for file in &record.files {
            if !window.contains(file.acquisition_date) {
                return Err(Error::InvalidCatalog(format!(
                    "{}: acquired {} outside {}..={}",
                    file.file_path,
                    file.acquisition_date,
                    window.start(),
                    window.end()
                )));
            }
            for annotation in &file.annotations {
                if annotation.date > window.end() {
                    return Err(Error::InvalidCatalog(format!(
                        "{}: annotation dated {} after window end {}",
                        file.file_path,
                        annotation.date,
                        window.end()
                    )));
                }
            }
        }
    }

    Ok(())
}

fn validate_plan(record: &DatasetRecord) -> Result<()> {
    let plan = &record.management_plan;
    let expected_name = format!("PGD_{}_v{}.pdf", record.dataset_id, plan.plan_version);
    if plan.file_name != expected_name {
        return Err(Error::InvalidCatalog(format!(
            "dataset {}: plan file name {} does not match version {}",
            record.dataset_id, plan.file_name, plan.plan_version
        )));
    }
    if plan.file_path != file_path(record.dataset_id, &plan.file_name) {
        return Err(Error::InvalidCatalog(format!(
            "dataset {}: plan path {} is outside its dataset directory",
            record.dataset_id, plan.file_path
        )));
    }
    if plan.mime_type != crate::PDF_MIME {
        return Err(Error::InvalidCatalog(format!(
            "dataset {}: plan has MIME type {}",
            record.dataset_id, plan.mime_type
        )));
    }
    Ok(())
}

fn validate_file(dataset_id: u32, file: &FileDoc) -> Result<()> {
    if file.file_path != file_path(dataset_id, &file.file_name) {
        return Err(Error::InvalidCatalog(format!(
            "dataset {dataset_id}: file path {} does not match {}",
            file.file_path, file.file_name
        )));
    }

    if file.mime_type != file.technical_metadata.mime_type() {
        return Err(Error::InvalidCatalog(format!(
            "{}: MIME type {} with {} metadata",
            file.file_path,
            file.mime_type,
            file.kind_tag()
        )));
    }

    if file.annotations.len() > 1 {
        return Err(Error::InvalidCatalog(format!(
            "{}: {} annotations (at most one expected)",
            file.file_path,
            file.annotations.len()
        )));
    }
    if let Some(annotation) = file.annotations.first()
        && annotation.date < file.acquisition_date
    {
        return Err(Error::InvalidCatalog(format!(
            "{}: annotation dated {} before acquisition {}",
            file.file_path, annotation.date, file.acquisition_date
        )));
    }

    match &file.technical_metadata {
        TechnicalMetadata::Csv(csv) => {
            for column in csv.units.keys() {
                if !csv.columns.contains(column) {
                    return Err(Error::InvalidCatalog(format!(
                        "{}: unit declared for missing column {column}",
                        file.file_path
                    )));
                }
            }
            for column in &csv.columns {
                let expected = unit_for_column(column);
                let declared = csv.units.get(column).map(String::as_str);
                if expected != declared {
                    return Err(Error::InvalidCatalog(format!(
                        "{}: column {column} has unit {declared:?} (expected {expected:?})",
                        file.file_path
                    )));
                }
            }
        }
        TechnicalMetadata::Image(image) => match image.width {
            Some(width) if width != image.height => {
                return Err(Error::InvalidCatalog(format!(
                    "{}: image is {width}x{} (expected square)",
                    file.file_path, image.height
                )));
            }
            None if !IMAGE_SIDES.contains(&image.height) => {
                return Err(Error::InvalidCatalog(format!(
                    "{}: fallback height {} is not a known side",
                    file.file_path, image.height
                )));
            }
            _ => {}
        },
        TechnicalMetadata::Audio(_)
        | TechnicalMetadata::Geotiff(_)
        | TechnicalMetadata::Pdf(_) => {}
    }

    Ok(())
}
