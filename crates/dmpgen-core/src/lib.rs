//! Core contracts for dmpgen.
//!
//! This crate defines the dataset catalog records written to the seeding
//! script, the per-kind technical metadata, and the structural checks the
//! generator runs on its own output.

pub mod catalog;
pub mod error;
pub mod metadata;
pub mod validation;

pub use catalog::{
    AcquisitionWindow, Annotation, DatasetRecord, FileCountRange, FileDoc, ManagementPlanDoc,
    file_path,
};
pub use error::{Error, Result};
pub use metadata::{
    AudioMetadata, CsvMetadata, GeoPoint, GeometryType, GeotiffMetadata, ImageMetadata,
    PdfMetadata, TechnicalMetadata, unit_for_column,
};
pub use validation::{validate_catalog, validate_catalog_with_windows};

/// MIME type of data management plan documents.
pub const PDF_MIME: &str = "application/pdf";
