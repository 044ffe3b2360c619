use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Units of the measurement columns that have one.
pub const CSV_COLUMN_UNITS: &[(&str, &str)] = &[
    ("temperature", "°C"),
    ("nitrates", "mg/L"),
    ("phosphates", "mg/L"),
    ("concentration_hcl", "mol/L"),
    ("conductivite", "µS/cm"),
];

/// Square sides an image may have; also the fallback set for the height of
/// an image with unknown width.
pub const IMAGE_SIDES: [u32; 4] = [512, 1024, 2048, 4096];

/// Unit of a known measurement column.
pub fn unit_for_column(column: &str) -> Option<&'static str> {
    CSV_COLUMN_UNITS
        .iter()
        .find(|(name, _)| *name == column)
        .map(|(_, unit)| *unit)
}

/// Kind-specific technical metadata, discriminated by its `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum TechnicalMetadata {
    #[serde(rename = "csv")]
    Csv(CsvMetadata),
    #[serde(rename = "image")]
    Image(ImageMetadata),
    #[serde(rename = "audio")]
    Audio(AudioMetadata),
    #[serde(rename = "geotiff")]
    Geotiff(GeotiffMetadata),
    #[serde(rename = "pdf")]
    Pdf(PdfMetadata),
}

impl TechnicalMetadata {
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Csv(_) => "csv",
            Self::Image(_) => "image",
            Self::Audio(_) => "audio",
            Self::Geotiff(_) => "geotiff",
            Self::Pdf(_) => "pdf",
        }
    }

    /// MIME type of the files carrying this variant.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Csv(_) => "text/csv",
            Self::Image(_) => "image/png",
            Self::Audio(_) => "audio/wav",
            Self::Geotiff(_) => "image/tiff",
            Self::Pdf(_) => crate::PDF_MIME,
        }
    }
}

/// Tabular measurement export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CsvMetadata {
    #[serde(rename = "delimiteur")]
    pub delimiter: String,
    #[serde(rename = "encodage")]
    pub encoding: String,
    #[serde(rename = "colonnes")]
    pub columns: Vec<String>,
    /// Column name to unit, only for columns with a known unit.
    #[serde(rename = "unites")]
    pub units: BTreeMap<String, String>,
    #[serde(rename = "lieu_prelevement")]
    pub sampling_site: GeoPoint,
    #[serde(rename = "methode_analyse")]
    pub analysis_method: String,
}

impl CsvMetadata {
    /// Units map for `columns`, skipping columns without a known unit.
    pub fn units_for(columns: &[String]) -> BTreeMap<String, String> {
        columns
            .iter()
            .filter_map(|column| {
                unit_for_column(column).map(|unit| (column.clone(), unit.to_string()))
            })
            .collect()
    }
}

/// GeoJSON point, `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    pub geometry: GeometryType,
    pub coordinates: [f64; 2],
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            geometry: GeometryType::Point,
            coordinates: [longitude, latitude],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum GeometryType {
    Point,
}

/// Pseudonymized medical image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ImageMetadata {
    #[serde(rename = "largeur")]
    pub width: Option<u32>,
    #[serde(rename = "hauteur")]
    pub height: u32,
    pub resolution: String,
    #[serde(rename = "id_patient_pseudo")]
    pub patient_pseudo_id: String,
    #[serde(rename = "type_examen")]
    pub exam_type: String,
}

/// Interview recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AudioMetadata {
    #[serde(rename = "duree_sec")]
    pub duration_sec: Option<u32>,
    #[serde(rename = "frequence_echantillonnage_hz")]
    pub sample_rate_hz: u32,
    #[serde(rename = "canaux")]
    pub channels: u8,
    #[serde(rename = "langue")]
    pub language: String,
    #[serde(rename = "statut_anonymisation")]
    pub anonymization_status: String,
}

/// Georeferenced raster map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeotiffMetadata {
    #[serde(rename = "largeur")]
    pub width: Option<u32>,
    #[serde(rename = "hauteur")]
    pub height: Option<u32>,
    #[serde(rename = "systeme_coordonnees")]
    pub coordinate_system: String,
    /// `[lon, lat, lon, lat]`; the two corners are not ordered.
    #[serde(rename = "boite_englobante")]
    pub bounding_box: [f64; 4],
    pub resolution: String,
    #[serde(rename = "bandes")]
    pub bands: u8,
}

/// Management plan document attached as a regular file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PdfMetadata {
    #[serde(rename = "type_document")]
    pub document_type: String,
    #[serde(rename = "version_pgd")]
    pub plan_version: String,
    #[serde(rename = "modele_utilise")]
    pub template_used: String,
}
