use dmpgen_core::{AcquisitionWindow, AudioMetadata, FileDoc, TechnicalMetadata};

use crate::errors::GenerationError;
use crate::faker::Faker;
use crate::generators::common::build_common;

pub const MIME_TYPE: &str = "audio/wav";
const SIZE_RANGE: (u64, u64) = (500_000, 120_000_000);
const NUMBER_RANGE: (u32, u32) = (1, 300);
const DURATION_RANGE: (u32, u32) = (30, 3600);
const DURATION_KNOWN_PROBABILITY: f64 = 0.5;
const SAMPLE_RATES: &[u32] = &[16_000, 22_050, 44_100, 48_000];
const CHANNELS: &[u8] = &[1, 2];
const LANGUAGES: &[&str] = &["fr", "en", "it"];
const ANONYMIZATION_STATUSES: &[&str] = &["full", "partial", "none"];

pub fn file_name(number: u32) -> String {
    format!("entretien_{number:03}.wav")
}

pub fn build(
    faker: &mut Faker<'_>,
    dataset_id: u32,
    window: AcquisitionWindow,
) -> Result<FileDoc, GenerationError> {
    let number = faker.int_in("wav.number", NUMBER_RANGE.0, NUMBER_RANGE.1)?;
    let common = build_common(faker, dataset_id, file_name(number), MIME_TYPE, window)?;
    let size_bytes = faker.int_in("wav.size_bytes", SIZE_RANGE.0, SIZE_RANGE.1)?;

    let duration_sec = if faker.chance("wav.duration", DURATION_KNOWN_PROBABILITY)? {
        Some(faker.int_in("wav.duration", DURATION_RANGE.0, DURATION_RANGE.1)?)
    } else {
        None
    };

    let metadata = AudioMetadata {
        duration_sec,
        sample_rate_hz: *faker.pick("wav.sample_rate", SAMPLE_RATES)?,
        channels: *faker.pick("wav.channels", CHANNELS)?,
        language: faker.pick_string("wav.language", LANGUAGES)?,
        anonymization_status: faker.pick_string("wav.anonymization", ANONYMIZATION_STATUSES)?,
    };
    Ok(common.into_file(size_bytes, TechnicalMetadata::Audio(metadata)))
}
