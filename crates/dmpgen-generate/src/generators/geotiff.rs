use dmpgen_core::{AcquisitionWindow, FileDoc, GeotiffMetadata, TechnicalMetadata};

use crate::errors::GenerationError;
use crate::faker::{Faker, round_to};
use crate::generators::common::build_common;

pub const MIME_TYPE: &str = "image/tiff";
const SIZE_RANGE: (u64, u64) = (2_000_000, 400_000_000);
const NUMBER_RANGE: (u32, u32) = (1, 500);
const SIDES: &[Option<u32>] = &[Some(1024), Some(2048), Some(4096), None];
const COORDINATE_SYSTEMS: &[&str] = &["EPSG:4326 - WGS 84", "EPSG:3857"];
const RESOLUTIONS: &[&str] = &["1m/pixel", "10m/pixel", "30m/pixel"];
const BANDS: &[u8] = &[1, 3, 4, 8];
const COORDINATE_PLACES: i32 = 4;

pub fn file_name(number: u32) -> String {
    format!("carte_{number:03}.tiff")
}

pub fn build(
    faker: &mut Faker<'_>,
    dataset_id: u32,
    window: AcquisitionWindow,
) -> Result<FileDoc, GenerationError> {
    let number = faker.int_in("geotiff.number", NUMBER_RANGE.0, NUMBER_RANGE.1)?;
    let common = build_common(faker, dataset_id, file_name(number), MIME_TYPE, window)?;
    let size_bytes = faker.int_in("geotiff.size_bytes", SIZE_RANGE.0, SIZE_RANGE.1)?;

    let metadata = GeotiffMetadata {
        width: *faker.pick("geotiff.width", SIDES)?,
        height: *faker.pick("geotiff.height", SIDES)?,
        coordinate_system: faker.pick_string("geotiff.coordinate_system", COORDINATE_SYSTEMS)?,
        bounding_box: bounding_box(faker),
        resolution: faker.pick_string("geotiff.resolution", RESOLUTIONS)?,
        bands: *faker.pick("geotiff.bands", BANDS)?,
    };
    Ok(common.into_file(size_bytes, TechnicalMetadata::Geotiff(metadata)))
}

// Corners are drawn independently; min/max ordering is not enforced.
fn bounding_box(faker: &mut Faker<'_>) -> [f64; 4] {
    [
        round_to(faker.longitude(), COORDINATE_PLACES),
        round_to(faker.latitude(), COORDINATE_PLACES),
        round_to(faker.longitude(), COORDINATE_PLACES),
        round_to(faker.latitude(), COORDINATE_PLACES),
    ]
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn sides_are_drawn_independently() {
        let mut rng = ChaCha8Rng::seed_from_u64(61);
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).expect("today");
        let mut faker = Faker::new(&mut rng, today);
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).expect("start");
        let window = AcquisitionWindow::new(start, today).expect("window");

        let mut rectangular = false;
        for _ in 0..200 {
            let file = build(&mut faker, 8, window).expect("geotiff file");
            assert!((SIZE_RANGE.0..=SIZE_RANGE.1).contains(&file.size_bytes));
            let TechnicalMetadata::Geotiff(map) = &file.technical_metadata else {
                panic!("expected geotiff metadata");
            };
            assert!(SIDES.contains(&map.width));
            assert!(SIDES.contains(&map.height));
            rectangular |= map.width != map.height;

            let [lon_a, lat_a, lon_b, lat_b] = map.bounding_box;
            for lon in [lon_a, lon_b] {
                assert!((-180.0..=180.0).contains(&lon));
            }
            for lat in [lat_a, lat_b] {
                assert!((-90.0..=90.0).contains(&lat));
            }
        }
        assert!(rectangular);
    }

    #[test]
    fn file_name_is_zero_padded() {
        assert_eq!(file_name(5), "carte_005.tiff");
    }
}
