use dmpgen_core::{AcquisitionWindow, DatasetRecord, FileCountRange};

use crate::errors::GenerationError;
use crate::faker::Faker;
use crate::generators::build_file;
use crate::generators::plan::build_management_plan;

/// Bounds, in years before today, of the window start.
const WINDOW_START_YEARS_AGO: (i32, i32) = (3, 1);
const WINDOW_END_YEARS_AHEAD: i32 = 1;

/// Draw an acquisition window: start in [today - 3y, today - 1y], end in
/// [start, today + 1y].
pub fn build_window(faker: &mut Faker<'_>) -> Result<AcquisitionWindow, GenerationError> {
    let earliest = faker.years_from_today(-WINDOW_START_YEARS_AGO.0)?;
    let latest = faker.years_from_today(-WINDOW_START_YEARS_AGO.1)?;
    let horizon = faker.years_from_today(WINDOW_END_YEARS_AHEAD)?;

    let start = faker.date_between("window.start", earliest, latest)?;
    let end = faker.date_between("window.end", start, horizon)?;
    Ok(AcquisitionWindow::new(start, end)?)
}

/// Build dataset `dataset_id` together with the window its files were
/// drawn from.
pub fn build_dataset(
    faker: &mut Faker<'_>,
    dataset_id: u32,
    files: FileCountRange,
) -> Result<(DatasetRecord, AcquisitionWindow), GenerationError> {
    let window = build_window(faker)?;
    let count = faker.int_in("file_count", files.min, files.max)?;
    let management_plan = build_management_plan(faker, dataset_id)?;

    let files = (0..count)
        .map(|_| build_file(faker, dataset_id, window))
        .collect::<Result<Vec<_>, _>>()?;

    let record = DatasetRecord {
        dataset_id,
        management_plan,
        files,
    };
    Ok((record, window))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn window_stays_within_horizon() {
        let mut rng = ChaCha8Rng::seed_from_u64(91);
        let today = date(2026, 10, 15);
        let mut faker = Faker::new(&mut rng, today);

        for _ in 0..500 {
            let window = build_window(&mut faker).expect("window");
            assert!(window.start() >= date(2023, 10, 15));
            assert!(window.start() <= date(2025, 10, 15));
            assert!(window.end() >= window.start());
            assert!(window.end() <= date(2027, 10, 15));
        }
    }

    #[test]
    fn dataset_files_follow_count_and_window() {
        let mut rng = ChaCha8Rng::seed_from_u64(92);
        let mut faker = Faker::new(&mut rng, date(2026, 10, 15));
        let range = FileCountRange::default();

        for dataset_id in 1..=40 {
            let (record, window) = build_dataset(&mut faker, dataset_id, range).expect("dataset");
            assert_eq!(record.dataset_id, dataset_id);
            assert!(range.contains(record.files.len()));
            for file in &record.files {
                assert!(window.contains(file.acquisition_date));
            }
        }
    }

    #[test]
    fn fixed_count_range_is_honored() {
        let mut rng = ChaCha8Rng::seed_from_u64(93);
        let mut faker = Faker::new(&mut rng, date(2026, 10, 15));
        let range = FileCountRange::new(2, 2).expect("range");

        let (record, _) = build_dataset(&mut faker, 1, range).expect("dataset");
        assert_eq!(record.files.len(), 2);
    }
}
