use std::collections::BTreeSet;

use chrono::NaiveDate;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use dmpgen_core::metadata::IMAGE_SIDES;
use dmpgen_core::{FileCountRange, TechnicalMetadata, unit_for_column};
use dmpgen_generate::generators::{FileKind, build_file_of_kind, csv};
use dmpgen_generate::{Faker, GenerateOptions, GeneratedCatalog, GenerationEngine};

fn options(datasets: u32, seed: Option<u64>) -> GenerateOptions {
    GenerateOptions {
        datasets,
        files: FileCountRange::default(),
        today: NaiveDate::from_ymd_opt(2026, 10, 15).expect("today"),
        seed,
    }
}

fn assert_structurally_valid(catalog: &GeneratedCatalog, datasets: u32) {
    assert_eq!(catalog.records.len(), datasets as usize);
    assert_eq!(catalog.windows.len(), datasets as usize);

    for (index, (record, window)) in catalog.records.iter().zip(&catalog.windows).enumerate() {
        assert_eq!(record.dataset_id as usize, index + 1);
        assert!((5..=10).contains(&record.files.len()));

        for file in &record.files {
            assert!(window.start() <= file.acquisition_date);
            assert!(file.acquisition_date <= window.end());

            if !file.annotations.is_empty() {
                assert_eq!(file.annotations.len(), 1);
                assert!(file.annotations[0].date >= file.acquisition_date);
            }

            match &file.technical_metadata {
                TechnicalMetadata::Csv(csv) => {
                    for column in csv.units.keys() {
                        assert!(csv.columns.contains(column));
                    }
                    for column in &csv.columns {
                        if unit_for_column(column).is_some() {
                            assert!(csv.units.contains_key(column));
                        }
                    }
                }
                TechnicalMetadata::Image(image) => match image.width {
                    Some(width) => assert_eq!(image.height, width),
                    None => assert!(IMAGE_SIDES.contains(&image.height)),
                },
                _ => {}
            }
        }
    }
}

#[test]
fn seeded_runs_satisfy_invariants() {
    for seed in [1, 2, 3, 42, 2024] {
        let result = GenerationEngine::new(options(120, Some(seed)))
            .run()
            .expect("run generation");
        assert_structurally_valid(&result.catalog, 120);
    }
}

#[test]
fn unseeded_runs_satisfy_invariants() {
    for _ in 0..3 {
        let result = GenerationEngine::new(options(60, None))
            .run()
            .expect("run generation");
        assert_structurally_valid(&result.catalog, 60);
    }
}

#[test]
fn every_kind_appears_in_a_large_catalog() {
    let result = GenerationEngine::new(options(200, Some(5)))
        .run()
        .expect("run generation");
    let tags: BTreeSet<&str> = result
        .catalog
        .records
        .iter()
        .flat_map(|record| record.files.iter().map(|file| file.kind_tag()))
        .collect();
    assert_eq!(
        tags,
        BTreeSet::from(["audio", "csv", "geotiff", "image", "pdf"])
    );
}

#[test]
fn forced_csv_with_ph_columns_only_maps_temperature() {
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let today = NaiveDate::from_ymd_opt(2026, 10, 15).expect("today");
    let mut faker = Faker::new(&mut rng, today);
    let columns = vec![
        "timestamp".to_string(),
        "pH".to_string(),
        "temperature".to_string(),
    ];

    let metadata = csv::metadata_for_columns(&mut faker, columns).expect("metadata");
    assert_eq!(
        metadata.units.into_iter().collect::<Vec<_>>(),
        vec![("temperature".to_string(), "°C".to_string())]
    );
}

#[test]
fn forced_kinds_use_the_engine_window() {
    let mut rng = ChaCha8Rng::seed_from_u64(18);
    let today = NaiveDate::from_ymd_opt(2026, 10, 15).expect("today");
    let mut faker = Faker::new(&mut rng, today);
    let window = dmpgen_generate::generators::build_window(&mut faker).expect("window");

    for kind in FileKind::ALL {
        for _ in 0..20 {
            let file = build_file_of_kind(kind, &mut faker, 1, window).expect("file");
            assert!(window.contains(file.acquisition_date));
        }
    }
}
