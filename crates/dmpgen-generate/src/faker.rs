use std::fmt::Display;

use chrono::{Datelike, Months, NaiveDate, TimeDelta};
use fake::Fake;
use fake::faker::name::fr_fr::Name;
use rand::distr::uniform::SampleUniform;
use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};

use crate::errors::GenerationError;

/// Random value source used by every builder.
///
/// Wraps the caller's RNG together with the generation date, so a seeded
/// RNG and a fixed date reproduce a run exactly. Every draw checks its
/// bounds: an empty choice set or a reversed range is an error, never a
/// silent default. `field` arguments only label those errors.
pub struct Faker<'a> {
    rng: &'a mut dyn RngCore,
    today: NaiveDate,
}

impl<'a> Faker<'a> {
    pub fn new(rng: &'a mut dyn RngCore, today: NaiveDate) -> Self {
        Self { rng, today }
    }

    /// Date the run treats as "now".
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Uniform integer in `[min, max]`.
    pub fn int_in<T>(&mut self, field: &str, min: T, max: T) -> Result<T, GenerationError>
    where
        T: SampleUniform + PartialOrd + Display + Copy,
    {
        if min > max {
            return Err(GenerationError::InvalidRange(format!(
                "{field}: min {min} must be <= max {max}"
            )));
        }
        Ok(self.rng.random_range(min..=max))
    }

    /// Uniform choice from `values`.
    pub fn pick<'v, T>(&mut self, field: &str, values: &'v [T]) -> Result<&'v T, GenerationError> {
        values
            .choose(&mut *self.rng)
            .ok_or_else(|| GenerationError::EmptyChoice(field.to_string()))
    }

    pub fn pick_string(&mut self, field: &str, values: &[&str]) -> Result<String, GenerationError> {
        self.pick(field, values).map(|value| value.to_string())
    }

    /// Uniform date in `[start, end]`. A single-day range returns that day.
    pub fn date_between(
        &mut self,
        field: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<NaiveDate, GenerationError> {
        if start > end {
            return Err(GenerationError::InvalidRange(format!(
                "{field}: {start} is after {end}"
            )));
        }
        let span = (end - start).num_days();
        let offset = self.rng.random_range(0..=span);
        start.checked_add_signed(TimeDelta::days(offset)).ok_or_else(|| {
            GenerationError::InvalidRange(format!("{field}: {start} + {offset} days overflows"))
        })
    }

    /// Date between January 1st of the current decade and today.
    pub fn date_this_decade(&mut self) -> Result<NaiveDate, GenerationError> {
        let year = self.today.year() - self.today.year().rem_euclid(10);
        let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| {
            GenerationError::InvalidRange(format!("no January 1st for decade {year}"))
        })?;
        self.date_between("date_this_decade", start, self.today)
    }

    /// Today shifted by a whole number of years (negative for the past).
    pub fn years_from_today(&self, years: i32) -> Result<NaiveDate, GenerationError> {
        let months = Months::new(years.unsigned_abs() * 12);
        let shifted = if years < 0 {
            self.today.checked_sub_months(months)
        } else {
            self.today.checked_add_months(months)
        };
        shifted.ok_or_else(|| {
            GenerationError::InvalidRange(format!("{} shifted by {years} years", self.today))
        })
    }

    pub fn longitude(&mut self) -> f64 {
        self.rng.random_range(-180.0..=180.0)
    }

    pub fn latitude(&mut self) -> f64 {
        self.rng.random_range(-90.0..=90.0)
    }

    /// Person name from the fr_FR locale.
    pub fn name(&mut self) -> String {
        Name().fake_with_rng(&mut *self.rng)
    }

    /// `len` random lowercase ASCII letters.
    pub fn lexify(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from(self.rng.random_range(b'a'..=b'z')))
            .collect()
    }

    /// `true` with probability `probability`.
    pub fn chance(&mut self, field: &str, probability: f64) -> Result<bool, GenerationError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(GenerationError::InvalidRange(format!(
                "{field}: probability {probability} outside [0, 1]"
            )));
        }
        Ok(self.rng.random_bool(probability))
    }
}

/// Round `value` to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn int_in_rejects_reversed_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut faker = Faker::new(&mut rng, date(2025, 6, 1));
        let result = faker.int_in("size", 10_u64, 1);
        assert!(matches!(result, Err(GenerationError::InvalidRange(_))));
    }

    #[test]
    fn pick_rejects_empty_set() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut faker = Faker::new(&mut rng, date(2025, 6, 1));
        let empty: [&str; 0] = [];
        let result = faker.pick("delimiter", &empty);
        assert!(matches!(result, Err(GenerationError::EmptyChoice(field)) if field == "delimiter"));
    }

    #[test]
    fn single_day_range_returns_that_day() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut faker = Faker::new(&mut rng, date(2025, 6, 1));
        let day = date(2024, 2, 29);
        for _ in 0..20 {
            assert_eq!(faker.date_between("annotation", day, day).expect("draw"), day);
        }
    }

    #[test]
    fn date_between_stays_inside_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut faker = Faker::new(&mut rng, date(2025, 6, 1));
        let (start, end) = (date(2023, 12, 30), date(2024, 1, 2));
        for _ in 0..200 {
            let drawn = faker.date_between("acquisition", start, end).expect("draw");
            assert!(start <= drawn && drawn <= end);
        }
    }

    #[test]
    fn this_decade_starts_on_decade_boundary() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let today = date(2026, 10, 15);
        let mut faker = Faker::new(&mut rng, today);
        for _ in 0..200 {
            let drawn = faker.date_this_decade().expect("draw");
            assert!(date(2020, 1, 1) <= drawn && drawn <= today);
        }
    }

    #[test]
    fn years_from_today_handles_leap_day() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let faker = Faker::new(&mut rng, date(2024, 2, 29));
        assert_eq!(faker.years_from_today(-1).expect("shift"), date(2023, 2, 28));
        assert_eq!(faker.years_from_today(1).expect("shift"), date(2025, 2, 28));
    }

    #[test]
    fn lexify_yields_lowercase_letters() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut faker = Faker::new(&mut rng, date(2025, 6, 1));
        let token = faker.lexify(3);
        assert_eq!(token.len(), 3);
        assert!(token.chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn chance_rejects_invalid_probability() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut faker = Faker::new(&mut rng, date(2025, 6, 1));
        assert!(faker.chance("annotation", 1.5).is_err());
        assert!(!faker.chance("annotation", 0.0).expect("draw"));
    }

    #[test]
    fn round_to_keeps_requested_places() {
        assert_eq!(round_to(2.3456789, 4), 2.3457);
        assert_eq!(round_to(-48.123456, 5), -48.12346);
    }
}
