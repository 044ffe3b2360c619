use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use dmpgen_core::FileCountRange;
use dmpgen_generate::{GenerateOptions, ScriptTarget};

pub const DEFAULT_OUTPUT: &str = "mongo_insert.js";

/// Errors raised while loading or resolving generator settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Generator settings as written in `dmpgen.toml`. Every field is optional;
/// command-line flags are layered on top with [`SettingsFile::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    pub datasets: Option<u32>,
    pub min_files: Option<usize>,
    pub max_files: Option<usize>,
    pub seed: Option<u64>,
    pub today: Option<NaiveDate>,
    pub database: Option<String>,
    pub collection: Option<String>,
    pub output: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

/// Fully resolved settings for one `generate` run.
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub options: GenerateOptions,
    pub target: ScriptTarget,
    pub output: PathBuf,
    pub report: Option<PathBuf>,
}

pub fn load_settings_file(path: &Path) -> Result<SettingsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

impl SettingsFile {
    /// Values set in `overrides` win.
    pub fn merge(self, overrides: SettingsFile) -> SettingsFile {
        SettingsFile {
            datasets: overrides.datasets.or(self.datasets),
            min_files: overrides.min_files.or(self.min_files),
            max_files: overrides.max_files.or(self.max_files),
            seed: overrides.seed.or(self.seed),
            today: overrides.today.or(self.today),
            database: overrides.database.or(self.database),
            collection: overrides.collection.or(self.collection),
            output: overrides.output.or(self.output),
            report: overrides.report.or(self.report),
        }
    }

    /// Fill defaults and check the result.
    pub fn resolve(self) -> Result<GeneratorSettings, ConfigError> {
        let defaults = GenerateOptions::default();
        let files = FileCountRange::new(
            self.min_files.unwrap_or(defaults.files.min),
            self.max_files.unwrap_or(defaults.files.max),
        )
        .map_err(|err| ConfigError::Invalid(err.to_string()))?;

        let options = GenerateOptions {
            datasets: self.datasets.unwrap_or(defaults.datasets),
            files,
            today: self.today.unwrap_or(defaults.today),
            seed: self.seed,
        };

        let default_target = ScriptTarget::default();
        let target = ScriptTarget {
            database: self.database.unwrap_or(default_target.database),
            collection: self.collection.unwrap_or(default_target.collection),
        };
        target
            .validate()
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;

        Ok(GeneratorSettings {
            options,
            target,
            output: self.output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            report: self.report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_resolves_to_defaults() {
        let settings: SettingsFile = toml::from_str("").expect("parse");
        let resolved = settings.resolve().expect("resolve");

        assert_eq!(resolved.options.datasets, 1000);
        assert_eq!(resolved.options.files, FileCountRange::default());
        assert_eq!(resolved.options.seed, None);
        assert_eq!(resolved.target, ScriptTarget::default());
        assert_eq!(resolved.output, PathBuf::from("mongo_insert.js"));
        assert!(resolved.report.is_none());
    }

    #[test]
    fn file_values_are_read() {
        let settings: SettingsFile = toml::from_str(
            r#"
            datasets = 25
            min_files = 2
            max_files = 4
            seed = 9
            today = "2026-10-15"
            database = "catalogue"
            collection = "datasets"
            output = "out/seed.js"
            "#,
        )
        .expect("parse");
        let resolved = settings.resolve().expect("resolve");

        assert_eq!(resolved.options.datasets, 25);
        assert_eq!(resolved.options.files, FileCountRange { min: 2, max: 4 });
        assert_eq!(resolved.options.seed, Some(9));
        assert_eq!(
            resolved.options.today,
            NaiveDate::from_ymd_opt(2026, 10, 15).expect("date")
        );
        assert_eq!(resolved.target.database, "catalogue");
        assert_eq!(resolved.output, PathBuf::from("out/seed.js"));
    }

    #[test]
    fn overrides_win_over_file() {
        let file = SettingsFile {
            datasets: Some(10),
            seed: Some(1),
            ..SettingsFile::default()
        };
        let flags = SettingsFile {
            datasets: Some(3),
            ..SettingsFile::default()
        };
        let merged = file.merge(flags);

        assert_eq!(merged.datasets, Some(3));
        assert_eq!(merged.seed, Some(1));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<SettingsFile, _> = toml::from_str("datasetz = 3");
        assert!(result.is_err());
    }

    #[test]
    fn reversed_file_bounds_are_invalid() {
        let settings = SettingsFile {
            min_files: Some(9),
            max_files: Some(3),
            ..SettingsFile::default()
        };
        assert!(matches!(settings.resolve(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn bad_collection_is_invalid() {
        let settings = SettingsFile {
            collection: Some("jeux de données".to_string()),
            ..SettingsFile::default()
        };
        assert!(matches!(settings.resolve(), Err(ConfigError::Invalid(_))));
    }
}
