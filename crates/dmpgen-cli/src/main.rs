mod atomic;
mod config;
mod logging;

use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use dmpgen_core::{DatasetRecord, FileCountRange, validate_catalog};
use dmpgen_generate::output::script::write_seed_script;
use dmpgen_generate::{
    CatalogSummary, GenerationEngine, GenerationError, RunReport, parse_seed_script,
};
use schemars::schema_for;
use thiserror::Error;

use atomic::{write_atomic_with, write_json_atomic};
use config::{ConfigError, SettingsFile, load_settings_file};
use logging::{LoggingError, init_logging};

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("catalog error: {0}")]
    Catalog(#[from] dmpgen_core::Error),
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: GenerationError,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(
    name = "dmpgen",
    version,
    about = "Mock dataset catalog generator for document-store seeding"
)]
struct Cli {
    /// Also append JSON log lines to this file.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the catalog and write the seeding script.
    Generate(GenerateArgs),
    /// Summarize an existing seeding script.
    Summarize(SummarizeArgs),
    /// Print the JSON Schema of the inserted records.
    Schema,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// TOML settings file; flags override its values.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Number of datasets to generate [default: 1000].
    #[arg(long)]
    datasets: Option<u32>,
    /// Minimum files per dataset [default: 5].
    #[arg(long)]
    min_files: Option<usize>,
    /// Maximum files per dataset [default: 10].
    #[arg(long)]
    max_files: Option<usize>,
    /// RNG seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,
    /// Date the acquisition windows are anchored on [default: today].
    #[arg(long, value_name = "YYYY-MM-DD")]
    today: Option<NaiveDate>,
    /// Target database [default: tp2_mongodb].
    #[arg(long)]
    database: Option<String>,
    /// Target collection [default: jeux_de_donnees].
    #[arg(long)]
    collection: Option<String>,
    /// Output script path [default: mongo_insert.js].
    #[arg(long, short)]
    out: Option<PathBuf>,
    /// Write a JSON run report (seed, duration, per-type volumes).
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SummarizeArgs {
    /// Seeding script written by `dmpgen generate`.
    script: PathBuf,
    /// Print JSON instead of a table.
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Also check the structural invariants of the records.
    #[arg(long, default_value_t = false)]
    check: bool,
    #[arg(long, default_value_t = 5)]
    min_files: usize,
    #[arg(long, default_value_t = 10)]
    max_files: usize,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Summarize(args) => run_summarize(args),
        Command::Schema => run_schema(),
    };

    if let Err(err) = &result {
        tracing::error!(event = "run_failed", error = %err);
    }
    result
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs {
        config,
        datasets,
        min_files,
        max_files,
        seed,
        today,
        database,
        collection,
        out,
        report,
    } = args;

    let file_settings = match &config {
        Some(path) => {
            tracing::info!(event = "config_loaded", path = %path.display());
            load_settings_file(path)?
        }
        None => SettingsFile::default(),
    };
    let flags = SettingsFile {
        datasets,
        min_files,
        max_files,
        seed,
        today,
        database,
        collection,
        output: out,
        report,
    };
    let settings = file_settings.merge(flags).resolve()?;

    let timer = Instant::now();
    let engine = GenerationEngine::new(settings.options.clone());
    let result = engine.run()?;

    let bytes_written = write_atomic_with(&settings.output, |writer| {
        write_seed_script(writer, &settings.target, &result.catalog.records)
    })
    .map_err(|source| CliError::Write {
        path: settings.output.clone(),
        source,
    })?;
    tracing::info!(
        event = "script_written",
        path = %settings.output.display(),
        bytes = bytes_written,
        database = %settings.target.database,
        collection = %settings.target.collection
    );

    let summary = CatalogSummary::from_records(&result.catalog.records);
    if let Some(report_path) = &settings.report {
        let report = RunReport {
            run_id: result.run_id.clone(),
            seed: result.seed,
            today: settings.options.today,
            datasets: settings.options.datasets,
            script_path: Some(settings.output.display().to_string()),
            bytes_written,
            duration_ms: timer.elapsed().as_millis() as u64,
            summary,
        };
        write_json_atomic(report_path, &report)?;
        tracing::info!(event = "report_written", path = %report_path.display());
    }

    tracing::info!(
        event = "run_finished",
        status = "success",
        run_id = %result.run_id,
        seed = result.seed,
        duration_ms = timer.elapsed().as_millis() as u64
    );
    println!("{}", settings.output.display());
    Ok(())
}

fn run_summarize(args: SummarizeArgs) -> Result<(), CliError> {
    let content = std::fs::read_to_string(&args.script)?;
    let script = parse_seed_script(&content)?;
    tracing::info!(
        event = "script_parsed",
        path = %args.script.display(),
        database = %script.target.database,
        collection = %script.target.collection,
        datasets = script.records.len()
    );

    if args.check {
        let files = FileCountRange::new(args.min_files, args.max_files)?;
        validate_catalog(&script.records, files)?;
        tracing::info!(event = "catalog_checked", datasets = script.records.len());
    }

    let summary = CatalogSummary::from_records(&script.records);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary.render());
    }
    Ok(())
}

fn run_schema() -> Result<(), CliError> {
    let schema = schema_for!(Vec<DatasetRecord>);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
