//! Dataset catalog generation for dmpgen.
//!
//! This crate draws dataset records (management plan plus 5 to 10 typed
//! files each) from an explicitly passed random source and writes them as a
//! document-store seeding script.

pub mod engine;
pub mod errors;
pub mod faker;
pub mod generators;
pub mod model;
pub mod output;
pub mod summary;

pub use engine::{GeneratedCatalog, GenerationEngine, GenerationResult};
pub use errors::GenerationError;
pub use faker::Faker;
pub use generators::FileKind;
pub use model::{GenerateOptions, RunReport};
pub use output::script::{ScriptTarget, SeedScript, parse_seed_script, render_seed_script};
pub use summary::CatalogSummary;
