use thiserror::Error;

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid range: {0}")]
    InvalidRange(String),
    #[error("empty choice set: {0}")]
    EmptyChoice(String),
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    #[error("invalid seed script: {0}")]
    InvalidScript(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog error: {0}")]
    Catalog(#[from] dmpgen_core::Error),
}
