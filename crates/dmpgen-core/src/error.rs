use thiserror::Error;

/// Core error type shared across dmpgen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The catalog violates a structural invariant.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
    /// An acquisition window ends before it starts.
    #[error("invalid acquisition window: {0}")]
    InvalidWindow(String),
}

/// Convenience alias for results returned by dmpgen crates.
pub type Result<T> = std::result::Result<T, Error>;
