use thiserror::Error;

/// Errors surfaced by the playground engine.
///
/// Shape and dimension errors are precondition violations: the caller passed
/// a configuration the engine cannot run and has to fix it before retrying.
/// Unknown dataset / activation / regularization names are *not* errors; they
/// fall back to a default when parsed.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid network shape: {0}")]
    InvalidShape(String),

    #[error("expected {expected} inputs for the input layer, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
