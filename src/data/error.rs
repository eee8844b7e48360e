use thiserror::Error;

/// Failures the data layer reports by kind. Everything else travels as
/// `anyhow::Error` with context attached.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("expected a top-level JSON array in {0}")]
    NotAnArray(&'static str),

    #[error("row {row}: restaurant has no name")]
    MissingName { row: usize },

    #[error("invalid bounds '{0}', expected south,west,north,east")]
    InvalidBounds(String),
}
