use thiserror::Error;

/// Errors raised by the load-and-analyze cycle.
///
/// `MalformedInput` and `Io` abort a load. `EmptyColumn` and
/// `ColumnNotFound` abort a summary. `NonNumericColumn` is also produced
/// per alert rule, where it only affects that rule.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The source is not valid CSV or contains no header.
    #[error("cannot read file: {0}")]
    MalformedInput(String),

    /// The source path could not be opened or read.
    #[error("cannot read file: {0}")]
    Io(#[from] std::io::Error),

    /// Statistics were requested on a column with zero rows.
    #[error("column '{0}' has no rows")]
    EmptyColumn(String),

    /// The column exists but its inferred type is not numeric.
    #[error("column '{0}' is not numeric")]
    NonNumericColumn(String),

    #[error("column '{0}' not found")]
    ColumnNotFound(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
