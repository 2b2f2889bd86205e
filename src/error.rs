use thiserror::Error;

use crate::sql::StatementError;

/// Convenience result type for conversion operations.
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Error type returned by conversion functions.
///
/// Schema inference and statement generation never fail; these errors come from reading
/// workbooks, loading configuration or applying statements.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Workbook reading error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// Configuration could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// A workbook glob pattern is malformed.
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A path matched by a glob pattern could not be read.
    #[error("glob error: {0}")]
    Glob(#[from] glob::GlobError),

    /// The input is not a workbook this crate can read.
    #[error("unsupported workbook: {message}")]
    UnsupportedFormat { message: String },

    /// The executor rejected a statement. Earlier statements of the sheet were already applied.
    #[error("statement {index} for table '{table}' failed: {source}")]
    Execution {
        table: String,
        index: usize,
        #[source]
        source: StatementError,
    },
}
