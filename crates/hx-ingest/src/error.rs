//! Error types for file ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading input files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file does not exist.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File starts with a byte-order mark for an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path}; save the file as UTF-8")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Errors ===
    /// CSV file has no content at all.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// First line of the CSV holds no column names.
    #[error("could not detect header row in {path}")]
    NoHeaderDetected { path: PathBuf },

    /// Two headers normalize to the same name.
    #[error("duplicate column '{column}' in {path}")]
    DuplicateColumn { column: String, path: PathBuf },

    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// No account column found in an escalation list.
    #[error("no account column in {path}; expected one of: {expected}")]
    MissingAccountColumn { path: PathBuf, expected: String },

    // === Configuration Errors ===
    /// Configuration file is not valid TOML for a run configuration.
    #[error("invalid configuration {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    /// Configuration could not be rendered as TOML.
    #[error("failed to serialize configuration: {message}")]
    ConfigSerialize { message: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/reports/today.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /reports/today.csv");
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("Visit Type".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
