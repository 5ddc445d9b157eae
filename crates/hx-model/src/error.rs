//! Error types for the allocation engine.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which input table a schema problem was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    /// The raw appointment report.
    Report,
    /// The reference (help) sheet.
    Reference,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Report => f.write_str("report"),
            Self::Reference => f.write_str("reference sheet"),
        }
    }
}

/// A required column is missing from one of the input tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{table} is missing required column '{column}' (needed by {stage})")]
pub struct SchemaError {
    /// Table the column was expected in.
    pub table: TableKind,
    /// Stage that needs the column.
    pub stage: String,
    /// Configured column name that could not be resolved.
    pub column: String,
}

impl SchemaError {
    pub fn new(table: TableKind, stage: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table,
            stage: stage.into(),
            column: column.into(),
        }
    }
}

/// Errors that abort an allocation run.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// Required column missing from the report or the reference sheet.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The worker roster has no identities.
    #[error("worker roster is empty; at least one worker is required for allocation")]
    EmptyRoster,

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    Frame { message: String },
}

impl From<polars::prelude::PolarsError> for AllocationError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::Frame {
            message: err.to_string(),
        }
    }
}

/// Result type for allocation operations.
pub type Result<T> = std::result::Result<T, AllocationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display() {
        let err = SchemaError::new(TableKind::Reference, "lookup index", "Workable");
        assert_eq!(
            err.to_string(),
            "reference sheet is missing required column 'Workable' (needed by lookup index)"
        );
    }

    #[test]
    fn test_schema_error_is_transparent() {
        let err: AllocationError =
            SchemaError::new(TableKind::Report, "state validity", "Appointment State").into();
        assert_eq!(
            err.to_string(),
            "report is missing required column 'Appointment State' (needed by state validity)"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let err: AllocationError = polars_err.into();
        assert!(matches!(err, AllocationError::Frame { .. }));
    }
}
