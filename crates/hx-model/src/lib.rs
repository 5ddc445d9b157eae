//! Shared types for the appointment allocation workspace.
//!
//! Nothing in this crate touches row data; it defines the configuration the
//! engine is called with, the audit records it returns, and its error taxonomy.

pub mod audit;
pub mod category;
pub mod columns;
pub mod config;
pub mod constants;
pub mod error;
pub mod summary;

pub use audit::{DropReason, DroppedRow, Stage, StageAudit};
pub use category::Category;
pub use columns::{
    ColumnNames, HeaderIndex, ReferenceColumns, header_key, normalize_header, value_key,
};
pub use config::{RunConfig, WorkerRoster};
pub use error::{AllocationError, Result, SchemaError, TableKind};
pub use summary::{CategoryCount, RunSummary, WorkerLoad};
