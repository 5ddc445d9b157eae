//! File collaborators for the allocation engine.
//!
//! Loads the appointment report, the reference sheet and the escalation
//! tracker from CSV into Polars frames whose columns are all text, and reads
//! run configuration from TOML. The engine itself never touches files.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use hx_ingest::{load_config, read_reference, read_report};
//!
//! let config = load_config(Path::new("allocation.toml"))?;
//! let report = read_report(Path::new("appointments.csv"))?;
//! let reference = read_reference(Path::new("help_sheet.csv"))?;
//! ```

mod config;
mod csv;
mod error;
mod escalation;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{
    normalize_headers, parse_csv_line, read_reference, read_report, read_table, validate_encoding,
};

// === Escalations ===
pub use escalation::{ACCOUNT_COLUMN_CANDIDATES, read_escalations};

// === Configuration ===
pub use config::{default_config_toml, load_config};
