//! CSV loading with normalized headers.

mod header;
mod reader;

pub use header::{normalize_headers, parse_csv_line};
pub use reader::{read_reference, read_report, read_table, validate_encoding};
