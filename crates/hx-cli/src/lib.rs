//! Library side of the `hx-allocate` command-line tool.

pub mod logging;
pub mod summary;
pub mod types;
