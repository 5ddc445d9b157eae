//! Escalation tracker loading.

use std::collections::BTreeSet;
use std::path::Path;

use polars::prelude::DataType;
use tracing::{debug, warn};

use hx_model::header_key;

use crate::csv::read_table;
use crate::error::{IngestError, Result};

/// Accepted account-column headers, in preference order.
pub const ACCOUNT_COLUMN_CANDIDATES: [&str; 5] = [
    "acc#",
    "account number",
    "account",
    "acc",
    "patient account number",
];

/// Cell values that mean "no account" in exported trackers.
const MISSING_ACCOUNT_SENTINELS: [&str; 3] = ["nan", "none", "null"];

/// Loads the set of escalated patient accounts from a tracker CSV.
///
/// Values are trimmed; blanks and `nan`/`none`/`null` are skipped.
pub fn read_escalations(path: &Path) -> Result<BTreeSet<String>> {
    let df = read_table(path)?;
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(ToString::to_string)
        .collect();
    let Some(column) = find_account_column(&names) else {
        return Err(IngestError::MissingAccountColumn {
            path: path.to_path_buf(),
            expected: ACCOUNT_COLUMN_CANDIDATES.join(", "),
        });
    };

    let values = df.column(column)?.cast(&DataType::String)?;
    let accounts: BTreeSet<String> = values
        .str()?
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|value| !is_missing_account(value))
        .map(str::to_string)
        .collect();

    if accounts.is_empty() {
        warn!(path = %path.display(), "escalation list contains no accounts");
    }
    debug!(
        path = %path.display(),
        column,
        accounts = accounts.len(),
        "loaded escalation list"
    );
    Ok(accounts)
}

/// First header matching a candidate, trying candidates in preference order.
fn find_account_column(names: &[String]) -> Option<&str> {
    ACCOUNT_COLUMN_CANDIDATES.iter().find_map(|candidate| {
        names
            .iter()
            .find(|name| header_key(name) == *candidate)
            .map(String::as_str)
    })
}

fn is_missing_account(value: &str) -> bool {
    value.is_empty()
        || MISSING_ACCOUNT_SENTINELS
            .iter()
            .any(|sentinel| sentinel.eq_ignore_ascii_case(value))
}
