//! Column naming and header normalization.
//!
//! Spreadsheet exports are inconsistent about header whitespace and case, so
//! every column lookup goes through [`header_key`] instead of comparing raw
//! header strings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Normalizes a header for display: strips BOM and zero-width characters, trims,
/// and collapses interior whitespace runs to a single space.
pub fn normalize_header(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !matches!(ch, '\u{feff}' | '\u{200b}' | '\u{200c}' | '\u{200d}'))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Key used to match headers: [`normalize_header`] followed by lowercase folding.
pub fn header_key(value: &str) -> String {
    normalize_header(value).to_lowercase()
}

/// Key used to match cell values: trimmed and lowercase folded.
pub fn value_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Case- and whitespace-insensitive index over a table's actual column names.
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    map: HashMap<String, String>,
}

impl HeaderIndex {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for name in names {
            let name = name.as_ref();
            map.entry(header_key(name))
                .or_insert_with(|| name.to_string());
        }
        Self { map }
    }

    /// Returns the actual column name matching `wanted`, if any.
    pub fn resolve(&self, wanted: &str) -> Option<&str> {
        self.map.get(&header_key(wanted)).map(String::as_str)
    }

    pub fn contains(&self, wanted: &str) -> bool {
        self.map.contains_key(&header_key(wanted))
    }
}

/// Report columns read or written by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub appointment_state: String,
    pub visit_type: String,
    pub primary_insurance: String,
    pub visit_status: String,
    pub provider: String,
    pub appointment_date: String,
    /// Patient account number, used by the escalation stage.
    pub account: String,
    /// Output column holding labels such as `NP-001`.
    pub priority_label: String,
    /// Output column holding the assigned worker identity.
    pub assigned_worker: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            appointment_state: "Appointment State".to_string(),
            visit_type: "Visit Type".to_string(),
            primary_insurance: "Primary Insurance Name".to_string(),
            visit_status: "Visit Status".to_string(),
            provider: "Appointment Provider Name".to_string(),
            appointment_date: "Appointment Date".to_string(),
            account: "Patient Acct No".to_string(),
            priority_label: "Allocation Priority".to_string(),
            assigned_worker: "Assigned Agent".to_string(),
        }
    }
}

/// Reference-sheet columns used to build the lookup index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceColumns {
    pub state: String,
    pub visit_type: String,
    pub workable: String,
}

impl Default for ReferenceColumns {
    fn default() -> Self {
        Self {
            state: "Appointment State".to_string(),
            visit_type: "Visit Type".to_string(),
            workable: "Workable".to_string(),
        }
    }
}
