//! Lookup index built from the reference sheet.
//!
//! The index answers two questions for the filter pipeline: is an
//! appointment state valid, and is a visit type workable. Keys are trimmed
//! and case folded on both the build and the query side.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::DataFrame;
use tracing::debug;

use hx_model::constants::BLANK_SENTINELS;
use hx_model::{HeaderIndex, ReferenceColumns, Result, SchemaError, TableKind, value_key};

use crate::frame::{column_names, string_values};

const STAGE: &str = "lookup index";

/// Read-only validity and workability tables for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupIndex {
    valid_states: BTreeSet<String>,
    workable: BTreeMap<String, bool>,
}

impl LookupIndex {
    /// Builds the index from a reference sheet.
    ///
    /// Rows may carry a state, a visit type, or both. When a visit type
    /// appears more than once the last row wins. Any workable flag other than
    /// `Y` (case-insensitive) marks the visit type as not workable.
    ///
    /// # Errors
    ///
    /// Returns a schema error if the state, visit-type, or workable column
    /// is missing.
    pub fn build(reference: &DataFrame, columns: &ReferenceColumns) -> Result<Self> {
        let headers = HeaderIndex::new(column_names(reference));
        let resolve = |wanted: &str| -> Result<String> {
            headers
                .resolve(wanted)
                .map(str::to_string)
                .ok_or_else(|| SchemaError::new(TableKind::Reference, STAGE, wanted).into())
        };
        let state_column = resolve(&columns.state)?;
        let visit_type_column = resolve(&columns.visit_type)?;
        let workable_column = resolve(&columns.workable)?;

        let states = string_values(reference, &state_column)?;
        let visit_types = string_values(reference, &visit_type_column)?;
        let flags = string_values(reference, &workable_column)?;

        let index = Self::from_entries(
            states
                .iter()
                .zip(&visit_types)
                .zip(&flags)
                .map(|((state, visit_type), flag)| {
                    (state.as_str(), visit_type.as_str(), flag.as_str())
                }),
        );
        debug!(
            reference_rows = reference.height(),
            valid_states = index.valid_states.len(),
            visit_types = index.workable.len(),
            workable = index.workable_count(),
            "lookup index built"
        );
        Ok(index)
    }

    /// Builds the index from `(state, visit_type, workable_flag)` entries.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
    {
        let mut index = Self::default();
        for (state, visit_type, flag) in entries {
            if let Some(state) = lookup_key(state) {
                index.valid_states.insert(state);
            }
            if let Some(visit_type) = lookup_key(visit_type) {
                index
                    .workable
                    .insert(visit_type, value_key(flag) == "y");
            }
        }
        index
    }

    pub fn is_valid_state(&self, state: &str) -> bool {
        lookup_key(state).is_some_and(|key| self.valid_states.contains(&key))
    }

    /// `Some(flag)` for visit types listed in the reference sheet, `None` otherwise.
    pub fn workability(&self, visit_type: &str) -> Option<bool> {
        lookup_key(visit_type).and_then(|key| self.workable.get(&key).copied())
    }

    /// True only for visit types explicitly flagged workable.
    pub fn is_workable(&self, visit_type: &str) -> bool {
        self.workability(visit_type).unwrap_or(false)
    }

    /// Valid states as normalized keys, sorted.
    pub fn valid_states(&self) -> impl Iterator<Item = &str> {
        self.valid_states.iter().map(String::as_str)
    }

    /// Visit-type keys and their workable flags, sorted by key.
    pub fn visit_types(&self) -> impl Iterator<Item = (&str, bool)> {
        self.workable
            .iter()
            .map(|(visit_type, flag)| (visit_type.as_str(), *flag))
    }

    pub fn workable_count(&self) -> usize {
        self.workable.values().filter(|flag| **flag).count()
    }
}

/// Normalized key, or `None` for blank cells.
fn lookup_key(value: &str) -> Option<String> {
    let key = value_key(value);
    let blank = key.is_empty()
        || BLANK_SENTINELS
            .iter()
            .any(|sentinel| sentinel.eq_ignore_ascii_case(&key));
    (!blank).then_some(key)
}
