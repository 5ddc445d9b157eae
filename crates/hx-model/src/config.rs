//! Run configuration passed explicitly into every engine call.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::columns::{ColumnNames, ReferenceColumns};
use crate::constants::{
    DEFAULT_AGENTS, DEFAULT_EXCLUDED_INSURANCE_SUBSTRINGS, DEFAULT_NEW_PATIENT_MARKER,
};

/// Ordered worker identities that rows are distributed across.
///
/// Order matters: when two workers carry the same load, the one listed first
/// receives the next row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct WorkerRoster {
    workers: Vec<String>,
}

impl WorkerRoster {
    /// Builds a roster, trimming identities and discarding blank entries.
    pub fn new<I, S>(workers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let workers = workers
            .into_iter()
            .map(|worker| worker.as_ref().trim().to_string())
            .filter(|worker| !worker.is_empty())
            .collect();
        Self { workers }
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.workers.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.workers.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.workers
    }
}

impl Default for WorkerRoster {
    fn default() -> Self {
        Self::new(DEFAULT_AGENTS)
    }
}

impl From<Vec<String>> for WorkerRoster {
    fn from(workers: Vec<String>) -> Self {
        Self::new(workers)
    }
}

impl From<WorkerRoster> for Vec<String> {
    fn from(roster: WorkerRoster) -> Self {
        roster.workers
    }
}

/// Everything an allocation run needs besides the two input tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Workers receiving rows, in tie-break order.
    #[serde(rename = "workers")]
    pub roster: WorkerRoster,

    /// Keep only rows whose visit status is on the allow-list.
    /// Default: false.
    pub visit_status_filter: bool,

    /// Case-insensitive visit-type substring marking a new-patient visit.
    pub new_patient_marker: String,

    /// Insurance names excluded in addition to the fixed exclusion codes.
    pub extra_excluded_insurances: Vec<String>,

    /// Case-insensitive text that excludes a row when its primary insurance
    /// contains it. Empty disables the payor-substring stage.
    pub excluded_insurance_substrings: Vec<String>,

    /// Patient accounts under escalation; rows for these accounts are removed.
    /// Empty disables the escalation stage.
    pub escalated_accounts: BTreeSet<String>,

    /// Report column names.
    pub columns: ColumnNames,

    /// Reference-sheet column names.
    pub reference: ReferenceColumns,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            roster: WorkerRoster::default(),
            visit_status_filter: false,
            new_patient_marker: DEFAULT_NEW_PATIENT_MARKER.to_string(),
            extra_excluded_insurances: Vec::new(),
            excluded_insurance_substrings: DEFAULT_EXCLUDED_INSURANCE_SUBSTRINGS
                .iter()
                .map(ToString::to_string)
                .collect(),
            escalated_accounts: BTreeSet::new(),
            columns: ColumnNames::default(),
            reference: ReferenceColumns::default(),
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_roster(mut self, roster: WorkerRoster) -> Self {
        self.roster = roster;
        self
    }

    #[must_use]
    pub fn with_visit_status_filter(mut self, enable: bool) -> Self {
        self.visit_status_filter = enable;
        self
    }

    #[must_use]
    pub fn with_new_patient_marker(mut self, marker: impl Into<String>) -> Self {
        self.new_patient_marker = marker.into();
        self
    }

    #[must_use]
    pub fn with_extra_excluded_insurances(mut self, names: Vec<String>) -> Self {
        self.extra_excluded_insurances = names;
        self
    }

    #[must_use]
    pub fn with_excluded_insurance_substrings(mut self, substrings: Vec<String>) -> Self {
        self.excluded_insurance_substrings = substrings;
        self
    }

    #[must_use]
    pub fn with_escalated_accounts(mut self, accounts: BTreeSet<String>) -> Self {
        self.escalated_accounts = accounts;
        self
    }

    #[must_use]
    pub fn with_columns(mut self, columns: ColumnNames) -> Self {
        self.columns = columns;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_drops_blank_entries() {
        let roster = WorkerRoster::new([" Ana ", "", "   ", "Ben"]);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get(0), Some("Ana"));
        assert_eq!(roster.get(1), Some("Ben"));
    }

    #[test]
    fn test_default_roster_has_eight_agents() {
        let roster = WorkerRoster::default();
        assert_eq!(roster.len(), 8);
        assert_eq!(roster.get(7), Some("Agent-8"));
    }

    #[test]
    fn test_default_config_disables_optional_stages() {
        let config = RunConfig::default();
        assert!(!config.visit_status_filter);
        assert!(config.escalated_accounts.is_empty());
        assert_eq!(config.new_patient_marker, "new");
        assert_eq!(config.excluded_insurance_substrings, vec!["WC"]);
    }
}
