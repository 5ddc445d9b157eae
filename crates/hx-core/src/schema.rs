//! Resolution of configured column names against the report's actual headers.

use polars::prelude::DataFrame;

use hx_model::{HeaderIndex, Result, RunConfig, SchemaError, Stage, TableKind};

use crate::frame::column_names;

/// Report columns the engine reads, resolved to their actual header text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSchema {
    pub appointment_state: String,
    pub visit_type: String,
    pub primary_insurance: String,
    pub provider: String,
    pub appointment_date: String,
    /// Present when the report has the column; required only while the
    /// visit-status filter is enabled.
    pub visit_status: Option<String>,
    /// Present when the report has the column; required only when escalated
    /// accounts are configured.
    pub account: Option<String>,
    /// Output column names. An existing header matching case- and
    /// space-insensitively is reused so its values are replaced in place.
    pub priority_label: String,
    pub assigned_worker: String,
}

impl ReportSchema {
    /// Resolves every column the configured run needs, failing on the first
    /// missing one in pipeline order.
    pub fn resolve(report: &DataFrame, config: &RunConfig) -> Result<Self> {
        let index = HeaderIndex::new(column_names(report));
        let columns = &config.columns;
        let required = |wanted: &str, stage: Stage| -> Result<String> {
            index
                .resolve(wanted)
                .map(str::to_string)
                .ok_or_else(|| SchemaError::new(TableKind::Report, stage.label(), wanted).into())
        };

        let appointment_state = required(&columns.appointment_state, Stage::StateValidity)?;
        let visit_type = required(&columns.visit_type, Stage::WorkableStatus)?;
        let primary_insurance = required(&columns.primary_insurance, Stage::InsuranceExclusion)?;
        let visit_status = if config.visit_status_filter {
            Some(required(&columns.visit_status, Stage::VisitStatus)?)
        } else {
            index.resolve(&columns.visit_status).map(str::to_string)
        };
        let account = if config.escalated_accounts.is_empty() {
            index.resolve(&columns.account).map(str::to_string)
        } else {
            Some(required(&columns.account, Stage::Escalation)?)
        };
        let provider = required(&columns.provider, Stage::Sort)?;
        let appointment_date = required(&columns.appointment_date, Stage::Sort)?;
        let output = |wanted: &str| {
            index
                .resolve(wanted)
                .map_or_else(|| wanted.to_string(), str::to_string)
        };

        Ok(Self {
            appointment_state,
            visit_type,
            primary_insurance,
            provider,
            appointment_date,
            visit_status,
            account,
            priority_label: output(&columns.priority_label),
            assigned_worker: output(&columns.assigned_worker),
        })
    }

    /// Columns inspected when deciding whether a row is empty.
    pub fn tracked(&self) -> Vec<&str> {
        let mut tracked = vec![
            self.appointment_state.as_str(),
            self.visit_type.as_str(),
            self.primary_insurance.as_str(),
            self.provider.as_str(),
            self.appointment_date.as_str(),
        ];
        if let Some(status) = &self.visit_status {
            tracked.push(status);
        }
        tracked
    }
}
