//! Assembly of the run summary from stage outputs.

use hx_model::{RunSummary, StageAudit};

use crate::allocate::Allocation;

/// Audit observations gathered while filtering and sorting.
#[derive(Debug, Clone, Default)]
pub struct StageRecords {
    /// Filter audits followed by the sort audit.
    pub stages: Vec<StageAudit>,
    pub unknown_visit_types: usize,
    pub unparsable_dates: usize,
}

/// Collects the audit trail and final counts of one run.
pub fn summarize(input_rows: usize, records: StageRecords, allocation: &Allocation) -> RunSummary {
    RunSummary {
        input_rows,
        stages: records.stages,
        final_rows: allocation.rows.len(),
        categories: allocation.categories.clone(),
        worker_loads: allocation.worker_loads.clone(),
        unknown_visit_types: records.unknown_visit_types,
        unparsable_dates: records.unparsable_dates,
    }
}
