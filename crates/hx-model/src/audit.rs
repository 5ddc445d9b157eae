//! Per-stage audit records and the dropped-row ledger.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Audited pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    StateValidity,
    WorkableStatus,
    InsuranceExclusion,
    PayorSubstring,
    VisitStatus,
    Escalation,
    Sort,
}

impl Stage {
    /// Filter stages in the order the pipeline runs them.
    pub const FILTERS: [Stage; 6] = [
        Stage::StateValidity,
        Stage::WorkableStatus,
        Stage::InsuranceExclusion,
        Stage::PayorSubstring,
        Stage::VisitStatus,
        Stage::Escalation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::StateValidity => "state validity",
            Self::WorkableStatus => "workable status",
            Self::InsuranceExclusion => "insurance exclusion",
            Self::PayorSubstring => "payor substring",
            Self::VisitStatus => "visit status",
            Self::Escalation => "escalation",
            Self::Sort => "sort",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Row counts entering and leaving one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageAudit {
    pub stage: Stage,
    pub input_count: usize,
    pub output_count: usize,
}

impl StageAudit {
    pub fn new(stage: Stage, input_count: usize, output_count: usize) -> Self {
        Self {
            stage,
            input_count,
            output_count,
        }
    }

    /// Audit entry for a stage that kept every row.
    pub fn passthrough(stage: Stage, count: usize) -> Self {
        Self::new(stage, count, count)
    }

    pub fn removed(&self) -> usize {
        self.input_count.saturating_sub(self.output_count)
    }
}

/// Why a row left the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// No tracked column carried any data.
    EmptyRow,
    /// Appointment state missing or not listed in the reference sheet.
    InvalidState,
    /// Visit type is flagged as not workable.
    NotWorkable,
    /// Visit type does not appear in the reference sheet.
    UnknownVisitType,
    /// Primary insurance is on the exclusion list.
    ExcludedInsurance,
    /// Primary insurance contains excluded payor text such as `WC`.
    ExcludedPayor,
    /// Visit status is not on the allow-list.
    VisitStatusNotAllowed,
    /// Patient account is under escalation.
    EscalatedAccount,
}

impl DropReason {
    pub fn label(self) -> &'static str {
        match self {
            Self::EmptyRow => "empty row",
            Self::InvalidState => "appointment state not valid",
            Self::NotWorkable => "visit type not workable",
            Self::UnknownVisitType => "visit type not in reference sheet",
            Self::ExcludedInsurance => "excluded primary insurance",
            Self::ExcludedPayor => "excluded payor text in primary insurance",
            Self::VisitStatusNotAllowed => "visit status not allowed",
            Self::EscalatedAccount => "escalated account",
        }
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row removed by a filter stage, identified by its input position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedRow {
    /// Zero-based position of the row in the raw report.
    pub ordinal: usize,
    pub stage: Stage,
    pub reason: DropReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_audit_removed() {
        let audit = StageAudit::new(Stage::WorkableStatus, 10, 5);
        assert_eq!(audit.removed(), 5);
        assert_eq!(StageAudit::passthrough(Stage::Sort, 3).removed(), 0);
    }

    #[test]
    fn test_filters_follow_pipeline_order() {
        let mut sorted = Stage::FILTERS;
        sorted.sort();
        assert_eq!(sorted, Stage::FILTERS);
    }
}
