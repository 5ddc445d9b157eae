//! Run summary handed back to the caller for logging and display.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::audit::{Stage, StageAudit};
use crate::category::Category;

/// Number of rows assigned to one worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerLoad {
    pub worker: String,
    pub rows: usize,
}

/// Rows allocated to one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: Category,
    pub rows: usize,
}

/// Audit record of a single allocation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Rows in the raw report.
    pub input_rows: usize,
    /// One entry per filter stage plus the sort stage, in execution order.
    pub stages: Vec<StageAudit>,
    /// Rows in the allocated output.
    pub final_rows: usize,
    pub categories: Vec<CategoryCount>,
    /// Loads in roster order.
    pub worker_loads: Vec<WorkerLoad>,
    /// Rows dropped because their visit type is absent from the reference sheet.
    pub unknown_visit_types: usize,
    /// Surviving rows whose appointment date could not be parsed.
    pub unparsable_dates: usize,
}

impl RunSummary {
    pub fn stage(&self, stage: Stage) -> Option<&StageAudit> {
        self.stages.iter().find(|audit| audit.stage == stage)
    }

    pub fn category_rows(&self, category: Category) -> usize {
        self.categories
            .iter()
            .find(|count| count.category == category)
            .map_or(0, |count| count.rows)
    }

    /// Total rows removed across all stages.
    pub fn removed_rows(&self) -> usize {
        self.stages.iter().map(StageAudit::removed).sum()
    }

    /// Spread between the busiest and the idlest worker.
    pub fn load_spread(&self) -> usize {
        let max = self.worker_loads.iter().map(|load| load.rows).max();
        let min = self.worker_loads.iter().map(|load| load.rows).min();
        match (max, min) {
            (Some(max), Some(min)) => max - min,
            _ => 0,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "input rows: {}", self.input_rows)?;
        for audit in &self.stages {
            writeln!(
                f,
                "{}: {} -> {} (removed {})",
                audit.stage,
                audit.input_count,
                audit.output_count,
                audit.removed()
            )?;
        }
        let categories: Vec<String> = self
            .categories
            .iter()
            .map(|count| format!("{} {}", count.category, count.rows))
            .collect();
        writeln!(
            f,
            "allocated rows: {} ({})",
            self.final_rows,
            categories.join(", ")
        )?;
        let loads: Vec<String> = self
            .worker_loads
            .iter()
            .map(|load| format!("{}={}", load.worker, load.rows))
            .collect();
        writeln!(f, "worker loads: {}", loads.join(", "))?;
        writeln!(f, "unknown visit types: {}", self.unknown_visit_types)?;
        write!(f, "unparsable dates: {}", self.unparsable_dates)
    }
}
