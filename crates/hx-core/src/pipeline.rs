//! End-to-end run: lookup, filter, sort, allocate, summarize.

use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{info, info_span};

use hx_model::{AllocationError, DroppedRow, Result, RunConfig, RunSummary};

use crate::allocate::{Allocation, RowAllocation, allocate};
use crate::classify::{Classifier, MarkerClassifier};
use crate::filter::{self, FilterOutcome};
use crate::frame::RowSet;
use crate::lookup::LookupIndex;
use crate::schema::ReportSchema;
use crate::sort::{SortOutcome, sort};
use crate::summary::{StageRecords, summarize};

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Allocated rows, in sorted order, with every input column preserved.
    pub frame: DataFrame,
    /// Raw-report position of each row of `frame`.
    pub ordinals: Vec<usize>,
    pub assignments: Vec<RowAllocation>,
    pub summary: RunSummary,
    /// Rows removed by the filter stages, in stage order.
    pub dropped: Vec<DroppedRow>,
}

/// Runs the engine with the configured new-patient marker.
pub fn run(report: &DataFrame, reference: &DataFrame, config: &RunConfig) -> Result<RunOutput> {
    let classifier = MarkerClassifier::new(&config.new_patient_marker);
    run_with(report, reference, config, &classifier)
}

/// Runs the engine with a caller-supplied category classifier.
///
/// Fatal conditions (missing columns, empty roster) are raised before any
/// row is filtered. Inputs are never modified.
pub fn run_with<C>(
    report: &DataFrame,
    reference: &DataFrame,
    config: &RunConfig,
    classifier: &C,
) -> Result<RunOutput>
where
    C: Classifier + ?Sized,
{
    let run_span = info_span!(
        "allocation_run",
        input_rows = report.height(),
        workers = config.roster.len()
    );
    let _run_guard = run_span.enter();
    let start = Instant::now();

    if config.roster.is_empty() {
        return Err(AllocationError::EmptyRoster);
    }
    let lookup =
        info_span!("lookup").in_scope(|| LookupIndex::build(reference, &config.reference))?;
    let schema = ReportSchema::resolve(report, config)?;

    let input_rows = report.height();
    let FilterOutcome {
        rows,
        audits,
        dropped,
        unknown_visit_types,
    } = info_span!("filter")
        .in_scope(|| filter::apply(RowSet::new(report.clone()), &lookup, &schema, config))?;
    let SortOutcome {
        rows,
        audit: sort_audit,
        unparsable_dates,
    } = info_span!("sort").in_scope(|| sort(rows, &schema))?;
    let allocation = info_span!("allocate")
        .in_scope(|| allocate(rows, &config.roster, classifier, &schema))?;

    let mut stages = audits;
    stages.push(sort_audit);
    let records = StageRecords {
        stages,
        unknown_visit_types,
        unparsable_dates,
    };
    let summary = summarize(input_rows, records, &allocation);
    info!(
        input_rows,
        output_rows = summary.final_rows,
        removed_rows = summary.removed_rows(),
        load_spread = summary.load_spread(),
        duration_ms = start.elapsed().as_millis(),
        "allocation run complete"
    );

    let Allocation {
        rows, assignments, ..
    } = allocation;
    let (frame, ordinals) = rows.into_parts();
    Ok(RunOutput {
        frame,
        ordinals,
        assignments,
        summary,
        dropped,
    })
}
