//! Filter pipeline: ordered predicate stages that shrink the report.
//!
//! Stages run in a fixed order and each records a [`StageAudit`] before the
//! next one starts. Disabled stages still record an entry with equal input
//! and output counts. Relative row order is never changed here.

use std::collections::BTreeSet;
use std::time::Instant;

use tracing::{debug, info_span, warn};

use hx_model::constants::{BLANK_SENTINELS, EXCLUDED_INSURANCE_CODES, VISIT_STATUS_ALLOW_LIST};
use hx_model::{DropReason, DroppedRow, Result, RunConfig, Stage, StageAudit, value_key};

use crate::frame::RowSet;
use crate::lookup::LookupIndex;
use crate::schema::ReportSchema;

/// Rows surviving the filter stages plus everything observed on the way.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub rows: RowSet,
    /// One entry per filter stage, in [`Stage::FILTERS`] order.
    pub audits: Vec<StageAudit>,
    /// Every removed row with the stage and reason that removed it.
    pub dropped: Vec<DroppedRow>,
    /// Rows removed because the reference sheet does not list their visit type.
    pub unknown_visit_types: usize,
}

/// Runs every filter stage over `rows`.
///
/// Empty-row removal happens first and is folded into the state-validity
/// audit entry, whose input count is the raw row count.
pub fn apply(
    rows: RowSet,
    lookup: &LookupIndex,
    schema: &ReportSchema,
    config: &RunConfig,
) -> Result<FilterOutcome> {
    let mut dropped = Vec::new();
    let mut audits = Vec::with_capacity(Stage::FILTERS.len());

    // 1. State validity (after empty-row removal)
    let raw_count = rows.len();
    let rows = stage_span(Stage::StateValidity, raw_count, || {
        let rows = remove_empty_rows(rows, schema, &mut dropped)?;
        filter_column(
            rows,
            Stage::StateValidity,
            &schema.appointment_state,
            &mut dropped,
            |state| (!lookup.is_valid_state(state)).then_some(DropReason::InvalidState),
        )
    })?;
    audits.push(StageAudit::new(Stage::StateValidity, raw_count, rows.len()));

    // 2. Workable status
    let input = rows.len();
    let mut unknown_visit_types = 0usize;
    let rows = stage_span(Stage::WorkableStatus, input, || {
        filter_column(
            rows,
            Stage::WorkableStatus,
            &schema.visit_type,
            &mut dropped,
            |visit_type| match lookup.workability(visit_type) {
                Some(true) => None,
                Some(false) => Some(DropReason::NotWorkable),
                None => {
                    unknown_visit_types += 1;
                    Some(DropReason::UnknownVisitType)
                }
            },
        )
    })?;
    audits.push(StageAudit::new(Stage::WorkableStatus, input, rows.len()));
    if unknown_visit_types > 0 {
        warn!(
            rows = unknown_visit_types,
            "visit types missing from the reference sheet were treated as not workable"
        );
    }

    // 3. Insurance exclusion
    let input = rows.len();
    let excluded = exclusion_keys(&config.extra_excluded_insurances);
    let rows = stage_span(Stage::InsuranceExclusion, input, || {
        filter_column(
            rows,
            Stage::InsuranceExclusion,
            &schema.primary_insurance,
            &mut dropped,
            |insurance| {
                excluded
                    .contains(&value_key(insurance))
                    .then_some(DropReason::ExcludedInsurance)
            },
        )
    })?;
    audits.push(StageAudit::new(Stage::InsuranceExclusion, input, rows.len()));

    // 4. Payor substring (optional)
    let input = rows.len();
    let substrings = payor_substrings(&config.excluded_insurance_substrings);
    let rows = if substrings.is_empty() {
        rows
    } else {
        stage_span(Stage::PayorSubstring, input, || {
            filter_column(
                rows,
                Stage::PayorSubstring,
                &schema.primary_insurance,
                &mut dropped,
                |insurance| {
                    let insurance = insurance.trim().to_uppercase();
                    substrings
                        .iter()
                        .any(|text| insurance.contains(text.as_str()))
                        .then_some(DropReason::ExcludedPayor)
                },
            )
        })?
    };
    audits.push(StageAudit::new(Stage::PayorSubstring, input, rows.len()));

    // 5. Visit status (optional)
    let input = rows.len();
    let rows = match (&schema.visit_status, config.visit_status_filter) {
        (Some(column), true) => stage_span(Stage::VisitStatus, input, || {
            filter_column(rows, Stage::VisitStatus, column, &mut dropped, |status| {
                (!is_allowed_visit_status(status)).then_some(DropReason::VisitStatusNotAllowed)
            })
        })?,
        _ => rows,
    };
    audits.push(StageAudit::new(Stage::VisitStatus, input, rows.len()));

    // 6. Escalation (optional)
    let input = rows.len();
    let accounts: BTreeSet<&str> = config
        .escalated_accounts
        .iter()
        .map(|account| account.trim())
        .filter(|account| !account.is_empty())
        .collect();
    let rows = match (&schema.account, accounts.is_empty()) {
        (Some(column), false) => stage_span(Stage::Escalation, input, || {
            filter_column(rows, Stage::Escalation, column, &mut dropped, |account| {
                accounts
                    .contains(account.trim())
                    .then_some(DropReason::EscalatedAccount)
            })
        })?,
        _ => rows,
    };
    audits.push(StageAudit::new(Stage::Escalation, input, rows.len()));

    Ok(FilterOutcome {
        rows,
        audits,
        dropped,
        unknown_visit_types,
    })
}

/// True when `status` carries an allow-listed code.
///
/// The code is the text before the first `:` (`"PEN : Pending"` → `PEN`), or
/// the whole value when there is no colon.
pub fn is_allowed_visit_status(status: &str) -> bool {
    let code = status.split(':').next().unwrap_or_default().trim();
    VISIT_STATUS_ALLOW_LIST
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(code))
}

/// Normalized keys of the fixed exclusion codes plus configured extras.
fn exclusion_keys(extra: &[String]) -> BTreeSet<String> {
    EXCLUDED_INSURANCE_CODES
        .iter()
        .copied()
        .chain(extra.iter().map(String::as_str))
        .map(value_key)
        .filter(|key| !key.is_empty())
        .collect()
}

/// Uppercased payor texts; blank entries are ignored.
fn payor_substrings(configured: &[String]) -> Vec<String> {
    configured
        .iter()
        .map(|text| text.trim().to_uppercase())
        .filter(|text| !text.is_empty())
        .collect()
}

fn is_blank(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || BLANK_SENTINELS
            .iter()
            .any(|sentinel| sentinel.eq_ignore_ascii_case(trimmed))
}

/// Drops rows with no data in any tracked column.
fn remove_empty_rows(
    rows: RowSet,
    schema: &ReportSchema,
    dropped: &mut Vec<DroppedRow>,
) -> Result<RowSet> {
    let tracked = schema
        .tracked()
        .into_iter()
        .map(|column| rows.values(column))
        .collect::<Result<Vec<_>>>()?;
    let keep: Vec<bool> = (0..rows.len())
        .map(|row| tracked.iter().any(|values| !is_blank(&values[row])))
        .collect();
    record_drops(&rows, &keep, Stage::StateValidity, DropReason::EmptyRow, dropped);
    let empty = keep.iter().filter(|flag| !**flag).count();
    if empty > 0 {
        debug!(rows = empty, "empty rows removed");
    }
    rows.retain(&keep)
}

fn record_drops(
    rows: &RowSet,
    keep: &[bool],
    stage: Stage,
    reason: DropReason,
    dropped: &mut Vec<DroppedRow>,
) {
    for (&ordinal, &kept) in rows.ordinals().iter().zip(keep) {
        if !kept {
            dropped.push(DroppedRow {
                ordinal,
                stage,
                reason,
            });
        }
    }
}

/// Drops every row for which `verdict` returns a reason.
fn filter_column<F>(
    rows: RowSet,
    stage: Stage,
    column: &str,
    dropped: &mut Vec<DroppedRow>,
    mut verdict: F,
) -> Result<RowSet>
where
    F: FnMut(&str) -> Option<DropReason>,
{
    let values = rows.values(column)?;
    let mut keep = Vec::with_capacity(values.len());
    for (value, &ordinal) in values.iter().zip(rows.ordinals()) {
        match verdict(value) {
            Some(reason) => {
                dropped.push(DroppedRow {
                    ordinal,
                    stage,
                    reason,
                });
                keep.push(false);
            }
            None => keep.push(true),
        }
    }
    rows.retain(&keep)
}

/// Runs one stage inside its own span and logs the row counts.
fn stage_span<F>(stage: Stage, input_rows: usize, body: F) -> Result<RowSet>
where
    F: FnOnce() -> Result<RowSet>,
{
    info_span!("filter_stage", stage = %stage).in_scope(|| {
        let start = Instant::now();
        let rows = body()?;
        debug!(
            stage = %stage,
            input_rows,
            output_rows = rows.len(),
            removed = input_rows - rows.len(),
            duration_ms = start.elapsed().as_millis(),
            "filter stage complete"
        );
        if rows.is_empty() && input_rows > 0 {
            warn!(stage = %stage, input_rows, "no rows survived filter stage");
        }
        Ok(rows)
    })
}
