//! Sort stage: stable ordering by provider, then appointment date.

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use hx_model::{Result, Stage, StageAudit};

use crate::datetime::parse_appointment_date;
use crate::frame::RowSet;
use crate::schema::ReportSchema;

/// Sorted rows and what the sort observed.
#[derive(Debug, Clone)]
pub struct SortOutcome {
    pub rows: RowSet,
    pub audit: StageAudit,
    /// Rows whose appointment date could not be parsed.
    pub unparsable_dates: usize,
}

/// Sorts `rows` by raw provider text, then by parsed appointment date.
pub fn sort(rows: RowSet, schema: &ReportSchema) -> Result<SortOutcome> {
    let count = rows.len();
    let providers = rows.values(&schema.provider)?;
    let dates: Vec<Option<NaiveDateTime>> = rows
        .values(&schema.appointment_date)?
        .iter()
        .map(|value| parse_appointment_date(value))
        .collect();
    let unparsable_dates = dates.iter().filter(|date| date.is_none()).count();
    if unparsable_dates > 0 {
        warn!(
            rows = unparsable_dates,
            "appointment dates could not be parsed and were sorted last"
        );
    }

    let order = sort_order(&providers, &dates);
    let rows = rows.reorder(&order)?;
    debug!(rows = count, unparsable_dates, "sort stage complete");

    Ok(SortOutcome {
        rows,
        audit: StageAudit::passthrough(Stage::Sort, count),
        unparsable_dates,
    })
}

/// Permutation that sorts rows by `(provider, date)`.
///
/// Provider comparison is case-sensitive on the raw string. Within a
/// provider, rows without a date follow every dated row. The sort is stable.
pub fn sort_order(providers: &[String], dates: &[Option<NaiveDateTime>]) -> Vec<usize> {
    debug_assert_eq!(providers.len(), dates.len());
    let mut order: Vec<usize> = (0..providers.len()).collect();
    order.sort_by(|&a, &b| {
        providers[a]
            .cmp(&providers[b])
            .then_with(|| compare_dates(dates[a], dates[b]))
    });
    order
}

fn compare_dates(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
