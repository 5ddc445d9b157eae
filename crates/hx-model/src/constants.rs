//! Fixed business rules that are not derived from input data.

/// Insurance codes treated as non-billable; rows carrying one of these as the
/// primary insurance never reach the portal.
pub const EXCLUDED_INSURANCE_CODES: &[&str] = &["L105", "L107", "L109C", "L109Q", "L109W"];

/// Text that excludes a row when found anywhere in its primary insurance
/// (workers' compensation payors).
pub const DEFAULT_EXCLUDED_INSURANCE_SUBSTRINGS: &[&str] = &["WC"];

/// Visit-status codes kept when the optional visit-status filter is enabled.
///
/// Matched against the code portion of values such as `"PEN : Pending"`.
pub const VISIT_STATUS_ALLOW_LIST: &[&str] = &["PEN", "PR"];

/// Cell values the report export uses in place of an empty cell.
pub const BLANK_SENTINELS: &[&str] = &["#N/A"];

/// Workers used when no roster is configured.
pub const DEFAULT_AGENTS: &[&str] = &[
    "Agent-1", "Agent-2", "Agent-3", "Agent-4", "Agent-5", "Agent-6", "Agent-7", "Agent-8",
];

/// Visit-type marker that classifies a row as a new patient.
pub const DEFAULT_NEW_PATIENT_MARKER: &str = "new";

/// Width of the zero-padded sequence in a priority label.
pub const PRIORITY_SEQUENCE_WIDTH: usize = 3;
