//! Filtering, sorting and worker allocation for appointment reports.
//!
//! The engine takes a raw report and a reference sheet as Polars frames and a
//! [`RunConfig`](hx_model::RunConfig), and returns the surviving rows in
//! processing order with a priority label and an assigned worker, together
//! with a per-stage audit trail. It performs no I/O and keeps no state
//! between calls.

pub mod allocate;
pub mod classify;
pub mod datetime;
pub mod filter;
pub mod frame;
pub mod lookup;
pub mod pipeline;
pub mod schema;
pub mod sort;
pub mod summary;

pub use allocate::{Allocation, RowAllocation, WorkerAssigner, allocate};
pub use classify::{Classifier, MarkerClassifier};
pub use frame::RowSet;
pub use lookup::LookupIndex;
pub use pipeline::{RunOutput, run, run_with};
pub use schema::ReportSchema;
