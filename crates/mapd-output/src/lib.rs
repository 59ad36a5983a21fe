//! `mapd-output` — run traces for offline analysis.
//!
//! Bridges the simulator's observer hooks to a pluggable
//! [`OutputWriter`]: per-agent position snapshots at the configured
//! snapshot cadence and a one-row-per-step summary of movement and task
//! totals.  The only backend shipped here is CSV; the writer trait is the
//! seam for anything else.
//!
//! Observer methods cannot return errors, so the first write failure is
//! parked inside [`TraceObserver`] and retrieved with
//! [`take_error`](TraceObserver::take_error) after the run.

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{AgentSnapshotRow, StepSummaryRow};
pub use writer::OutputWriter;
