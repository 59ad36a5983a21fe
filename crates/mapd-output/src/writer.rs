//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentSnapshotRow, OutputResult, StepSummaryRow};

/// Trait implemented by trace backends (CSV today; the seam for others).
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`TraceObserver::take_error`](crate::TraceObserver::take_error).
pub trait OutputWriter {
    /// Write a batch of agent snapshots.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Write one step summary row.
    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
