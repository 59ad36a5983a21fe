//! `TraceObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use mapd_core::TaskId;
use mapd_agent::AgentStore;
use mapd_sim::{SimObserver, StepReport};
use mapd_task::TaskBoard;

use crate::row::{AgentSnapshotRow, StepSummaryRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that records step summaries and snapshot rows through
/// any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After the run, check with
/// [`take_error`][Self::take_error].
pub struct TraceObserver<W: OutputWriter> {
    writer: W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TraceObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after the run.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for TraceObserver<W> {
    fn on_step_end(&mut self, report: &StepReport) {
        let row = StepSummaryRow {
            step: report.step,
            moved: report.moved as u64,
            pending: report.counts.pending as u64,
            delivering: report.counts.delivering as u64,
            completed: report.counts.completed as u64,
        };
        let result = self.writer.write_step_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, step: u64, agents: &AgentStore, _board: &TaskBoard) {
        let rows: Vec<AgentSnapshotRow> = agents
            .agent_ids()
            .map(|a| {
                let i = a.index();
                AgentSnapshotRow {
                    step,
                    agent_id: a.0,
                    x: agents.pos[i].x,
                    y: agents.pos[i].y,
                    elapsed: agents.elapsed[i],
                    carrying: agents.carrying(a).unwrap_or(TaskId::INVALID).0,
                    targeting: agents.targeting(a).unwrap_or(TaskId::INVALID).0,
                }
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_step: u64) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
