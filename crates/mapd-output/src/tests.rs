//! Tests for mapd-output.

use std::path::Path;

use mapd_core::Coord;
use mapd_grid::Layout;
use mapd_sim::{SimBuilder, SimConfig};
use mapd_task::Task;

use crate::{AgentSnapshotRow, CsvWriter, OutputWriter, StepSummaryRow, TraceObserver};

fn c(x: u32, y: u32) -> Coord {
    Coord::new(x, y)
}

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

// ── CsvWriter ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use super::*;

    #[test]
    fn writes_headers_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = CsvWriter::new(dir.path()).unwrap();

        writer
            .write_snapshots(&[AgentSnapshotRow {
                step: 3,
                agent_id: 0,
                x: 4,
                y: 5,
                elapsed: 2,
                carrying: u32::MAX,
                targeting: 7,
            }])
            .unwrap();
        writer
            .write_step_summary(&StepSummaryRow {
                step: 3,
                moved: 1,
                pending: 2,
                delivering: 1,
                completed: 0,
            })
            .unwrap();
        writer.finish().unwrap();

        let snaps = read_lines(&dir.path().join("agent_snapshots.csv"));
        assert_eq!(snaps[0], "step,agent_id,x,y,elapsed,carrying,targeting");
        assert_eq!(snaps[1], format!("3,0,4,5,2,{},7", u32::MAX));

        let sums = read_lines(&dir.path().join("step_summaries.csv"));
        assert_eq!(sums[0], "step,moved,pending,delivering,completed");
        assert_eq!(sums[1], "3,1,2,1,0");
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = CsvWriter::new(dir.path()).unwrap();
        writer.finish().unwrap();
        writer.finish().unwrap();
    }
}

// ── TraceObserver over a live run ─────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[test]
    fn records_summaries_every_step_and_snapshots_at_cadence() {
        let dir = tempfile::tempdir().unwrap();
        let layout = Layout::new(6, 1);
        let tasks = vec![Task::pending(c(3, 0), c(5, 0))];
        let mut sim = SimBuilder::new(&layout, vec![c(0, 0)], tasks)
            .config(SimConfig {
                seed: 1,
                snapshot_interval_ticks: 2,
                ..SimConfig::default()
            })
            .build()
            .unwrap();

        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = TraceObserver::new(writer);
        let steps = sim.run_until_complete(50, &mut obs);
        assert!(sim.is_complete());
        assert!(obs.take_error().is_none());

        // One summary row (plus header) per executed step.
        let sums = read_lines(&dir.path().join("step_summaries.csv"));
        assert_eq!(sums.len() as u64, steps + 1);

        // Snapshots at steps 0, 2, 4, … — one row per agent each.
        let snaps = read_lines(&dir.path().join("agent_snapshots.csv"));
        assert_eq!(snaps.len() as u64, 1 + steps.div_ceil(2));

        // Final summary row shows the completed task.
        let last = sums.last().unwrap();
        assert!(last.ends_with(",0,0,1"), "unexpected final row: {last}");
    }

    #[test]
    fn into_writer_returns_the_backend() {
        let dir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let obs = TraceObserver::new(writer);
        let mut writer = obs.into_writer();
        writer.finish().unwrap();
    }
}
