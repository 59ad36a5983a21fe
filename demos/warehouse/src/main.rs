//! warehouse — end-to-end demo for the mapd simulator.
//!
//! Builds a floor-box warehouse (storage block ringed by output bays),
//! drops a small robot fleet onto random free cells, streams random
//! storage→output tasks at a fixed cadence, and runs the online planner to
//! completion while tracing every step to CSV.

mod floor;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use mapd_core::{AgentId, Coord, SimRng};
use mapd_grid::Layout;
use mapd_output::{CsvWriter, OutputWriter, TraceObserver};
use mapd_sim::{SimBuilder, SimConfig, SimObserver, StepReport};
use mapd_task::{Task, TaskBoard};

use floor::floor_boxes;

// ── Constants ─────────────────────────────────────────────────────────────────

const FLOOR_WIDTH: u32 = 15;
const FLOOR_HEIGHT: u32 = 10;
const AGENT_COUNT: usize = 12;
const TASK_COUNT: usize = 40;
const SEED: u64 = 42;
const REVEAL_INTERVAL: u64 = 2; // one new task every other step
const SNAPSHOT_INTERVAL: u64 = 5;
const MAX_STEPS: u64 = 5_000;

// ── Observer wrapper to count stalls ──────────────────────────────────────────

struct StallCountingObserver<W: OutputWriter> {
    inner: TraceObserver<W>,
    stalls: u64,
    steps: u64,
}

impl<W: OutputWriter> StallCountingObserver<W> {
    fn new(inner: TraceObserver<W>) -> Self {
        Self { inner, stalls: 0, steps: 0 }
    }
}

impl<W: OutputWriter> SimObserver for StallCountingObserver<W> {
    fn on_agent_stalled(&mut self, step: u64, agent: AgentId) {
        self.stalls += 1;
        self.inner.on_agent_stalled(step, agent);
    }

    fn on_step_end(&mut self, report: &StepReport) {
        self.steps += 1;
        self.inner.on_step_end(report);
    }

    fn on_snapshot(
        &mut self,
        step: u64,
        agents: &mapd_agent::AgentStore,
        board: &TaskBoard,
    ) {
        self.inner.on_snapshot(step, agents, board);
    }

    fn on_sim_end(&mut self, final_step: u64) {
        self.inner.on_sim_end(final_step);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== warehouse — mapd online planner demo ===");
    println!("Floor: {FLOOR_WIDTH}x{FLOOR_HEIGHT}  |  Agents: {AGENT_COUNT}  |  Tasks: {TASK_COUNT}  |  Seed: {SEED}");
    println!();

    // 1. Build the floor and enumerate its special cells.
    let layout = floor_boxes(FLOOR_WIDTH, FLOOR_HEIGHT);
    let storage = layout.storage_cells();
    let outputs = layout.output_cells();
    println!(
        "Floor: {} storage cells, {} output bays",
        storage.len(),
        outputs.len()
    );

    // 2. Place agents and generate the task stream.  Instance generation
    //    uses its own RNG; the simulator seeds its stream internally.
    let mut rng = SimRng::new(SEED ^ 0x57AF);
    let starts = place_agents(&layout, AGENT_COUNT, &mut rng)?;
    let tasks = random_tasks(&storage, &outputs, TASK_COUNT, &mut rng);

    // 3. Assemble the simulator.
    let mut sim = SimBuilder::new(&layout, starts, tasks)
        .config(SimConfig {
            seed: SEED,
            reveal_interval_ticks: REVEAL_INTERVAL,
            snapshot_interval_ticks: SNAPSHOT_INTERVAL,
            ..SimConfig::default()
        })
        .build()
        .context("instance rejected")?;

    // 4. Set up CSV tracing.
    std::fs::create_dir_all("output/warehouse")?;
    let writer = CsvWriter::new(Path::new("output/warehouse"))?;
    let mut obs = StallCountingObserver::new(TraceObserver::new(writer));

    // 5. Run to completion.
    let t0 = Instant::now();
    let steps = sim.run_until_complete(MAX_STEPS, &mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("trace write error: {e}");
    }

    // 6. Summary.
    let counts = sim.board.counts();
    println!();
    if sim.is_complete() {
        println!("All {TASK_COUNT} tasks delivered in {steps} steps ({:.3} s)", elapsed.as_secs_f64());
    } else {
        println!(
            "Stopped after {steps} steps: {} delivered, {} still open",
            counts.completed,
            counts.pending + counts.delivering + counts.not_revealed
        );
    }
    println!(
        "Throughput: {:.2} deliveries / 100 steps  |  stalled moves: {}",
        counts.completed as f64 * 100.0 / steps.max(1) as f64,
        obs.stalls
    );
    println!("Traces: output/warehouse/agent_snapshots.csv, step_summaries.csv");
    println!();

    // 7. Final fleet table.
    println!("{:<8} {:<10} {:<8}", "Agent", "Cell", "Elapsed");
    println!("{}", "-".repeat(28));
    for a in sim.agents.agent_ids() {
        println!(
            "{:<8} {:<10} {:<8}",
            a.0,
            sim.agents.pos[a.index()].to_string(),
            sim.agents.elapsed[a.index()],
        );
    }

    Ok(())
}

// ── Instance generation ───────────────────────────────────────────────────────

/// Drop `count` agents on distinct random traversable cells.
fn place_agents(layout: &Layout, count: usize, rng: &mut SimRng) -> Result<Vec<Coord>> {
    let mut free: Vec<Coord> = Vec::new();
    for y in 0..layout.height() {
        for x in 0..layout.width() {
            let cell = Coord::new(x, y);
            if layout.is_traversable(cell) {
                free.push(cell);
            }
        }
    }
    anyhow::ensure!(
        free.len() >= count,
        "not enough free cells to place {count} agents"
    );
    rng.shuffle(&mut free);
    Ok(free[..count].to_vec())
}

/// Random storage→output tasks, revealed over time by the simulator.
fn random_tasks(storage: &[Coord], outputs: &[Coord], count: usize, rng: &mut SimRng) -> Vec<Task> {
    (0..count)
        .map(|_| {
            let pickup = *rng.choose(storage).expect("layout has storage cells");
            let delivery = *rng.choose(outputs).expect("layout has output bays");
            Task::new(pickup, delivery)
        })
        .collect()
}
