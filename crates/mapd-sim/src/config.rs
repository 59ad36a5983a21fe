//! Top-level simulation configuration.

/// Run parameters.  Everything else (layout, agents, tasks) is data.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Reveal one scheduled task every N steps.  `1` = one per step;
    /// `0` = reveal everything before the first step (pure-MAPF style).
    pub reveal_interval_ticks: u64,

    /// Fire [`SimObserver::on_snapshot`] every N steps.  `0` = never.
    ///
    /// [`SimObserver::on_snapshot`]: crate::SimObserver::on_snapshot
    pub snapshot_interval_ticks: u64,

    /// Distance-table cache cap.  `None` = `8 × agent_count` (min 8).
    pub dist_cache_capacity: Option<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            seed: 0,
            reveal_interval_ticks: 1,
            snapshot_interval_ticks: 0,
            dist_cache_capacity: None,
        }
    }
}
