use tracing::{debug, info, info_span};

use crate::{
    algorithm::backtrack::{Outcome, SearchMode},
    algorithm::commands::{Command, extract_commands},
    algorithm::dispatch::{solve_parallel, solve_sequential},
    algorithm::partition::Area,
    algorithm::propagation::{Worker, WorkerStats},
    io::configuration::{AREA_QUEUE_CAPACITY, DEFAULT_THREADS},
    io::error::{Result, invalid_parameter},
    simulation::placement::verify_commands,
    spatial::{HeightMap, Parcel},
};

/// How independent areas left by exact propagation are solved
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// One area after another on the calling thread
    Sequential,
    /// A pool of scoped threads fed through a bounded queue
    Parallel {
        /// Pool size
        threads: usize,
    },
}

impl Default for Strategy {
    fn default() -> Self {
        Self::Parallel {
            threads: DEFAULT_THREADS,
        }
    }
}

/// Solver parameters chosen by the caller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Area solving strategy
    pub strategy: Strategy,
    /// Pending areas held before the producer blocks
    pub queue_capacity: usize,
    /// Replay the result and compare it with the input
    pub verify: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            queue_capacity: AREA_QUEUE_CAPACITY,
            verify: false,
        }
    }
}

impl SolverConfig {
    /// Check parameter ranges
    ///
    /// # Errors
    ///
    /// Returns an error if the thread count or queue capacity is zero
    pub fn validate(&self) -> Result<()> {
        if let Strategy::Parallel { threads: 0 } = self.strategy {
            return Err(invalid_parameter(
                "threads",
                &0,
                &"parallel strategy needs at least one thread",
            ));
        }
        if self.queue_capacity == 0 {
            return Err(invalid_parameter(
                "queue_capacity",
                &0,
                &"queue must hold at least one area",
            ));
        }
        Ok(())
    }
}

/// Work counters for one solve
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Occupied cells in the input
    pub cells: usize,
    /// Areas left after exact propagation
    pub areas: usize,
    /// Candidates popped across all workers
    pub steps: usize,
    /// Speculative placements tried
    pub guesses: usize,
    /// Rollbacks to a checkpoint
    pub rollbacks: usize,
    /// Partition passes
    pub checks: usize,
}

/// A reconstructed build order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Placements in build order
    pub commands: Vec<Command>,
    /// Work performed to find them
    pub stats: SolveStats,
}

/// Build order reconstruction driver
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildOrderSolver {
    config: SolverConfig,
}

impl BuildOrderSolver {
    /// Create a solver with the given configuration
    pub const fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Reconstruct a build order reproducing `map`
    ///
    /// Runs exact propagation over the whole grid, then solves each
    /// remaining independent area with guessing according to the strategy,
    /// and finally orders the merged removal log.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - The map has no valid reconstruction
    /// - Verification is enabled and the replay differs from the input
    pub fn solve(&self, map: &HeightMap) -> Result<Solution> {
        self.config.validate()?;
        let _span = info_span!("solve", rows = map.rows(), cols = map.cols()).entered();

        let mut parcel = Parcel::new(map);
        let mut stats = SolveStats {
            cells: parcel.occupied(),
            ..SolveStats::default()
        };

        let mut worker = Worker::new(&mut parcel, Area::full(map.rows() * map.cols()));
        let outcome = worker.run(SearchMode::Exact)?;
        let exact_stats = worker.stats();
        let mut history = worker.into_history();
        accumulate(&mut stats, exact_stats);

        if let Outcome::Stalled(areas) = outcome {
            stats.areas = areas.len();
            debug!(
                areas = areas.len(),
                resolved = history.len(),
                "dispatching areas"
            );
            let solved = match self.config.strategy {
                Strategy::Sequential => solve_sequential(&mut parcel, areas)?,
                Strategy::Parallel { threads } => {
                    solve_parallel(&parcel, areas, threads, self.config.queue_capacity)?
                }
            };
            history.append(&solved.history);
            accumulate(&mut stats, solved.stats);
        }

        let commands = extract_commands(&history, map)?;
        if self.config.verify {
            verify_commands(map, &commands)?;
        }

        info!(
            cells = stats.cells,
            areas = stats.areas,
            guesses = stats.guesses,
            rollbacks = stats.rollbacks,
            "build order reconstructed"
        );
        Ok(Solution { commands, stats })
    }
}

const fn accumulate(stats: &mut SolveStats, worker: WorkerStats) {
    stats.steps += worker.steps;
    stats.guesses += worker.guesses;
    stats.rollbacks += worker.rollbacks;
    stats.checks += worker.checks;
}

/// Reconstruct a build order with the default solver configuration
///
/// # Errors
///
/// Returns [`crate::SolveError::GlobalInconsistency`] if `map` has no valid
/// reconstruction
pub fn compute_build_order(map: &HeightMap) -> Result<Vec<Command>> {
    BuildOrderSolver::default()
        .solve(map)
        .map(|solution| solution.commands)
}
