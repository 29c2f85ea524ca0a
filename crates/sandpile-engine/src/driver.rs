//! Step driver.
//!
//! [`Sandpile`] owns a [`Grid`] and runs one toppling step per
//! [`step()`](Sandpile::step) call: dispatch the update task tree, wait for
//! every partition to join, and commit the next-state buffer only if some
//! cell changed. Steps never overlap; the caller blocks until the tree
//! finishes.
//!
//! # Ownership model
//!
//! All mutating methods take `&mut self`. During a step the grid is split
//! into a shared current buffer and an exclusively borrowed next buffer
//! (see [`Grid::begin_step()`]), so the borrow checker rules out any other
//! access until the commit.

use std::time::Instant;

use sandpile_core::Grid;
use tracing::{debug, info};

use crate::config::{ConfigError, EngineConfig};
use crate::metrics::{RunSummary, StepMetrics};
use crate::update::ParallelUpdate;

/// A sandpile and the machinery to topple it.
///
/// # Example
///
/// ```
/// use sandpile_core::Grid;
/// use sandpile_engine::{EngineConfig, Sandpile};
///
/// let grid = Grid::from_rows(&[vec![0, 0, 0], vec![0, 4, 0], vec![0, 0, 0]]).unwrap();
/// let mut pile = Sandpile::new(grid, EngineConfig::default()).unwrap();
/// assert!(pile.step());
/// assert!(!pile.step());
/// assert_eq!(pile.grid().to_rows(), vec![vec![0, 1, 0], vec![1, 0, 1], vec![0, 1, 0]]);
/// ```
#[derive(Debug)]
pub struct Sandpile {
    grid: Grid,
    update: ParallelUpdate,
    pool: Option<rayon::ThreadPool>,
    config: EngineConfig,
    step_count: u64,
    last_metrics: StepMetrics,
}

impl Sandpile {
    /// Validate `config` and wrap `grid`.
    ///
    /// Builds a dedicated worker pool if `config.threads` is set.
    pub fn new(grid: Grid, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let pool = config.build_pool()?;
        debug!(
            rows = grid.rows(),
            cols = grid.cols(),
            cutoff = config.cutoff,
            threads = ?config.threads,
            "sandpile ready"
        );
        Ok(Self {
            grid,
            update: ParallelUpdate::new(config.cutoff),
            pool,
            config,
            step_count: 0,
            last_metrics: StepMetrics::default(),
        })
    }

    /// Run one toppling step and return whether any cell changed.
    ///
    /// On change the next-state buffer is committed into the grid. On no
    /// change the grid is left exactly as it was: it is a fixed point and
    /// every further step will also return `false`.
    pub fn step(&mut self) -> bool {
        let step_start = Instant::now();

        let update_start = Instant::now();
        let outcome = {
            let mut buffers = self.grid.begin_step();
            let update = &self.update;
            match &self.pool {
                Some(pool) => pool.install(|| update.run_all(&mut buffers)),
                None => update.run_all(&mut buffers),
            }
        };
        let update_us = update_start.elapsed().as_micros() as u64;

        let mut commit_us = 0;
        if outcome.changed {
            let commit_start = Instant::now();
            self.grid.commit();
            commit_us = commit_start.elapsed().as_micros() as u64;
        }

        self.step_count += 1;
        self.last_metrics = StepMetrics {
            total_us: step_start.elapsed().as_micros() as u64,
            update_us,
            commit_us,
            partitions: outcome.partitions,
            changed: outcome.changed,
        };
        debug!(
            step = self.step_count,
            changed = outcome.changed,
            partitions = outcome.partitions,
            update_us,
            commit_us,
            "step complete"
        );
        outcome.changed
    }

    /// Step until no cell changes or the configured step limit is reached.
    ///
    /// `settled` is true whenever the grid left behind is a fixed point,
    /// including when the last allowed step produced it.
    pub fn stabilize(&mut self) -> RunSummary {
        let start = Instant::now();
        let mut steps = 0u64;
        let settled = loop {
            if self.config.max_steps.is_some_and(|limit| steps >= limit) {
                // No cell at the threshold: the next step would not change.
                break self.grid.is_stable();
            }
            if !self.step() {
                break true;
            }
            steps += 1;
        };
        let elapsed = start.elapsed();

        if settled {
            info!(steps, elapsed_ms = elapsed.as_millis() as u64, "pile settled");
        } else {
            info!(
                steps,
                elapsed_ms = elapsed.as_millis() as u64,
                "step limit reached before settling"
            );
        }
        RunSummary {
            steps,
            settled,
            elapsed,
        }
    }

    /// The current grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access to the current grid between steps, e.g. to drop
    /// more grains onto a settled pile.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Consume the driver and return its grid.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// The validated configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of [`step()`](Self::step) calls so far, including steps that
    /// reported no change.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Metrics from the most recent step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }
}
