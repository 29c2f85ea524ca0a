//! Per-step and per-run measurements.
//!
//! [`StepMetrics`] is refreshed by every [`Sandpile::step()`](crate::Sandpile::step);
//! [`RunSummary`] is returned by [`Sandpile::stabilize()`](crate::Sandpile::stabilize).

use std::time::Duration;

/// Timing and partitioning data collected during a single step.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the whole step, in microseconds.
    pub total_us: u64,
    /// Time spent in the parallel update task tree, in microseconds.
    pub update_us: u64,
    /// Time spent committing the next-state buffer, in microseconds.
    /// Zero when nothing changed.
    pub commit_us: u64,
    /// Number of sequential leaf partitions the update task ran.
    pub partitions: u32,
    /// Whether the step changed any cell (and therefore committed).
    pub changed: bool,
}

/// Outcome of running a pile towards its fixed point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Steps that changed the grid.
    pub steps: u64,
    /// True if the grid left behind is a fixed point. False means the
    /// step limit stopped the run while cells were still at or above the
    /// threshold.
    pub settled: bool,
    /// Wall-clock time for the run.
    pub elapsed: Duration,
}
