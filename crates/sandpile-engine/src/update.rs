//! The parallel update task: one toppling pass over a run of rows.
//!
//! Reads the current buffer, writes the next-state buffer, and reports
//! whether any visited cell changed. Rows are partitioned with
//! [`par_rows`](crate::fork_join::par_rows); each partition owns a
//! disjoint slice of the next-state buffer, and the current buffer is
//! shared read-only, so no cell is ever written by two tasks and no
//! task reads a cell another task writes.

use std::ops::Range;

use sandpile_core::rule::next_height_at;
use sandpile_core::StepBuffers;
use tracing::trace;

use crate::config::EngineConfig;
use crate::fork_join::par_rows;

/// Result of updating a run of rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// True if any visited cell's next height differs from its current one.
    pub changed: bool,
    /// Number of sequential leaf partitions that ran.
    pub partitions: u32,
}

impl UpdateOutcome {
    /// Combine the outcomes of two sibling partitions.
    pub fn merge(self, other: Self) -> Self {
        Self {
            changed: self.changed || other.changed,
            partitions: self.partitions.saturating_add(other.partitions),
        }
    }
}

/// Divide-and-conquer toppling over interior rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelUpdate {
    cutoff: usize,
}

impl ParallelUpdate {
    /// Create an update task that runs ranges of at most `cutoff` rows
    /// sequentially. A cutoff of 0 is treated as 1.
    pub fn new(cutoff: usize) -> Self {
        Self {
            cutoff: cutoff.max(1),
        }
    }

    /// The sequential cutoff in rows.
    pub fn cutoff(&self) -> usize {
        self.cutoff
    }

    /// Compute next heights for `rows` (storage row indices, half-open).
    ///
    /// `rows` is clamped to the interior first, so a range reaching into
    /// the border rows is safe: border rows are read as neighbours but
    /// never iterated or written. Only the next-state buffer is modified.
    pub fn run(&self, buffers: &mut StepBuffers<'_>, rows: Range<usize>) -> UpdateOutcome {
        let rows = buffers.clamp_rows(rows);
        let stride = buffers.stride;
        let current: &[u32] = buffers.current;
        let slab = &mut buffers.next[rows.start * stride..rows.end * stride];
        par_rows(
            rows,
            slab,
            stride,
            self.cutoff,
            &|rows: Range<usize>, out: &mut [u32]| topple_rows(current, stride, rows, out),
            &UpdateOutcome::merge,
        )
    }

    /// Compute next heights for every interior row.
    pub fn run_all(&self, buffers: &mut StepBuffers<'_>) -> UpdateOutcome {
        let rows = buffers.interior_rows();
        self.run(buffers, rows)
    }
}

impl Default for ParallelUpdate {
    fn default() -> Self {
        Self::new(EngineConfig::DEFAULT_CUTOFF)
    }
}

/// Sequential leaf: topple every interior column of `rows`.
///
/// `out` holds exactly those rows of the next-state buffer, `stride`
/// elements each. Border columns of `out` are left as they are.
pub fn topple_rows(
    current: &[u32],
    stride: usize,
    rows: Range<usize>,
    out: &mut [u32],
) -> UpdateOutcome {
    let mut changed = false;
    for (row, out_row) in rows.clone().zip(out.chunks_exact_mut(stride)) {
        let base = row * stride;
        for col in 1..stride - 1 {
            let idx = base + col;
            let next = next_height_at(current, stride, idx);
            out_row[col] = next;
            changed |= next != current[idx];
        }
    }
    trace!(start = rows.start, end = rows.end, changed, "partition toppled");
    UpdateOutcome {
        changed,
        partitions: 1,
    }
}
