//! The toppling rule.
//!
//! A cell keeps its height modulo [`TOPPLE_THRESHOLD`] and receives one
//! grain for every full threshold held by each orthogonal neighbour. All
//! five inputs come from the same frozen snapshot (the current grid), so
//! the rule can be evaluated for any set of cells in any order, or
//! concurrently, and produce the same next state.

/// Height at which a cell topples, sending one grain to each of its four
/// neighbours.
pub const TOPPLE_THRESHOLD: u32 = 4;

/// Next height of a cell given its own height and its four neighbours'.
///
/// `next = v % 4 + up / 4 + down / 4 + left / 4 + right / 4`
#[inline]
pub fn next_height(v: u32, up: u32, down: u32, left: u32, right: u32) -> u32 {
    v % TOPPLE_THRESHOLD
        + up / TOPPLE_THRESHOLD
        + down / TOPPLE_THRESHOLD
        + left / TOPPLE_THRESHOLD
        + right / TOPPLE_THRESHOLD
}

/// Apply [`next_height`] to the cell at flat index `idx` of a row-major
/// buffer with the given `stride`.
///
/// `idx` must not lie on the first or last stored row or column; the
/// sink border guarantees every interior cell has four stored neighbours.
#[inline]
pub fn next_height_at(current: &[u32], stride: usize, idx: usize) -> u32 {
    next_height(
        current[idx],
        current[idx - stride],
        current[idx + stride],
        current[idx - 1],
        current[idx + 1],
    )
}

/// Grains a cell of height `v` sends to each neighbour in one step.
#[inline]
pub fn grains_out(v: u32) -> u32 {
    v / TOPPLE_THRESHOLD
}
