//! Recursive fork-join over a run of rows.
//!
//! [`par_rows`] halves a row range until it is no longer than the cutoff,
//! hands each leaf its own `&mut` slice of a row-major slab, and folds the
//! leaf results back up with a combine function. The two halves of every
//! split go through [`rayon::join`], so either may be stolen by another
//! worker; the join is the only synchronisation point.

use std::ops::Range;

/// Divide `rows` recursively and reduce the leaf results.
///
/// `slab` holds exactly the rows in `rows`, each `width` elements long,
/// starting at `rows.start`. A leaf receives its sub-range and the
/// matching sub-slice. Sibling leaves never share an element, so leaves
/// may write their slices freely.
///
/// Ranges no longer than `cutoff` (treated as at least 1) run
/// sequentially. An empty range is a single leaf.
///
/// # Panics
///
/// Panics if `slab.len() != rows.len() * width`.
pub fn par_rows<T, R, L, C>(
    rows: Range<usize>,
    slab: &mut [T],
    width: usize,
    cutoff: usize,
    leaf: &L,
    combine: &C,
) -> R
where
    T: Send,
    R: Send,
    L: Fn(Range<usize>, &mut [T]) -> R + Sync,
    C: Fn(R, R) -> R + Sync,
{
    assert_eq!(
        slab.len(),
        rows.len() * width,
        "slab does not match rows {rows:?} at width {width}"
    );
    split(rows, slab, width, cutoff.max(1), leaf, combine)
}

fn split<T, R, L, C>(
    rows: Range<usize>,
    slab: &mut [T],
    width: usize,
    cutoff: usize,
    leaf: &L,
    combine: &C,
) -> R
where
    T: Send,
    R: Send,
    L: Fn(Range<usize>, &mut [T]) -> R + Sync,
    C: Fn(R, R) -> R + Sync,
{
    let len = rows.len();
    if len <= cutoff {
        return leaf(rows, slab);
    }

    let (start, end) = (rows.start, rows.end);
    let mid = start + len / 2;
    let (upper, lower) = slab.split_at_mut((mid - start) * width);
    let (a, b) = rayon::join(
        || split(start..mid, upper, width, cutoff, leaf, combine),
        || split(mid..end, lower, width, cutoff, leaf, combine),
    );
    combine(a, b)
}
