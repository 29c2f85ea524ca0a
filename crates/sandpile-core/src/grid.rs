//! Double-buffered sandpile grid with a permanent sink border.
//!
//! [`Grid`] owns the current heights and a next-state buffer of the same
//! shape. A step reads the current buffer, writes the next buffer through
//! [`StepBuffers`], and [`Grid::commit`] copies the interior back.

use std::ops::Range;

use crate::error::GridError;
use crate::rule::TOPPLE_THRESHOLD;

/// Split borrow of a grid for the duration of one step.
///
/// Created by [`Grid::begin_step()`]. Holds the current buffer read-only
/// and the next-state buffer mutably, so nothing else can touch the grid
/// until the step's writes are finished.
#[must_use]
pub struct StepBuffers<'a> {
    /// Current heights, row-major over the full stored extent.
    pub current: &'a [u32],
    /// Next-state buffer, same layout as `current`.
    pub next: &'a mut [u32],
    /// Stored row length (`cols + 2`).
    pub stride: usize,
    /// Stored row count (`rows + 2`).
    pub stored_rows: usize,
}

impl StepBuffers<'_> {
    /// Storage rows that hold real state: `1..stored_rows - 1`.
    pub fn interior_rows(&self) -> Range<usize> {
        1..self.stored_rows - 1
    }

    /// Clamp `rows` to [`interior_rows()`](Self::interior_rows).
    ///
    /// An empty range is returned unchanged in length (zero) but moved
    /// inside the interior so it can still be sliced.
    pub fn clamp_rows(&self, rows: Range<usize>) -> Range<usize> {
        let interior = self.interior_rows();
        let start = rows.start.clamp(interior.start, interior.end);
        let end = rows.end.clamp(start, interior.end);
        start..end
    }
}

/// A sandpile grid of `rows × cols` interior cells.
///
/// # Storage layout
///
/// Cells are stored row-major in a `(rows + 2) × (cols + 2)` buffer. The
/// outermost ring is the sink: it is zero at construction and is never
/// written by a step or by [`commit()`](Self::commit), so grains pushed
/// across the edge disappear.
///
/// ```text
///   col:  0   1 .. cols  cols+1
/// row 0   S   S .. S     S
/// row 1   S   (0,0) ..   S
///  ..     S   ..         S
/// rows    S   .. (r-1,c-1) S
/// rows+1  S   S .. S     S
/// ```
///
/// Storage coordinates are what [`get()`](Self::get) takes. Logical
/// 0-based coordinates (used by [`value()`](Self::value),
/// [`set()`](Self::set), [`add()`](Self::add)) map to storage by `+1` on
/// both axes.
#[derive(Clone, Debug)]
pub struct Grid {
    stored_rows: usize,
    stored_cols: usize,
    current: Vec<u32>,
    next: Vec<u32>,
}

impl Grid {
    /// Create an all-zero grid with `rows × cols` interior cells.
    ///
    /// Returns `Err(GridError::InvalidDimension)` if either extent is zero
    /// or the padded size overflows `usize`.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::invalid(format!(
                "grid must have at least one interior cell (got {rows}x{cols})"
            )));
        }
        let stored_rows = rows
            .checked_add(2)
            .ok_or_else(|| GridError::invalid(format!("{rows} rows is too large")))?;
        let stored_cols = cols
            .checked_add(2)
            .ok_or_else(|| GridError::invalid(format!("{cols} columns is too large")))?;
        let len = stored_rows.checked_mul(stored_cols).ok_or_else(|| {
            GridError::invalid(format!("{rows}x{cols} grid overflows addressable storage"))
        })?;
        Ok(Self {
            stored_rows,
            stored_cols,
            current: vec![0; len],
            next: vec![0; len],
        })
    }

    /// Create a grid whose interior is a copy of `values`.
    ///
    /// Returns `Err(GridError::InvalidDimension)` if `values` is empty,
    /// its first row is empty, or any row differs in length from the
    /// first.
    ///
    /// # Examples
    ///
    /// ```
    /// use sandpile_core::Grid;
    ///
    /// let grid = Grid::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap();
    /// assert_eq!(grid.rows(), 2);
    /// assert_eq!(grid.get(1, 1), 1);
    /// assert_eq!(grid.get(0, 0), 0); // sink
    /// ```
    pub fn from_rows<R: AsRef<[u32]>>(values: &[R]) -> Result<Self, GridError> {
        let Some(first) = values.first() else {
            return Err(GridError::invalid("source has no rows"));
        };
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(GridError::invalid("first row is empty"));
        }
        if let Some((idx, row)) = values
            .iter()
            .enumerate()
            .find(|(_, row)| row.as_ref().len() != cols)
        {
            return Err(GridError::invalid(format!(
                "row {idx} has {} columns, expected {cols}",
                row.as_ref().len()
            )));
        }

        let mut grid = Self::new(values.len(), cols)?;
        let stride = grid.stored_cols;
        for (r, row) in values.iter().enumerate() {
            let start = (r + 1) * stride + 1;
            grid.current[start..start + cols].copy_from_slice(row.as_ref());
        }
        Ok(grid)
    }

    /// Interior row count.
    pub fn rows(&self) -> usize {
        self.stored_rows - 2
    }

    /// Interior column count.
    pub fn cols(&self) -> usize {
        self.stored_cols - 2
    }

    /// Stored row count, border included.
    pub fn stored_rows(&self) -> usize {
        self.stored_rows
    }

    /// Stored column count, border included.
    pub fn stored_cols(&self) -> usize {
        self.stored_cols
    }

    /// Height at storage coordinates `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` lies outside the stored extent.
    pub fn get(&self, i: usize, j: usize) -> u32 {
        assert!(
            i < self.stored_rows && j < self.stored_cols,
            "storage coordinate ({i}, {j}) outside {}x{}",
            self.stored_rows,
            self.stored_cols
        );
        self.current[i * self.stored_cols + j]
    }

    /// Overwrite every stored cell, border included, with `value`.
    ///
    /// A non-zero value breaks the sink until the border is reset; only
    /// use this for bulk resets.
    pub fn set_all(&mut self, value: u32) {
        self.current.fill(value);
    }

    /// Copy every interior cell of the next-state buffer into the current
    /// grid. The border is left untouched.
    pub fn commit(&mut self) {
        let stride = self.stored_cols;
        for r in 1..self.stored_rows - 1 {
            let span = r * stride + 1..(r + 1) * stride - 1;
            self.current[span.clone()].copy_from_slice(&self.next[span]);
        }
    }

    /// Borrow both buffers for one step.
    pub fn begin_step(&mut self) -> StepBuffers<'_> {
        StepBuffers {
            current: &self.current,
            next: &mut self.next,
            stride: self.stored_cols,
            stored_rows: self.stored_rows,
        }
    }

    /// Height at logical 0-based `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside `rows() × cols()`.
    pub fn value(&self, row: usize, col: usize) -> u32 {
        self.current[self.logical_index(row, col)]
    }

    /// Set the height at logical 0-based `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside `rows() × cols()`.
    pub fn set(&mut self, row: usize, col: usize, value: u32) {
        let idx = self.logical_index(row, col);
        self.current[idx] = value;
    }

    /// Drop `grains` onto logical 0-based `(row, col)`, saturating at
    /// `u32::MAX`.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside `rows() × cols()`.
    pub fn add(&mut self, row: usize, col: usize, grains: u32) {
        let idx = self.logical_index(row, col);
        self.current[idx] = self.current[idx].saturating_add(grains);
    }

    /// Copy of the interior as one `Vec` per row.
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.interior_rows().map(<[u32]>::to_vec).collect()
    }

    /// Iterator over interior rows as slices (border columns excluded).
    pub fn interior_rows(&self) -> impl Iterator<Item = &[u32]> + '_ {
        let stride = self.stored_cols;
        (1..self.stored_rows - 1).map(move |r| &self.current[r * stride + 1..(r + 1) * stride - 1])
    }

    /// Total grains held by interior cells.
    pub fn mass(&self) -> u64 {
        self.interior_rows()
            .flat_map(|row| row.iter())
            .map(|&v| u64::from(v))
            .sum()
    }

    /// True if no interior cell is at or above the toppling threshold.
    pub fn is_stable(&self) -> bool {
        self.interior_rows()
            .flat_map(|row| row.iter())
            .all(|&v| v < TOPPLE_THRESHOLD)
    }

    fn logical_index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows() && col < self.cols(),
            "logical coordinate ({row}, {col}) outside {}x{}",
            self.rows(),
            self.cols()
        );
        (row + 1) * self.stored_cols + col + 1
    }
}

impl PartialEq for Grid {
    /// Grids compare by shape and current heights; the next-state buffer
    /// is scratch and does not participate.
    fn eq(&self, other: &Self) -> bool {
        self.stored_rows == other.stored_rows
            && self.stored_cols == other.stored_cols
            && self.current == other.current
    }
}

impl Eq for Grid {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn border_is_zero(grid: &Grid) -> bool {
        let (r, c) = (grid.stored_rows(), grid.stored_cols());
        (0..c).all(|j| grid.get(0, j) == 0 && grid.get(r - 1, j) == 0)
            && (0..r).all(|i| grid.get(i, 0) == 0 && grid.get(i, c - 1) == 0)
    }

    // ── Construction ────────────────────────────────────────────

    #[test]
    fn new_pads_with_sink_border() {
        let g = Grid::new(3, 5).unwrap();
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 5);
        assert_eq!(g.stored_rows(), 5);
        assert_eq!(g.stored_cols(), 7);
        assert_eq!(g.mass(), 0);
        assert!(border_is_zero(&g));
    }

    #[test]
    fn new_rejects_zero_extent() {
        assert!(matches!(
            Grid::new(0, 4),
            Err(GridError::InvalidDimension { .. })
        ));
        assert!(matches!(
            Grid::new(4, 0),
            Err(GridError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn new_rejects_overflowing_extent() {
        assert!(Grid::new(usize::MAX, 1).is_err());
        assert!(Grid::new(usize::MAX / 2, usize::MAX / 2).is_err());
    }

    #[test]
    fn from_rows_copies_interior_only() {
        let g = Grid::from_rows(&[vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(g.rows(), 2);
        assert_eq!(g.cols(), 3);
        assert_eq!(g.get(1, 1), 1);
        assert_eq!(g.get(1, 3), 3);
        assert_eq!(g.get(2, 1), 4);
        assert_eq!(g.get(2, 3), 6);
        assert!(border_is_zero(&g));
        assert_eq!(g.to_rows(), vec![vec![1, 2, 3], vec![4, 5, 6]]);
    }

    #[test]
    fn from_rows_accepts_slices() {
        let data: [[u32; 2]; 2] = [[1, 0], [0, 1]];
        let g = Grid::from_rows(&data).unwrap();
        assert_eq!(g.mass(), 2);
    }

    #[test]
    fn from_rows_rejects_empty_source() {
        let empty: Vec<Vec<u32>> = vec![];
        assert!(matches!(
            Grid::from_rows(&empty),
            Err(GridError::InvalidDimension { .. })
        ));
        assert!(Grid::from_rows(&[Vec::<u32>::new()]).is_err());
    }

    #[test]
    fn from_rows_rejects_ragged_source() {
        let err = Grid::from_rows(&[vec![1, 2], vec![3]]).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    // ── Access ──────────────────────────────────────────────────

    #[test]
    fn logical_coordinates_are_offset_by_one() {
        let mut g = Grid::new(2, 2).unwrap();
        g.set(0, 1, 7);
        assert_eq!(g.get(1, 2), 7);
        assert_eq!(g.value(0, 1), 7);
        g.add(0, 1, 3);
        assert_eq!(g.value(0, 1), 10);
    }

    #[test]
    fn add_saturates() {
        let mut g = Grid::new(1, 1).unwrap();
        g.set(0, 0, u32::MAX - 1);
        g.add(0, 0, 5);
        assert_eq!(g.value(0, 0), u32::MAX);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn get_past_stored_extent_panics() {
        let g = Grid::new(2, 2).unwrap();
        g.get(0, 4);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn logical_access_rejects_border() {
        let g = Grid::new(2, 2).unwrap();
        g.value(2, 0);
    }

    #[test]
    fn set_all_includes_border() {
        let mut g = Grid::new(2, 3).unwrap();
        g.set_all(2);
        assert_eq!(g.get(0, 0), 2);
        assert_eq!(g.get(3, 4), 2);
        assert_eq!(g.mass(), 12);
    }

    #[test]
    fn stability_tracks_threshold() {
        let mut g = Grid::new(2, 2).unwrap();
        g.set(1, 1, 3);
        assert!(g.is_stable());
        g.add(1, 1, 1);
        assert!(!g.is_stable());
    }

    // ── Step buffers and commit ─────────────────────────────────

    #[test]
    fn commit_copies_interior_and_skips_border() {
        let mut g = Grid::new(2, 2).unwrap();
        {
            let mut bufs = g.begin_step();
            bufs.next.fill(9);
        }
        g.commit();
        assert_eq!(g.to_rows(), vec![vec![9, 9], vec![9, 9]]);
        assert!(border_is_zero(&g));
    }

    #[test]
    fn uncommitted_writes_are_invisible() {
        let mut g = Grid::new(2, 2).unwrap();
        {
            let mut bufs = g.begin_step();
            bufs.next.fill(5);
        }
        assert_eq!(g.mass(), 0);
        assert_eq!(g, Grid::new(2, 2).unwrap());
    }

    #[test]
    fn interior_rows_excludes_border() {
        let mut g = Grid::new(3, 2).unwrap();
        let bufs = g.begin_step();
        assert_eq!(bufs.interior_rows(), 1..4);
        assert_eq!(bufs.stride, 4);
    }

    #[test]
    fn clamp_rows_stays_inside_interior() {
        let mut g = Grid::new(3, 2).unwrap();
        let bufs = g.begin_step();
        assert_eq!(bufs.clamp_rows(0..5), 1..4);
        assert_eq!(bufs.clamp_rows(2..3), 2..3);
        assert_eq!(bufs.clamp_rows(3..100), 3..4);
        assert_eq!(bufs.clamp_rows(7..9), 4..4);
        assert_eq!(bufs.clamp_rows(3..2), 3..3);
    }

    proptest! {
        #[test]
        fn from_rows_round_trips_interior(
            rows in 1usize..8,
            cols in 1usize..8,
            seed in 0u32..1000,
        ) {
            let data: Vec<Vec<u32>> = (0..rows)
                .map(|r| (0..cols).map(|c| (r as u32 * 31 + c as u32 * 7 + seed) % 9).collect())
                .collect();
            let g = Grid::from_rows(&data).unwrap();
            prop_assert_eq!(g.to_rows(), data.clone());
            prop_assert!(border_is_zero(&g));
            let expected: u64 = data.iter().flatten().map(|&v| u64::from(v)).sum();
            prop_assert_eq!(g.mass(), expected);
        }
    }
}
