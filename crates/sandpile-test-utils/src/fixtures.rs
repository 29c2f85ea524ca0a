//! Reusable starting grids.
//!
//! - [`single_pile`]: one loaded cell on an otherwise empty grid.
//! - [`centre_pile`]: the 3x3 grid with a lone 4 in the middle.
//! - [`uniform`]: every interior cell at the same height.
//! - [`random_rows`]: seeded ChaCha8 heights, identical for identical seeds.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sandpile_core::Grid;

/// `rows × cols` zero grid with `height` at logical `(row, col)`.
pub fn single_pile(rows: usize, cols: usize, row: usize, col: usize, height: u32) -> Grid {
    let mut grid = Grid::new(rows, cols).expect("fixture dimensions are non-zero");
    grid.set(row, col, height);
    grid
}

/// 3x3 interior grid, 4 grains at the centre.
pub fn centre_pile() -> Grid {
    single_pile(3, 3, 1, 1, 4)
}

/// `rows × cols` grid with every interior cell at `height`.
pub fn uniform(rows: usize, cols: usize, height: u32) -> Grid {
    Grid::from_rows(&vec![vec![height; cols]; rows]).expect("fixture dimensions are non-zero")
}

/// Seeded random heights in `0..=max`.
pub fn random_rows(rows: usize, cols: usize, max: u32, seed: u64) -> Vec<Vec<u32>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..rows)
        .map(|_| (0..cols).map(|_| rng.random_range(0..=max)).collect())
        .collect()
}
