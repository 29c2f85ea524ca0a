//! Benchmark profiles for the sandpile engine.
//!
//! - [`reference_profile`]: 256x256 grid (~65K cells) of seeded random heights
//! - [`stress_profile`]: 1024x1024 grid (~1M cells), same distribution
//! - [`tower`]: a single tall pile in the middle of an empty grid

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use sandpile_core::Grid;
use sandpile_test_utils::random_rows;

/// Cutoffs swept by the benchmarks, from very fine to a single partition
/// for the profile sizes above.
pub const CUTOFFS: [usize; 5] = [8, 32, 64, 256, 2048];

/// Heights are drawn from `0..=MAX_HEIGHT`, so roughly three quarters of
/// the cells start unstable.
pub const MAX_HEIGHT: u32 = 15;

/// Build the reference profile: 256x256 seeded random grid.
pub fn reference_profile(seed: u64) -> Grid {
    random_grid(256, 256, seed)
}

/// Build the stress profile: 1024x1024 seeded random grid.
pub fn stress_profile(seed: u64) -> Grid {
    random_grid(1024, 1024, seed)
}

/// `size × size` zero grid with `height` grains on the centre cell.
pub fn tower(size: usize, height: u32) -> Grid {
    let mut grid = Grid::new(size, size).expect("tower size is non-zero");
    grid.set(size / 2, size / 2, height);
    grid
}

fn random_grid(rows: usize, cols: usize, seed: u64) -> Grid {
    Grid::from_rows(&random_rows(rows, cols, MAX_HEIGHT, seed))
        .expect("profile dimensions are non-zero")
}
