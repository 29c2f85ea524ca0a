//! Test utilities for sandpile development.
//!
//! Provides grid fixtures and [`ReferencePile`], a deliberately plain
//! sequential stepper over nested `Vec`s. The engine's output is checked
//! against it, so it shares no code with the engine beyond the grid type.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{centre_pile, random_rows, single_pile, uniform};

use sandpile_core::Grid;

/// Sequential sandpile over plain rows, with an implicit zero sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferencePile {
    rows: Vec<Vec<u32>>,
}

impl ReferencePile {
    pub fn new(rows: Vec<Vec<u32>>) -> Self {
        Self { rows }
    }

    pub fn from_grid(grid: &Grid) -> Self {
        Self::new(grid.to_rows())
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.rows
    }

    /// One synchronous step. Returns whether anything changed.
    pub fn step(&mut self) -> bool {
        let h = self.rows.len();
        let w = self.rows.first().map_or(0, Vec::len);
        let at = |r: isize, c: isize| -> u32 {
            if r < 0 || c < 0 || r as usize >= h || c as usize >= w {
                0
            } else {
                self.rows[r as usize][c as usize]
            }
        };

        let mut next = vec![vec![0; w]; h];
        for (r, next_row) in next.iter_mut().enumerate() {
            for (c, cell) in next_row.iter_mut().enumerate() {
                let (ri, ci) = (r as isize, c as isize);
                *cell = at(ri, ci) % 4
                    + at(ri - 1, ci) / 4
                    + at(ri + 1, ci) / 4
                    + at(ri, ci - 1) / 4
                    + at(ri, ci + 1) / 4;
            }
        }
        let changed = next != self.rows;
        self.rows = next;
        changed
    }

    /// Grains that leave through the edge on the next step.
    pub fn outflow(&self) -> u64 {
        let h = self.rows.len();
        let w = self.rows.first().map_or(0, Vec::len);
        let mut lost = 0u64;
        for (r, row) in self.rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                let edges = u64::from(r == 0)
                    + u64::from(r + 1 == h)
                    + u64::from(c == 0)
                    + u64::from(c + 1 == w);
                lost += edges * u64::from(v / 4);
            }
        }
        lost
    }

    pub fn mass(&self) -> u64 {
        self.rows.iter().flatten().map(|&v| u64::from(v)).sum()
    }
}
