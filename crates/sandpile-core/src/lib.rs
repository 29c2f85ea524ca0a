//! Core data types for abelian sandpile simulation.
//!
//! This is the leaf crate of the workspace. It defines the [`Grid`] store
//! (current heights, next-state buffer, and the zero sink border around
//! both) and the pure [`rule`] that maps a cell and its four neighbours to
//! the cell's next height. Scheduling lives in `sandpile-engine`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod rule;

pub use error::GridError;
pub use grid::{Grid, StepBuffers};
pub use rule::{next_height, next_height_at, TOPPLE_THRESHOLD};
