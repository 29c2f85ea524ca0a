//! Parallel toppling engine for abelian sandpiles.
//!
//! Provides the [`Sandpile`] step driver, which runs one toppling step per
//! call by dispatching a fork-join [`ParallelUpdate`] over the grid's
//! interior rows and committing the result when anything changed.
//!
//! # Pipeline (each step)
//!
//! 1. [`Grid::begin_step()`](sandpile_core::Grid::begin_step): split the
//!    grid into a shared current buffer and an exclusive next buffer
//! 2. [`ParallelUpdate::run_all()`]: halve the row range down to the
//!    cutoff, topple each leaf, OR the change flags back up
//! 3. [`Grid::commit()`](sandpile_core::Grid::commit): only if changed

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod driver;
pub mod fork_join;
pub mod metrics;
pub mod update;

pub use config::{ConfigError, EngineConfig};
pub use driver::Sandpile;
pub use fork_join::par_rows;
pub use metrics::{RunSummary, StepMetrics};
pub use update::{topple_rows, ParallelUpdate, UpdateOutcome};
