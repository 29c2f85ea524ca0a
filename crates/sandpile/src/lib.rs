//! Sandpile: a parallel abelian sandpile stabilizer.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the sandpile sub-crates. For most users, adding `sandpile` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use sandpile::prelude::*;
//!
//! // 4 grains in the middle of a 3×3 pile.
//! let grid = Grid::from_rows(&[vec![0, 0, 0], vec![0, 4, 0], vec![0, 0, 0]]).unwrap();
//! let mut pile = Sandpile::new(grid, EngineConfig::default()).unwrap();
//!
//! let summary = pile.stabilize();
//! assert!(summary.settled);
//! assert_eq!(summary.steps, 1);
//! assert_eq!(pile.grid().value(0, 1), 1);
//! print!("{}", TextGrid(pile.grid()));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`grid`] | `sandpile-core` | `Grid`, `StepBuffers`, toppling rule, `GridError` |
//! | [`engine`] | `sandpile-engine` | `Sandpile` driver, fork-join update, config, metrics |
//! | [`render`] | `sandpile-render` | Text rendering and PNG export |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Grid store and toppling rule (`sandpile-core`).
pub use sandpile_core as grid;

/// Step driver and parallel update task (`sandpile-engine`).
///
/// [`engine::Sandpile`] is the entry point; [`engine::par_rows`] is the
/// generic fork-join helper it is built on.
pub use sandpile_engine as engine;

/// Text and PNG output (`sandpile-render`).
pub use sandpile_render as render;

/// Common imports for typical sandpile usage.
pub mod prelude {
    // Core
    pub use sandpile_core::{Grid, GridError};

    // Engine
    pub use sandpile_engine::{ConfigError, EngineConfig, RunSummary, Sandpile, StepMetrics};

    // Rendering
    pub use sandpile_render::{render_text, write_png, ExportError, TextGrid};
}
