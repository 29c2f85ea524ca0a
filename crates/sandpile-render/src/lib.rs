//! Rendering for sandpile grids.
//!
//! - [`TextGrid`] / [`render_text`]: bordered ASCII view of the interior.
//! - [`write_png`] / [`encode_png`]: one pixel per stored cell, coloured
//!   by height (0 black, 1 green, 2 blue, 3 red, anything else black).
//!
//! Both only read the grid.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod image;
pub mod text;

pub use error::ExportError;
pub use image::{colour, encode_png, pixels, write_png};
pub use text::{render_text, TextGrid};
