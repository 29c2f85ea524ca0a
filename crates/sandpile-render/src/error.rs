//! Export errors.

use thiserror::Error;

/// Errors from writing a grid image.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The destination could not be created or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The PNG encoder rejected the image or failed mid-stream.
    #[error("PNG encoding failed: {0}")]
    Encoding(#[from] png::EncodingError),
    /// The stored extent does not fit PNG's 32-bit dimensions.
    #[error("grid of {rows}x{cols} stored cells is too large for a PNG image")]
    TooLarge {
        /// Stored rows.
        rows: usize,
        /// Stored columns.
        cols: usize,
    },
}
