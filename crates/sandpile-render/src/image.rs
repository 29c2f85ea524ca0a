//! PNG export.
//!
//! Every stored cell, border included, becomes one opaque pixel. The image
//! is `stored_cols` pixels wide and `stored_rows` pixels tall, laid out in
//! the same row-major order as the grid, so the picture matches the text
//! rendering. Exporters that put stored rows on the x axis produce the
//! transpose of this image; for non-square grids the two layouts differ
//! on purpose.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use png::{BitDepth, ColorType, Encoder};
use sandpile_core::Grid;
use tracing::debug;

use crate::error::ExportError;

/// Opaque black, used for 0 and for any height above 3.
pub const BLACK: [u8; 4] = [0, 0, 0, 255];
/// Height 1.
pub const GREEN: [u8; 4] = [0, 255, 0, 255];
/// Height 2.
pub const BLUE: [u8; 4] = [0, 0, 255, 255];
/// Height 3.
pub const RED: [u8; 4] = [255, 0, 0, 255];

/// RGBA colour for a cell height.
pub fn colour(height: u32) -> [u8; 4] {
    match height {
        1 => GREEN,
        2 => BLUE,
        3 => RED,
        _ => BLACK,
    }
}

/// RGBA8 pixel buffer covering the full stored extent.
pub fn pixels(grid: &Grid) -> Vec<u8> {
    let (rows, cols) = (grid.stored_rows(), grid.stored_cols());
    let mut bytes = Vec::with_capacity(rows * cols * 4);
    for i in 0..rows {
        for j in 0..cols {
            bytes.extend_from_slice(&colour(grid.get(i, j)));
        }
    }
    bytes
}

/// Encode `grid` as a PNG into `writer`.
pub fn encode_png<W: Write>(grid: &Grid, writer: W) -> Result<(), ExportError> {
    let too_large = || ExportError::TooLarge {
        rows: grid.stored_rows(),
        cols: grid.stored_cols(),
    };
    let width = u32::try_from(grid.stored_cols()).map_err(|_| too_large())?;
    let height = u32::try_from(grid.stored_rows()).map_err(|_| too_large())?;

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&pixels(grid))?;
    writer.finish()?;
    Ok(())
}

/// Write `grid` as a PNG file at `path`, replacing any existing file.
///
/// The grid is only read. Fails with [`ExportError::Io`] if the file
/// cannot be created.
pub fn write_png(grid: &Grid, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    encode_png(grid, BufWriter::new(file))?;
    debug!(
        path = %path.display(),
        width = grid.stored_cols(),
        height = grid.stored_rows(),
        "grid image written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette() {
        assert_eq!(colour(0), BLACK);
        assert_eq!(colour(1), GREEN);
        assert_eq!(colour(2), BLUE);
        assert_eq!(colour(3), RED);
        assert_eq!(colour(4), BLACK);
        assert_eq!(colour(u32::MAX), BLACK);
    }

    #[test]
    fn pixels_cover_border() {
        let grid = Grid::from_rows(&[vec![1, 2, 3]]).unwrap();
        let px = pixels(&grid);
        assert_eq!(px.len(), 3 * 5 * 4);
        // Row 1 (first interior row), columns 1..=3.
        let at = |i: usize, j: usize| &px[(i * 5 + j) * 4..(i * 5 + j) * 4 + 4];
        assert_eq!(at(0, 0), BLACK);
        assert_eq!(at(1, 1), GREEN);
        assert_eq!(at(1, 2), BLUE);
        assert_eq!(at(1, 3), RED);
        assert_eq!(at(1, 4), BLACK);
        assert!(px.chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn wide_grid_is_wide_image() {
        let grid = Grid::from_rows(&[vec![1, 2, 3]]).unwrap();
        let mut out = Vec::new();
        encode_png(&grid, &mut out).unwrap();
        let reader = png::Decoder::new(std::io::Cursor::new(out))
            .read_info()
            .unwrap();
        assert_eq!((reader.info().width, reader.info().height), (5, 3));
    }

    #[test]
    fn encoded_bytes_are_png() {
        let grid = Grid::from_rows(&[vec![1, 0], vec![2, 3]]).unwrap();
        let mut out = Vec::new();
        encode_png(&grid, &mut out).unwrap();
        assert_eq!(&out[..8], b"\x89PNG\r\n\x1a\n");
    }
}
