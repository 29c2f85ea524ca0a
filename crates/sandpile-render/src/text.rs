//! Bordered ASCII rendering.
//!
//! Only interior cells are drawn. Each cell takes four characters: blanks
//! for an empty cell, the height right-justified otherwise.
//!
//! ```text
//! Grid:
//! +  --  --+
//! |   1    |
//! |       3|
//! +  --  --+
//!
//! ```

use std::fmt;

use sandpile_core::Grid;

/// Display adapter that draws a grid as text.
///
/// ```
/// use sandpile_core::Grid;
/// use sandpile_render::TextGrid;
///
/// let grid = Grid::from_rows(&[vec![1, 0], vec![0, 3]]).unwrap();
/// let text = TextGrid(&grid).to_string();
/// assert!(text.contains("|   1    |"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct TextGrid<'a>(pub &'a Grid);

impl fmt::Display for TextGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.0;
        let last_row = grid.stored_rows() - 1;
        let last_col = grid.stored_cols() - 1;

        writeln!(f, "Grid:")?;
        write_rule(f, grid.cols())?;
        for i in 1..last_row {
            f.write_str("|")?;
            for j in 1..last_col {
                match grid.get(i, j) {
                    0 => f.write_str("    ")?,
                    v => write!(f, "{v:>4}")?,
                }
            }
            f.write_str("|\n")?;
        }
        write_rule(f, grid.cols())?;
        writeln!(f)
    }
}

fn write_rule(f: &mut fmt::Formatter<'_>, cols: usize) -> fmt::Result {
    f.write_str("+")?;
    for _ in 0..cols {
        f.write_str("  --")?;
    }
    f.write_str("+\n")
}

/// Render `grid` to a `String`.
pub fn render_text(grid: &Grid) -> String {
    TextGrid(grid).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_blanks_and_right_justified_heights() {
        let grid = Grid::from_rows(&[vec![1, 0], vec![0, 3]]).unwrap();
        let expected = "Grid:\n\
                        +  --  --+\n\
                        |   1    |\n\
                        |       3|\n\
                        +  --  --+\n\
                        \n";
        assert_eq!(render_text(&grid), expected);
    }

    #[test]
    fn wide_values_fill_the_field() {
        let grid = Grid::from_rows(&[vec![1234, 56]]).unwrap();
        assert!(render_text(&grid).contains("|1234  56|"));
    }

    #[test]
    fn border_is_not_drawn() {
        let mut grid = Grid::new(1, 1).unwrap();
        grid.set_all(7);
        // Only the single interior cell appears.
        assert_eq!(render_text(&grid).matches('7').count(), 1);
    }
}
