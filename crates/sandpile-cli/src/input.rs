//! Grid input files.
//!
//! The first non-blank line holds the interior shape as `rows,cols`. Each
//! following non-blank line holds one row of heights. Commas and
//! whitespace both separate values.
//!
//! ```text
//! 3,3
//! 0,0,0
//! 0,4,0
//! 0,0,0
//! ```

use thiserror::Error;

/// Errors from parsing a grid file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// No header line.
    #[error("input is empty")]
    Empty,
    /// Header is not two positive integers.
    #[error("line {line}: expected `rows,cols` header, found {found:?}")]
    BadHeader {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        found: String,
    },
    /// A height is not a non-negative integer.
    #[error("line {line}: {token:?} is not a non-negative integer")]
    BadValue {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// A row has the wrong number of values.
    #[error("line {line}: expected {expected} values, found {found}")]
    RowLength {
        /// 1-based line number.
        line: usize,
        /// Columns declared in the header.
        expected: usize,
        /// Values on the line.
        found: usize,
    },
    /// Fewer or more rows than the header declared.
    #[error("expected {expected} rows, found {found}")]
    RowCount {
        /// Rows declared in the header.
        expected: usize,
        /// Rows present.
        found: usize,
    },
}

fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
}

/// Parse a grid file into interior rows.
pub fn parse_grid(text: &str) -> Result<Vec<Vec<u32>>, InputError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let (header_line, header) = lines.next().ok_or(InputError::Empty)?;
    let bad_header = || InputError::BadHeader {
        line: header_line,
        found: header.to_string(),
    };
    let dims: Vec<usize> = tokens(header)
        .map(|t| t.parse().map_err(|_| bad_header()))
        .collect::<Result<_, _>>()?;
    let [rows, cols] = dims[..] else {
        return Err(bad_header());
    };
    if rows == 0 || cols == 0 {
        return Err(bad_header());
    }

    let mut grid = Vec::new();
    for (line, text) in lines {
        let row: Vec<u32> = tokens(text)
            .map(|t| {
                t.parse().map_err(|_| InputError::BadValue {
                    line,
                    token: t.to_string(),
                })
            })
            .collect::<Result<_, _>>()?;
        if row.len() != cols {
            return Err(InputError::RowLength {
                line,
                expected: cols,
                found: row.len(),
            });
        }
        grid.push(row);
    }
    if grid.len() != rows {
        return Err(InputError::RowCount {
            expected: rows,
            found: grid.len(),
        });
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_csv() {
        let rows = parse_grid("2,3\n1,2,3\n4,5,6\n").unwrap();
        assert_eq!(rows, vec![vec![1, 2, 3], vec![4, 5, 6]]);
    }

    #[test]
    fn accepts_whitespace_and_blank_lines() {
        let rows = parse_grid("\n2 2\n 1  0\n\n0 ,7\n\n").unwrap();
        assert_eq!(rows, vec![vec![1, 0], vec![0, 7]]);
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse_grid("  \n\n"), Err(InputError::Empty));
    }

    #[test]
    fn bad_header() {
        assert!(matches!(
            parse_grid("3\n1,2,3\n"),
            Err(InputError::BadHeader { line: 1, .. })
        ));
        assert!(matches!(
            parse_grid("0,3\n"),
            Err(InputError::BadHeader { .. })
        ));
        assert!(matches!(
            parse_grid("a,b\n"),
            Err(InputError::BadHeader { .. })
        ));
    }

    #[test]
    fn negative_height_rejected() {
        assert_eq!(
            parse_grid("1,2\n1,-2\n"),
            Err(InputError::BadValue {
                line: 2,
                token: "-2".into()
            })
        );
    }

    #[test]
    fn ragged_row_rejected() {
        assert_eq!(
            parse_grid("2,2\n1,2\n3\n"),
            Err(InputError::RowLength {
                line: 3,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn row_count_checked() {
        assert_eq!(
            parse_grid("3,1\n1\n2\n"),
            Err(InputError::RowCount {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn huge_declared_row_count_is_a_row_count_error() {
        assert_eq!(
            parse_grid("18446744073709551615,1\n1\n"),
            Err(InputError::RowCount {
                expected: usize::MAX,
                found: 1
            })
        );
        assert!(matches!(
            parse_grid("100000000000,1\n1\n2\n"),
            Err(InputError::RowCount { found: 2, .. })
        ));
    }
}
