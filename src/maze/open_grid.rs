//! Flat passability grid.
//!
//! Every position is either open (0) or blocked (1); there are no walls
//! between cells. A step is allowed when the destination is inside the grid
//! and open.

use super::{Cell, Direction, Passage};
use thiserror::Error;

/// The built-in practice layout: 10 rows by 9 columns, start at the top-left
/// corner and exit at the bottom-right corner.
pub const CLASSIC_LAYOUT: [[u8; 9]; 10] = [
    [0, 1, 0, 0, 0, 0, 0, 1, 0],
    [0, 1, 0, 1, 1, 1, 0, 1, 0],
    [0, 0, 0, 1, 0, 0, 0, 1, 0],
    [1, 1, 0, 1, 0, 1, 1, 1, 0],
    [0, 0, 0, 0, 0, 1, 0, 0, 0],
    [0, 1, 1, 1, 1, 1, 0, 1, 1],
    [0, 0, 0, 0, 0, 1, 0, 0, 0],
    [1, 1, 1, 1, 0, 1, 1, 1, 0],
    [0, 0, 0, 1, 0, 0, 0, 1, 0],
    [0, 1, 0, 0, 0, 1, 0, 0, 0],
];

/// Problems found while reading a flat layout from text.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// No rows, or rows with no cells.
    #[error("layout has no rows")]
    Empty,

    /// A row whose width differs from the first row.
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        /// Offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        found: usize,
    },

    /// A character that is not part of the layout alphabet.
    #[error("unexpected character {ch:?} at row {row}, column {col}")]
    UnknownSymbol {
        /// The character found.
        ch: char,
        /// Its row.
        row: usize,
        /// Its column.
        col: usize,
    },

    /// The start or exit falls on a blocked cell.
    #[error("{what} cell at row {row}, column {col} is blocked")]
    BlockedEndpoint {
        /// `start` or `exit`.
        what: &'static str,
        /// Row of the endpoint.
        row: usize,
        /// Column of the endpoint.
        col: usize,
    },

    /// The start and exit are the same cell.
    #[error("start and exit share the cell at row {row}, column {col}")]
    SameEndpoints {
        /// Row of the shared cell.
        row: usize,
        /// Column of the shared cell.
        col: usize,
    },
}

/// A rows x cols grid of open/blocked positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenGrid {
    rows: usize,
    cols: usize,
    blocked: Vec<bool>,
    start: Cell,
    target: Cell,
}

impl OpenGrid {
    /// The built-in [`CLASSIC_LAYOUT`].
    pub fn classic() -> Self {
        let rows: Vec<Vec<u8>> = CLASSIC_LAYOUT.iter().map(|r| r.to_vec()).collect();
        Self::from_values(&rows, Cell::new(0, 0), Cell::new(9, 8))
            .unwrap_or_else(|_| unreachable!("built-in layout is well formed"))
    }

    /// Builds a grid from rows of 0 (open) / non-zero (blocked) values.
    pub fn from_values(rows: &[Vec<u8>], start: Cell, target: Cell) -> Result<Self, LayoutError> {
        let width = rows.first().map(Vec::len).ok_or(LayoutError::Empty)?;
        if width == 0 {
            return Err(LayoutError::Empty);
        }

        let mut blocked = Vec::with_capacity(rows.len() * width);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                return Err(LayoutError::RaggedRow {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            blocked.extend(values.iter().map(|&v| v != 0));
        }

        let grid = Self {
            rows: rows.len(),
            cols: width,
            blocked,
            start,
            target,
        };
        for (what, cell) in [("start", start), ("exit", target)] {
            if !grid.is_open(cell) {
                return Err(LayoutError::BlockedEndpoint {
                    what,
                    row: cell.row,
                    col: cell.col,
                });
            }
        }
        if start == target {
            return Err(LayoutError::SameEndpoints {
                row: start.row,
                col: start.col,
            });
        }
        Ok(grid)
    }

    /// Parses a text layout.
    ///
    /// `#` or `1` marks a blocked cell; `.`, `0` and space are open. `S` and
    /// `E` mark an open start and exit; without them the start is the top-left
    /// and the exit the bottom-right corner. Trailing whitespace and blank
    /// lines at the end are ignored; rows shorter than the widest row are
    /// padded with open cells.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let mut lines: Vec<&str> = text.lines().map(str::trim_end).collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        if lines.is_empty() {
            return Err(LayoutError::Empty);
        }

        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let mut rows = Vec::with_capacity(lines.len());
        let mut start = None;
        let mut target = None;

        for (row, line) in lines.iter().enumerate() {
            let mut values = Vec::with_capacity(width);
            for (col, ch) in line.chars().enumerate() {
                let value = match ch {
                    '#' | '1' => 1,
                    '.' | '0' | ' ' => 0,
                    'S' | 's' => {
                        start = Some(Cell::new(row, col));
                        0
                    }
                    'E' | 'e' => {
                        target = Some(Cell::new(row, col));
                        0
                    }
                    _ => return Err(LayoutError::UnknownSymbol { ch, row, col }),
                };
                values.push(value);
            }
            values.resize(width, 0);
            rows.push(values);
        }

        let start = start.unwrap_or_default();
        let target = target.unwrap_or(Cell::new(rows.len() - 1, width.saturating_sub(1)));
        Self::from_values(&rows, start, target)
    }

    /// Where the player begins.
    pub fn start(&self) -> Cell {
        self.start
    }

    /// The exit cell.
    pub fn target(&self) -> Cell {
        self.target
    }

    /// Raw 0/1 value at `cell`; out-of-bounds reads as blocked.
    pub fn value(&self, cell: Cell) -> u8 {
        u8::from(!self.is_open(cell))
    }
}

impl Passage for OpenGrid {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn is_open(&self, cell: Cell) -> bool {
        self.contains(cell) && !self.blocked[cell.row * self.cols + cell.col]
    }

    fn can_move(&self, cell: Cell, direction: Direction) -> bool {
        direction
            .step(cell, self.rows, self.cols)
            .is_some_and(|next| self.is_open(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_layout_dimensions() {
        let grid = OpenGrid::classic();
        assert_eq!(grid.rows(), 10);
        assert_eq!(grid.cols(), 9);
        assert_eq!(grid.start(), Cell::new(0, 0));
        assert_eq!(grid.target(), Cell::new(9, 8));
        assert_eq!(grid.value(Cell::new(0, 1)), 1);
        assert_eq!(grid.value(Cell::new(0, 0)), 0);
        assert_eq!(grid.value(Cell::new(10, 0)), 1);
    }

    /// Moves are allowed only into open, in-bounds neighbours.
    #[test]
    fn test_passability() {
        let grid = OpenGrid::classic();
        let origin = Cell::new(0, 0);
        assert!(grid.can_move(origin, Direction::Down));
        assert!(!grid.can_move(origin, Direction::Right));
        assert!(!grid.can_move(origin, Direction::Up));
        assert!(!grid.can_move(origin, Direction::Left));
        assert_eq!(grid.open_neighbors(origin), vec![Cell::new(1, 0)]);
    }

    #[test]
    fn test_parse_with_markers() {
        let grid = OpenGrid::parse("S.#\n#.#\n#.E\n").unwrap();
        assert_eq!((grid.rows(), grid.cols()), (3, 3));
        assert_eq!(grid.start(), Cell::new(0, 0));
        assert_eq!(grid.target(), Cell::new(2, 2));
        assert!(grid.is_open(Cell::new(1, 1)));
        assert!(!grid.is_open(Cell::new(1, 0)));
    }

    /// Without markers the corners are used, and short rows are padded open.
    #[test]
    fn test_parse_defaults_and_padding() {
        let grid = OpenGrid::parse("..#\n.\n\n").unwrap();
        assert_eq!((grid.rows(), grid.cols()), (2, 3));
        assert_eq!(grid.start(), Cell::new(0, 0));
        assert_eq!(grid.target(), Cell::new(1, 2));
        assert!(grid.is_open(Cell::new(1, 2)));
        assert!(!grid.is_open(Cell::new(0, 2)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(OpenGrid::parse(""), Err(LayoutError::Empty));
        assert_eq!(OpenGrid::parse("\n\n"), Err(LayoutError::Empty));
        assert_eq!(
            OpenGrid::parse("..\n.x"),
            Err(LayoutError::UnknownSymbol {
                ch: 'x',
                row: 1,
                col: 1
            })
        );
        assert_eq!(
            OpenGrid::parse("#.\n.."),
            Err(LayoutError::BlockedEndpoint {
                what: "start",
                row: 0,
                col: 0
            })
        );
    }

    /// A layout whose exit is its start could never be finished.
    #[test]
    fn test_parse_rejects_shared_start_and_exit() {
        let shared = Err(LayoutError::SameEndpoints { row: 0, col: 0 });
        assert_eq!(OpenGrid::parse("E"), shared);
        assert_eq!(OpenGrid::parse("."), shared);
        assert_eq!(OpenGrid::parse("S"), shared);
        assert_eq!(OpenGrid::parse("E.\n.."), shared);
        assert!(OpenGrid::parse("S.").is_ok());
    }

    #[test]
    fn test_from_values_rejects_ragged_rows() {
        let rows = vec![vec![0, 0, 0], vec![0, 0]];
        assert_eq!(
            OpenGrid::from_values(&rows, Cell::new(0, 0), Cell::new(0, 2)),
            Err(LayoutError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }
}
