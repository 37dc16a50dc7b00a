//! Maze model, generation, and path finding.
//!
//! A maze is any grid that can answer "may I step from this cell in this
//! direction?". Two backing representations exist:
//! - [`grid::WallGrid`]: every cell carries a four-wall bitmask, produced by the
//!   randomized depth-first [`generator`].
//! - [`open_grid::OpenGrid`]: a flat 0/1 passability grid, either the built-in
//!   classic layout or one read from a text file.
//!
//! Both implement [`Passage`], and [`Layout`] tags whichever one a session is
//! playing on. The [`solver`] only ever sees the trait.

pub mod generator;
pub mod grid;
pub mod open_grid;
pub mod solver;

use self::grid::WallGrid;
use self::open_grid::OpenGrid;

/// Position of a cell in the grid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Row index of the cell
    pub row: usize,
    /// Column index of the cell
    pub col: usize,
}

impl Cell {
    /// Creates a new Cell with the given coordinates
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(&self, other: Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// One of the four grid directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last column.
    Right,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
}

impl Direction {
    /// Neighbour visiting order shared by the generator and the path finder.
    /// Path finding ties resolve in this order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// The direction pointing back.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// Returns the cell one step away in this direction, or `None` when the
    /// step would leave a `rows` x `cols` grid.
    pub fn step(self, cell: Cell, rows: usize, cols: usize) -> Option<Cell> {
        match self {
            Direction::Up if cell.row > 0 => Some(Cell::new(cell.row - 1, cell.col)),
            Direction::Right if cell.col + 1 < cols => Some(Cell::new(cell.row, cell.col + 1)),
            Direction::Down if cell.row + 1 < rows => Some(Cell::new(cell.row + 1, cell.col)),
            Direction::Left if cell.col > 0 => Some(Cell::new(cell.row, cell.col - 1)),
            _ => None,
        }
    }

    /// Direction leading from `from` to an orthogonally adjacent `to`.
    pub fn between(from: Cell, to: Cell) -> Option<Direction> {
        if from.manhattan(to) != 1 {
            return None;
        }
        Some(if to.row < from.row {
            Direction::Up
        } else if to.col > from.col {
            Direction::Right
        } else if to.row > from.row {
            Direction::Down
        } else {
            Direction::Left
        })
    }

    /// Lower-case name for logs.
    pub fn label(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }
}

/// Adjacency predicate over a rectangular grid of cells.
///
/// Everything that walks a maze (path finder, move validation, scene
/// building) is written against this trait, so wall-bitmask and flat
/// passability grids are interchangeable.
pub trait Passage {
    /// Number of rows in the grid.
    fn rows(&self) -> usize;

    /// Number of columns in the grid.
    fn cols(&self) -> usize;

    /// Whether the cell itself can be occupied.
    fn is_open(&self, cell: Cell) -> bool;

    /// Whether a single step from `cell` in `direction` is allowed.
    fn can_move(&self, cell: Cell, direction: Direction) -> bool;

    /// Whether `cell` is inside the grid.
    fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows() && cell.col < self.cols()
    }

    /// Cells reachable in one step, in [`Direction::ALL`] order.
    fn open_neighbors(&self, cell: Cell) -> Vec<Cell> {
        Direction::ALL
            .iter()
            .filter(|&&dir| self.can_move(cell, dir))
            .filter_map(|&dir| dir.step(cell, self.rows(), self.cols()))
            .collect()
    }
}

/// The grid a session is played on.
#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    /// Carved perfect maze with per-cell walls.
    Walled(WallGrid),
    /// Flat passability grid with its own start and exit.
    Open(OpenGrid),
}

impl Layout {
    /// Default player start for this layout.
    pub fn start(&self) -> Cell {
        match self {
            Layout::Walled(_) => Cell::new(0, 0),
            Layout::Open(grid) => grid.start(),
        }
    }

    /// Target cell for this layout.
    pub fn target(&self) -> Cell {
        match self {
            Layout::Walled(grid) => Cell::new(grid.rows() - 1, grid.cols() - 1),
            Layout::Open(grid) => grid.target(),
        }
    }

    fn inner(&self) -> &dyn Passage {
        match self {
            Layout::Walled(grid) => grid,
            Layout::Open(grid) => grid,
        }
    }
}

impl Passage for Layout {
    fn rows(&self) -> usize {
        self.inner().rows()
    }

    fn cols(&self) -> usize {
        self.inner().cols()
    }

    fn is_open(&self, cell: Cell) -> bool {
        self.inner().is_open(cell)
    }

    fn can_move(&self, cell: Cell, direction: Direction) -> bool {
        self.inner().can_move(cell, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Steps stay inside the grid and respect each direction's offset.
    #[test]
    fn test_direction_step_bounds() {
        let origin = Cell::new(0, 0);
        assert_eq!(Direction::Up.step(origin, 3, 3), None);
        assert_eq!(Direction::Left.step(origin, 3, 3), None);
        assert_eq!(Direction::Right.step(origin, 3, 3), Some(Cell::new(0, 1)));
        assert_eq!(Direction::Down.step(origin, 3, 3), Some(Cell::new(1, 0)));

        let corner = Cell::new(2, 2);
        assert_eq!(Direction::Right.step(corner, 3, 3), None);
        assert_eq!(Direction::Down.step(corner, 3, 3), None);
    }

    #[test]
    fn test_direction_between_and_opposite() {
        let a = Cell::new(1, 1);
        for dir in Direction::ALL {
            let b = dir.step(a, 3, 3).unwrap();
            assert_eq!(Direction::between(a, b), Some(dir));
            assert_eq!(Direction::between(b, a), Some(dir.opposite()));
        }
        assert_eq!(Direction::between(a, Cell::new(2, 2)), None);
        assert_eq!(Direction::between(a, a), None);
    }
}
