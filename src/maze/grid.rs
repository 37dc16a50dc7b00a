//! Wall-bitmask grid.
//!
//! Each cell stores which of its four edges are walled. Walls between two
//! cells are stored on both sides and are only ever removed in pairs, so the
//! grid is always symmetric: if A has no wall facing B, B has no wall facing A.

use super::{Cell, Direction, Passage};
use bitflags::bitflags;

bitflags! {
    /// Which edges of a cell are walled.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Walls: u8 {
        const TOP = 0b0001;
        const RIGHT = 0b0010;
        const BOTTOM = 0b0100;
        const LEFT = 0b1000;
    }
}

impl Walls {
    /// The wall bit facing `direction`.
    pub fn facing(direction: Direction) -> Walls {
        match direction {
            Direction::Up => Walls::TOP,
            Direction::Right => Walls::RIGHT,
            Direction::Down => Walls::BOTTOM,
            Direction::Left => Walls::LEFT,
        }
    }
}

/// A single cell of a [`WallGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallCell {
    /// Walls still standing around this cell
    pub walls: Walls,
    /// Set while carving; meaningless afterwards
    pub visited: bool,
}

impl Default for WallCell {
    fn default() -> Self {
        Self {
            walls: Walls::all(),
            visited: false,
        }
    }
}

/// A rows x cols grid of walled cells, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct WallGrid {
    rows: usize,
    cols: usize,
    cells: Vec<WallCell>,
}

impl WallGrid {
    /// Creates a grid with every wall present. Dimensions are clamped to at
    /// least one cell.
    pub fn new(rows: usize, cols: usize) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            rows,
            cols,
            cells: vec![WallCell::default(); rows * cols],
        }
    }

    fn index(&self, cell: Cell) -> usize {
        cell.row * self.cols + cell.col
    }

    /// Returns the cell at `cell`, if it is inside the grid.
    pub fn get(&self, cell: Cell) -> Option<&WallCell> {
        if self.contains(cell) {
            Some(&self.cells[self.index(cell)])
        } else {
            None
        }
    }

    fn get_mut(&mut self, cell: Cell) -> Option<&mut WallCell> {
        if self.contains(cell) {
            let index = self.index(cell);
            Some(&mut self.cells[index])
        } else {
            None
        }
    }

    /// Whether the wall on `direction` side of `cell` is standing.
    /// Cells outside the grid count as fully walled.
    pub fn has_wall(&self, cell: Cell, direction: Direction) -> bool {
        self.get(cell)
            .is_none_or(|c| c.walls.contains(Walls::facing(direction)))
    }

    /// Whether carving has reached `cell`.
    pub fn is_visited(&self, cell: Cell) -> bool {
        self.get(cell).is_some_and(|c| c.visited)
    }

    /// Marks `cell` as reached by carving.
    pub fn mark_visited(&mut self, cell: Cell) {
        if let Some(c) = self.get_mut(cell) {
            c.visited = true;
        }
    }

    /// Removes the wall pair between two orthogonally adjacent cells.
    ///
    /// Both sides are cleared in the same call. Returns `false` (and changes
    /// nothing) when the cells are not adjacent or either is out of bounds.
    pub fn remove_wall_between(&mut self, a: Cell, b: Cell) -> bool {
        let Some(direction) = Direction::between(a, b) else {
            return false;
        };
        if !self.contains(a) || !self.contains(b) {
            return false;
        }
        let ia = self.index(a);
        let ib = self.index(b);
        self.cells[ia].walls.remove(Walls::facing(direction));
        self.cells[ib].walls.remove(Walls::facing(direction.opposite()));
        true
    }

    /// Number of carved passages between pairs of cells.
    ///
    /// Only right and bottom edges are counted so each shared wall is seen
    /// once; the outer boundary is never carved.
    pub fn removed_wall_count(&self) -> usize {
        let mut count = 0;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = Cell::new(row, col);
                if col + 1 < self.cols && !self.has_wall(cell, Direction::Right) {
                    count += 1;
                }
                if row + 1 < self.rows && !self.has_wall(cell, Direction::Down) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Iterates over all cells in row-major order with their positions.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &WallCell)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, c)| (Cell::new(i / self.cols, i % self.cols), c))
    }
}

impl Passage for WallGrid {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn is_open(&self, cell: Cell) -> bool {
        self.contains(cell)
    }

    fn can_move(&self, cell: Cell, direction: Direction) -> bool {
        !self.has_wall(cell, direction) && direction.step(cell, self.rows, self.cols).is_some()
    }
}
