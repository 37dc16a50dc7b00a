//! Breadth-first shortest path over any [`Passage`] grid.
//!
//! Neighbours are expanded in up, right, down, left order, so among equally
//! short paths the same one is returned for a given grid and endpoints.
//! Parents are recorded per cell and the path is rebuilt once at the end.

use super::{Cell, Passage};
use std::collections::VecDeque;

/// Shortest path from `from` to `to`, inclusive of both endpoints.
///
/// Returns an empty path when the destination is unreachable or either
/// endpoint is outside the grid or blocked.
pub fn shortest_path<P: Passage + ?Sized>(grid: &P, from: Cell, to: Cell) -> Vec<Cell> {
    if !grid.is_open(from) || !grid.is_open(to) {
        return Vec::new();
    }
    if from == to {
        return vec![from];
    }

    let cols = grid.cols();
    let index = |cell: Cell| cell.row * cols + cell.col;
    let mut parent: Vec<Option<Cell>> = vec![None; grid.rows() * cols];
    let mut seen = vec![false; grid.rows() * cols];
    let mut queue = VecDeque::from([from]);
    seen[index(from)] = true;

    while let Some(cell) = queue.pop_front() {
        for next in grid.open_neighbors(cell) {
            if seen[index(next)] {
                continue;
            }
            seen[index(next)] = true;
            parent[index(next)] = Some(cell);
            if next == to {
                return walk_back(&parent, index, from, to);
            }
            queue.push_back(next);
        }
    }

    Vec::new()
}

fn walk_back(
    parent: &[Option<Cell>],
    index: impl Fn(Cell) -> usize,
    from: Cell,
    to: Cell,
) -> Vec<Cell> {
    let mut path = vec![to];
    let mut cell = to;
    while cell != from {
        match parent[index(cell)] {
            Some(prev) => {
                path.push(prev);
                cell = prev;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}

/// First segment of the shortest path, used for hints.
/// `None` when the path has fewer than two cells.
pub fn next_step<P: Passage + ?Sized>(grid: &P, from: Cell, to: Cell) -> Option<(Cell, Cell)> {
    let path = shortest_path(grid, from, to);
    match path.as_slice() {
        [first, second, ..] => Some((*first, *second)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Direction;
    use crate::maze::grid::WallGrid;
    use crate::maze::open_grid::OpenGrid;

    fn assert_steps_adjacent(path: &[Cell]) {
        for pair in path.windows(2) {
            assert_eq!(pair[0].manhattan(pair[1]), 1, "{:?} -> {:?}", pair[0], pair[1]);
        }
    }

    /// A straight corridor carved through a 1x4 grid.
    #[test]
    fn test_corridor() {
        let mut grid = WallGrid::new(1, 4);
        for col in 0..3 {
            grid.remove_wall_between(Cell::new(0, col), Cell::new(0, col + 1));
        }
        let path = shortest_path(&grid, Cell::new(0, 0), Cell::new(0, 3));
        assert_eq!(
            path,
            (0..4).map(|c| Cell::new(0, c)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_same_cell_and_unreachable() {
        let grid = WallGrid::new(3, 3);
        assert_eq!(
            shortest_path(&grid, Cell::new(1, 1), Cell::new(1, 1)),
            vec![Cell::new(1, 1)]
        );
        assert!(shortest_path(&grid, Cell::new(0, 0), Cell::new(2, 2)).is_empty());
        assert!(shortest_path(&grid, Cell::new(0, 0), Cell::new(5, 5)).is_empty());
        assert_eq!(next_step(&grid, Cell::new(1, 1), Cell::new(1, 1)), None);
    }

    /// With an open 2x2 block both routes are equally short; the up/right/
    /// down/left order makes the right-first route win.
    #[test]
    fn test_tie_break_is_deterministic() {
        let mut grid = WallGrid::new(2, 2);
        grid.remove_wall_between(Cell::new(0, 0), Cell::new(0, 1));
        grid.remove_wall_between(Cell::new(0, 0), Cell::new(1, 0));
        grid.remove_wall_between(Cell::new(0, 1), Cell::new(1, 1));
        grid.remove_wall_between(Cell::new(1, 0), Cell::new(1, 1));

        let path = shortest_path(&grid, Cell::new(0, 0), Cell::new(1, 1));
        assert_eq!(
            path,
            vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 1)]
        );
    }

    /// On the classic flat grid every step is orthogonal and lands on an
    /// open (0) cell.
    #[test]
    fn test_classic_layout_path() {
        let grid = OpenGrid::classic();
        let path = shortest_path(&grid, Cell::new(0, 0), Cell::new(9, 8));
        assert!(!path.is_empty());
        assert_eq!(path[0], Cell::new(0, 0));
        assert_eq!(*path.last().unwrap(), Cell::new(9, 8));
        assert_steps_adjacent(&path);
        assert!(path.iter().all(|&c| grid.value(c) == 0));
        for pair in path.windows(2) {
            let dir = Direction::between(pair[0], pair[1]).unwrap();
            assert!(grid.can_move(pair[0], dir));
        }
    }

    #[test]
    fn test_flat_grid_disconnected() {
        let grid = OpenGrid::parse("S#.\n.#.\n.#E").unwrap();
        assert!(shortest_path(&grid, grid.start(), grid.target()).is_empty());
        assert_eq!(next_step(&grid, grid.start(), grid.target()), None);
    }

    #[test]
    fn test_next_step_matches_path() {
        let grid = OpenGrid::classic();
        let path = shortest_path(&grid, Cell::new(4, 4), Cell::new(9, 8));
        let (a, b) = next_step(&grid, Cell::new(4, 4), Cell::new(9, 8)).unwrap();
        assert_eq!((a, b), (path[0], path[1]));
        assert_eq!(a.manhattan(b), 1);
    }
}
