//! Maze generation using a randomized depth-first backtracker.
//!
//! Starting from a fully walled grid, the carver walks from (0,0) into a
//! random unvisited neighbour, removing the wall pair between them, and
//! backtracks when it runs out of neighbours. Every cell is visited exactly
//! once, so the result is a spanning tree: `rows * cols - 1` passages and a
//! single simple path between any two cells.
//!
//! # Examples
//!
//! ```ignore
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut generator = MazeGenerator::new(10, 10);
//! while !generator.is_complete() {
//!     generator.step(&mut rng);
//! }
//! let grid = generator.into_grid();
//! ```

use super::grid::WallGrid;
use super::{Cell, Direction, Passage};
use rand::Rng;

/// Stepwise maze carver.
pub struct MazeGenerator {
    grid: WallGrid,
    stack: Vec<Cell>,
    carved: usize,
}

impl MazeGenerator {
    /// Creates a generator for a fully walled `rows` x `cols` grid with (0,0)
    /// already visited and on the stack.
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut grid = WallGrid::new(rows, cols);
        let origin = Cell::new(0, 0);
        grid.mark_visited(origin);
        Self {
            grid,
            stack: vec![origin],
            carved: 0,
        }
    }

    /// Performs one step of the backtracker.
    /// Returns true if a wall was removed in this step.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let Some(&current) = self.stack.last() else {
            return false;
        };

        let neighbors: Vec<Cell> = Direction::ALL
            .iter()
            .filter_map(|dir| dir.step(current, self.grid.rows(), self.grid.cols()))
            .filter(|&cell| !self.grid.is_visited(cell))
            .collect();

        if neighbors.is_empty() {
            self.stack.pop();
            return false;
        }

        let next = neighbors[rng.gen_range(0..neighbors.len())];
        self.grid.remove_wall_between(current, next);
        self.grid.mark_visited(next);
        self.stack.push(next);
        self.carved += 1;
        true
    }

    /// Checks if maze generation is complete
    pub fn is_complete(&self) -> bool {
        self.stack.is_empty()
    }

    /// Generation progress as a ratio (0.0 to 1.0) of passages carved.
    pub fn get_progress_ratio(&self) -> f32 {
        let total = self.grid.rows() * self.grid.cols() - 1;
        if total == 0 {
            1.0
        } else {
            self.carved as f32 / total as f32
        }
    }

    /// Consumes the generator, returning the grid as carved so far.
    pub fn into_grid(self) -> WallGrid {
        self.grid
    }
}

/// Carves a complete perfect maze of the given size.
pub fn generate<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> WallGrid {
    let mut generator = MazeGenerator::new(rows, cols);
    while !generator.is_complete() {
        generator.step(rng);
    }
    generator.into_grid()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::solver::shortest_path;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    /// Flood fill over open passages from (0,0).
    fn reachable(grid: &WallGrid) -> HashSet<Cell> {
        let mut seen = HashSet::from([Cell::new(0, 0)]);
        let mut stack = vec![Cell::new(0, 0)];
        while let Some(cell) = stack.pop() {
            for next in grid.open_neighbors(cell) {
                if seen.insert(next) {
                    stack.push(next);
                }
            }
        }
        seen
    }

    /// A 1x1 grid finishes on the first step without carving anything.
    #[test]
    fn test_single_cell() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut generator = MazeGenerator::new(1, 1);
        assert!(!generator.step(&mut rng));
        assert!(generator.is_complete());
        assert_eq!(generator.get_progress_ratio(), 1.0);
        assert_eq!(generator.into_grid().removed_wall_count(), 0);
    }

    /// Every 2x2 carve removes exactly three walls and the corners are
    /// always three cells apart.
    #[test]
    fn test_two_by_two() {
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = generate(2, 2, &mut rng);
            assert_eq!(grid.removed_wall_count(), 3);
            let path = shortest_path(&grid, Cell::new(0, 0), Cell::new(1, 1));
            assert_eq!(path.len(), 3, "path {:?}", path);
        }
    }

    #[test]
    fn test_progress_reaches_one() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut generator = MazeGenerator::new(6, 4);
        let mut last = generator.get_progress_ratio();
        assert_eq!(last, 0.0);
        while !generator.is_complete() {
            generator.step(&mut rng);
            let progress = generator.get_progress_ratio();
            assert!(progress >= last);
            last = progress;
        }
        assert_eq!(last, 1.0);
    }

    /// Same seed, same maze.
    #[test]
    fn test_seed_is_reproducible() {
        let a = generate(12, 12, &mut StdRng::seed_from_u64(42));
        let b = generate(12, 12, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    proptest! {
        /// Carved mazes are spanning trees: R*C-1 passages, all cells reachable,
        /// and the exit is reachable from the start.
        #[test]
        fn test_generated_maze_is_spanning_tree(rows in 1usize..=30, cols in 1usize..=30, seed: u64) {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = generate(rows, cols, &mut rng);

            prop_assert_eq!(grid.removed_wall_count(), rows * cols - 1);
            prop_assert_eq!(reachable(&grid).len(), rows * cols);
            prop_assert!(grid.iter().all(|(_, c)| c.visited));

            let path = shortest_path(&grid, Cell::new(0, 0), Cell::new(rows - 1, cols - 1));
            prop_assert!(!path.is_empty());
            prop_assert_eq!(path[0], Cell::new(0, 0));
            prop_assert_eq!(*path.last().unwrap(), Cell::new(rows - 1, cols - 1));
        }

        /// Wall state is symmetric between every pair of neighbours.
        #[test]
        fn test_generated_walls_symmetric(rows in 1usize..=20, cols in 1usize..=20, seed: u64) {
            let grid = generate(rows, cols, &mut StdRng::seed_from_u64(seed));
            for (cell, _) in grid.iter() {
                for dir in Direction::ALL {
                    if let Some(next) = dir.step(cell, rows, cols) {
                        prop_assert_eq!(
                            grid.has_wall(cell, dir),
                            grid.has_wall(next, dir.opposite())
                        );
                    }
                }
            }
        }
    }
}
