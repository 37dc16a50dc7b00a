//! Board scene construction.
//!
//! [`build_scene`] turns a [`GameState`] into the list of rectangles drawn
//! for the board. It only reads the state, so building twice from the same
//! state gives the same list. Draw order is back to front: board, walls or
//! blocked cells, exit, solution, hint, player.

use crate::game::GameState;
use crate::maze::grid::{WallGrid, Walls};
use crate::maze::open_grid::OpenGrid;
use crate::maze::{Cell, Layout, Passage};
use crate::renderer::rectangle::Rectangle;

const fn rgba(r: u8, g: u8, b: u8, a: f32) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a]
}

/// Colours used for the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Board background.
    pub board: [f32; 4],
    /// Wall segments.
    pub wall: [f32; 4],
    /// Blocked cells of a flat grid.
    pub blocked: [f32; 4],
    /// Exit ring.
    pub exit: [f32; 4],
    /// Exit cell fill.
    pub exit_fill: [f32; 4],
    /// Full solution path.
    pub solution: [f32; 4],
    /// Hint step.
    pub hint: [f32; 4],
    /// Player marker.
    pub player: [f32; 4],
    /// Ring around the player marker.
    pub player_outline: [f32; 4],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            board: rgba(15, 23, 42, 1.0),
            wall: rgba(217, 226, 236, 1.0),
            blocked: rgba(51, 65, 85, 1.0),
            exit: rgba(0, 212, 143, 1.0),
            exit_fill: rgba(0, 212, 143, 0.2),
            solution: rgba(255, 107, 107, 1.0),
            hint: rgba(255, 204, 102, 1.0),
            player: rgba(110, 168, 254, 1.0),
            player_outline: rgba(255, 255, 255, 1.0),
        }
    }
}

/// Screen region the board may occupy, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardArea {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Available width.
    pub width: f32,
    /// Available height.
    pub height: f32,
}

/// Square cells centred inside a [`BoardArea`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    /// Left edge of the board.
    pub origin_x: f32,
    /// Top edge of the board.
    pub origin_y: f32,
    /// Side of one square cell.
    pub cell_size: f32,
    /// Rows in the grid.
    pub rows: usize,
    /// Columns in the grid.
    pub cols: usize,
}

/// Space kept between the board edge and the area edge.
const MARGIN: f32 = 16.0;

impl BoardLayout {
    /// Largest square cell size that fits `rows` x `cols` in the area.
    pub fn fit(area: &BoardArea, rows: usize, cols: usize) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let usable_w = (area.width - 2.0 * MARGIN).max(1.0);
        let usable_h = (area.height - 2.0 * MARGIN).max(1.0);
        let cell_size = (usable_w / cols as f32).min(usable_h / rows as f32).floor().max(1.0);
        let board_w = cell_size * cols as f32;
        let board_h = cell_size * rows as f32;
        Self {
            origin_x: (area.x + (area.width - board_w) / 2.0).round(),
            origin_y: (area.y + (area.height - board_h) / 2.0).round(),
            cell_size,
            rows,
            cols,
        }
    }

    /// Board width in pixels.
    pub fn width(&self) -> f32 {
        self.cell_size * self.cols as f32
    }

    /// Board height in pixels.
    pub fn height(&self) -> f32 {
        self.cell_size * self.rows as f32
    }

    /// Top-left pixel of `cell`.
    pub fn cell_origin(&self, cell: Cell) -> (f32, f32) {
        (
            self.origin_x + cell.col as f32 * self.cell_size,
            self.origin_y + cell.row as f32 * self.cell_size,
        )
    }

    /// Pixel centre of `cell`.
    pub fn cell_center(&self, cell: Cell) -> (f32, f32) {
        let (x, y) = self.cell_origin(cell);
        (x + self.cell_size / 2.0, y + self.cell_size / 2.0)
    }

    fn wall_thickness(&self) -> f32 {
        (self.cell_size * 0.08).clamp(2.0, 4.0)
    }

    fn marker_radius(&self) -> f32 {
        (self.cell_size * 0.28).max(4.0)
    }
}

/// A bar between two cell centres that lie on one row or column, with
/// rounded ends.
fn segment(from: (f32, f32), to: (f32, f32), thickness: f32, color: [f32; 4]) -> Rectangle {
    let half = thickness / 2.0;
    let left = from.0.min(to.0) - half;
    let top = from.1.min(to.1) - half;
    let width = (from.0 - to.0).abs() + thickness;
    let height = (from.1 - to.1).abs() + thickness;
    Rectangle::new(left, top, width, height, color).with_corner_radius(half)
}

fn push_walls(out: &mut Vec<Rectangle>, grid: &WallGrid, board: &BoardLayout, color: [f32; 4]) {
    let t = board.wall_thickness();
    let s = board.cell_size;
    for (cell, walled) in grid.iter() {
        let (x, y) = board.cell_origin(cell);
        // Shared walls are stored on both sides; draw each edge once.
        if walled.walls.contains(Walls::TOP) {
            out.push(Rectangle::new(x - t / 2.0, y - t / 2.0, s + t, t, color));
        }
        if walled.walls.contains(Walls::LEFT) {
            out.push(Rectangle::new(x - t / 2.0, y - t / 2.0, t, s + t, color));
        }
        if cell.col + 1 == grid.cols() && walled.walls.contains(Walls::RIGHT) {
            out.push(Rectangle::new(x + s - t / 2.0, y - t / 2.0, t, s + t, color));
        }
        if cell.row + 1 == grid.rows() && walled.walls.contains(Walls::BOTTOM) {
            out.push(Rectangle::new(x - t / 2.0, y + s - t / 2.0, s + t, t, color));
        }
    }
}

fn push_blocked(out: &mut Vec<Rectangle>, grid: &OpenGrid, board: &BoardLayout, color: [f32; 4]) {
    let inset = 1.0;
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let cell = Cell::new(row, col);
            if !grid.is_open(cell) {
                let (x, y) = board.cell_origin(cell);
                out.push(
                    Rectangle::new(
                        x + inset,
                        y + inset,
                        board.cell_size - 2.0 * inset,
                        board.cell_size - 2.0 * inset,
                        color,
                    )
                    .with_corner_radius(3.0),
                );
            }
        }
    }
}

/// Ring: outline disc, board-coloured hole, translucent fill.
fn push_ring(
    out: &mut Vec<Rectangle>,
    center: (f32, f32),
    radius: f32,
    stroke: f32,
    outline: [f32; 4],
    hole: [f32; 4],
    fill: [f32; 4],
) {
    out.push(Rectangle::circle(center.0, center.1, radius, outline));
    out.push(Rectangle::circle(center.0, center.1, radius - stroke, hole));
    out.push(Rectangle::circle(center.0, center.1, radius - stroke, fill));
}

/// Board geometry for `game` inside `area`. The board keeps the size of
/// the selected level even when no grid is loaded.
pub fn board_layout(game: &GameState, area: &BoardArea) -> BoardLayout {
    match game.layout() {
        Some(layout) => BoardLayout::fit(area, layout.rows(), layout.cols()),
        None => {
            let side = game.difficulty().side();
            BoardLayout::fit(area, side, side)
        }
    }
}

/// All rectangles for the board, back to front.
pub fn build_scene(game: &GameState, area: &BoardArea, palette: &Palette) -> Vec<Rectangle> {
    let board = board_layout(game, area);
    let mut out = Vec::new();

    out.push(
        Rectangle::new(
            board.origin_x - MARGIN / 2.0,
            board.origin_y - MARGIN / 2.0,
            board.width() + MARGIN,
            board.height() + MARGIN,
            palette.board,
        )
        .with_corner_radius(8.0),
    );

    let Some(layout) = game.layout() else {
        return out;
    };

    match layout {
        Layout::Walled(grid) => push_walls(&mut out, grid, &board, palette.wall),
        Layout::Open(grid) => push_blocked(&mut out, grid, &board, palette.blocked),
    }

    let radius = board.marker_radius();
    push_ring(
        &mut out,
        board.cell_center(game.target()),
        radius,
        2.0,
        palette.exit,
        palette.board,
        palette.exit_fill,
    );

    if game.is_solution_shown() {
        let thickness = (board.cell_size * 0.1).clamp(2.0, 4.0);
        let path = game.solution_path();
        for pair in path.windows(2) {
            out.push(segment(
                board.cell_center(pair[0]),
                board.cell_center(pair[1]),
                thickness,
                palette.solution,
            ));
        }
    }

    if let Some((from, to)) = game.hint_segment() {
        let thickness = (board.cell_size * 0.14).clamp(3.0, 6.0);
        out.push(segment(
            board.cell_center(from),
            board.cell_center(to),
            thickness,
            palette.hint,
        ));
    }

    let center = board.cell_center(game.player());
    out.push(Rectangle::circle(center.0, center.1, radius, palette.player_outline));
    out.push(Rectangle::circle(center.0, center.1, radius - 1.5, palette.player));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Difficulty, GameConfig, MazeSource};
    use crate::maze::Direction;
    use std::time::Instant;

    const AREA: BoardArea = BoardArea {
        x: 0.0,
        y: 0.0,
        width: 800.0,
        height: 600.0,
    };

    fn started(seed: u64, source: MazeSource) -> GameState {
        let mut game = GameState::new(GameConfig {
            seed: Some(seed),
            source,
            ..GameConfig::default()
        });
        game.start(Difficulty::Easy, Instant::now());
        game
    }

    fn count_color(scene: &[Rectangle], color: [f32; 4]) -> usize {
        scene.iter().filter(|r| r.color == color).count()
    }

    #[test]
    fn test_fit_is_square_and_centered() {
        let board = BoardLayout::fit(&AREA, 12, 12);
        assert_eq!(board.cell_size, 47.0);
        assert!(board.width() <= AREA.width - 2.0 * MARGIN);
        assert!(board.height() <= AREA.height - 2.0 * MARGIN);
        assert_eq!(board.origin_x, ((800.0 - board.width()) / 2.0_f32).round());
        assert_eq!(board.cell_center(Cell::new(0, 0)), (board.origin_x + 23.5, board.origin_y + 23.5));
    }

    /// Building from the same state twice gives identical output.
    #[test]
    fn test_scene_is_idempotent() {
        let mut game = started(8, MazeSource::Carved);
        game.toggle_solution();
        game.hint();
        let palette = Palette::default();
        let first = build_scene(&game, &AREA, &palette);
        let second = build_scene(&game, &AREA, &palette);
        assert_eq!(first, second);
        assert!(game.is_solution_shown());
        assert!(game.hint_segment().is_some());
    }

    #[test]
    fn test_empty_board_before_start() {
        let game = GameState::new(GameConfig::default());
        let scene = build_scene(&game, &AREA, &Palette::default());
        assert_eq!(scene.len(), 1);
    }

    /// Each remaining wall edge is drawn exactly once.
    #[test]
    fn test_wall_rectangles_match_grid() {
        let game = started(21, MazeSource::Carved);
        let palette = Palette::default();
        let scene = build_scene(&game, &AREA, &palette);

        // 12x12 spanning tree: 264 interior edges, 143 carved, 48 boundary.
        assert_eq!(count_color(&scene, palette.wall), 264 - 143 + 48);
    }

    #[test]
    fn test_blocked_cells_for_flat_grid() {
        let game = started(1, MazeSource::Fixed(OpenGrid::classic()));
        let palette = Palette::default();
        let scene = build_scene(&game, &AREA, &palette);
        let blocked = crate::maze::open_grid::CLASSIC_LAYOUT
            .iter()
            .flatten()
            .filter(|&&v| v != 0)
            .count();
        assert_eq!(count_color(&scene, palette.blocked), blocked);
        assert_eq!(count_color(&scene, palette.wall), 0);
    }

    #[test]
    fn test_overlays_follow_state() {
        let mut game = started(1, MazeSource::Fixed(OpenGrid::classic()));
        let palette = Palette::default();

        let plain = build_scene(&game, &AREA, &palette);
        assert_eq!(count_color(&plain, palette.solution), 0);
        assert_eq!(count_color(&plain, palette.hint), 0);

        game.toggle_solution();
        let solved = build_scene(&game, &AREA, &palette);
        let path_len = game.solution_path().len();
        assert_eq!(count_color(&solved, palette.solution), path_len - 1);

        game.hint();
        assert_eq!(count_color(&build_scene(&game, &AREA, &palette), palette.hint), 1);
        game.move_player(Direction::Down);
        assert_eq!(count_color(&build_scene(&game, &AREA, &palette), palette.hint), 0);
    }

    /// The player marker is the last rectangle and sits on the player cell.
    #[test]
    fn test_player_marker_position() {
        let mut game = started(1, MazeSource::Fixed(OpenGrid::classic()));
        game.move_player(Direction::Down);
        let scene = build_scene(&game, &AREA, &Palette::default());
        let board = board_layout(&game, &AREA);
        let marker = scene.last().unwrap();
        let (cx, cy) = board.cell_center(Cell::new(1, 0));
        assert!(marker.contains_point(cx, cy));
        assert!((marker.x + marker.width / 2.0 - cx).abs() < 1e-3);
    }

    #[test]
    fn test_segment_spans_centers() {
        let bar = segment((10.0, 20.0), (50.0, 20.0), 4.0, [1.0; 4]);
        assert_eq!((bar.x, bar.y, bar.width, bar.height), (8.0, 18.0, 44.0, 4.0));
        let bar = segment((10.0, 60.0), (10.0, 20.0), 4.0, [1.0; 4]);
        assert_eq!((bar.x, bar.y, bar.width, bar.height), (8.0, 18.0, 4.0, 44.0));
    }
}
