//! Game session management.
//!
//! [`GameState`] owns everything one play session needs: the grid, the
//! player and exit cells, overlay flags, the status line and the session
//! clock. Every player action is a method here; the app layer only routes
//! input and renders what it finds.

pub mod clock;
pub mod keys;

use self::clock::{ClockEvent, SessionClock, Toast};
use self::keys::GameKey;
use crate::config::{Difficulty, GameConfig, MazeSource};
use crate::maze::generator::generate;
use crate::maze::solver::{next_step, shortest_path};
use crate::maze::{Cell, Direction, Layout, Passage};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

/// Status after reaching the exit unaided.
pub const WIN_MESSAGE: &str = "Congratulations! You reached the destination!";
/// Status after reaching the exit once the solution has been shown.
pub const ASSISTED_WIN_MESSAGE: &str = "Finished (solution was shown). Try again without it!";
/// Status after leaving a session.
pub const EXIT_MESSAGE: &str = "Game exited.";

/// Result of a move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No session running; nothing changed.
    Inactive,
    /// A wall or blocked cell is in the way.
    Blocked,
    /// The player stepped to a neighbouring cell.
    Moved,
    /// The move reached the exit and ended the session.
    Won {
        /// The solution was shown at some point this session.
        assisted: bool,
    },
}

/// How the status line should be coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    /// A finished session.
    Win,
    /// Neutral information.
    Muted,
}

/// Text and colour for the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    /// Message shown.
    pub message: &'static str,
    /// Colour to show it in.
    pub tone: StatusTone,
}

/// The entire mutable state of the game.
pub struct GameState {
    config: GameConfig,
    difficulty: Difficulty,
    /// Current grid; `None` before the first start and after exit.
    layout: Option<Layout>,
    player: Cell,
    target: Cell,
    active: bool,
    show_solution: bool,
    /// Set once the solution is shown; cleared only by start and exit.
    used_solution: bool,
    hint: Option<(Cell, Cell)>,
    status: Option<Status>,
    toast: Option<Toast>,
    clock: Option<SessionClock>,
    elapsed_secs: u64,
    rng: StdRng,
}

impl GameState {
    /// An idle session; nothing is on the board until [`GameState::start`].
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            difficulty: config.difficulty,
            config,
            layout: None,
            player: Cell::default(),
            target: Cell::default(),
            active: false,
            show_solution: false,
            used_solution: false,
            hint: None,
            status: None,
            toast: None,
            clock: None,
            elapsed_secs: 0,
            rng,
        }
    }

    /// Starts a fresh session at the given difficulty.
    pub fn start(&mut self, difficulty: Difficulty, now: Instant) {
        self.difficulty = difficulty;
        self.build_layout();
        self.show_solution = false;
        self.used_solution = false;
        self.hint = None;
        self.status = None;
        self.toast = None;
        self.active = true;

        // The previous clock must be gone before the new one exists.
        self.clock = None;
        self.elapsed_secs = 0;
        let clock_rng = StdRng::seed_from_u64(self.rng.r#gen());
        self.clock = Some(SessionClock::start(now, self.config.cheer_interval, clock_rng));

        info!(
            "Started {} session on a {}x{} grid",
            self.level_label(),
            self.rows(),
            self.cols()
        );
    }

    /// Fresh grid for the current difficulty, player back at the start.
    fn build_layout(&mut self) {
        let layout = match &self.config.source {
            MazeSource::Carved => {
                let side = self.difficulty.side();
                Layout::Walled(generate(side, side, &mut self.rng))
            }
            MazeSource::Fixed(grid) => Layout::Open(grid.clone()),
        };
        self.player = layout.start();
        self.target = layout.target();
        self.layout = Some(layout);
    }

    /// Attempts one step. Any attempt clears the hint.
    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        if !self.active {
            return MoveOutcome::Inactive;
        }
        self.hint = None;

        let Some(layout) = &self.layout else {
            return MoveOutcome::Inactive;
        };
        if !layout.can_move(self.player, direction) {
            trace!("Blocked moving {} from {:?}", direction.label(), self.player);
            return MoveOutcome::Blocked;
        }
        let Some(next) = direction.step(self.player, layout.rows(), layout.cols()) else {
            return MoveOutcome::Blocked;
        };
        self.player = next;
        debug!("Moved {} to {:?}", direction.label(), next);

        if self.player == self.target {
            return self.finish();
        }
        MoveOutcome::Moved
    }

    fn finish(&mut self) -> MoveOutcome {
        self.active = false;
        self.clock = None;
        let assisted = self.used_solution;
        self.status = Some(if assisted {
            Status {
                message: ASSISTED_WIN_MESSAGE,
                tone: StatusTone::Muted,
            }
        } else {
            Status {
                message: WIN_MESSAGE,
                tone: StatusTone::Win,
            }
        });
        info!(
            "Reached the exit in {}s (assisted: {})",
            self.elapsed_secs, assisted
        );
        MoveOutcome::Won { assisted }
    }

    /// Shows or hides the full solution. Showing marks the session as assisted.
    pub fn toggle_solution(&mut self) {
        if !self.active {
            return;
        }
        self.show_solution = !self.show_solution;
        if self.show_solution {
            self.used_solution = true;
        }
        self.hint = None;
    }

    /// Highlights the first step of the shortest route to the exit.
    pub fn hint(&mut self) {
        if !self.active {
            return;
        }
        if let Some(layout) = &self.layout {
            if let Some(segment) = next_step(layout, self.player, self.target) {
                self.hint = Some(segment);
            }
        }
    }

    /// New grid of the same size; flags and clock carry over.
    pub fn regenerate(&mut self, now: Instant) {
        if !self.active {
            self.start(self.difficulty, now);
            return;
        }
        self.build_layout();
        self.hint = None;
        info!("Regenerated a {}x{} grid", self.rows(), self.cols());
    }

    /// Ends the session without a win and clears the board.
    pub fn exit(&mut self) {
        self.active = false;
        self.clock = None;
        self.layout = None;
        self.elapsed_secs = 0;
        self.show_solution = false;
        self.used_solution = false;
        self.hint = None;
        self.toast = None;
        self.status = Some(Status {
            message: EXIT_MESSAGE,
            tone: StatusTone::Muted,
        });
        info!("Game exited");
    }

    /// Records the difficulty used by the next start.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        debug!("Selected level {}", difficulty.label());
    }

    /// Applies one key or button action.
    pub fn handle_key(&mut self, key: GameKey, now: Instant) {
        match key {
            GameKey::Move(direction) => {
                self.move_player(direction);
            }
            GameKey::Start => self.start(self.difficulty, now),
            GameKey::ToggleSolution => self.toggle_solution(),
            GameKey::Hint => self.hint(),
            GameKey::NewShape => self.regenerate(now),
            GameKey::Exit => self.exit(),
            GameKey::CycleLevel => self.select_difficulty(self.difficulty.next()),
            GameKey::SetLevel(difficulty) => self.select_difficulty(difficulty),
        }
    }

    /// Advances the session clock. Returns true when something visible
    /// changed.
    pub fn update(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if let Some(clock) = &mut self.clock {
            for event in clock.poll(now) {
                match event {
                    ClockEvent::Tick(secs) => self.elapsed_secs = secs,
                    ClockEvent::Cheer(message) => {
                        self.toast = Some(Toast::new(message, now, self.config.toast_duration));
                    }
                }
                changed = true;
            }
        }
        if self.toast.as_ref().is_some_and(|t| !t.is_visible(now)) {
            self.toast = None;
            changed = true;
        }
        changed
    }

    /// Full route from the player to the exit; empty when there is none.
    pub fn solution_path(&self) -> Vec<Cell> {
        match &self.layout {
            Some(layout) => shortest_path(layout, self.player, self.target),
            None => Vec::new(),
        }
    }

    /// Current grid, `None` before the first start and after exit.
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Player cell.
    pub fn player(&self) -> Cell {
        self.player
    }

    /// Exit cell.
    pub fn target(&self) -> Cell {
        self.target
    }

    /// Whether moves are accepted.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the solution overlay is on.
    pub fn is_solution_shown(&self) -> bool {
        self.show_solution
    }

    /// Whether the solution was shown at any point this session.
    pub fn used_solution(&self) -> bool {
        self.used_solution
    }

    /// Current hint step, from the player to the next cell.
    pub fn hint_segment(&self) -> Option<(Cell, Cell)> {
        self.hint
    }

    /// One-shot status line after a win or exit.
    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// The toast message, if one is still on screen at `now`.
    pub fn toast(&self, now: Instant) -> Option<&str> {
        self.toast
            .as_ref()
            .filter(|t| t.is_visible(now))
            .map(|t| t.message.as_str())
    }

    /// Whether the session clock is running.
    pub fn has_clock(&self) -> bool {
        self.clock.is_some()
    }

    /// Seconds shown on the timer.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Difficulty the next start uses.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Level name for display; fixed layouts have no level.
    pub fn level_label(&self) -> String {
        match self.config.source {
            MazeSource::Carved => self.difficulty.label(),
            MazeSource::Fixed(_) => "Fixed layout".to_string(),
        }
    }

    /// Whether the grid size follows the selected difficulty.
    pub fn has_selectable_level(&self) -> bool {
        matches!(self.config.source, MazeSource::Carved)
    }

    fn rows(&self) -> usize {
        self.layout.as_ref().map_or(0, |l| l.rows())
    }

    fn cols(&self) -> usize {
        self.layout.as_ref().map_or(0, |l| l.cols())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::open_grid::OpenGrid;
    use std::time::Duration;

    fn seeded(seed: u64) -> GameState {
        GameState::new(GameConfig {
            seed: Some(seed),
            ..GameConfig::default()
        })
    }

    fn classic() -> GameState {
        GameState::new(GameConfig {
            seed: Some(1),
            source: MazeSource::Fixed(OpenGrid::classic()),
            ..GameConfig::default()
        })
    }

    /// Walks the shortest path to the exit, returning the last outcome.
    fn walk_to_exit(game: &mut GameState) -> MoveOutcome {
        let path = game.solution_path();
        let mut outcome = MoveOutcome::Inactive;
        for pair in path.windows(2) {
            let dir = Direction::between(pair[0], pair[1]).unwrap();
            outcome = game.move_player(dir);
        }
        outcome
    }

    #[test]
    fn test_start_resets_session() {
        let mut game = seeded(3);
        let now = Instant::now();
        assert!(!game.is_active());
        game.start(Difficulty::Medium, now);

        assert!(game.is_active());
        assert!(game.has_clock());
        assert_eq!(game.elapsed_secs(), 0);
        assert_eq!(game.player(), Cell::new(0, 0));
        assert_eq!(game.target(), Cell::new(17, 17));
        assert_eq!(game.layout().map(|l| l.rows()), Some(18));
        assert!(!game.is_solution_shown());
        assert!(game.status().is_none());
    }

    /// Moves into walls leave the player in place; open moves change one
    /// coordinate by one.
    #[test]
    fn test_move_validation() {
        let mut game = seeded(11);
        game.start(Difficulty::Easy, Instant::now());
        for _ in 0..200 {
            let before = game.player();
            let dir = Direction::ALL[game.rng.gen_range(0..4)];
            let allowed = game.layout().unwrap().can_move(before, dir);
            match game.move_player(dir) {
                MoveOutcome::Blocked => {
                    assert!(!allowed);
                    assert_eq!(game.player(), before);
                }
                MoveOutcome::Moved | MoveOutcome::Won { .. } => {
                    assert!(allowed);
                    assert_eq!(before.manhattan(game.player()), 1);
                }
                MoveOutcome::Inactive => break,
            }
        }
    }

    #[test]
    fn test_inactive_actions_are_noops() {
        let mut game = seeded(1);
        assert_eq!(game.move_player(Direction::Down), MoveOutcome::Inactive);
        game.toggle_solution();
        game.hint();
        assert!(!game.is_solution_shown());
        assert!(!game.used_solution());
        assert!(game.hint_segment().is_none());
        assert!(game.layout().is_none());
    }

    /// Repeated hints give the same adjacent step; moving clears it.
    #[test]
    fn test_hint_is_stable_until_move() {
        let mut game = classic();
        game.start(Difficulty::Easy, Instant::now());
        game.hint();
        let first = game.hint_segment().unwrap();
        game.hint();
        assert_eq!(game.hint_segment(), Some(first));
        assert_eq!(first.0, game.player());
        assert_eq!(first.0.manhattan(first.1), 1);

        game.move_player(Direction::Right);
        assert!(game.hint_segment().is_none());
    }

    #[test]
    fn test_unassisted_win() {
        let mut game = classic();
        game.start(Difficulty::Easy, Instant::now());
        assert_eq!(walk_to_exit(&mut game), MoveOutcome::Won { assisted: false });
        assert!(!game.is_active());
        assert!(!game.has_clock());
        assert_eq!(game.player(), Cell::new(9, 8));
        assert_eq!(game.status().unwrap().message, WIN_MESSAGE);
        assert_eq!(game.move_player(Direction::Up), MoveOutcome::Inactive);
    }

    /// Showing the solution once marks the win as assisted even if hidden
    /// again; a new start clears it.
    #[test]
    fn test_assisted_flag_is_sticky() {
        let mut game = classic();
        let now = Instant::now();
        game.start(Difficulty::Easy, now);
        game.toggle_solution();
        game.toggle_solution();
        assert!(!game.is_solution_shown());
        assert!(game.used_solution());
        assert_eq!(walk_to_exit(&mut game), MoveOutcome::Won { assisted: true });
        assert_eq!(game.status().unwrap().message, ASSISTED_WIN_MESSAGE);

        game.start(Difficulty::Easy, now);
        assert!(!game.used_solution());
        assert_eq!(walk_to_exit(&mut game), MoveOutcome::Won { assisted: false });
    }

    #[test]
    fn test_regenerate_keeps_flags_and_clock() {
        let mut game = seeded(5);
        let t0 = Instant::now();
        game.start(Difficulty::Easy, t0);
        game.toggle_solution();
        game.update(t0 + Duration::from_secs(4));
        game.hint();

        game.regenerate(t0 + Duration::from_secs(4));
        assert!(game.is_solution_shown());
        assert!(game.used_solution());
        assert!(game.hint_segment().is_none());
        assert_eq!(game.player(), Cell::new(0, 0));
        assert_eq!(game.layout().map(|l| l.rows()), Some(12));
        assert_eq!(game.elapsed_secs(), 4);
        game.update(t0 + Duration::from_secs(5));
        assert_eq!(game.elapsed_secs(), 5);
    }

    #[test]
    fn test_regenerate_when_inactive_starts() {
        let mut game = seeded(5);
        game.select_difficulty(Difficulty::Hard);
        game.regenerate(Instant::now());
        assert!(game.is_active());
        assert_eq!(game.layout().map(|l| l.cols()), Some(26));
    }

    #[test]
    fn test_exit_clears_everything() {
        let mut game = seeded(9);
        let t0 = Instant::now();
        game.start(Difficulty::Easy, t0);
        game.toggle_solution();
        game.update(t0 + Duration::from_secs(7));
        game.exit();

        assert!(!game.is_active());
        assert!(!game.has_clock());
        assert!(game.layout().is_none());
        assert_eq!(game.elapsed_secs(), 0);
        assert!(!game.is_solution_shown());
        assert!(!game.used_solution());
        assert_eq!(game.status().unwrap().message, EXIT_MESSAGE);
        assert!(!game.update(t0 + Duration::from_secs(60)));
        assert_eq!(game.elapsed_secs(), 0);
    }

    /// Restarting mid-session starts the timer from zero.
    #[test]
    fn test_restart_resets_clock() {
        let mut game = seeded(2);
        let t0 = Instant::now();
        game.start(Difficulty::Easy, t0);
        game.update(t0 + Duration::from_secs(10));
        assert_eq!(game.elapsed_secs(), 10);

        let t1 = t0 + Duration::from_secs(10);
        game.start(Difficulty::Easy, t1);
        assert_eq!(game.elapsed_secs(), 0);
        game.update(t1 + Duration::from_secs(1));
        assert_eq!(game.elapsed_secs(), 1);
    }

    /// A cheer shows a toast that disappears after the toast duration.
    #[test]
    fn test_cheer_toast() {
        let mut game = seeded(4);
        let t0 = Instant::now();
        game.start(Difficulty::Easy, t0);
        let t30 = t0 + Duration::from_secs(30);
        assert!(game.update(t30));
        assert!(game.toast(t30).is_some());
        assert!(game.toast(t0 + Duration::from_secs(32)).is_some());
        assert!(game.update(t0 + Duration::from_secs(33)));
        assert!(game.toast(t0 + Duration::from_secs(33)).is_none());
    }

    #[test]
    fn test_level_keys() {
        let mut game = seeded(1);
        let now = Instant::now();
        game.handle_key(GameKey::CycleLevel, now);
        assert_eq!(game.difficulty(), Difficulty::Medium);
        game.handle_key(GameKey::SetLevel(Difficulty::Hard), now);
        game.handle_key(GameKey::Start, now);
        assert_eq!(game.layout().map(|l| l.rows()), Some(26));
        game.handle_key(GameKey::Exit, now);
        assert!(!game.is_active());
    }
}
