//! Command line configuration.
//!
//! [`Args`] is what the user types; [`GameConfig`] is what the game runs
//! with. Difficulty parsing is lenient: an unknown level falls
//! back to the default grid size instead of failing.

use crate::error::Result;
use crate::maze::open_grid::OpenGrid;
use clap::{Parser, ValueEnum};
use log::warn;
use std::path::PathBuf;
use std::time::Duration;

/// Largest side length accepted for a numeric level.
pub const MAX_SIDE: usize = 30;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(author, version, about = "Find your way out of a randomly carved maze", long_about = None)]
pub struct Args {
    /// Difficulty: easy, medium, hard, 1-3, or a side length up to 30
    #[arg(short, long, default_value = "easy")]
    pub level: String,

    /// Seed for maze carving and encouragement messages
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Which kind of maze to play
    #[arg(long, value_enum, default_value_t = LayoutChoice::Carved)]
    pub layout: LayoutChoice,

    /// Flat grid layout file (`#`/`1` blocked, `.`/`0`/space open, `S` start, `E` exit)
    #[arg(long)]
    pub layout_file: Option<PathBuf>,

    /// Seconds between encouragement messages
    #[arg(long, default_value = "30")]
    pub cheer_interval: u64,

    /// Seconds a toast message stays on screen
    #[arg(long, default_value = "3")]
    pub toast_secs: u64,

    /// Initial window width
    #[arg(short = 'W', long, default_value = "1280")]
    pub width: u32,

    /// Initial window height
    #[arg(short = 'H', long, default_value = "800")]
    pub height: u32,
}

/// Maze source selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutChoice {
    /// Randomly carved perfect maze sized by the level
    Carved,
    /// Built-in flat practice grid
    Classic,
}

/// Grid size preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Difficulty {
    /// 12x12
    #[default]
    Easy,
    /// 18x18
    Medium,
    /// 26x26
    Hard,
    /// Explicit side length
    Custom(usize),
}

impl Difficulty {
    /// Maps a level name or number to a difficulty.
    ///
    /// Accepts `easy`/`medium`/`hard` (any case), `1`-`3`, or a side length
    /// between 4 and [`MAX_SIDE`]. Anything else yields the default.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim().to_ascii_lowercase();
        match name.as_str() {
            "easy" | "1" => Difficulty::Easy,
            "medium" | "2" => Difficulty::Medium,
            "hard" | "3" => Difficulty::Hard,
            other => match other.parse::<usize>() {
                Ok(side) if (4..=MAX_SIDE).contains(&side) => Difficulty::Custom(side),
                _ => {
                    warn!("Unknown level '{}', using {:?}", name, Difficulty::default());
                    Difficulty::default()
                }
            },
        }
    }

    /// Grid side length for this difficulty.
    pub fn side(self) -> usize {
        match self {
            Difficulty::Easy => 12,
            Difficulty::Medium => 18,
            Difficulty::Hard => 26,
            Difficulty::Custom(side) => side,
        }
    }

    /// The next preset, wrapping around; custom sizes go back to easy.
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard | Difficulty::Custom(_) => Difficulty::Easy,
        }
    }

    /// Display name, e.g. `Easy` or `20x20`.
    pub fn label(self) -> String {
        match self {
            Difficulty::Easy => "Easy".to_string(),
            Difficulty::Medium => "Medium".to_string(),
            Difficulty::Hard => "Hard".to_string(),
            Difficulty::Custom(side) => format!("{side}x{side}"),
        }
    }
}

/// Where the session's grid comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum MazeSource {
    /// Carve a fresh maze sized by the difficulty
    Carved,
    /// Play on a fixed flat grid
    Fixed(OpenGrid),
}

/// Settings the game runs with.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Level used by the first start.
    pub difficulty: Difficulty,
    /// Seed for every random choice; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Carved mazes or a fixed flat grid.
    pub source: MazeSource,
    /// Time between encouragement messages.
    pub cheer_interval: Duration,
    /// How long a toast stays on screen.
    pub toast_duration: Duration,
    /// Initial window width in pixels.
    pub window_width: u32,
    /// Initial window height in pixels.
    pub window_height: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            seed: None,
            source: MazeSource::Carved,
            cheer_interval: Duration::from_secs(30),
            toast_duration: Duration::from_secs(3),
            window_width: 1280,
            window_height: 800,
        }
    }
}

impl GameConfig {
    /// Resolves command line arguments, reading the layout file if given.
    pub fn from_args(args: &Args) -> Result<Self> {
        let source = match (&args.layout_file, args.layout) {
            (Some(path), _) => {
                let text = std::fs::read_to_string(path)?;
                MazeSource::Fixed(OpenGrid::parse(&text)?)
            }
            (None, LayoutChoice::Classic) => MazeSource::Fixed(OpenGrid::classic()),
            (None, LayoutChoice::Carved) => MazeSource::Carved,
        };

        Ok(Self {
            difficulty: Difficulty::from_name(&args.level),
            seed: args.seed,
            source,
            cheer_interval: Duration::from_secs(args.cheer_interval.max(1)),
            toast_duration: Duration::from_secs(args.toast_secs),
            window_width: args.width.max(320),
            window_height: args.height.max(240),
        })
    }
}
