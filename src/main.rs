//! Maze Runner: a 2D maze game.
//!
//! Carve a perfect maze with a randomized depth-first search, then walk from
//! the top-left cell to the exit in the bottom-right. The shortest route
//! can be shown in full or one step at a time, and a session clock counts
//! the seconds and cheers you on.
//!
//! - `maze/`: grids, carving and the breadth-first path finder
//! - `game/`: the session, its clock and key mapping
//! - `renderer/`: wgpu rectangles, glyphon text and the sidebar UI
//! - `app/`: winit event handling

#![warn(missing_docs)]
pub mod app;
pub mod config;
pub mod error;
pub mod game;
pub mod maze;
pub mod renderer;

use clap::Parser;
use config::{Args, GameConfig};
use error::Result;
use log::{error, info};
use winit::event_loop::EventLoop;

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let config = GameConfig::from_args(&args)?;
    info!(
        "Starting at level {} ({}x{} window)",
        config.difficulty.label(),
        config.window_width,
        config.window_height
    );

    let event_loop = EventLoop::new()?;
    let mut app = app::App::new(config);
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
