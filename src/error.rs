//! Error types for start-up and rendering.
//!
//! Game logic itself never fails: blocked moves, missing paths and unknown
//! levels are all handled in place. Everything here is about getting a
//! window and a GPU device, or reading configuration.

use crate::maze::open_grid::LayoutError;
use thiserror::Error;

/// Everything that can stop the game from starting or drawing.
#[derive(Error, Debug)]
pub enum GameError {
    /// The event loop could not be created or run.
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// The window could not be created.
    #[error("Window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    /// No surface for the window.
    #[error("Surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    /// No adapter can present to the surface.
    #[error("No suitable GPU adapter found")]
    AdapterNotFound,

    /// The adapter refused to create a device.
    #[error("Device creation failed: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),

    /// The surface reports no texture formats.
    #[error("Surface does not support any texture format")]
    UnsupportedSurface,

    /// A frame could not be acquired.
    #[error("Could not acquire frame: {0}")]
    Frame(#[from] wgpu::SurfaceError),

    /// Text could not be laid out or uploaded.
    #[error("Text rendering failed: {0}")]
    TextPrepare(#[from] glyphon::PrepareError),

    /// Text could not be drawn.
    #[error("Text rendering failed: {0}")]
    TextRender(#[from] glyphon::RenderError),

    /// A layout file could not be read.
    #[error("Could not read layout: {0}")]
    Io(#[from] std::io::Error),

    /// A layout file is malformed.
    #[error("Invalid layout: {0}")]
    Layout(#[from] LayoutError),
}

/// Result with [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;
