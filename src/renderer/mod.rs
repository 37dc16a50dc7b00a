//! Rendering: a 2D rectangle pipeline, glyphon text, the maze scene and the
//! sidebar UI, tied together by [`wgpu_lib::WgpuRenderer`].

/// Rounded rectangle batching and pipeline.
pub mod rectangle;
/// Maze board to rectangles.
pub mod scene;
/// Text rendering system.
pub mod text;
/// Sidebar controls and HUD.
pub mod ui;
/// Surface, device and frame orchestration.
pub mod wgpu_lib;
