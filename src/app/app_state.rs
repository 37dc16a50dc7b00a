//! State for a running window: GPU resources and the game session.

use crate::config::GameConfig;
use crate::error::Result;
use crate::game::GameState;
use crate::game::keys::GameKey;
use crate::renderer::wgpu_lib::WgpuRenderer;
use log::debug;
use std::time::Instant;

/// Renderer and game session for one window.
pub struct AppState {
    /// Surface, device and every pipeline.
    pub wgpu_renderer: WgpuRenderer,
    /// The running maze session.
    pub game_state: GameState,
}

impl AppState {
    /// Builds the renderer for `surface` and a fresh session from `config`.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        config: GameConfig,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let wgpu_renderer = WgpuRenderer::new(instance, surface, width, height).await?;
        Ok(Self {
            wgpu_renderer,
            game_state: GameState::new(config),
        })
    }

    /// Resizes the surface and lays the UI out again.
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        self.wgpu_renderer.resize(width, height);
    }

    /// Routes a keyboard or button action to the session.
    pub fn apply(&mut self, key: GameKey, now: Instant) {
        debug!("Action: {:?}", key);
        self.game_state.handle_key(key, now);
    }
}
