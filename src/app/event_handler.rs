//! The [`App`] struct and its winit event handling.

use crate::app::app_state::AppState;
use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::game::keys::winit_key_to_game_key;
use log::{error, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow},
    window::{Window, WindowId},
};

/// How often the event loop wakes to poll the session clock.
const CLOCK_POLL: Duration = Duration::from_millis(100);

/// Application handler.
///
/// `state` and `window` stay `None` until the first `resumed` call creates
/// them. A start-up failure is kept in `error` and the loop exits.
pub struct App {
    /// The WGPU instance surfaces are created from.
    pub instance: wgpu::Instance,
    /// Settings passed to every new session.
    pub config: GameConfig,
    /// Renderer and session, `None` until the window exists.
    pub state: Option<AppState>,
    /// The application window, `None` until `resumed`.
    pub window: Option<Arc<Window>>,
    /// Start-up failure that ended the loop.
    pub error: Option<GameError>,
}

impl App {
    /// Creates an [`App`] with a default WGPU instance.
    pub fn new(config: GameConfig) -> Self {
        Self {
            instance: wgpu::Instance::new(&wgpu::InstanceDescriptor::default()),
            config,
            state: None,
            window: None,
            error: None,
        }
    }

    /// Creates the surface and every renderer for `window`.
    pub async fn set_window(&mut self, window: Window) -> Result<()> {
        let window = Arc::new(window);
        let size = window.inner_size();
        let surface = self.instance.create_surface(window.clone())?;

        let state = AppState::new(
            &self.instance,
            surface,
            self.config.clone(),
            size.width,
            size.height,
        )
        .await?;

        window.request_redraw();
        self.window = Some(window);
        self.state = Some(state);
        Ok(())
    }

    /// Resizes the surface, ignoring zero-sized windows.
    pub fn handle_resized(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if let Some(state) = &mut self.state {
            state.resize_surface(width, height);
        }
        self.request_redraw();
    }

    /// Asks winit for a redraw if the window exists.
    pub fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    /// Returns the start-up error, if one ended the loop.
    pub fn take_error(&mut self) -> Option<GameError> {
        self.error.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: GameError) {
        error!("{}", err);
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title("Maze Runner")
            .with_inner_size(PhysicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => window,
            Err(err) => return self.fail(event_loop, err.into()),
        };
        if let Err(err) = pollster::block_on(self.set_window(window)) {
            self.fail(event_loop, err);
            return;
        }
        info!("Window ready");
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.handle_resized(size.width, size.height),
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.handle_redraw() {
                    warn!("Frame skipped: {}", err);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat,
                        ..
                    },
                ..
            } => {
                if let Some(key) = winit_key_to_game_key(&logical_key) {
                    if !repeat || key.repeats() {
                        state.apply(key, Instant::now());
                        self.request_redraw();
                    }
                }
            }
            WindowEvent::CursorMoved { .. } | WindowEvent::MouseInput { .. } => {
                if let Some(key) = state.wgpu_renderer.control_panel.handle_input(&event) {
                    state.apply(key, Instant::now());
                }
                // Hover colours follow the pointer.
                self.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.tick(Instant::now()) {
            self.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + CLOCK_POLL));
    }
}
