//! Per-iteration work for [`App`]: advancing the clock and drawing.

use crate::error::Result;
use std::time::Instant;

use super::event_handler::App;

impl App {
    /// Polls the session clock. Returns true when a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.state
            .as_mut()
            .is_some_and(|state| state.game_state.update(now))
    }

    /// Draws the current frame. Skipped while minimized.
    pub fn handle_redraw(&mut self) -> Result<()> {
        let (Some(window), Some(state)) = (self.window.as_ref(), self.state.as_mut()) else {
            return Ok(());
        };
        if window.is_minimized().unwrap_or(false) {
            return Ok(());
        }
        state
            .wgpu_renderer
            .render_frame(&state.game_state, Instant::now())
    }
}
