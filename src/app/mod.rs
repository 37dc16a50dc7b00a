//! Application module.
//!
//! - [`app_state`]: [`AppState`], the renderer plus the game session
//! - [`event_handler`]: [`App`], the winit handler that routes events
//! - [`update`]: clock ticks and frame drawing
//!
//! Everything runs on the event loop thread. Input goes to
//! [`crate::game::GameState::handle_key`], the clock is polled between
//! event batches and a redraw is requested whenever something changed.

pub mod app_state;
pub mod event_handler;
pub mod update;

pub use app_state::AppState;
pub use event_handler::App;
