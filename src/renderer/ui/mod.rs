//! User interface module.
//!
//! - `button`: clickable buttons and the pointer state machine
//! - `control_panel`: the sidebar buttons mapped to game actions
//! - `hud`: timer, level, status and toast text
//! - `layout`: where everything sits for a given window size

/// Button UI components and utilities.
pub mod button;
pub mod control_panel;
pub mod hud;
pub mod layout;
