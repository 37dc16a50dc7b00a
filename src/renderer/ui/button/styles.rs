//! Predefined button styles.
//!
//! - Primary (green): starting a game
//! - Warning (amber): revealing the solution or a hint
//! - Danger (red): leaving the game
//! - Arrow: square movement pad keys

use crate::renderer::ui::button::ButtonStyle;
use crate::renderer::ui::button::utils::ColorExt;
use glyphon::{Color, Weight};

/// Green style for starting a game.
pub fn create_primary_button_style(scale: f32) -> ButtonStyle {
    let base = Color::rgb(30, 110, 30);
    ButtonStyle {
        background_color: base,
        hover_color: base.brighten(0.15),
        pressed_color: base.darken(0.3),
        ..ButtonStyle::default()
    }
    .scaled(scale)
}

/// Amber style for solution and hint.
pub fn create_warning_button_style(scale: f32) -> ButtonStyle {
    let base = Color::rgb(180, 110, 20);
    ButtonStyle {
        background_color: base,
        hover_color: base.brighten(0.15),
        pressed_color: base.darken(0.3),
        ..ButtonStyle::default()
    }
    .scaled(scale)
}

/// Red style for leaving a game.
pub fn create_danger_button_style(scale: f32) -> ButtonStyle {
    let base = Color::rgb(160, 40, 40);
    ButtonStyle {
        background_color: base,
        hover_color: base.brighten(0.15),
        pressed_color: base.darken(0.3),
        ..ButtonStyle::default()
    }
    .scaled(scale)
}

/// Square movement key with a large glyph.
pub fn create_arrow_button_style(scale: f32) -> ButtonStyle {
    let mut style = ButtonStyle {
        corner_radius: 10.0,
        ..ButtonStyle::default()
    };
    style.text_style.font_size = 22.0;
    style.text_style.line_height = 26.0;
    style.text_style.weight = Weight::BOLD;
    style.scaled(scale)
}
