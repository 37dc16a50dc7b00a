//! Button configuration types: style, position and interactive state.

use crate::renderer::text::TextStyle;
use glyphon::{Color, Style, Weight};

/// Colours and typography for a button.
///
/// The default is a slate scheme with light text.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonStyle {
    /// Fill when idle.
    pub background_color: Color,
    /// Fill under the pointer.
    pub hover_color: Color,
    /// Fill while pressed.
    pub pressed_color: Color,
    /// Fill when disabled.
    pub disabled_color: Color,
    /// 0.0 for square corners
    pub corner_radius: f32,
    /// Label font and colour.
    pub text_style: TextStyle,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            background_color: Color::rgb(55, 65, 81), // slate-700
            hover_color: Color::rgb(71, 85, 105),     // slate-600
            pressed_color: Color::rgb(30, 41, 59),    // slate-800
            disabled_color: Color::rgb(100, 116, 139),
            corner_radius: 8.0,
            text_style: TextStyle {
                font_family: None,
                font_size: 17.0,
                line_height: 20.0,
                color: Color::rgb(248, 250, 252),
                weight: Weight::MEDIUM,
                style: Style::Normal,
            },
        }
    }
}

impl ButtonStyle {
    /// Same style with text and corner sizes multiplied by `scale`.
    pub fn scaled(mut self, scale: f32) -> Self {
        self.corner_radius *= scale;
        self.text_style.font_size *= scale;
        self.text_style.line_height *= scale;
        self
    }

    /// Fill for `state`.
    pub fn color_for(&self, state: ButtonState) -> Color {
        match state {
            ButtonState::Normal => self.background_color,
            ButtonState::Hover => self.hover_color,
            ButtonState::Pressed => self.pressed_color,
            ButtonState::Disabled => self.disabled_color,
        }
    }
}

/// Top-left corner and size of a button, in window pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ButtonPosition {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl ButtonPosition {
    /// A button rectangle.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the point lies inside.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Interaction state of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    /// Idle.
    #[default]
    Normal,
    /// Under the pointer.
    Hover,
    /// Pressed and still under the pointer.
    Pressed,
    /// Not clickable.
    Disabled,
}
