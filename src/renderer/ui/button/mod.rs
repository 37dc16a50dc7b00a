//! Button module: clickable labelled rectangles.
//!
//! [`ButtonSet`] holds the buttons and the pointer state machine and knows
//! nothing about the GPU. [`ButtonManager`] wraps it with the rectangle and
//! text renderers that draw it.
//!
//! ```ignore
//! let start = Button::new("start", "Start")
//!     .with_style(create_primary_button_style(scale))
//!     .with_position(ButtonPosition::new(20.0, 120.0, 220.0, 40.0));
//! manager.add_button(start);
//! ```

pub mod styles;
pub mod types;
pub mod utils;

pub use styles::*;
pub use types::{ButtonPosition, ButtonState, ButtonStyle};
pub use utils::ColorExt;

use crate::renderer::rectangle::{Rectangle, RectangleRenderer};
use crate::renderer::text::{TextPosition, TextRenderer};
use log::{debug, warn};
use wgpu::{self, Device, Queue, RenderPass};
use winit::event::{ElementState, MouseButton, WindowEvent};

/// A button with a label.
#[derive(Debug, Clone)]
pub struct Button {
    /// Unique id, reported on click.
    pub id: String,
    /// Label text.
    pub text: String,
    /// Colours and font.
    pub style: ButtonStyle,
    /// Placement in window pixels.
    pub position: ButtonPosition,
    /// Disabled buttons are drawn greyed out and ignore clicks.
    pub enabled: bool,
    /// Hidden buttons are neither drawn nor clickable.
    pub visible: bool,
    /// Hover and press state.
    pub state: ButtonState,
    /// Id of the label's text buffer
    pub text_id: String,
}

impl Button {
    /// A button with the default style and size.
    pub fn new(id: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            style: ButtonStyle::default(),
            position: ButtonPosition::new(0.0, 0.0, 200.0, 40.0),
            enabled: true,
            visible: true,
            state: ButtonState::Normal,
            text_id: format!("button_{}", id),
        }
    }

    /// Replaces the style.
    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    /// Replaces the position.
    pub fn with_position(mut self, position: ButtonPosition) -> Self {
        self.position = position;
        self
    }

    /// Only visible, enabled buttons can be hit.
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        self.visible && self.enabled && self.position.contains(x, y)
    }

    /// Background rectangle for the current state.
    pub fn background(&self) -> Rectangle {
        let state = if self.enabled {
            self.state
        } else {
            ButtonState::Disabled
        };
        let p = self.position;
        Rectangle::new(p.x, p.y, p.width, p.height, self.style.color_for(state).to_array())
            .with_corner_radius(self.style.corner_radius)
    }
}

/// Ordered buttons plus pointer tracking.
///
/// A click is a press and release over the same button.
#[derive(Debug, Default)]
pub struct ButtonSet {
    /// Buttons in drawing order.
    pub buttons: Vec<Button>,
    /// Last pointer position.
    pub mouse_position: (f32, f32),
    /// Whether the left button is held.
    pub mouse_pressed: bool,
    /// Button under the pointer when the press started.
    pressed_button: Option<String>,
    /// Button clicked since the last [`ButtonSet::take_click`].
    just_clicked: Option<String>,
}

impl ButtonSet {
    /// Adds a button, replacing any with the same id.
    pub fn add(&mut self, button: Button) {
        self.buttons.retain(|b| b.id != button.id);
        self.buttons.push(button);
        self.update_button_states();
    }

    /// The button with `id`.
    pub fn get(&self, id: &str) -> Option<&Button> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// The button with `id`, mutably.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Button> {
        self.buttons.iter_mut().find(|b| b.id == id)
    }

    fn hit(&self, x: f32, y: f32) -> Option<&Button> {
        self.buttons.iter().find(|b| b.contains_point(x, y))
    }

    /// Records the pointer position.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.mouse_position = (x, y);
        self.update_button_states();
    }

    /// Starts a press over whatever button is under the pointer.
    pub fn pointer_pressed(&mut self) {
        self.mouse_pressed = true;
        let (x, y) = self.mouse_position;
        self.pressed_button = self.hit(x, y).map(|b| b.id.clone());
        self.update_button_states();
    }

    /// Ends a press. Returns the id of the clicked button, if any.
    pub fn pointer_released(&mut self) -> Option<String> {
        self.mouse_pressed = false;
        let (x, y) = self.mouse_position;
        let released_over = self.hit(x, y).map(|b| b.id.clone());
        let clicked = match (self.pressed_button.take(), released_over) {
            (Some(pressed), Some(over)) if pressed == over => Some(pressed),
            _ => None,
        };
        if let Some(id) = &clicked {
            debug!("Button '{}' clicked", id);
            self.just_clicked = Some(id.clone());
        }
        self.update_button_states();
        clicked
    }

    /// The button clicked since the last call, if any.
    pub fn take_click(&mut self) -> Option<String> {
        self.just_clicked.take()
    }

    /// Recomputes hover and pressed states from the pointer.
    pub fn update_button_states(&mut self) {
        let (x, y) = self.mouse_position;
        for button in &mut self.buttons {
            button.state = if !button.visible || !button.enabled {
                ButtonState::Disabled
            } else if !button.position.contains(x, y) {
                ButtonState::Normal
            } else if self.mouse_pressed && self.pressed_button.as_deref() == Some(button.id.as_str()) {
                ButtonState::Pressed
            } else {
                ButtonState::Hover
            };
        }
    }

    /// Background rectangles of all visible buttons, in insertion order.
    pub fn backgrounds(&self) -> Vec<Rectangle> {
        self.buttons
            .iter()
            .filter(|b| b.visible)
            .map(Button::background)
            .collect()
    }
}

/// Draws a [`ButtonSet`] with its own rectangle and text renderers.
pub struct ButtonManager {
    /// Buttons and pointer state.
    pub set: ButtonSet,
    /// Draws the labels.
    pub text_renderer: TextRenderer,
    /// Draws the backgrounds.
    pub rectangle_renderer: RectangleRenderer,
}

impl ButtonManager {
    /// Empty manager with its own renderers.
    pub fn new(
        device: &Device,
        queue: &Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            set: ButtonSet::default(),
            text_renderer: TextRenderer::new(device, queue, surface_format, width, height),
            rectangle_renderer: RectangleRenderer::new(device, surface_format, width, height),
        }
    }

    /// Adds a button and creates its label buffer.
    pub fn add_button(&mut self, button: Button) {
        self.text_renderer.create_text_buffer(
            &button.text_id,
            &button.text,
            Some(button.style.text_style.clone()),
            Some(TextPosition {
                x: button.position.x,
                y: button.position.y,
                max_width: Some(button.position.width),
                max_height: Some(button.position.height),
            }),
        );
        let text_id = button.text_id.clone();
        self.set.add(button);
        self.center_label(&text_id);
    }

    /// Changes a button's label, keeping it centred.
    pub fn set_text(&mut self, id: &str, text: &str) {
        let Some(button) = self.set.get_mut(id) else {
            warn!("No button '{}' to relabel", id);
            return;
        };
        if button.text == text {
            return;
        }
        button.text = text.to_string();
        let text_id = button.text_id.clone();
        if let Err(e) = self.text_renderer.update_text(&text_id, text) {
            warn!("Failed to relabel button '{}': {}", id, e);
        }
        self.center_label(&text_id);
    }

    /// Enables or disables button `id`.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) {
        if let Some(button) = self.set.get_mut(id) {
            button.enabled = enabled;
        }
        self.set.update_button_states();
    }

    /// Moves a button, taking its label along.
    pub fn set_position(&mut self, id: &str, position: ButtonPosition) {
        let Some(button) = self.set.get_mut(id) else {
            return;
        };
        button.position = position;
        let text_id = button.text_id.clone();
        self.center_label(&text_id);
        self.set.update_button_states();
    }

    fn center_label(&mut self, text_id: &str) {
        let Some(button) = self.set.buttons.iter().find(|b| b.text_id == text_id) else {
            return;
        };
        let text_width = self.text_renderer.measure_width(text_id).unwrap_or(0.0);
        let p = button.position;
        let line_height = button.style.text_style.line_height;
        let position = TextPosition {
            x: p.x + ((p.width - text_width) / 2.0).max(0.0),
            y: p.y + ((p.height - line_height) / 2.0).max(0.0),
            max_width: Some(p.width),
            max_height: Some(p.height),
        };
        if let Err(e) = self.text_renderer.update_position(text_id, position) {
            warn!("Failed to position button label: {}", e);
        }
    }

    /// Feeds pointer events to the button set.
    pub fn handle_input(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.set.pointer_pressed(),
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button: MouseButton::Left,
                ..
            } => {
                self.set.pointer_released();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.set.pointer_moved(position.x as f32, position.y as f32);
            }
            _ => {}
        }
    }

    /// The button clicked since the last call, if any.
    pub fn take_click(&mut self) -> Option<String> {
        self.set.take_click()
    }

    /// Updates both renderers for a new window size.
    pub fn resize(&mut self, queue: &Queue, resolution: glyphon::Resolution) {
        self.text_renderer.resize(queue, resolution);
        self.rectangle_renderer
            .resize(resolution.width as f32, resolution.height as f32);
    }

    /// Uploads label text; hidden buttons hide their labels.
    pub fn prepare(&mut self, device: &Device, queue: &Queue) -> Result<(), glyphon::PrepareError> {
        for button in &self.set.buttons {
            self.text_renderer.set_visible(&button.text_id, button.visible);
        }
        self.text_renderer.prepare(device, queue)
    }

    /// Backgrounds first, labels on top.
    pub fn render(
        &mut self,
        device: &Device,
        render_pass: &mut RenderPass,
    ) -> Result<(), glyphon::RenderError> {
        self.rectangle_renderer.clear_rectangles();
        self.rectangle_renderer.extend(self.set.backgrounds());
        self.rectangle_renderer.render(device, render_pass);
        self.text_renderer.render(render_pass)
    }
}
