//! Heads-up text: title, elapsed time, level, status line, key help and the
//! encouragement toast.

use crate::game::{GameState, StatusTone};
use crate::renderer::text::{TextRenderer, TextStyle};
use crate::renderer::ui::layout::ScreenLayout;
use glyphon::{Color, Resolution, Style, Weight};
use log::warn;
use std::time::Instant;
use wgpu::{Device, Queue, RenderPass};

const TITLE: &str = "Maze Runner";
const HELP: &str = "Arrows or WASD: move\nEnter: start   Esc: exit\nSpace/P: solution   H: hint\nR: new shape   L or 1-3: level";

const WIN_COLOR: Color = Color::rgb(0, 212, 143);
const MUTED_COLOR: Color = Color::rgb(148, 163, 184);

/// The strings the HUD shows for one game state.
#[derive(Debug, Clone, PartialEq)]
pub struct HudText {
    /// `Time: Ns`.
    pub timer: String,
    /// `Level: X`.
    pub level: String,
    /// Status line and its tone.
    pub status: Option<(String, StatusTone)>,
    /// Toast, while visible.
    pub toast: Option<String>,
}

impl HudText {
    /// Text for `game` as of `now`.
    pub fn from_game(game: &GameState, now: Instant) -> Self {
        Self {
            timer: format!("Time: {}s", game.elapsed_secs()),
            level: format!("Level: {}", game.level_label()),
            status: game.status().map(|s| (s.message.to_string(), s.tone)),
            toast: game.toast(now).map(str::to_string),
        }
    }
}

fn style(size: f32, line_height: f32, color: Color, weight: Weight, scale: f32) -> TextStyle {
    TextStyle {
        font_family: None,
        font_size: size * scale,
        line_height: line_height * scale,
        color,
        weight,
        style: Style::Normal,
    }
}

/// Text buffers for the HUD.
pub struct Hud {
    /// Renderer holding the HUD buffers.
    pub text_renderer: TextRenderer,
    layout: ScreenLayout,
}

impl Hud {
    /// Creates every HUD buffer at its place in `layout`.
    pub fn new(
        device: &Device,
        queue: &Queue,
        surface_format: wgpu::TextureFormat,
        layout: ScreenLayout,
    ) -> Self {
        let mut text_renderer = TextRenderer::new(
            device,
            queue,
            surface_format,
            layout.width as u32,
            layout.height as u32,
        );
        let s = layout.scale;
        let white = Color::rgb(248, 250, 252);

        text_renderer.create_text_buffer(
            "title",
            TITLE,
            Some(style(26.0, 34.0, white, Weight::BOLD, s)),
            Some(layout.title()),
        );
        text_renderer.create_text_buffer(
            "timer",
            "Time: 0s",
            Some(style(22.0, 28.0, Color::rgb(100, 255, 100), Weight::BOLD, s)),
            Some(layout.timer()),
        );
        text_renderer.create_text_buffer(
            "level",
            "",
            Some(style(16.0, 22.0, Color::rgb(255, 255, 150), Weight::NORMAL, s)),
            Some(layout.level()),
        );
        text_renderer.create_text_buffer(
            "status",
            "",
            Some(style(16.0, 22.0, MUTED_COLOR, Weight::MEDIUM, s)),
            Some(layout.status()),
        );
        text_renderer.create_text_buffer(
            "help",
            HELP,
            Some(style(13.0, 18.0, MUTED_COLOR, Weight::NORMAL, s)),
            Some(layout.help()),
        );
        text_renderer.create_text_buffer(
            "toast",
            "",
            Some(style(20.0, 26.0, Color::rgb(255, 204, 102), Weight::BOLD, s)),
            Some(layout.toast()),
        );
        text_renderer.set_visible("toast", false);

        Self {
            text_renderer,
            layout,
        }
    }

    /// Pushes the current strings into the text buffers.
    pub fn sync(&mut self, text: &HudText) {
        let mut update = |id: &str, value: &str| {
            if let Err(e) = self.text_renderer.update_text(id, value) {
                warn!("HUD update failed: {}", e);
            }
        };
        update("timer", &text.timer);
        update("level", &text.level);
        update("status", text.status.as_ref().map_or("", |(m, _)| m.as_str()));
        update("toast", text.toast.as_deref().unwrap_or(""));

        if let Some((_, tone)) = &text.status {
            let color = match tone {
                StatusTone::Win => WIN_COLOR,
                StatusTone::Muted => MUTED_COLOR,
            };
            if let Some(buffer) = self.text_renderer.text_buffers.get("status") {
                let mut new_style = buffer.style.clone();
                new_style.color = color;
                if let Err(e) = self.text_renderer.update_style("status", new_style) {
                    warn!("HUD style update failed: {}", e);
                }
            }
        }

        self.text_renderer.set_visible("toast", text.toast.is_some());
        self.center_toast();
    }

    fn center_toast(&mut self) {
        let mut position = self.layout.toast();
        let width = self.text_renderer.measure_width("toast").unwrap_or(0.0);
        if let Some(max) = position.max_width {
            position.x += ((max - width) / 2.0).max(0.0);
        }
        if let Err(e) = self.text_renderer.update_position("toast", position) {
            warn!("HUD toast position failed: {}", e);
        }
    }

    /// Moves every text to its place in `layout`.
    pub fn relayout(&mut self, queue: &Queue, layout: ScreenLayout) {
        self.layout = layout;
        self.text_renderer.resize(
            queue,
            Resolution {
                width: layout.width as u32,
                height: layout.height as u32,
            },
        );
        for (id, position) in [
            ("title", layout.title()),
            ("timer", layout.timer()),
            ("level", layout.level()),
            ("status", layout.status()),
            ("help", layout.help()),
        ] {
            if let Err(e) = self.text_renderer.update_position(id, position) {
                warn!("HUD relayout failed: {}", e);
            }
        }
        self.center_toast();
    }

    /// Uploads text.
    pub fn prepare(&mut self, device: &Device, queue: &Queue) -> Result<(), glyphon::PrepareError> {
        self.text_renderer.prepare(device, queue)
    }

    /// Draws the text.
    pub fn render(&self, render_pass: &mut RenderPass) -> Result<(), glyphon::RenderError> {
        self.text_renderer.render(render_pass)
    }
}
