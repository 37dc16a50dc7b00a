//! Sidebar buttons that drive the game.
//!
//! Each button maps to the same [`GameKey`] its keyboard shortcut produces.

use crate::game::GameState;
use crate::game::keys::GameKey;
use crate::maze::Direction;
use crate::renderer::ui::button::{
    Button, ButtonManager, create_arrow_button_style, create_danger_button_style,
    create_primary_button_style, create_warning_button_style,
};
use crate::renderer::ui::button::ButtonStyle;
use crate::renderer::ui::layout::ScreenLayout;
use glyphon::Resolution;
use wgpu::{Device, Queue, RenderPass};
use winit::event::WindowEvent;

/// Full-width buttons from top to bottom.
const ACTIONS: [(&str, &str); 6] = [
    ("start", "Start"),
    ("level", "Level: Easy"),
    ("solution", "Show Solution"),
    ("hint", "Hint"),
    ("shape", "New Shape"),
    ("exit", "Exit"),
];

const ARROWS: [(&str, &str, Direction); 4] = [
    ("up", "↑", Direction::Up),
    ("left", "←", Direction::Left),
    ("down", "↓", Direction::Down),
    ("right", "→", Direction::Right),
];

/// Action for a button id.
pub fn action_for(id: &str) -> Option<GameKey> {
    let key = match id {
        "start" => GameKey::Start,
        "level" => GameKey::CycleLevel,
        "solution" => GameKey::ToggleSolution,
        "hint" => GameKey::Hint,
        "shape" => GameKey::NewShape,
        "exit" => GameKey::Exit,
        _ => {
            let (_, _, direction) = ARROWS.iter().find(|(arrow, _, _)| *arrow == id)?;
            GameKey::Move(*direction)
        }
    };
    Some(key)
}

/// Label for the level button.
pub fn level_label(game: &GameState) -> String {
    format!("Level: {}", game.level_label())
}

/// Label for the solution toggle.
pub fn solution_label(shown: bool) -> &'static str {
    if shown { "Hide Solution" } else { "Show Solution" }
}

fn action_style(id: &str, scale: f32) -> ButtonStyle {
    match id {
        "start" => create_primary_button_style(scale),
        "solution" | "hint" => create_warning_button_style(scale),
        "exit" => create_danger_button_style(scale),
        _ => ButtonStyle::default().scaled(scale),
    }
}

/// Action buttons and the arrow pad.
pub struct ControlPanel {
    /// The buttons and their renderers.
    pub manager: ButtonManager,
}

impl ControlPanel {
    /// Creates every sidebar button at its place in `layout`.
    pub fn new(
        device: &Device,
        queue: &Queue,
        surface_format: wgpu::TextureFormat,
        layout: ScreenLayout,
    ) -> Self {
        let mut manager = ButtonManager::new(
            device,
            queue,
            surface_format,
            layout.width as u32,
            layout.height as u32,
        );

        for (index, (id, label)) in ACTIONS.iter().enumerate() {
            manager.add_button(
                Button::new(id, label)
                    .with_style(action_style(id, layout.scale))
                    .with_position(layout.action_button(index)),
            );
        }
        for (id, label, direction) in ARROWS {
            manager.add_button(
                Button::new(id, label)
                    .with_style(create_arrow_button_style(layout.scale))
                    .with_position(layout.arrow_button(direction)),
            );
        }

        Self { manager }
    }

    /// Mirrors game state onto labels and enabled flags.
    pub fn sync(&mut self, game: &GameState) {
        self.manager
            .set_text("solution", solution_label(game.is_solution_shown()));
        self.manager.set_text("level", &level_label(game));
        self.manager.set_enabled("level", game.has_selectable_level());

        let active = game.is_active();
        for id in ["solution", "hint", "shape", "exit"] {
            self.manager.set_enabled(id, active);
        }
        for (id, _, _) in ARROWS {
            self.manager.set_enabled(id, active);
        }
    }

    /// Feeds a window event and returns the action of a completed click.
    pub fn handle_input(&mut self, event: &WindowEvent) -> Option<GameKey> {
        self.manager.handle_input(event);
        self.manager.take_click().and_then(|id| action_for(&id))
    }

    /// Rebuilds styles and positions for a new window size.
    pub fn relayout(&mut self, queue: &Queue, layout: ScreenLayout) {
        self.manager.resize(
            queue,
            Resolution {
                width: layout.width as u32,
                height: layout.height as u32,
            },
        );

        for (index, (id, _)) in ACTIONS.iter().enumerate() {
            self.restyle(id, action_style(id, layout.scale));
            self.manager.set_position(id, layout.action_button(index));
        }
        for (id, _, direction) in ARROWS {
            self.restyle(id, create_arrow_button_style(layout.scale));
            self.manager.set_position(id, layout.arrow_button(direction));
        }
    }

    fn restyle(&mut self, id: &str, style: ButtonStyle) {
        let Some(button) = self.manager.set.get_mut(id) else {
            return;
        };
        if button.style == style {
            return;
        }
        let text_id = button.text_id.clone();
        button.style = style.clone();
        if let Err(e) = self
            .manager
            .text_renderer
            .update_style(&text_id, style.text_style)
        {
            log::warn!("Failed to restyle button '{}': {}", id, e);
        }
    }

    /// Uploads label text.
    pub fn prepare(&mut self, device: &Device, queue: &Queue) -> Result<(), glyphon::PrepareError> {
        self.manager.prepare(device, queue)
    }

    /// Draws backgrounds and labels.
    pub fn render(
        &mut self,
        device: &Device,
        render_pass: &mut RenderPass,
    ) -> Result<(), glyphon::RenderError> {
        self.manager.render(device, render_pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Difficulty, GameConfig, MazeSource};
    use crate::maze::open_grid::OpenGrid;

    #[test]
    fn test_every_button_has_an_action() {
        for (id, _) in ACTIONS {
            assert!(action_for(id).is_some(), "{} has no action", id);
        }
        for (id, _, direction) in ARROWS {
            assert_eq!(action_for(id), Some(GameKey::Move(direction)));
        }
        assert_eq!(action_for("start"), Some(GameKey::Start));
        assert_eq!(action_for("level"), Some(GameKey::CycleLevel));
        assert_eq!(action_for("nope"), None);
    }

    /// Fixed layouts show the same level text as the HUD.
    #[test]
    fn test_level_label_follows_source() {
        let carved = GameState::new(GameConfig {
            difficulty: Difficulty::Hard,
            ..GameConfig::default()
        });
        assert_eq!(level_label(&carved), "Level: Hard");
        assert!(carved.has_selectable_level());

        let fixed = GameState::new(GameConfig {
            source: MazeSource::Fixed(OpenGrid::classic()),
            ..GameConfig::default()
        });
        assert_eq!(level_label(&fixed), "Level: Fixed layout");
        assert!(!fixed.has_selectable_level());
    }

    #[test]
    fn test_solution_label() {
        assert_eq!(solution_label(false), "Show Solution");
        assert_eq!(solution_label(true), "Hide Solution");
    }
}
