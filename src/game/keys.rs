//! Keyboard input mapping.
//!
//! [`GameKey`] abstracts game actions from physical keys. On-screen buttons
//! produce the same values, so the session handles one kind of input.

use crate::config::Difficulty;
use crate::maze::Direction;
use winit::keyboard;

/// Every action a player can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKey {
    /// Step in a direction (arrows or WASD).
    Move(Direction),
    /// Start a new session (Enter).
    Start,
    /// Show or hide the full solution (Space or P).
    ToggleSolution,
    /// Show the next step only (H).
    Hint,
    /// New maze of the same size (R).
    NewShape,
    /// End the session (Escape).
    Exit,
    /// Cycle easy, medium, hard (L).
    CycleLevel,
    /// Pick a level directly (1, 2, 3).
    SetLevel(Difficulty),
}

impl GameKey {
    /// Whether holding the key down should repeat the action.
    pub fn repeats(self) -> bool {
        matches!(self, GameKey::Move(_))
    }
}

macro_rules! match_char_key {
    ($c:expr, {
        $($key:literal => $variant:expr),* $(,)?
    }) => {{
        match $c.to_ascii_lowercase().as_str() {
            $($key => Some($variant),)*
            _ => None,
        }
    }};
}

macro_rules! match_named_key {
    ($k:expr, {
        $($key:ident => $variant:expr),* $(,)?
    }) => {{
        match $k {
            $(winit::keyboard::NamedKey::$key => Some($variant),)*
            _ => None,
        }
    }};
}

/// Converts a winit [`keyboard::Key`] to a [`GameKey`] if it is mapped.
pub fn winit_key_to_game_key(key: &keyboard::Key) -> Option<GameKey> {
    match key {
        keyboard::Key::Named(named) => match_named_key!(named, {
            ArrowUp => GameKey::Move(Direction::Up),
            ArrowDown => GameKey::Move(Direction::Down),
            ArrowLeft => GameKey::Move(Direction::Left),
            ArrowRight => GameKey::Move(Direction::Right),
            Enter => GameKey::Start,
            Space => GameKey::ToggleSolution,
            Escape => GameKey::Exit,
        }),

        keyboard::Key::Character(c) => match_char_key!(c, {
            "w" => GameKey::Move(Direction::Up),
            "s" => GameKey::Move(Direction::Down),
            "a" => GameKey::Move(Direction::Left),
            "d" => GameKey::Move(Direction::Right),
            "p" => GameKey::ToggleSolution,
            "h" => GameKey::Hint,
            "r" => GameKey::NewShape,
            "l" => GameKey::CycleLevel,
            "1" => GameKey::SetLevel(Difficulty::Easy),
            "2" => GameKey::SetLevel(Difficulty::Medium),
            "3" => GameKey::SetLevel(Difficulty::Hard),
        }),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::{Key, NamedKey};

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            winit_key_to_game_key(&Key::Named(NamedKey::ArrowUp)),
            Some(GameKey::Move(Direction::Up))
        );
        assert_eq!(
            winit_key_to_game_key(&Key::Character("D".into())),
            Some(GameKey::Move(Direction::Right))
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            winit_key_to_game_key(&Key::Named(NamedKey::Space)),
            Some(GameKey::ToggleSolution)
        );
        assert_eq!(
            winit_key_to_game_key(&Key::Character("h".into())),
            Some(GameKey::Hint)
        );
        assert_eq!(
            winit_key_to_game_key(&Key::Character("3".into())),
            Some(GameKey::SetLevel(Difficulty::Hard))
        );
        assert_eq!(winit_key_to_game_key(&Key::Character("z".into())), None);
        assert_eq!(winit_key_to_game_key(&Key::Named(NamedKey::Tab)), None);
    }
}
