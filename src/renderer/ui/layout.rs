//! Screen layout: a control sidebar on the left, the board on the right.
//!
//! All measurements are given for an 800 px tall window and scaled with
//! [`dpi_scale`].

use crate::maze::Direction;
use crate::renderer::scene::BoardArea;
use crate::renderer::text::TextPosition;
use crate::renderer::ui::button::ButtonPosition;
use crate::renderer::ui::button::utils::dpi_scale;

const SIDEBAR_WIDTH: f32 = 260.0;
const PADDING: f32 = 20.0;
const BUTTON_HEIGHT: f32 = 40.0;
const BUTTON_GAP: f32 = 10.0;
const BUTTONS_TOP: f32 = 130.0;
const ARROW_SIZE: f32 = 56.0;
const ARROW_GAP: f32 = 8.0;
const ARROWS_TOP: f32 = 450.0;
const STATUS_TOP: f32 = 590.0;
const HELP_TOP: f32 = 680.0;

/// Placement of every UI element for one window size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenLayout {
    /// Window width in pixels.
    pub width: f32,
    /// Window height in pixels.
    pub height: f32,
    /// UI scale relative to an 800 px tall window.
    pub scale: f32,
}

impl ScreenLayout {
    /// Layout for a window of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        let height = height.max(1) as f32;
        Self {
            width: width.max(1) as f32,
            height,
            scale: dpi_scale(height),
        }
    }

    /// Width of the left control column.
    pub fn sidebar_width(&self) -> f32 {
        SIDEBAR_WIDTH * self.scale
    }

    fn padding(&self) -> f32 {
        PADDING * self.scale
    }

    fn column_width(&self) -> f32 {
        self.sidebar_width() - 2.0 * self.padding()
    }

    /// Region to the right of the sidebar.
    pub fn board_area(&self) -> BoardArea {
        let x = self.sidebar_width();
        BoardArea {
            x,
            y: 0.0,
            width: (self.width - x).max(1.0),
            height: self.height,
        }
    }

    /// Text line in the sidebar starting `top` unscaled pixels down.
    fn sidebar_text(&self, top: f32, lines: f32, line_height: f32) -> TextPosition {
        TextPosition {
            x: self.padding(),
            y: top * self.scale,
            max_width: Some(self.column_width()),
            max_height: Some(lines * line_height * self.scale),
        }
    }

    /// Game title.
    pub fn title(&self) -> TextPosition {
        self.sidebar_text(PADDING, 1.0, 34.0)
    }

    /// Elapsed time.
    pub fn timer(&self) -> TextPosition {
        self.sidebar_text(64.0, 1.0, 28.0)
    }

    /// Selected level.
    pub fn level(&self) -> TextPosition {
        self.sidebar_text(96.0, 1.0, 22.0)
    }

    /// Status line under the arrow pad.
    pub fn status(&self) -> TextPosition {
        self.sidebar_text(STATUS_TOP, 3.0, 22.0)
    }

    /// Key help at the bottom.
    pub fn help(&self) -> TextPosition {
        self.sidebar_text(HELP_TOP, 6.0, 18.0)
    }

    /// Toast strip across the top of the board.
    pub fn toast(&self) -> TextPosition {
        let area = self.board_area();
        TextPosition {
            x: area.x + self.padding(),
            y: 6.0 * self.scale,
            max_width: Some((area.width - 2.0 * self.padding()).max(1.0)),
            max_height: Some(30.0 * self.scale),
        }
    }

    /// The `index`-th full-width action button.
    pub fn action_button(&self, index: usize) -> ButtonPosition {
        ButtonPosition::new(
            self.padding(),
            (BUTTONS_TOP + index as f32 * (BUTTON_HEIGHT + BUTTON_GAP)) * self.scale,
            self.column_width(),
            BUTTON_HEIGHT * self.scale,
        )
    }

    /// Arrow pad key: up on the top row, left/down/right below it.
    pub fn arrow_button(&self, direction: Direction) -> ButtonPosition {
        let (row, col) = match direction {
            Direction::Up => (0.0, 1.0),
            Direction::Left => (1.0, 0.0),
            Direction::Down => (1.0, 1.0),
            Direction::Right => (1.0, 2.0),
        };
        let pad_width = 3.0 * ARROW_SIZE + 2.0 * ARROW_GAP;
        let left = PADDING + (SIDEBAR_WIDTH - 2.0 * PADDING - pad_width) / 2.0;
        ButtonPosition::new(
            (left + col * (ARROW_SIZE + ARROW_GAP)) * self.scale,
            (ARROWS_TOP + row * (ARROW_SIZE + ARROW_GAP)) * self.scale,
            ARROW_SIZE * self.scale,
            ARROW_SIZE * self.scale,
        )
    }
}
