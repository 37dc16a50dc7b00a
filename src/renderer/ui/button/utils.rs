//! Colour helpers and UI scaling.

use glyphon::Color;

/// Colour adjustments for button states.
pub trait ColorExt {
    /// Moves each channel towards black by `factor` (0.0 to 1.0).
    fn darken(&self, factor: f32) -> Self;
    /// Moves each channel towards white by `factor` (0.0 to 1.0).
    fn brighten(&self, factor: f32) -> Self;
    /// RGBA floats for the rectangle pipeline.
    fn to_array(&self) -> [f32; 4];
}

impl ColorExt for Color {
    fn darken(&self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        Color::rgba(
            (self.r() as f32 * (1.0 - factor)) as u8,
            (self.g() as f32 * (1.0 - factor)) as u8,
            (self.b() as f32 * (1.0 - factor)) as u8,
            self.a(),
        )
    }

    fn brighten(&self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        Color::rgba(
            (self.r() as f32 + (255.0 - self.r() as f32) * factor) as u8,
            (self.g() as f32 + (255.0 - self.g() as f32) * factor) as u8,
            (self.b() as f32 + (255.0 - self.b() as f32) * factor) as u8,
            self.a(),
        )
    }

    fn to_array(&self) -> [f32; 4] {
        [
            self.r() as f32 / 255.0,
            self.g() as f32 / 255.0,
            self.b() as f32 / 255.0,
            self.a() as f32 / 255.0,
        ]
    }
}

/// UI scale for a window of the given height, relative to 800 px.
pub fn dpi_scale(window_height: f32) -> f32 {
    (window_height / 800.0).clamp(0.75, 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_darken_and_brighten() {
        let c = Color::rgb(100, 200, 50);
        assert_eq!(c.darken(0.5), Color::rgb(50, 100, 25));
        assert_eq!(c.brighten(1.0), Color::rgb(255, 255, 255));
        assert_eq!(c.darken(2.0), Color::rgb(0, 0, 0));
    }

    #[test]
    fn test_dpi_scale_bounds() {
        assert_eq!(dpi_scale(800.0), 1.0);
        assert_eq!(dpi_scale(100.0), 0.75);
        assert_eq!(dpi_scale(4000.0), 2.0);
    }
}
