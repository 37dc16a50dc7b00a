//! Text rendering on top of glyphon.
//!
//! Text lives in named buffers ("timer", "status", button labels, ...) that
//! are created once and updated in place. Only visible buffers are prepared
//! each frame.

use glyphon::{
    Attrs, Buffer, Cache, Color, Family, FontSystem, Metrics, Resolution, Shaping, Style,
    SwashCache, TextArea, TextAtlas, TextBounds, TextRenderer as GlyphonTextRenderer, Viewport,
    Weight,
};
use log::{trace, warn};
use std::collections::HashMap;
use wgpu::{self, Device, Queue, RenderPass};

/// Font, size and colour of a text buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Named font family; `None` uses the system sans-serif face.
    pub font_family: Option<String>,
    /// Font size in pixels.
    pub font_size: f32,
    /// Line height in pixels.
    pub line_height: f32,
    /// Text colour.
    pub color: Color,
    /// Font weight.
    pub weight: Weight,
    /// Upright or italic.
    pub style: Style,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 16.0,
            line_height: 20.0,
            color: Color::rgb(255, 255, 255),
            weight: Weight::NORMAL,
            style: Style::Normal,
        }
    }
}

impl TextStyle {
    fn attrs(&self) -> Attrs<'_> {
        let family = match &self.font_family {
            Some(name) => Family::Name(name.as_str()),
            None => Family::SansSerif,
        };
        Attrs::new()
            .family(family)
            .weight(self.weight)
            .style(self.style)
    }
}

/// Top-left corner and clip size of a text buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextPosition {
    /// Left edge in pixels.
    pub x: f32,
    /// Top edge in pixels.
    pub y: f32,
    /// Wrap width; `None` for no wrapping.
    pub max_width: Option<f32>,
    /// Clip height; `None` for no clipping.
    pub max_height: Option<f32>,
}

/// A shaped glyphon buffer with its style and placement.
#[derive(Debug)]
pub struct TextBuffer {
    /// Shaped text.
    pub buffer: Buffer,
    /// Style it was shaped with.
    pub style: TextStyle,
    /// Where it is drawn.
    pub position: TextPosition,
    /// Hidden buffers are skipped when preparing.
    pub visible: bool,
    /// The text last set, used to skip redundant reshaping.
    pub text_content: String,
}

/// Error for operations on a buffer id that was never created.
#[derive(Debug, thiserror::Error)]
#[error("text buffer '{0}' not found")]
pub struct MissingBuffer(pub String);

/// Text buffers keyed by id, drawn with one glyphon renderer.
pub struct TextRenderer {
    /// Loaded system fonts.
    pub font_system: FontSystem,
    /// Rasterised glyph cache.
    pub swash_cache: SwashCache,
    /// Screen resolution seen by the shader.
    pub viewport: Viewport,
    /// Glyph texture atlas.
    pub atlas: TextAtlas,
    /// The glyphon renderer itself.
    pub text_renderer: GlyphonTextRenderer,
    /// Every buffer by id.
    pub text_buffers: HashMap<String, TextBuffer>,
    /// Window size in pixels.
    pub window_size: (u32, u32),
}

impl TextRenderer {
    /// Loads system fonts and builds the glyphon pipeline for `surface_format`.
    pub fn new(
        device: &Device,
        queue: &Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let font_system = FontSystem::new();
        let swash_cache = SwashCache::new();
        let cache = Cache::new(device);
        let mut viewport = Viewport::new(device, &cache);
        viewport.update(queue, Resolution { width, height });
        let mut atlas = TextAtlas::new(device, queue, &cache, surface_format);
        let text_renderer =
            GlyphonTextRenderer::new(&mut atlas, device, wgpu::MultisampleState::default(), None);

        Self {
            font_system,
            swash_cache,
            viewport,
            atlas,
            text_renderer,
            text_buffers: HashMap::new(),
            window_size: (width, height),
        }
    }

    /// Creates (or replaces) the buffer `id`.
    pub fn create_text_buffer(
        &mut self,
        id: &str,
        text: &str,
        style: Option<TextStyle>,
        position: Option<TextPosition>,
    ) {
        let style = style.unwrap_or_default();
        let position = position.unwrap_or_default();

        let mut buffer = Buffer::new(
            &mut self.font_system,
            Metrics::new(style.font_size, style.line_height),
        );
        let width = position.max_width.unwrap_or(self.window_size.0 as f32);
        let height = position.max_height.unwrap_or(self.window_size.1 as f32);
        buffer.set_size(&mut self.font_system, Some(width), Some(height));
        buffer.set_text(&mut self.font_system, text, style.attrs(), Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);
        trace!("Created text buffer '{}' ({}x{})", id, width, height);

        self.text_buffers.insert(
            id.to_string(),
            TextBuffer {
                buffer,
                style,
                position,
                visible: true,
                text_content: text.to_string(),
            },
        );
    }

    /// Replaces the text of buffer `id`. Unchanged text is not reshaped.
    pub fn update_text(&mut self, id: &str, text: &str) -> Result<(), MissingBuffer> {
        let text_buffer = self
            .text_buffers
            .get_mut(id)
            .ok_or_else(|| MissingBuffer(id.to_string()))?;
        if text_buffer.text_content == text {
            return Ok(());
        }

        text_buffer.buffer.set_text(
            &mut self.font_system,
            text,
            text_buffer.style.attrs(),
            Shaping::Advanced,
        );
        text_buffer
            .buffer
            .shape_until_scroll(&mut self.font_system, false);
        text_buffer.text_content = text.to_string();
        Ok(())
    }

    /// Replaces the style of buffer `id` and reshapes it.
    pub fn update_style(&mut self, id: &str, style: TextStyle) -> Result<(), MissingBuffer> {
        let text_buffer = self
            .text_buffers
            .get_mut(id)
            .ok_or_else(|| MissingBuffer(id.to_string()))?;
        if text_buffer.style == style {
            return Ok(());
        }

        if text_buffer.style.font_size != style.font_size
            || text_buffer.style.line_height != style.line_height
        {
            text_buffer.buffer.set_metrics(
                &mut self.font_system,
                Metrics::new(style.font_size, style.line_height),
            );
        }
        text_buffer.style = style;
        text_buffer.buffer.set_text(
            &mut self.font_system,
            &text_buffer.text_content,
            text_buffer.style.attrs(),
            Shaping::Advanced,
        );
        text_buffer
            .buffer
            .shape_until_scroll(&mut self.font_system, false);
        Ok(())
    }

    /// Moves buffer `id`.
    pub fn update_position(&mut self, id: &str, position: TextPosition) -> Result<(), MissingBuffer> {
        let text_buffer = self
            .text_buffers
            .get_mut(id)
            .ok_or_else(|| MissingBuffer(id.to_string()))?;

        if text_buffer.position.max_width != position.max_width
            || text_buffer.position.max_height != position.max_height
        {
            let width = position.max_width.unwrap_or(self.window_size.0 as f32);
            let height = position.max_height.unwrap_or(self.window_size.1 as f32);
            text_buffer
                .buffer
                .set_size(&mut self.font_system, Some(width), Some(height));
        }
        text_buffer.position = position;
        Ok(())
    }

    /// Shows or hides buffer `id`; unknown ids are ignored.
    pub fn set_visible(&mut self, id: &str, visible: bool) {
        match self.text_buffers.get_mut(id) {
            Some(buffer) => buffer.visible = visible,
            None => warn!("Cannot change visibility of missing text buffer '{}'", id),
        }
    }

    /// Width of the widest laid-out line of buffer `id`, in pixels.
    pub fn measure_width(&self, id: &str) -> Option<f32> {
        self.text_buffers.get(id).map(|b| {
            b.buffer
                .layout_runs()
                .map(|run| run.line_w)
                .fold(0.0, f32::max)
        })
    }

    /// Updates the viewport for a new window size.
    pub fn resize(&mut self, queue: &Queue, resolution: Resolution) {
        self.window_size = (resolution.width, resolution.height);
        self.viewport.update(queue, resolution);
    }

    /// Uploads glyphs for every visible buffer.
    pub fn prepare(&mut self, device: &Device, queue: &Queue) -> Result<(), glyphon::PrepareError> {
        let (width, height) = self.window_size;
        let text_areas: Vec<TextArea> = self
            .text_buffers
            .values()
            .filter(|buffer| buffer.visible)
            .map(|buffer| TextArea {
                buffer: &buffer.buffer,
                left: buffer.position.x,
                top: buffer.position.y,
                scale: 1.0,
                bounds: TextBounds {
                    left: buffer.position.x as i32,
                    top: buffer.position.y as i32,
                    right: (buffer.position.x + buffer.position.max_width.unwrap_or(width as f32))
                        as i32,
                    bottom: (buffer.position.y
                        + buffer.position.max_height.unwrap_or(height as f32))
                        as i32,
                },
                default_color: buffer.style.color,
                custom_glyphs: &[],
            })
            .collect();

        self.text_renderer.prepare(
            device,
            queue,
            &mut self.font_system,
            &mut self.atlas,
            &self.viewport,
            text_areas,
            &mut self.swash_cache,
        )
    }

    /// Draws the prepared text into `render_pass`.
    pub fn render(&self, render_pass: &mut RenderPass) -> Result<(), glyphon::RenderError> {
        self.text_renderer
            .render(&self.atlas, &self.viewport, render_pass)
    }

    /// Frees atlas space used by glyphs that were not drawn last frame.
    pub fn trim(&mut self) {
        self.atlas.trim();
    }
}
