//! WGPU renderer for the maze game.
//!
//! [`WgpuRenderer`] owns the surface, device and queue plus the three things
//! drawn every frame: the board rectangles, the sidebar buttons and the HUD
//! text. Frames are drawn in one pass over a cleared target.

use crate::error::{GameError, Result};
use crate::game::GameState;
use crate::renderer::rectangle::{Rectangle, RectangleRenderer};
use crate::renderer::scene::{Palette, build_scene};
use crate::renderer::ui::control_panel::ControlPanel;
use crate::renderer::ui::hud::{Hud, HudText};
use crate::renderer::ui::layout::ScreenLayout;
use log::{debug, info, warn};
use std::time::Instant;
use wgpu::TextureFormat;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.008,
    g: 0.024,
    b: 0.09,
    a: 1.0,
};
const SIDEBAR_COLOR: [f32; 4] = [0.06, 0.09, 0.16, 1.0];

/// Prefers `Bgra8UnormSrgb`, then any sRGB format, then whatever is first.
pub fn pick_surface_format(formats: &[TextureFormat]) -> Option<TextureFormat> {
    formats
        .iter()
        .find(|&&f| f == TextureFormat::Bgra8UnormSrgb)
        .or_else(|| formats.iter().find(|f| f.is_srgb()))
        .or_else(|| formats.first())
        .copied()
}

/// GPU resources and per-frame drawing.
pub struct WgpuRenderer {
    /// Surface frames are presented to.
    pub surface: wgpu::Surface<'static>,
    /// Current surface configuration.
    pub surface_config: wgpu::SurfaceConfiguration,
    /// Device for resource creation.
    pub device: wgpu::Device,
    /// Queue for command submission.
    pub queue: wgpu::Queue,
    board_renderer: RectangleRenderer,
    /// Sidebar buttons, also fed pointer input.
    pub control_panel: ControlPanel,
    hud: Hud,
    palette: Palette,
    layout: ScreenLayout,
}

impl WgpuRenderer {
    /// Picks an adapter and device for `surface` and builds every pipeline.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or(GameError::AdapterNotFound)?;
        info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Maze Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let capabilities = surface.get_capabilities(&adapter);
        let format =
            pick_surface_format(&capabilities.formats).ok_or(GameError::UnsupportedSurface)?;
        debug!("Surface format: {:?}", format);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode: capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
        };
        surface.configure(&device, &surface_config);

        let layout = ScreenLayout::new(surface_config.width, surface_config.height);
        let board_renderer =
            RectangleRenderer::new(&device, format, surface_config.width, surface_config.height);
        let control_panel = ControlPanel::new(&device, &queue, format, layout);
        let hud = Hud::new(&device, &queue, format, layout);

        Ok(Self {
            surface,
            surface_config,
            device,
            queue,
            board_renderer,
            control_panel,
            hud,
            palette: Palette::default(),
            layout,
        })
    }

    /// Reconfigures the surface and lays the UI out again.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);

        self.layout = ScreenLayout::new(width, height);
        self.board_renderer.resize(width as f32, height as f32);
        self.control_panel.relayout(&self.queue, self.layout);
        self.hud.relayout(&self.queue, self.layout);
    }

    /// Draws one frame of `game` as it looks at `now`.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    pub fn render_frame(&mut self, game: &GameState, now: Instant) -> Result<()> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.board_renderer.clear_rectangles();
        self.board_renderer.add_rectangle(Rectangle::new(
            0.0,
            0.0,
            self.layout.sidebar_width(),
            self.layout.height,
            SIDEBAR_COLOR,
        ));
        self.board_renderer
            .extend(build_scene(game, &self.layout.board_area(), &self.palette));

        self.control_panel.sync(game);
        self.hud.sync(&HudText::from_game(game, now));
        self.control_panel.prepare(&self.device, &self.queue)?;
        self.hud.prepare(&self.device, &self.queue)?;

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.board_renderer.render(&self.device, &mut render_pass);
            self.control_panel.render(&self.device, &mut render_pass)?;
            self.hud.render(&mut render_pass)?;
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        self.control_panel.manager.text_renderer.trim();
        self.hud.text_renderer.trim();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_surface_format() {
        assert_eq!(
            pick_surface_format(&[TextureFormat::Rgba8Unorm, TextureFormat::Bgra8UnormSrgb]),
            Some(TextureFormat::Bgra8UnormSrgb)
        );
        assert_eq!(
            pick_surface_format(&[TextureFormat::Rgba8Unorm, TextureFormat::Rgba8UnormSrgb]),
            Some(TextureFormat::Rgba8UnormSrgb)
        );
        assert_eq!(
            pick_surface_format(&[TextureFormat::Rgba16Float]),
            Some(TextureFormat::Rgba16Float)
        );
        assert_eq!(pick_surface_format(&[]), None);
    }
}
