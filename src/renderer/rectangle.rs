//! # Rectangle Renderer
//!
//! Every shape on screen is a rounded rectangle: walls and blocked cells are
//! sharp rectangles, path segments are thin bars, markers are rectangles
//! whose corner radius is half their side. All rectangles queued for a frame
//! are drawn in a single indexed draw call.

use std::mem;
use wgpu::{
    self, BlendState, BufferUsages, ColorTargetState, ColorWrites, Device, FragmentState,
    MultisampleState, PrimitiveState, RenderPass, RenderPipeline, VertexAttribute,
    VertexBufferLayout, VertexFormat, VertexState, util::DeviceExt,
};

/// Vertex data for one rectangle corner.
///
/// `#[repr(C)]` keeps the layout stable for the GPU; 48 bytes per vertex.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    /// Position in normalized device coordinates
    position: [f32; 2],
    color: [f32; 4],
    /// Pixel offset inside the rectangle, used for the corner distance field
    uv: [f32; 2],
    /// Rectangle size in pixels
    rect_size: [f32; 2],
    corner_radius: f32,
    _padding: f32,
}

impl Vertex {
    const ATTRIBUTES: [VertexAttribute; 5] = [
        VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: VertexFormat::Float32x2,
        },
        VertexAttribute {
            offset: 8,
            shader_location: 1,
            format: VertexFormat::Float32x4,
        },
        VertexAttribute {
            offset: 24,
            shader_location: 2,
            format: VertexFormat::Float32x2,
        },
        VertexAttribute {
            offset: 32,
            shader_location: 3,
            format: VertexFormat::Float32x2,
        },
        VertexAttribute {
            offset: 40,
            shader_location: 4,
            format: VertexFormat::Float32,
        },
    ];

    fn desc<'a>() -> VertexBufferLayout<'a> {
        VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// A screen-space rectangle with (0,0) at the top-left of the window.
///
/// ```ignore
/// let wall = Rectangle::new(10.0, 10.0, 40.0, 3.0, [0.8, 0.8, 0.9, 1.0]);
/// let marker = Rectangle::circle(60.0, 60.0, 12.0, [0.43, 0.66, 1.0, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    /// Left edge in window pixels.
    pub x: f32,
    /// Top edge in window pixels.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// RGBA, 0.0 to 1.0
    pub color: [f32; 4],
    /// 0.0 for sharp corners
    pub corner_radius: f32,
}

impl Rectangle {
    /// A square-cornered rectangle.
    pub fn new(x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) -> Self {
        Self {
            x,
            y,
            width,
            height,
            color,
            corner_radius: 0.0,
        }
    }

    /// A disc of radius `radius` centred on (`cx`, `cy`).
    pub fn circle(cx: f32, cy: f32, radius: f32, color: [f32; 4]) -> Self {
        Self::new(cx - radius, cy - radius, radius * 2.0, radius * 2.0, color)
            .with_corner_radius(radius)
    }

    /// Rounds the corners by `radius` pixels.
    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Whether the point lies inside the bounding box.
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Converts rectangles into a vertex and index batch for a window of the
/// given pixel size.
fn build_batch(rectangles: &[Rectangle], window_width: f32, window_height: f32) -> (Vec<Vertex>, Vec<u32>) {
    let mut vertices = Vec::with_capacity(rectangles.len() * 4);
    let mut indices = Vec::with_capacity(rectangles.len() * 6);

    for (i, rect) in rectangles.iter().enumerate() {
        // Screen space has +y down, NDC has +y up.
        let x = (rect.x / window_width) * 2.0 - 1.0;
        let y = 1.0 - (rect.y / window_height) * 2.0;
        let width = (rect.width / window_width) * 2.0;
        let height = -(rect.height / window_height) * 2.0;

        let corner = |position: [f32; 2], uv: [f32; 2]| Vertex {
            position,
            color: rect.color,
            uv,
            rect_size: [rect.width, rect.height],
            corner_radius: rect.corner_radius,
            _padding: 0.0,
        };
        vertices.extend_from_slice(&[
            corner([x, y], [0.0, 0.0]),
            corner([x + width, y], [rect.width, 0.0]),
            corner([x + width, y + height], [rect.width, rect.height]),
            corner([x, y + height], [0.0, rect.height]),
        ]);

        let base = (i * 4) as u32;
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (vertices, indices)
}

/// Batches rectangles and draws them with one pipeline.
pub struct RectangleRenderer {
    render_pipeline: RenderPipeline,
    rectangles: Vec<Rectangle>,
    window_width: f32,
    window_height: f32,
}

impl RectangleRenderer {
    /// Compiles the rectangle shader and pipeline for `surface_format`.
    pub fn new(device: &Device, surface_format: wgpu::TextureFormat, width: u32, height: u32) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Rectangle Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/rectangle.wgsl").into()),
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Rectangle Pipeline Layout"),
                bind_group_layouts: &[],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Rectangle Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(ColorTargetState {
                    format: surface_format,
                    blend: Some(BlendState::ALPHA_BLENDING),
                    write_mask: ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Corners are emitted clockwise in NDC.
                cull_mode: Some(wgpu::Face::Front),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        Self {
            render_pipeline,
            rectangles: Vec::new(),
            window_width: width.max(1) as f32,
            window_height: height.max(1) as f32,
        }
    }

    /// Queues one rectangle for the next render.
    pub fn add_rectangle(&mut self, rectangle: Rectangle) {
        self.rectangles.push(rectangle);
    }

    /// Queues several rectangles, drawn in order.
    pub fn extend(&mut self, rectangles: impl IntoIterator<Item = Rectangle>) {
        self.rectangles.extend(rectangles);
    }

    /// Empties the queue.
    pub fn clear_rectangles(&mut self) {
        self.rectangles.clear();
    }

    /// Must be called on window resize so pixel coordinates map correctly.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.window_width = width.max(1.0);
        self.window_height = height.max(1.0);
    }

    /// Draws every queued rectangle in one call.
    pub fn render(&self, device: &Device, render_pass: &mut RenderPass) {
        if self.rectangles.is_empty() {
            return;
        }

        let (vertices, indices) = build_batch(&self.rectangles, self.window_width, self.window_height);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Rectangle Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Rectangle Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: BufferUsages::INDEX,
        });

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..indices.len() as u32, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_size() {
        assert_eq!(mem::size_of::<Vertex>(), 48);
    }

    /// A full-window rectangle covers NDC from (-1, 1) to (1, -1).
    #[test]
    fn test_full_window_batch() {
        let rect = Rectangle::new(0.0, 0.0, 800.0, 600.0, [1.0; 4]);
        let (vertices, indices) = build_batch(&[rect], 800.0, 600.0);
        assert_eq!(vertices.len(), 4);
        assert_eq!(indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(vertices[0].position, [-1.0, 1.0]);
        assert_eq!(vertices[2].position, [1.0, -1.0]);
        assert_eq!(vertices[2].uv, [800.0, 600.0]);
    }

    #[test]
    fn test_indices_offset_per_rectangle() {
        let rects = vec![Rectangle::new(0.0, 0.0, 1.0, 1.0, [1.0; 4]); 3];
        let (vertices, indices) = build_batch(&rects, 100.0, 100.0);
        assert_eq!(vertices.len(), 12);
        assert_eq!(&indices[12..], &[8, 9, 10, 8, 10, 11]);
    }

    #[test]
    fn test_circle_geometry() {
        let disc = Rectangle::circle(50.0, 40.0, 10.0, [1.0; 4]);
        assert_eq!((disc.x, disc.y, disc.width, disc.height), (40.0, 30.0, 20.0, 20.0));
        assert_eq!(disc.corner_radius, 10.0);
        assert!(disc.contains_point(50.0, 40.0));
        assert!(!disc.contains_point(61.0, 40.0));
    }
}
