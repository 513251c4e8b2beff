use bytemuck::{Pod, Zeroable};

use crate::device::FrameTarget;

/// Corner colors, clockwise from top-left.
const CORNER_COLORS: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 1.0],
    [1.0, 1.0, 1.0, 1.0],
];

const BORDER_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
const ARROW_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

/// Test pattern for checking rotation and offsets on a real display.
///
/// Drawn in logical screen space: a border along the screen edges, a colored
/// square in each corner and an arrow pointing at the logical top edge. If
/// the projection is right, the red square sits where the frontend's
/// top-left is, whatever the physical rotation.
#[derive(Default)]
pub struct CalibrationPattern {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,

    vertices: Vec<ColorVertex>,
    built_for: Option<(u32, u32)>,
}

impl CalibrationPattern {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws the pattern for a `screen_width` x `screen_height` logical screen.
    pub fn render(&mut self, target: &mut FrameTarget<'_>, screen_width: u32, screen_height: u32) {
        if screen_width == 0 || screen_height == 0 {
            return;
        }

        self.ensure_pipeline(target);

        if self.built_for != Some((screen_width, screen_height)) {
            self.vertices = pattern_vertices(screen_width as f32, screen_height as f32);
            self.built_for = Some((screen_width, screen_height));
        }

        self.ensure_capacity(target.device, self.vertices.len());

        let Some(vbo) = self.vbo.as_ref() else { return };
        target
            .queue
            .write_buffer(vbo, 0, bytemuck::cast_slice(&self.vertices));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let count = self.vertices.len() as u32;

        let Some(mut rpass) = target.begin_color_pass("marquee calibration pass") else {
            return;
        };

        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(0..count, 0..1);
    }

    fn ensure_pipeline(&mut self, target: &FrameTarget<'_>) {
        if self.pipeline_format == Some(target.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = target
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("marquee calibration shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shaders/calibration.wgsl").into()),
            });

        let pipeline_layout =
            target
                .device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("marquee calibration pipeline layout"),
                    bind_group_layouts: &[target.projection_layout],
                    immediate_size: 0,
                });

        let pipeline = target
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("marquee calibration pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[ColorVertex::layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: target.surface_format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    // Rotation flips winding in clip space; draw both faces.
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });

        self.pipeline_format = Some(target.surface_format);
        self.pipeline = Some(pipeline);
    }

    fn ensure_capacity(&mut self, device: &wgpu::Device, required: usize) {
        if required <= self.vbo_capacity && self.vbo.is_some() {
            return;
        }

        let new_cap = required.next_power_of_two().max(64);
        self.vbo = Some(device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("marquee calibration vbo"),
            size: (new_cap * std::mem::size_of::<ColorVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vbo_capacity = new_cap;
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct ColorVertex {
    pos: [f32; 2],
    color: [f32; 4],
}

impl ColorVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColorVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

fn push_rect(out: &mut Vec<ColorVertex>, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
    let [x0, y0, x1, y1] = [x, y, x + w, y + h];
    for pos in [[x0, y0], [x1, y0], [x1, y1], [x0, y0], [x1, y1], [x0, y1]] {
        out.push(ColorVertex { pos, color });
    }
}

/// Triangle list for the pattern, in logical pixels.
fn pattern_vertices(width: f32, height: f32) -> Vec<ColorVertex> {
    let marker = (width.min(height) / 10.0).max(4.0);
    let border = (marker / 16.0).max(1.0);

    let mut out = Vec::with_capacity(6 * 8 + 3);

    push_rect(&mut out, 0.0, 0.0, width, border, BORDER_COLOR);
    push_rect(&mut out, width - border, 0.0, border, height, BORDER_COLOR);
    push_rect(&mut out, 0.0, height - border, width, border, BORDER_COLOR);
    push_rect(&mut out, 0.0, 0.0, border, height, BORDER_COLOR);

    let corners = [
        (0.0, 0.0),
        (width - marker, 0.0),
        (width - marker, height - marker),
        (0.0, height - marker),
    ];
    for ((x, y), color) in corners.into_iter().zip(CORNER_COLORS) {
        push_rect(&mut out, x, y, marker, marker, color);
    }

    let cx = width / 2.0;
    let top = border * 2.0;
    for pos in [[cx, top], [cx + marker / 2.0, top + marker], [cx - marker / 2.0, top + marker]] {
        out.push(ColorVertex { pos, color: ARROW_COLOR });
    }

    out
}
