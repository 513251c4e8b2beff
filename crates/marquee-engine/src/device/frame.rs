use crate::coords::ViewportRect;

/// Represents a single acquired frame.
///
/// This object is short-lived and must be finalized promptly. Holding the surface
/// texture prevents acquisition of subsequent frames.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// Draw access to the pending (already cleared) frame.
///
/// Shaders read the projection uniform from bind group 0, binding 0:
/// `struct Projection { matrix: mat4x4<f32> }`.
pub struct FrameTarget<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
    pub depth_view: Option<&'a wgpu::TextureView>,
    pub surface_format: wgpu::TextureFormat,
    pub depth_format: Option<wgpu::TextureFormat>,

    /// Viewport clipped to the render target; `None` if nothing is visible.
    pub viewport: Option<ViewportRect>,

    pub projection: &'a wgpu::BindGroup,
    pub projection_layout: &'a wgpu::BindGroupLayout,
}

impl FrameTarget<'_> {
    /// Opens a render pass that loads the cleared color and depth
    /// attachments, with the viewport applied and the projection bound at
    /// group 0.
    ///
    /// Returns `None` when the viewport lies entirely outside the window.
    pub fn begin_pass(&mut self, label: &str) -> Option<wgpu::RenderPass<'_>> {
        self.open_pass(label, true)
    }

    /// Like [`FrameTarget::begin_pass`] without the depth attachment, for
    /// pipelines that declare no depth state.
    pub fn begin_color_pass(&mut self, label: &str) -> Option<wgpu::RenderPass<'_>> {
        self.open_pass(label, false)
    }

    fn open_pass(&mut self, label: &str, with_depth: bool) -> Option<wgpu::RenderPass<'_>> {
        let viewport = self.viewport?;

        let depth_view = if with_depth { self.depth_view } else { None };
        let depth_stencil_attachment =
            depth_view.map(|view| wgpu::RenderPassDepthStencilAttachment {
                view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            });

        let mut pass = self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        pass.set_viewport(
            viewport.x as f32,
            viewport.y as f32,
            viewport.width as f32,
            viewport.height as f32,
            0.0,
            1.0,
        );
        pass.set_bind_group(0, self.projection, &[]);

        Some(pass)
    }
}
