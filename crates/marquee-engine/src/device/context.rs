use std::sync::Arc;

use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::coords::{ColorRgba, ViewportRect};
use crate::geometry::Projection;

use super::swapchain;
use super::{DisplayError, FramebufferHints, FrameTarget, GpuFrame, SurfaceErrorAction};

/// GPU layout of the projection uniform.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct ProjectionUniform {
    pub matrix: [[f32; 4]; 4],
}

impl ProjectionUniform {
    pub fn from_projection(projection: &Projection) -> Self {
        Self::from_matrix(projection.matrix())
    }

    pub fn from_matrix(matrix: Mat4) -> Self {
        Self {
            matrix: matrix.to_cols_array_2d(),
        }
    }
}

struct ProjectionBinding {
    buffer: wgpu::Buffer,
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

/// Graphics context bound to one window.
///
/// This type is the low-level rendering context:
/// - owns Device/Queue and the configured Surface (swapchain)
/// - owns the depth attachment and the projection uniform
/// - keeps one pending frame between swaps, already cleared for drawing
pub struct GraphicsContext {
    /// Surface bound to the window. Holding an `Arc<Window>` keeps the window
    /// alive for as long as the surface.
    surface: wgpu::Surface<'static>,

    device: wgpu::Device,
    queue: wgpu::Queue,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    /// Present modes advertised by the surface.
    present_modes: Vec<wgpu::PresentMode>,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,

    depth_format: Option<wgpu::TextureFormat>,
    depth_view: Option<wgpu::TextureView>,

    projection: ProjectionBinding,

    /// Last projection uploaded; re-cropped whenever the surface size changes.
    source: Option<Projection>,

    /// Visible viewport of `source` on the current surface.
    viewport: Option<ViewportRect>,

    /// Frame acquired and cleared by the previous swap.
    pending: Option<GpuFrame>,
}

impl GraphicsContext {
    /// Creates a graphics context bound to a window.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn new(window: Arc<Window>, hints: &FramebufferHints) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: hints.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let info = adapter.get_info();
        log::info!("graphics adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("marquee device"),
                required_features: wgpu::Features::empty(),
                required_limits: hints.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let format = swapchain::choose_surface_format(&caps.formats, hints)
            .context("no supported surface formats")?;
        let alpha_mode =
            swapchain::choose_alpha_mode(&caps.alpha_modes, Some(wgpu::CompositeAlphaMode::Opaque));

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: hints.maximum_frame_latency(),
        };

        surface.configure(&device, &config);

        let depth_format = hints.depth_format();
        let depth_view = depth_format.map(|f| swapchain::create_depth_view(&device, f, size));

        log::debug!(
            "surface configured: {}x{} {:?}, depth {:?}",
            size.width,
            size.height,
            format,
            depth_format
        );

        let projection = create_projection_binding(&device);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            present_modes: caps.present_modes,
            size,
            depth_format,
            depth_view,
            projection,
            source: None,
            viewport: Some(ViewportRect::from_size(size.width, size.height)),
            pending: None,
        })
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn depth_format(&self) -> Option<wgpu::TextureFormat> {
        self.depth_format
    }

    /// Returns the current drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn present_mode(&self) -> wgpu::PresentMode {
        self.config.present_mode
    }

    /// Layout of the projection bind group; pipelines use it for group 0.
    pub fn projection_layout(&self) -> &wgpu::BindGroupLayout {
        &self.projection.layout
    }

    /// Switches the present mode. Modes the surface does not advertise are refused.
    pub fn set_present_mode(&mut self, mode: wgpu::PresentMode) -> Result<(), String> {
        if !swapchain::supports_present_mode(&self.present_modes, mode) {
            return Err(format!(
                "{mode:?} not supported (available: {:?})",
                self.present_modes
            ));
        }

        self.config.present_mode = mode;
        self.surface.configure(&self.device, &self.config);
        Ok(())
    }

    /// Uploads the projection cropped to the current surface.
    pub fn upload_projection(&mut self, projection: &Projection) {
        let requested = projection.viewport();
        if !requested.fits_within(self.size.width, self.size.height) {
            log::warn!(
                "viewport {:?} exceeds the {}x{} surface; cropping",
                requested,
                self.size.width,
                self.size.height
            );
        }

        self.source = Some(*projection);
        self.write_projection();
    }

    /// Visible viewport on the current surface; `None` when fully off-surface.
    pub fn viewport(&self) -> Option<ViewportRect> {
        self.viewport
    }

    fn write_projection(&mut self) {
        let Some(source) = self.source else {
            self.viewport = Some(ViewportRect::from_size(self.size.width, self.size.height));
            return;
        };

        match source.visible_on(self.size.width, self.size.height) {
            Some(visible) => {
                let uniform = ProjectionUniform::from_matrix(visible.matrix);
                self.queue
                    .write_buffer(&self.projection.buffer, 0, bytemuck::bytes_of(&uniform));
                self.viewport = Some(visible.viewport);
            }
            None => self.viewport = None,
        }
    }

    /// Reconfigures the surface after a resize.
    ///
    /// wgpu does not support configuring a surface with a 0x0 size; in that case,
    /// only internal state is updated and configuration is deferred.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        // A pending frame belongs to the old swapchain.
        self.pending = None;

        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);

        self.depth_view = self
            .depth_format
            .map(|f| swapchain::create_depth_view(&self.device, f, new_size));

        self.write_projection();
    }

    /// Presents the pending frame, then acquires the next one and clears its
    /// color and depth attachments.
    ///
    /// Transient surface errors skip the frame; only fatal ones are returned.
    pub fn swap_buffers(&mut self, clear: ColorRgba) -> Result<(), DisplayError> {
        if let Some(frame) = self.pending.take() {
            self.submit(frame);
        }

        if self.size.width == 0 || self.size.height == 0 {
            return Ok(());
        }

        match self.begin_frame(clear) {
            Ok(frame) => {
                self.pending = Some(frame);
                Ok(())
            }
            Err(err) => match self.handle_surface_error(&err) {
                SurfaceErrorAction::Fatal => Err(DisplayError::SurfaceLost(err.to_string())),
                action => {
                    log::debug!("frame skipped ({err}): {action:?}");
                    Ok(())
                }
            },
        }
    }

    /// Draw access to the pending frame, if one was acquired.
    pub fn frame_target(&mut self) -> Option<FrameTarget<'_>> {
        let viewport = self.viewport();
        let frame = self.pending.as_mut()?;

        Some(FrameTarget {
            device: &self.device,
            queue: &self.queue,
            encoder: &mut frame.encoder,
            color_view: &frame.view,
            depth_view: self.depth_view.as_ref(),
            surface_format: self.config.format,
            depth_format: self.depth_format,
            viewport,
            projection: &self.projection.bind_group,
            projection_layout: &self.projection.layout,
        })
    }

    fn begin_frame(&self, clear: ColorRgba) -> std::result::Result<GpuFrame, wgpu::SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("marquee frame encoder"),
            });

        // Clear pass, dropped before the encoder is handed out for drawing.
        {
            let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("marquee clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: self.depth_view.as_ref().map(|view| {
                    wgpu::RenderPassDepthStencilAttachment {
                        view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    fn submit(&self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;
        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }

    fn handle_surface_error(&mut self, err: &wgpu::SurfaceError) -> SurfaceErrorAction {
        let action = swapchain::classify_surface_error(err);
        if action == SurfaceErrorAction::Reconfigured && self.size.width > 0 && self.size.height > 0 {
            self.surface.configure(&self.device, &self.config);
        }
        action
    }
}

fn create_projection_binding(device: &wgpu::Device) -> ProjectionBinding {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("marquee projection ubo"),
        size: std::mem::size_of::<ProjectionUniform>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("marquee projection bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(
                    std::mem::size_of::<ProjectionUniform>() as u64,
                ),
            },
            count: None,
        }],
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("marquee projection bind group"),
        layout: &layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    });

    ProjectionBinding {
        buffer,
        layout,
        bind_group,
    }
}
