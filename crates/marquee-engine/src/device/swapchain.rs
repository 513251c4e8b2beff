use winit::dpi::PhysicalSize;

use super::{FramebufferHints, SurfaceErrorAction};

/// Picks a surface format honoring the color-depth hints.
///
/// Preference: 8-bit unorm, then 8-bit sRGB, then whatever comes first.
pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    hints: &FramebufferHints,
) -> Option<wgpu::TextureFormat> {
    if formats.is_empty() {
        return None;
    }

    if hints.wants_8bit_color() {
        let preferred = [
            wgpu::TextureFormat::Bgra8Unorm,
            wgpu::TextureFormat::Rgba8Unorm,
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        for f in preferred {
            if formats.contains(&f) {
                return Some(f);
            }
        }
    }

    Some(formats[0])
}

pub(crate) fn choose_alpha_mode(
    modes: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| modes.contains(m))
        .or_else(|| modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// `Auto*` modes always resolve to something; explicit modes must be advertised.
pub(crate) fn supports_present_mode(
    modes: &[wgpu::PresentMode],
    mode: wgpu::PresentMode,
) -> bool {
    matches!(
        mode,
        wgpu::PresentMode::AutoVsync | wgpu::PresentMode::AutoNoVsync
    ) || modes.contains(&mode)
}

pub(crate) fn create_depth_view(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    size: PhysicalSize<u32>,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("marquee depth buffer"),
        size: wgpu::Extent3d {
            width: size.width.max(1),
            height: size.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

pub(crate) fn classify_surface_error(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}
