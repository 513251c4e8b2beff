/// Framebuffer configuration requested before the context is created.
///
/// These are hints: the closest supported surface format is used and nothing
/// fails when a hint cannot be met exactly. Drivers without an 8-bit unorm
/// swapchain format or a 16-bit depth format fall back silently, which can
/// change color precision or depth behavior.
#[derive(Debug, Clone)]
pub struct FramebufferHints {
    pub red_bits: u8,
    pub green_bits: u8,
    pub blue_bits: u8,

    /// Depth buffer precision; `0` disables the depth attachment.
    pub depth_bits: u8,

    /// Double buffering maps to a maximum frame latency of 2.
    pub double_buffer: bool,

    pub power_preference: wgpu::PowerPreference,

    /// Limits requested from the adapter/device.
    ///
    /// Downlevel defaults keep GLES-class devices (the usual cabinet hardware) usable.
    pub required_limits: wgpu::Limits,
}

impl Default for FramebufferHints {
    fn default() -> Self {
        Self {
            red_bits: 8,
            green_bits: 8,
            blue_bits: 8,
            depth_bits: 16,
            double_buffer: true,
            power_preference: wgpu::PowerPreference::HighPerformance,
            required_limits: wgpu::Limits::downlevel_defaults(),
        }
    }
}

impl FramebufferHints {
    /// Whether every color channel asks for at most 8 bits.
    pub fn wants_8bit_color(&self) -> bool {
        self.red_bits <= 8 && self.green_bits <= 8 && self.blue_bits <= 8
    }

    pub fn depth_format(&self) -> Option<wgpu::TextureFormat> {
        match self.depth_bits {
            0 => None,
            1..=16 => Some(wgpu::TextureFormat::Depth16Unorm),
            17..=24 => Some(wgpu::TextureFormat::Depth24Plus),
            _ => Some(wgpu::TextureFormat::Depth32Float),
        }
    }

    pub fn maximum_frame_latency(&self) -> u32 {
        if self.double_buffer { 2 } else { 1 }
    }
}

/// Buffer swap synchronization.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SwapInterval {
    /// Present as soon as possible, tearing allowed.
    Immediate,
    /// Wait for vertical retrace.
    Synchronized,
    /// Wait for retrace unless the frame is late, then tear.
    LateSwapTearing,
}

impl SwapInterval {
    pub fn present_mode(self) -> wgpu::PresentMode {
        match self {
            SwapInterval::Immediate => wgpu::PresentMode::AutoNoVsync,
            SwapInterval::Synchronized => wgpu::PresentMode::Fifo,
            SwapInterval::LateSwapTearing => wgpu::PresentMode::FifoRelaxed,
        }
    }
}
