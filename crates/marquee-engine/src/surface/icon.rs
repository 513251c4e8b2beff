use anyhow::{Context, Result};

/// Window icon compiled into the binary.
pub const EMBEDDED_ICON_PNG: &[u8] = include_bytes!("../../assets/window_icon_64.png");

/// Decoded RGBA8 icon, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowIcon {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

pub fn decode_icon(png: &[u8]) -> Result<WindowIcon> {
    let image = image::load_from_memory_with_format(png, image::ImageFormat::Png)
        .context("failed to decode window icon")?
        .into_rgba8();
    let (width, height) = image.dimensions();

    Ok(WindowIcon {
        rgba: image.into_raw(),
        width,
        height,
    })
}
