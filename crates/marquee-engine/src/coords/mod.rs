//! Pixel-space types shared by the geometry resolver and the graphics device.
//!
//! Canonical space:
//! - Physical window pixels
//! - Origin top-left
//! - +X right, +Y down

mod color;
mod viewport;

pub use color::ColorRgba;
pub use viewport::ViewportRect;
