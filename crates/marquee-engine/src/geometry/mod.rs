//! Screen geometry and projection.
//!
//! Combines the configured window size, logical screen size, offsets and
//! rotation into the values every draw call depends on:
//! - [`DisplayLayout`]: window size requested from the platform before the window exists
//! - [`ScreenGeometry`]: effective (possibly axis-swapped) dimensions after creation
//! - [`Projection`]: viewport rectangle plus projection/model matrices
//!
//! Logical drawing space is top-left origin, +Y down. Rotation is expressed
//! as a transform layered over an unrotated viewport, never as a differently
//! shaped viewport.

mod layout;
mod projection;
mod rotation;
mod screen;

pub use layout::DisplayLayout;
pub use projection::{OffsetPolicy, Projection, VisibleProjection};
pub use rotation::Rotation;
pub use screen::{resolve_geometry, ScreenGeometry};
