//! Drawing on top of the projected frame.
//!
//! Convention:
//! - CPU geometry is in logical screen pixels (top-left origin, +Y down)
//! - shaders read the projection uniform at group 0 and never see rotation
//!   or offsets directly

mod calibration;

pub use calibration::CalibrationPattern;
