use std::fmt;

/// Fatal display failures.
///
/// Every variant aborts initialization; the caller must not enter a frame loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayError {
    /// The windowing subsystem could not start or reported no usable display.
    PlatformInit(String),
    /// The platform refused to create the window.
    WindowCreation(String),
    /// No graphics context could be bound to the window.
    GraphicsContext(String),
    /// An operation that needs a live surface ran before `init` succeeded.
    NotInitialized,
    /// The surface became unusable while presenting (commonly OOM).
    SurfaceLost(String),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::PlatformInit(msg) => {
                write!(f, "failed to initialize windowing subsystem: {msg}")
            }
            DisplayError::WindowCreation(msg) => write!(f, "failed to create window: {msg}"),
            DisplayError::GraphicsContext(msg) => {
                write!(f, "failed to create graphics context: {msg}")
            }
            DisplayError::NotInitialized => write!(f, "display surface is not initialized"),
            DisplayError::SurfaceLost(msg) => write!(f, "display surface lost: {msg}"),
        }
    }
}

impl std::error::Error for DisplayError {}

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}
