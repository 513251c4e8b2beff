//! External media overlay.
//!
//! Video playback is delegated to a player process that draws on a hardware
//! layer above the frontend's surface. The frontend only computes where the
//! player window goes (in the rotated screen frame) and supervises the child.

mod omxplayer;
mod request;

pub use omxplayer::{build_args, volume_millibels, window_rect, OmxPlayerOptions, OmxPlayerOverlay};
pub use request::{OverlayHandle, OverlayRequest, Placement};

use std::process::ExitStatus;

use anyhow::Result;

/// Supervised external player.
pub trait ExternalMediaOverlay {
    /// Launches playback. On error no process is left behind.
    fn start(&mut self, request: &OverlayRequest) -> Result<OverlayHandle>;

    /// Kills the player and reaps it. Unknown handles are ignored.
    fn stop(&mut self, handle: OverlayHandle);

    /// Exit status once the player has terminated on its own; the handle is
    /// released at that point.
    fn poll(&mut self, handle: &OverlayHandle) -> Option<ExitStatus>;
}
