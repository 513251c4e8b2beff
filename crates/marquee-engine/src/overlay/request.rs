use std::path::PathBuf;

use glam::Vec2;

/// Where a video sits in logical screen coordinates.
///
/// `origin` is the normalized anchor inside the box: `(0,0)` places
/// `position` at the top-left corner, `(0.5,0.5)` at the center.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Placement {
    pub position: Vec2,
    pub origin: Vec2,
    pub size: Vec2,
}

impl Placement {
    pub fn top_left(&self) -> Vec2 {
        self.position - self.origin * self.size
    }
}

/// One playback request.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayRequest {
    pub video: PathBuf,
    pub placement: Placement,

    /// The box is an upper bound for the video rather than its exact size.
    pub target_is_max: bool,

    /// Subtitle file with game info; present for screensaver playback only.
    pub subtitles: Option<PathBuf>,

    /// System volume, 0..=100.
    pub volume_percent: u32,
}

impl OverlayRequest {
    pub fn is_screensaver(&self) -> bool {
        self.subtitles.is_some()
    }
}

/// Opaque reference to a running player.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct OverlayHandle {
    pub(super) id: u64,
    pub(super) pid: u32,
}

impl OverlayHandle {
    /// OS process id of the player.
    pub fn pid(&self) -> u32 {
        self.pid
    }
}
