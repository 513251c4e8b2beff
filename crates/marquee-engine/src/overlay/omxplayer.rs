use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};

use anyhow::{Context, Result};

use crate::geometry::{Rotation, ScreenGeometry};
use crate::settings::{keys, Settings};

use super::{ExternalMediaOverlay, OverlayHandle, OverlayRequest};

const DEFAULT_BINARY: &str = "/usr/bin/omxplayer.bin";
const LIBRARY_PATH: &str = "/opt/vc/libs:/usr/lib/omxplayer";

/// Display layer above the frontend's surface.
const LAYER: &str = "10010";

const MUTED_MILLIBELS: i32 = -1_000_000;

/// Player settings that do not change between requests.
#[derive(Debug, Clone, PartialEq)]
pub struct OmxPlayerOptions {
    pub binary: PathBuf,
    pub audio_device: String,
    pub video_audio: bool,
    pub stretch_on_screensaver: bool,
    pub screensaver_game_info: String,
    pub rotation: Rotation,
    /// Post-swap screen height of the renderer.
    pub screen_height: u32,
}

impl OmxPlayerOptions {
    pub fn from_settings(settings: &Settings, geometry: &ScreenGeometry) -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_BINARY),
            audio_device: settings.get_string(keys::OMX_AUDIO_DEV),
            video_audio: settings.get_bool(keys::VIDEO_AUDIO),
            stretch_on_screensaver: settings.get_bool(keys::STRETCH_VIDEO_ON_SCREENSAVER),
            screensaver_game_info: settings.get_string(keys::SCREENSAVER_GAME_INFO),
            rotation: geometry.rotation(),
            screen_height: geometry.screen_height(),
        }
    }

    fn subtitles_enabled(&self) -> bool {
        self.screensaver_game_info != "never"
    }
}

/// Player window as `(x1, y1, x2, y2)` in physical display pixels.
///
/// For 90° and 270° the player rotates its own output, so the box is
/// transposed and mirrored against the screen height.
pub fn window_rect(request: &OverlayRequest, rotation: Rotation, screen_height: u32) -> [i32; 4] {
    let p = &request.placement;
    let x = p.position.x - p.origin.x * p.size.x;

    if rotation.swaps_axes() {
        let y = screen_height as f32 - (p.position.y - (p.origin.y - 1.0) * p.size.y);
        let y2 = (y + p.size.y) as i32;
        [y as i32, x as i32, y2, (x + p.size.x) as i32]
    } else {
        let y = p.position.y - p.origin.y * p.size.y;
        [x as i32, y as i32, (x + p.size.x) as i32, (y + p.size.y) as i32]
    }
}

/// Player volume in millibels; muted when video audio is off or the system
/// volume is zero.
pub fn volume_millibels(video_audio: bool, volume_percent: u32) -> i32 {
    if !video_audio || volume_percent == 0 {
        return MUTED_MILLIBELS;
    }
    ((volume_percent as f32 - 98.0) * 105.0) as i32
}

fn aspect_mode(options: &OmxPlayerOptions, request: &OverlayRequest) -> &'static str {
    let stretch = if request.is_screensaver() {
        options.stretch_on_screensaver
    } else {
        !request.target_is_max
    };
    if stretch { "stretch" } else { "letterbox" }
}

/// Full player command line, without the program name.
pub fn build_args(options: &OmxPlayerOptions, request: &OverlayRequest) -> Vec<OsString> {
    let [x1, y1, x2, y2] = window_rect(request, options.rotation, options.screen_height);

    let mut args: Vec<OsString> = [
        "--layer".to_string(),
        LAYER.to_string(),
        "--loop".to_string(),
        "--no-osd".to_string(),
        "--aspect-mode".to_string(),
        aspect_mode(options, request).to_string(),
        "--vol".to_string(),
        volume_millibels(options.video_audio, request.volume_percent).to_string(),
        "-o".to_string(),
        options.audio_device.clone(),
        "--win".to_string(),
        format!("{x1},{y1},{x2},{y2}"),
        "--orientation".to_string(),
        options.rotation.degrees().to_string(),
        "--no-ghost-box".to_string(),
    ]
    .into_iter()
    .map(OsString::from)
    .collect();

    if let Some(subtitles) = &request.subtitles {
        if options.subtitles_enabled() {
            args.push("--subtitles".into());
            args.push(subtitles.clone().into_os_string());
        }
    }

    args.push(request.video.clone().into_os_string());
    args
}

/// omxplayer launched as a supervised child process.
///
/// Children are reaped on `stop`, on `poll` once they exit, and when the
/// overlay is dropped.
pub struct OmxPlayerOverlay {
    options: OmxPlayerOptions,
    children: HashMap<u64, Child>,
    next_id: u64,
}

impl OmxPlayerOverlay {
    pub fn new(options: OmxPlayerOptions) -> Self {
        Self {
            options,
            children: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn options(&self) -> &OmxPlayerOptions {
        &self.options
    }

    /// Number of players not yet reaped.
    pub fn running(&self) -> usize {
        self.children.len()
    }

    fn reap(id: u64, mut child: Child) {
        // Already exited children report InvalidInput; wait still reaps them.
        if let Err(e) = child.kill() {
            log::debug!("overlay {id}: kill: {e}");
        }
        match child.wait() {
            Ok(status) => log::debug!("overlay {id} stopped ({status})"),
            Err(e) => log::warn!("overlay {id}: failed to reap player: {e}"),
        }
    }
}

impl ExternalMediaOverlay for OmxPlayerOverlay {
    fn start(&mut self, request: &OverlayRequest) -> Result<OverlayHandle> {
        anyhow::ensure!(
            !request.video.as_os_str().is_empty(),
            "no video path given"
        );

        let args = build_args(&self.options, request);
        log::debug!("starting {} {:?}", self.options.binary.display(), args);

        let child = Command::new(&self.options.binary)
            .args(&args)
            .env_clear()
            .env("LD_LIBRARY_PATH", LIBRARY_PATH)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to start {}", self.options.binary.display()))?;

        let id = self.next_id;
        self.next_id += 1;

        let handle = OverlayHandle { id, pid: child.id() };
        log::info!(
            "overlay {id}: playing {} (pid {})",
            request.video.display(),
            handle.pid
        );

        self.children.insert(id, child);
        Ok(handle)
    }

    fn stop(&mut self, handle: OverlayHandle) {
        if let Some(child) = self.children.remove(&handle.id) {
            Self::reap(handle.id, child);
        }
    }

    fn poll(&mut self, handle: &OverlayHandle) -> Option<ExitStatus> {
        let child = self.children.get_mut(&handle.id)?;
        match child.try_wait() {
            Ok(Some(status)) => {
                log::debug!("overlay {}: player exited ({status})", handle.id);
                self.children.remove(&handle.id);
                Some(status)
            }
            Ok(None) => None,
            Err(e) => {
                log::warn!("overlay {}: failed to query player: {e}", handle.id);
                None
            }
        }
    }
}

impl Drop for OmxPlayerOverlay {
    fn drop(&mut self) {
        for (id, child) in self.children.drain() {
            Self::reap(id, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::overlay::Placement;

    fn options(rotation: Rotation) -> OmxPlayerOptions {
        OmxPlayerOptions {
            binary: PathBuf::from(DEFAULT_BINARY),
            audio_device: "both".into(),
            video_audio: true,
            stretch_on_screensaver: false,
            screensaver_game_info: "never".into(),
            rotation,
            screen_height: 600,
        }
    }

    fn gamelist_request() -> OverlayRequest {
        OverlayRequest {
            video: PathBuf::from("/roms/snes/media/video.mp4"),
            placement: Placement {
                position: Vec2::new(400.0, 300.0),
                origin: Vec2::new(0.5, 0.5),
                size: Vec2::new(200.0, 100.0),
            },
            target_is_max: false,
            subtitles: None,
            volume_percent: 98,
        }
    }

    fn screensaver_request() -> OverlayRequest {
        OverlayRequest {
            subtitles: Some(PathBuf::from("/tmp/gameinfo.srt")),
            ..gamelist_request()
        }
    }

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    fn value_after(args: &[String], flag: &str) -> Option<String> {
        let i = args.iter().position(|a| a == flag)?;
        args.get(i + 1).cloned()
    }

    // ── placement ───────────────────────────────────────────────────────────

    #[test]
    fn even_rotation_window_is_top_left_anchored_box() {
        let rect = window_rect(&gamelist_request(), Rotation::Deg0, 600);
        assert_eq!(rect, [300, 250, 500, 350]);

        let rect = window_rect(&gamelist_request(), Rotation::Deg180, 600);
        assert_eq!(rect, [300, 250, 500, 350]);
    }

    #[test]
    fn odd_rotation_window_is_transposed_against_screen_height() {
        // y' = 600 - (300 - (0.5 - 1) * 100) = 250
        let rect = window_rect(&gamelist_request(), Rotation::Deg90, 600);
        assert_eq!(rect, [250, 300, 350, 500]);
    }

    #[test]
    fn top_left_subtracts_scaled_origin() {
        let p = gamelist_request().placement;
        assert_eq!(p.top_left(), Vec2::new(300.0, 250.0));
    }

    // ── volume ──────────────────────────────────────────────────────────────

    #[test]
    fn volume_scales_around_98_percent() {
        assert_eq!(volume_millibels(true, 98), 0);
        assert_eq!(volume_millibels(true, 100), 210);
        assert_eq!(volume_millibels(true, 50), -5040);
    }

    #[test]
    fn volume_mutes_without_audio() {
        assert_eq!(volume_millibels(false, 80), MUTED_MILLIBELS);
        assert_eq!(volume_millibels(true, 0), MUTED_MILLIBELS);
    }

    // ── arguments ───────────────────────────────────────────────────────────

    #[test]
    fn gamelist_args() {
        let args = strings(&build_args(&options(Rotation::Deg0), &gamelist_request()));

        assert_eq!(&args[..4], ["--layer", "10010", "--loop", "--no-osd"]);
        assert_eq!(value_after(&args, "--aspect-mode").as_deref(), Some("stretch"));
        assert_eq!(value_after(&args, "--vol").as_deref(), Some("0"));
        assert_eq!(value_after(&args, "-o").as_deref(), Some("both"));
        assert_eq!(value_after(&args, "--win").as_deref(), Some("300,250,500,350"));
        assert_eq!(value_after(&args, "--orientation").as_deref(), Some("0"));
        assert!(!args.contains(&"--subtitles".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("/roms/snes/media/video.mp4"));
    }

    #[test]
    fn gamelist_max_box_letterboxes() {
        let request = OverlayRequest {
            target_is_max: true,
            ..gamelist_request()
        };
        let args = strings(&build_args(&options(Rotation::Deg0), &request));
        assert_eq!(value_after(&args, "--aspect-mode").as_deref(), Some("letterbox"));
    }

    #[test]
    fn screensaver_follows_stretch_setting() {
        let mut opts = options(Rotation::Deg0);
        let args = strings(&build_args(&opts, &screensaver_request()));
        assert_eq!(value_after(&args, "--aspect-mode").as_deref(), Some("letterbox"));

        opts.stretch_on_screensaver = true;
        let args = strings(&build_args(&opts, &screensaver_request()));
        assert_eq!(value_after(&args, "--aspect-mode").as_deref(), Some("stretch"));
    }

    #[test]
    fn screensaver_subtitles_only_when_game_info_shown() {
        let mut opts = options(Rotation::Deg0);
        let args = strings(&build_args(&opts, &screensaver_request()));
        assert!(!args.contains(&"--subtitles".to_string()));

        opts.screensaver_game_info = "always".into();
        let args = strings(&build_args(&opts, &screensaver_request()));
        assert_eq!(value_after(&args, "--subtitles").as_deref(), Some("/tmp/gameinfo.srt"));
        assert_eq!(args.last().map(String::as_str), Some("/roms/snes/media/video.mp4"));
    }

    #[test]
    fn rotation_sets_orientation_degrees() {
        let args = strings(&build_args(&options(Rotation::Deg270), &gamelist_request()));
        assert_eq!(value_after(&args, "--orientation").as_deref(), Some("270"));
    }

    #[test]
    fn options_from_settings_use_geometry() {
        let settings = Settings::with_defaults();
        let config = crate::config::DisplayConfig {
            rotation: Rotation::Deg90,
            ..Default::default()
        };
        let geometry = crate::geometry::resolve_geometry(&config, (800, 600));

        let opts = OmxPlayerOptions::from_settings(&settings, &geometry);
        assert_eq!(opts.audio_device, "both");
        assert!(opts.video_audio);
        assert_eq!(opts.rotation, Rotation::Deg90);
        assert_eq!(opts.screen_height, 800);
    }

    // ── process supervision ─────────────────────────────────────────────────

    #[test]
    fn missing_binary_fails_without_handle() {
        let mut overlay = OmxPlayerOverlay::new(OmxPlayerOptions {
            binary: PathBuf::from("/nonexistent/omxplayer.bin"),
            ..options(Rotation::Deg0)
        });

        assert!(overlay.start(&gamelist_request()).is_err());
        assert_eq!(overlay.running(), 0);
    }

    #[test]
    fn empty_video_path_is_rejected() {
        let mut overlay = OmxPlayerOverlay::new(options(Rotation::Deg0));
        let request = OverlayRequest {
            video: PathBuf::new(),
            ..gamelist_request()
        };
        assert!(overlay.start(&request).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn exited_player_is_reaped_by_poll() {
        let mut overlay = OmxPlayerOverlay::new(OmxPlayerOptions {
            binary: PathBuf::from("/bin/true"),
            ..options(Rotation::Deg0)
        });

        let handle = overlay.start(&gamelist_request()).unwrap();
        assert_eq!(overlay.running(), 1);

        let mut status = None;
        for _ in 0..200 {
            status = overlay.poll(&handle);
            if status.is_some() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }

        assert!(status.is_some_and(|s| s.success()));
        assert_eq!(overlay.running(), 0);
        assert!(overlay.poll(&handle).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn stop_kills_and_reaps() {
        let mut overlay = OmxPlayerOverlay::new(OmxPlayerOptions {
            binary: PathBuf::from("/bin/true"),
            ..options(Rotation::Deg0)
        });

        let handle = overlay.start(&gamelist_request()).unwrap();
        overlay.stop(handle);
        assert_eq!(overlay.running(), 0);
    }
}
