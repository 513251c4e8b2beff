use std::path::PathBuf;

use glam::Vec2;
use marquee_engine::core::{App, AppControl, FrameCtx};
use marquee_engine::geometry::ScreenGeometry;
use marquee_engine::overlay::{
    ExternalMediaOverlay, OmxPlayerOptions, OmxPlayerOverlay, OverlayHandle, OverlayRequest,
    Placement,
};
use marquee_engine::render::CalibrationPattern;
use marquee_engine::settings::Settings;

/// Minimal frontend: a cleared, projected frame, optionally with the
/// calibration pattern and a fullscreen overlay video.
pub struct FrontendApp {
    settings: Settings,
    calibration: Option<CalibrationPattern>,

    video: Option<PathBuf>,
    volume_percent: u32,
    overlay: Option<(OmxPlayerOverlay, OverlayHandle)>,
}

impl FrontendApp {
    pub fn new(settings: Settings, calibrate: bool, video: Option<PathBuf>, volume_percent: u32) -> Self {
        Self {
            settings,
            calibration: calibrate.then(CalibrationPattern::new),
            video,
            volume_percent,
            overlay: None,
        }
    }

    fn start_video(&mut self, video: PathBuf, geometry: &ScreenGeometry) {
        let mut overlay = OmxPlayerOverlay::new(OmxPlayerOptions::from_settings(&self.settings, geometry));

        let request = OverlayRequest {
            video,
            placement: Placement {
                position: Vec2::ZERO,
                origin: Vec2::ZERO,
                size: Vec2::new(geometry.screen_width() as f32, geometry.screen_height() as f32),
            },
            target_is_max: true,
            subtitles: None,
            volume_percent: self.volume_percent,
        };

        match overlay.start(&request) {
            Ok(handle) => self.overlay = Some((overlay, handle)),
            Err(e) => log::warn!("overlay video not started: {e:#}"),
        }
    }
}

impl App for FrontendApp {
    fn on_init(&mut self, geometry: &ScreenGeometry) {
        log::info!(
            "frontend ready: screen {}x{}, unrotated {}x{}, rotate {}",
            geometry.screen_width(),
            geometry.screen_height(),
            geometry.unrotated_width(),
            geometry.unrotated_height(),
            geometry.rotate_steps()
        );

        if let Some(video) = self.video.take() {
            self.start_video(video, geometry);
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        if let Some((overlay, handle)) = self.overlay.as_mut() {
            if let Some(status) = overlay.poll(handle) {
                log::info!("overlay video ended ({status})");
                self.overlay = None;
            }
        }

        let (width, height) = ctx.screen_size();
        if let (Some(pattern), Some(target)) = (self.calibration.as_mut(), ctx.target.as_mut()) {
            pattern.render(target, width, height);
        }

        AppControl::Continue
    }

    fn on_exit(&mut self) {
        if let Some((mut overlay, handle)) = self.overlay.take() {
            overlay.stop(handle);
        }
    }
}
