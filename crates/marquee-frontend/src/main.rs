mod app;
mod cli;

use anyhow::Result;
use clap::Parser;

use marquee_engine::config::DisplayConfig;
use marquee_engine::geometry::OffsetPolicy;
use marquee_engine::logging::{init_logging, LoggingConfig};
use marquee_engine::settings::Settings;
use marquee_engine::surface::SurfaceOptions;
use marquee_engine::window::{Runtime, RuntimeConfig};

use app::FrontendApp;
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(if cli.debug {
        LoggingConfig::debug()
    } else {
        LoggingConfig::default()
    });

    let mut settings = match cli.settings_path() {
        Some(path) => Settings::load(&path)?,
        None => Settings::with_defaults(),
    };
    cli.overrides().apply(&mut settings);

    let policy = if cli.ignore_offsets {
        OffsetPolicy::Ignore
    } else {
        OffsetPolicy::Honor
    };
    let display = DisplayConfig::from_settings(&settings).with_offset_policy(policy);
    log::debug!("display config: {display:?}");

    let config = RuntimeConfig {
        display,
        surface: SurfaceOptions::default(),
    };

    let app = FrontendApp::new(settings, cli.calibrate, cli.video.clone(), cli.volume);

    Runtime::run(config, app)
}
