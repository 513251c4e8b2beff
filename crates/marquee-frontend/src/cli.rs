use std::path::PathBuf;

use clap::Parser;
use marquee_engine::config::DisplayOverrides;

#[derive(Parser, Debug, Clone)]
#[command(name = "marquee")]
#[command(about = "Game launcher frontend display", long_about = None)]
pub struct Cli {
    /// Settings file (JSON); defaults to ~/.marquee/settings.json
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Window size; 0 0 uses the native display mode
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"])]
    pub resolution: Option<Vec<u32>>,

    /// Logical screen size; 0 0 uses the window size
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"])]
    pub screensize: Option<Vec<u32>>,

    /// Viewport offset inside the window
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    pub screenoffset: Option<Vec<i32>>,

    /// Quarter turns clockwise (0-3)
    #[arg(long, value_name = "STEPS", allow_negative_numbers = true)]
    pub screenrotate: Option<i64>,

    #[arg(long, conflicts_with = "fullscreen")]
    pub windowed: bool,

    #[arg(long)]
    pub fullscreen: bool,

    /// Synchronize buffer swaps with the display
    #[arg(long, value_name = "0|1", value_parser = parse_switch)]
    pub vsync: Option<bool>,

    /// Anchor the viewport at the window origin regardless of screen offsets
    #[arg(long = "ignore-offsets")]
    pub ignore_offsets: bool,

    /// Draw the rotation/offset calibration pattern
    #[arg(long)]
    pub calibrate: bool,

    /// Play a video through the external overlay player
    #[arg(long, value_name = "PATH")]
    pub video: Option<PathBuf>,

    /// System volume handed to the overlay player (0-100)
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub volume: u32,

    /// Debug log level
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    pub fn overrides(&self) -> DisplayOverrides {
        let windowed = if self.windowed {
            Some(true)
        } else if self.fullscreen {
            Some(false)
        } else {
            None
        };

        DisplayOverrides {
            window_size: pair(&self.resolution),
            screen_size: pair(&self.screensize),
            screen_offset: pair(&self.screenoffset),
            rotate: self.screenrotate,
            windowed,
            vsync: self.vsync,
        }
    }

    pub fn settings_path(&self) -> Option<PathBuf> {
        self.settings.clone().or_else(|| {
            std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".marquee/settings.json"))
        })
    }
}

fn pair<T: Copy>(values: &Option<Vec<T>>) -> Option<(T, T)> {
    match values.as_deref() {
        Some([a, b]) => Some((*a, *b)),
        _ => None,
    }
}

fn parse_switch(s: &str) -> Result<bool, String> {
    match s {
        "1" | "true" | "on" => Ok(true),
        "0" | "false" | "off" => Ok(false),
        other => Err(format!("expected 0 or 1, got '{other}'")),
    }
}
