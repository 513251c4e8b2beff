use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "marquee_engine=debug,wgpu=warn"). It wins over `RUST_LOG`; `level` is
/// used when neither is set.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Debug level for the frontend, with the GPU stack kept at warn.
    pub fn debug() -> Self {
        Self {
            env_filter: Some("debug,wgpu_core=warn,wgpu_hal=warn,naga=warn".to_string()),
            ..Self::default()
        }
    }

    fn filter(&self) -> Filter {
        if let Some(filter) = &self.env_filter {
            return Filter::Spec(filter.clone());
        }
        match std::env::var("RUST_LOG") {
            Ok(filter) if !filter.trim().is_empty() => Filter::Spec(filter),
            _ => Filter::Level(self.level),
        }
    }
}

#[derive(Debug, PartialEq)]
enum Filter {
    Spec(String),
    Level(log::LevelFilter),
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored.
/// Intended usage is early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.filter() {
            Filter::Spec(spec) => {
                builder.parse_filters(&spec);
            }
            Filter::Level(level) => {
                builder.filter_level(level);
            }
        }

        builder.write_style(config.write_style);

        // A logger installed by the host (tests, embedding) takes precedence.
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized");
    });
}
