//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! The library only emits events; installing a subscriber is the binary's job.
//!
//! # Log Levels
//!
//! - `warn`: failed writes, id collisions
//! - `info`: books added, updated, removed
//! - `debug`: blob reads and writes
//! - `trace`: everything else

use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    /// Whether `RUST_LOG` may override `level`.
    pub use_env_filter: bool,
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            use_env_filter: true,
            with_ansi: true,
        }
    }
}

impl LogConfig {
    /// Create a `LogConfig` from CLI verbosity count.
    ///
    /// - 0: warn
    /// - 1 (`-v`): info
    /// - 2 (`-vv`): debug
    /// - 3+: trace
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            // An explicit -v wins over the environment
            use_env_filter: verbosity == 0,
            ..Default::default()
        }
    }
}

/// Install the global subscriber, writing to stderr.
///
/// Calling it twice is harmless: the second call leaves the first subscriber in place.
pub fn init_logging(config: &LogConfig) {
    let filter = build_env_filter(config);
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(false)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}

fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let fallback =
        || EnvFilter::default().add_directive(LevelFilter::from_level(config.level).into());
    if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}
