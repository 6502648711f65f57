//! Structured logging setup.
//!
//! Thin wrapper over `tracing-subscriber` with:
//! - Level presets for development, production and test runs
//! - Human-readable, compact and JSON output formats
//! - `RUST_LOG` taking precedence over the configured level

use tracing::Level;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Log verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Everything, including per-chunk body reads.
    Trace,
    /// Attempt-level detail: responses, previews, backoff decisions.
    Debug,
    /// Request summaries and lifecycle events.
    Info,
    /// Retries, suspicious configuration, degraded answers.
    Warn,
    /// Terminal failures only.
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line human-readable output.
    Pretty,
    /// Single-line output, good for test runs.
    Compact,
    /// JSON lines for log aggregation.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum level emitted when `RUST_LOG` is unset.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
    /// Whether to include timestamps.
    pub show_time: bool,
    /// Whether to include thread IDs.
    pub show_thread_ids: bool,
    /// Whether to include the module path of the caller.
    pub show_target: bool,
    /// Whether to emit span enter/close events.
    pub show_span_events: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            show_time: true,
            show_thread_ids: false,
            show_target: true,
            show_span_events: false,
        }
    }
}

impl LogConfig {
    /// Verbose pretty output for local debugging.
    pub fn development() -> Self {
        Self {
            level: LogLevel::Debug,
            format: LogFormat::Pretty,
            show_span_events: true,
            ..Self::default()
        }
    }

    /// JSON output with thread IDs for aggregated environments.
    pub fn production() -> Self {
        Self {
            format: LogFormat::Json,
            show_thread_ids: true,
            ..Self::default()
        }
    }

    /// Quiet compact output for test runs.
    pub fn test() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Compact,
            show_time: false,
            show_target: false,
            ..Self::default()
        }
    }
}

fn build_layer(config: &LogConfig) -> Box<dyn Layer<Registry> + Send + Sync> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "demoblaze_core={},demoblaze_api={}",
            config.level, config.level
        ))
    });

    let span_events = if config.show_span_events {
        FmtSpan::ENTER | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    match config.format {
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .pretty()
                .with_thread_ids(config.show_thread_ids)
                .with_target(config.show_target)
                .with_span_events(span_events);
            if config.show_time {
                layer.with_filter(env_filter).boxed()
            } else {
                layer.without_time().with_filter(env_filter).boxed()
            }
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_thread_ids(config.show_thread_ids)
                .with_target(config.show_target)
                .with_span_events(span_events);
            if config.show_time {
                layer.with_filter(env_filter).boxed()
            } else {
                layer.without_time().with_filter(env_filter).boxed()
            }
        }
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_thread_ids(config.show_thread_ids)
                .with_target(config.show_target)
                .with_span_events(span_events);
            if config.show_time {
                layer.with_filter(env_filter).boxed()
            } else {
                layer.without_time().with_filter(env_filter).boxed()
            }
        }
    }
}

/// Initializes the global logging subscriber.
///
/// Panics if a subscriber is already installed; use
/// [`try_init_logging`] where double initialization is possible.
///
/// # Examples
///
/// ```no_run
/// use demoblaze_core::logging::{LogConfig, init_logging};
///
/// init_logging(&LogConfig::development());
/// ```
pub fn init_logging(config: &LogConfig) {
    tracing_subscriber::registry()
        .with(build_layer(config))
        .init();
}

/// Initializes the global logging subscriber, ignoring duplicate
/// initialization. Suitable for tests.
pub fn try_init_logging(config: &LogConfig) {
    let _ = tracing_subscriber::registry()
        .with(build_layer(config))
        .try_init();
}
