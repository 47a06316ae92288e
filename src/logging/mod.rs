//! Structured logging configuration for dockdash

use std::str::FromStr;
use std::sync::Mutex;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{
    fmt::{self, time::UtcTime, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Errors raised while installing the global subscriber
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("File path required for file output")]
    MissingFilePath,

    #[error("Failed to open log file {path}: {source}")]
    FileOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("A global subscriber is already installed: {0}")]
    AlreadyInitialized(String),
}

/// Logging configuration for dockdash
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: LogLevel,
    /// Log format (json, pretty, compact)
    pub format: LogFormat,
    /// Output destination (stdout, file, both)
    pub output: LogOutput,
    /// File path for file output
    pub file_path: Option<String>,
    /// Include source file and line numbers
    pub include_source: bool,
    pub include_thread_names: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format for development
    Pretty,
    Compact,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    File,
    Both,
}

impl FromStr for LogOutput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stdout" => Ok(LogOutput::Stdout),
            "file" => Ok(LogOutput::File),
            "both" => Ok(LogOutput::Both),
            _ => Err(format!("Invalid log output: {}", s)),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            output: LogOutput::Stdout,
            file_path: None,
            include_source: false,
            include_thread_names: false,
        }
    }
}

impl LogConfig {
    pub fn development() -> Self {
        Self {
            level: LogLevel::Debug,
            include_source: true,
            ..Self::default()
        }
    }

    /// Load configuration from `DOCKDASH_LOG_*` environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build a configuration from a variable lookup; unparsable values keep the default
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup("DOCKDASH_LOG_LEVEL").and_then(|v| v.parse().ok()) {
            config.level = level;
        }

        if let Some(format) = lookup("DOCKDASH_LOG_FORMAT").and_then(|v| v.parse().ok()) {
            config.format = format;
        }

        if let Some(output) = lookup("DOCKDASH_LOG_OUTPUT").and_then(|v| v.parse().ok()) {
            config.output = output;
        }

        if let Some(file_path) = lookup("DOCKDASH_LOG_FILE") {
            // A file path alone implies file output
            if config.output == LogOutput::Stdout && lookup("DOCKDASH_LOG_OUTPUT").is_none() {
                config.output = LogOutput::File;
            }
            config.file_path = Some(file_path);
        }

        if let Some(include_source) = lookup("DOCKDASH_LOG_SOURCE") {
            config.include_source = include_source.eq_ignore_ascii_case("true");
        }

        config
    }
}

/// Initialize the global tracing subscriber with the given configuration
pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    let filter = create_filter(config);

    let mut layers: Vec<BoxedLayer> = Vec::new();
    if matches!(config.output, LogOutput::Stdout | LogOutput::Both) {
        layers.push(format_layer(config, std::io::stdout));
    }
    if matches!(config.output, LogOutput::File | LogOutput::Both) {
        let path = config
            .file_path
            .as_deref()
            .ok_or(LoggingError::MissingFilePath)?;
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LoggingError::FileOpen {
                path: path.to_string(),
                source,
            })?;
        layers.push(format_layer(config, Mutex::new(file)));
    }

    tracing_subscriber::registry()
        .with(layers.with_filter(filter))
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    info!(level = config.level.as_str(), format = ?config.format, output = ?config.output, "Logging initialized");
    Ok(())
}

/// Filter for our own targets; `RUST_LOG` wins when set
fn create_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config.level)))
}

fn filter_directive(level: LogLevel) -> String {
    format!("dockdash={}", level.as_str())
}

fn format_layer<W>(config: &LogConfig, writer: W) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_timer(UtcTime::rfc_3339())
        .with_thread_names(config.include_thread_names)
        .with_file(config.include_source)
        .with_line_number(config.include_source);

    match config.format {
        LogFormat::Pretty => Box::new(layer.pretty()),
        LogFormat::Compact => Box::new(layer.compact()),
        LogFormat::Json => Box::new(layer.json()),
    }
}
