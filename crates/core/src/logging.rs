//! Tracing subscriber setup.
//!
//! Environment overrides:
//!
//! - `GREEMLS_LOG` (then `RUST_LOG`): stderr filter directive, e.g. `greemls_core=trace`
//! - `GREEMLS_LOG_FORMAT`: `pretty`, `json` or `compact`
//! - `GREEMLS_LOG_DIR`: file log directory, `~/.greemls/logs` otherwise
//!
//! ```no_run
//! use greemls_core::logging::{self, LogSettings};
//!
//! let _guard = logging::init_logging(Some(LogSettings::new().with_level("debug")))?;
//! # Ok::<(), greemls_core::Error>(())
//! ```

use crate::Error;
use crate::config::{FileLoggingConfig, LoggingConfig};
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "greemls.log";

/// Stderr event format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line, colored
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
    /// One line per event
    Compact,
}

impl LogFormat {
    pub const VALUES: &[LogFormat] = &[LogFormat::Pretty, LogFormat::Json, LogFormat::Compact];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
            LogFormat::Compact => "compact",
        }
    }
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogFormat::VALUES
            .iter()
            .copied()
            .find(|format| format.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Config(format!("unknown log format '{}'", s)))
    }
}

/// Resolved subscriber settings
#[derive(Debug, Clone)]
pub struct LogSettings {
    /// Stderr filter used when no environment override is set
    pub level: String,
    pub format: LogFormat,
    /// Present when file logging is enabled
    pub file: Option<FileLoggingConfig>,
    /// Whether events reach stderr at all
    pub stderr: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { level: "warn".to_string(), format: LogFormat::default(), file: None, stderr: true }
    }
}

impl From<LoggingConfig> for LogSettings {
    fn from(config: LoggingConfig) -> Self {
        Self {
            level: config.level,
            format: config.format.parse().unwrap_or_default(),
            file: config.file.enabled.then_some(config.file),
            stderr: true,
        }
    }
}

impl LogSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_file_logging(mut self, config: FileLoggingConfig) -> Self {
        self.file = Some(config);
        self
    }

    pub fn with_stderr(mut self, enabled: bool) -> Self {
        self.stderr = enabled;
        self
    }

    fn stderr_filter(&self) -> EnvFilter {
        let directive = env::var("GREEMLS_LOG")
            .or_else(|_| env::var("RUST_LOG"))
            .unwrap_or_else(|_| self.level.clone());
        EnvFilter::new(directive)
    }

    /// Environment override first; non-TTY stderr falls back to compact.
    fn stderr_format(&self) -> LogFormat {
        if let Some(format) = env::var("GREEMLS_LOG_FORMAT").ok().and_then(|f| f.parse().ok()) {
            return format;
        }

        if atty::is(atty::Stream::Stderr) { self.format } else { LogFormat::Compact }
    }
}

fn log_dir() -> Result<PathBuf, Error> {
    if let Ok(dir) = env::var("GREEMLS_LOG_DIR") {
        return Ok(PathBuf::from(dir));
    }

    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(".greemls").join("logs"))
        .map_err(|_| Error::Config("could not determine home directory for logs".to_string()))
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn stderr_layer(format: LogFormat, filter: EnvFilter) -> BoxedLayer {
    let layer = fmt::layer().with_writer(io::stderr);
    match format {
        LogFormat::Pretty => layer.pretty().with_ansi(true).with_filter(filter).boxed(),
        LogFormat::Json => layer.json().with_filter(filter).boxed(),
        LogFormat::Compact => layer.compact().with_filter(filter).boxed(),
    }
}

/// Install the global subscriber.
///
/// Layers: stderr (unless disabled) and a daily-rolling JSON file when file
/// logging is on. Keep the returned guard alive for as long as file events
/// should be flushed.
pub fn init_logging(settings: Option<LogSettings>) -> Result<Option<WorkerGuard>, Error> {
    let settings = settings.unwrap_or_default();
    let mut layers: Vec<BoxedLayer> = Vec::new();

    if settings.stderr {
        layers.push(stderr_layer(settings.stderr_format(), settings.stderr_filter()));
    }

    let guard = match &settings.file {
        Some(file) => {
            let dir = log_dir()?;
            std::fs::create_dir_all(&dir)
                .map_err(|e| Error::Config(format!("failed to create log directory {}: {}", dir.display(), e)))?;

            let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX));
            layers.push(fmt::layer().json().with_writer(writer).with_filter(EnvFilter::new(&file.level)).boxed());
            Some(guard)
        }
        None => None,
    };

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| Error::Config(format!("failed to initialize logging: {}", e)))?;

    Ok(guard)
}

/// Display `path` with the home directory shortened to `~`
pub fn sanitize_path(path: &Path) -> String {
    match env::var("HOME") {
        Ok(home) if !home.is_empty() => match path.strip_prefix(&home) {
            Ok(rest) => format!("~/{}", rest.display()),
            Err(_) => path.display().to_string(),
        },
        _ => path.display().to_string(),
    }
}
