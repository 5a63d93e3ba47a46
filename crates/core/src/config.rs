use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;

/// Subscription tiers of the GREEMLS suite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Plan {
    /// Basic features; the intro cannot be skipped from the header
    #[default]
    Free,
    /// Hardened kernel + BusyBox tools
    Premium,
    /// RAM-only logging + full forensic mode
    PremiumPlus,
}

impl Plan {
    pub const VALUES: &[Plan] = &[Plan::Free, Plan::Premium, Plan::PremiumPlus];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Premium => "premium",
            Plan::PremiumPlus => "premium-plus",
        }
    }

    /// Whether the host view offers a skip affordance for the intro
    pub fn can_skip(&self) -> bool {
        !matches!(self, Plan::Free)
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Plan {
    type Err = crate::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Plan::Free),
            "premium" => Ok(Plan::Premium),
            "premium-plus" => Ok(Plan::PremiumPlus),
            _ => Err(crate::Error::Config(ConfigError::InvalidPlan(s.to_string()).to_string())),
        }
    }
}

/// Pacing of the terminal intro
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntroConfig {
    /// Delay between revealed characters (must be positive)
    #[serde(default = "default_char_delay_ms")]
    pub char_delay_ms: u64,

    /// Pause after a fully revealed line
    #[serde(default = "default_line_delay_ms")]
    pub line_delay_ms: u64,

    /// Cursor blink interval (must be positive)
    #[serde(default = "default_cursor_blink_ms")]
    pub cursor_blink_ms: u64,
}

fn default_char_delay_ms() -> u64 {
    30
}

fn default_line_delay_ms() -> u64 {
    100
}

fn default_cursor_blink_ms() -> u64 {
    500
}

impl IntroConfig {
    pub fn char_delay(&self) -> Duration {
        Duration::from_millis(self.char_delay_ms)
    }

    pub fn line_delay(&self) -> Duration {
        Duration::from_millis(self.line_delay_ms)
    }

    pub fn cursor_interval(&self) -> Duration {
        Duration::from_millis(self.cursor_blink_ms)
    }
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            char_delay_ms: default_char_delay_ms(),
            line_delay_ms: default_line_delay_ms(),
            cursor_blink_ms: default_cursor_blink_ms(),
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default level for stderr output
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: "pretty", "json" or "compact"
    #[serde(default = "default_log_format")]
    pub format: String,

    /// `[logging.file]` section
    #[serde(default)]
    pub file: FileLoggingConfig,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), format: default_log_format(), file: FileLoggingConfig::default() }
    }
}

/// `[logging.file]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileLoggingConfig {
    /// Write JSON logs to the log directory
    #[serde(default)]
    pub enabled: bool,

    /// Level for file output
    #[serde(default = "default_file_log_level")]
    pub level: String,
}

fn default_file_log_level() -> String {
    "debug".to_string()
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self { enabled: false, level: default_file_log_level() }
    }
}

/// Root configuration structure for greemls.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Active subscription tier
    #[serde(default)]
    pub plan: Plan,

    /// Terminal intro pacing
    #[serde(default)]
    pub intro: IntroConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(toml_str).map_err(|e| crate::Error::Config(ConfigError::from(e).to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        use crate::Error;

        if self.intro.char_delay_ms == 0 {
            return Err(Error::Config(ConfigError::InvalidDelay("intro.char_delay_ms".to_string()).to_string()));
        }

        if self.intro.cursor_blink_ms == 0 {
            return Err(Error::Config(
                ConfigError::InvalidDelay("intro.cursor_blink_ms".to_string()).to_string(),
            ));
        }

        Ok(())
    }

    /// Get example configuration (as a string)
    pub fn example() -> &'static str {
        r#"# GREEMLS Configuration Example

# Subscription tier: "free", "premium" or "premium-plus"
plan = "free"

[intro]
# Delay between typed characters in milliseconds (must be > 0)
char_delay_ms = 30
# Pause after each completed line in milliseconds
line_delay_ms = 100
# Cursor blink interval in milliseconds (must be > 0)
cursor_blink_ms = 500

[logging]
# Level for stderr output (overridden by GREEMLS_LOG / RUST_LOG)
level = "warn"
# Format: "pretty", "json" or "compact"
format = "pretty"

[logging.file]
# Daily rolling JSON logs in ~/.greemls/logs (or GREEMLS_LOG_DIR)
enabled = false
level = "debug"
"#
    }
}

/// Configuration-specific errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid plan name
    #[error("invalid plan: {0}")]
    InvalidPlan(String),

    /// Delay that must be positive was zero
    #[error("delay must be positive: {0}")]
    InvalidDelay(String),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    TomlParse(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::TomlParse(err.to_string())
    }
}
