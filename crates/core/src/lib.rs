pub mod config;
pub mod error;
pub mod forensic;
pub mod integrity;
pub mod logging;
pub mod script;
pub mod typewriter;

pub use config::{Config, ConfigError, FileLoggingConfig, IntroConfig, Plan};
pub use error::{Error, Result};
pub use forensic::{ForensicLog, ForensicReport, LogDetails, LogFilter, LogKind, Severity, report_file_name, sample_logs};
pub use integrity::{HashCheck, Verdict, hash_bytes, sha256_file};
pub use script::{LineClass, Script, ScriptLine, intro_script};
pub use typewriter::{CompletionReason, PlaybackState, Typewriter, TypewriterConfig, TypewriterEvent};
