use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use greemls_core::forensic::parse_facet;
use greemls_core::logging::{self, LogSettings};
use greemls_core::{
    Config, ForensicLog, ForensicReport, HashCheck, LogFilter, Plan, Severity, TypewriterConfig, Verdict,
    report_file_name, sample_logs,
};
use greemls_ui::{App, IntroOutcome};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

/// GREEMLS - The Human Immunity System
#[derive(Parser, Debug)]
#[command(name = "greemls")]
#[command(about = "Terminal intro and forensic toolkit for the GREEMLS USB security suite", long_about = None)]
#[command(version = "1.0.0")]
struct Cli {
    /// Path to greemls.toml (default: ./greemls.toml)
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Subscription plan, overrides the config file (free, premium, premium-plus)
    #[arg(short, long, value_name = "PLAN", global = true)]
    plan: Option<Plan>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play the boot terminal intro
    Intro,
    /// List, filter and export forensic logs
    Logs {
        /// Case-insensitive text to find in the description or source
        #[arg(short, long, value_name = "TEXT")]
        search: Option<String>,

        /// Event type: threat, protection, scan, access, modification or all
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        kind: Option<String>,

        /// Severity: low, medium, high, critical or all
        #[arg(long, value_name = "LEVEL")]
        severity: Option<String>,

        /// Write a JSON report to PATH (a directory gets the dated default name)
        #[arg(short, long, value_name = "PATH", conflicts_with = "json")]
        export: Option<PathBuf>,

        /// Print the JSON report to stdout
        #[arg(long)]
        json: bool,
    },
    /// Compute the SHA-256 of a file and compare it with an expected hash
    Verify {
        /// File to hash, usually the GREEMLS ISO
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Expected SHA-256 in hex
        #[arg(short, long, value_name = "HASH")]
        expected: Option<String>,
    },
    /// Print the example configuration
    Config,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Config = cli.command {
        print!("{}", Config::example());
        return Ok(());
    }

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from("greemls.toml"));
    let loaded = load_or_create_config(&config_path)?;
    let mut config = loaded.config;
    if let Some(plan) = cli.plan {
        config.plan = plan;
    }

    let _guard = logging::init_logging(Some(logging_config(&config, &cli.command, cli.verbose)))
        .context("Failed to initialize logging")?;
    tracing::info!(path = %config_path.display(), created = loaded.created, plan = %config.plan, "config loaded");

    if cli.verbose {
        eprintln!("{} Using config: {}", "Info:".blue().bold(), config_path.display());
        eprintln!("{} Plan: {}", "Info:".blue().bold(), config.plan.as_str().cyan());
    }

    match cli.command {
        Commands::Intro => cmd_intro(&config)?,
        Commands::Logs { search, kind, severity, export, json } => {
            let filter = build_filter(search, kind.as_deref(), severity.as_deref())?;
            cmd_logs(&filter, export, json, Utc::now())?
        }
        Commands::Verify { file, expected } => cmd_verify(&file, expected)?,
        Commands::Config => {}
    }

    Ok(())
}

/// A config and whether it was just written from the example
#[derive(Debug)]
struct LoadedConfig {
    config: Config,
    created: bool,
}

/// Load config from file or create it from the example.
///
/// Runs before the subscriber exists, so the load is logged by the caller.
fn load_or_create_config(path: &Path) -> Result<LoadedConfig> {
    if path.exists() {
        let config =
            Config::from_file(&PathBuf::from(path)).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        return Ok(LoadedConfig { config, created: false });
    }

    eprintln!("{} Config not found at {}", "Warning:".yellow().bold(), path.display());
    std::fs::write(path, Config::example()).context("Failed to create config")?;
    eprintln!("{} Created default config at {}", "Success:".green().bold(), path.display());

    Ok(LoadedConfig { config: Config::default(), created: true })
}

/// Subscriber settings for `command`. Stderr is off for the intro whenever
/// file logging is enabled.
fn logging_config(config: &Config, command: &Commands, verbose: bool) -> LogSettings {
    let mut logging = LogSettings::from(config.logging.clone());
    if verbose {
        logging = logging.with_level("debug");
    }
    if matches!(command, Commands::Intro) && logging.file.is_some() {
        logging = logging.with_stderr(false);
    }
    logging
}

/// Play the intro in the alternate screen
fn cmd_intro(config: &Config) -> Result<()> {
    if !atty::is(atty::Stream::Stdout) {
        anyhow::bail!("The intro needs an interactive terminal");
    }

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let mut app = App::new(config.plan, TypewriterConfig::from(config.intro));
    let outcome = runtime.block_on(app.run()).context("Terminal error during intro")?;

    match outcome {
        IntroOutcome::Continue => {
            println!("{} GREEMLS ready on plan {}", "Success:".green().bold(), config.plan.as_str().cyan());
            println!("  {} list forensic events", "greemls logs".cyan());
            println!("  {} check an ISO download", "greemls verify <FILE>".cyan());
        }
        IntroOutcome::Exit => println!("{} Exiting GREEMLS", "Info:".blue().bold()),
    }

    Ok(())
}

fn build_filter(search: Option<String>, kind: Option<&str>, severity: Option<&str>) -> Result<LogFilter> {
    let mut filter = LogFilter::new();
    if let Some(search) = search {
        filter = filter.with_search(search);
    }
    if let Some(kind) = parse_facet(kind).context("Invalid --type")? {
        filter = filter.with_kind(kind);
    }
    if let Some(severity) = parse_facet(severity).context("Invalid --severity")? {
        filter = filter.with_severity(severity);
    }
    Ok(filter)
}

/// Where an export should land; directories get the dated default file name
fn resolve_export_path(path: PathBuf, date: NaiveDate) -> PathBuf {
    if path.is_dir() { path.join(report_file_name(date)) } else { path }
}

/// List, print or export the forensic logs matching `filter`
fn cmd_logs(filter: &LogFilter, export: Option<PathBuf>, json: bool, now: DateTime<Utc>) -> Result<()> {
    let logs = sample_logs(now);
    let matching = filter.apply(&logs);
    let report = ForensicReport::new(now, matching.iter().copied());

    if json {
        println!("{}", report.to_json_pretty().context("Failed to serialize report")?);
        return Ok(());
    }

    if let Some(path) = export {
        let path = resolve_export_path(path, now.date_naive());
        report.write_to(&path).with_context(|| format!("Failed to write report to {}", path.display()))?;
        println!(
            "{} Exported {} events to {}",
            "Success:".green().bold(),
            report.total_events,
            path.display()
        );
        return Ok(());
    }

    println!("{}", "GREEMLS Forensic Logs".green().bold().underline());
    println!(
        "  Total: {}  Critical: {}  High: {}",
        report.total_events.to_string().cyan(),
        report.critical_threats.to_string().red(),
        report.high_severity.to_string().yellow()
    );
    println!();

    if matching.is_empty() {
        println!("{} No events match the current filters", "Info:".yellow().bold());
    }
    for log in matching {
        print_log(log);
    }

    Ok(())
}

fn print_log(log: &ForensicLog) {
    let severity = format!("[{}]", log.severity.as_str().to_uppercase());
    let severity = match log.severity {
        Severity::Critical => severity.red().bold().to_string(),
        Severity::High => severity.yellow().bold().to_string(),
        Severity::Medium => severity.blue().to_string(),
        Severity::Low => severity.green().to_string(),
    };

    println!(
        "{} {} {} {}",
        severity,
        log.kind.as_str().magenta(),
        log.timestamp.format("%Y-%m-%d %H:%M:%S"),
        log.source.cyan()
    );
    println!("  {}", log.description);
    if let Some(action) = &log.details.action {
        println!("  action: {}", action);
    }
    if !log.evidence.is_empty() {
        println!("  evidence: {}", log.evidence.join(", ").dimmed());
    }
    println!();
}

/// Hash `file` and report whether it matches `expected`
fn cmd_verify(file: &Path, expected: Option<String>) -> Result<()> {
    let check = HashCheck::for_file(file, expected.unwrap_or_default())
        .with_context(|| format!("Failed to hash {}", file.display()))?;

    println!("{} {}", "SHA-256:".blue().bold(), check.computed);

    match check.verdict() {
        Some(Verdict::Match) => println!("{} Hash matches, the file is authentic", "Success:".green().bold()),
        Some(Verdict::Mismatch) => {
            anyhow::bail!("Hash mismatch: expected {}, computed {}", check.expected.trim(), check.computed)
        }
        None => println!("{} No expected hash given, nothing to compare", "Info:".yellow().bold()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use clap::CommandFactory;
    use greemls_core::{LogKind, hash_bytes};
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::try_parse_from(["greemls", "intro"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.plan.is_none());
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Commands::Intro));
    }

    #[test]
    fn test_cli_with_config_and_plan() {
        let cli = Cli::try_parse_from(["greemls", "--config", "/etc/greemls.toml", "--plan", "premium-plus", "intro"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/greemls.toml")));
        assert_eq!(cli.plan, Some(Plan::PremiumPlus));
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["greemls", "logs", "--verbose", "--plan", "premium"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.plan, Some(Plan::Premium));
    }

    #[test]
    fn test_cli_rejects_unknown_plan() {
        assert!(Cli::try_parse_from(["greemls", "--plan", "gold", "intro"]).is_err());
    }

    #[test]
    fn test_cli_logs_command() {
        let cli = Cli::try_parse_from(["greemls", "logs", "--search", "rootkit", "--type", "threat", "--severity", "all"])
            .unwrap();

        if let Commands::Logs { search, kind, severity, export, json } = cli.command {
            assert_eq!(search.as_deref(), Some("rootkit"));
            assert_eq!(kind.as_deref(), Some("threat"));
            assert_eq!(severity.as_deref(), Some("all"));
            assert!(export.is_none());
            assert!(!json);
        } else {
            panic!("Expected Logs command");
        }
    }

    #[test]
    fn test_cli_logs_export_conflicts_with_json() {
        assert!(Cli::try_parse_from(["greemls", "logs", "--export", "out.json", "--json"]).is_err());
    }

    #[test]
    fn test_cli_logs_type_help_lists_every_kind() {
        let command = Cli::command();
        let logs = command.find_subcommand("logs").unwrap();
        let kind = logs.get_arguments().find(|arg| arg.get_id() == "kind").unwrap();
        let help = kind.get_help().unwrap().to_string();

        for value in LogKind::VALUES {
            assert!(help.contains(value.as_str()), "missing {value} in {help}");
            assert!(build_filter(None, Some(value.as_str()), None).is_ok());
        }
        assert!(!help.contains("system"));
    }

    #[test]
    fn test_cli_verify_command() {
        let cli = Cli::try_parse_from(["greemls", "verify", "greemls.iso", "--expected", "abc"]).unwrap();

        if let Commands::Verify { file, expected } = cli.command {
            assert_eq!(file, PathBuf::from("greemls.iso"));
            assert_eq!(expected.as_deref(), Some("abc"));
        } else {
            panic!("Expected Verify command");
        }
    }

    #[test]
    fn test_cli_verify_requires_file() {
        assert!(Cli::try_parse_from(["greemls", "verify"]).is_err());
    }

    #[test]
    fn test_load_or_create_config_existing() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("greemls.toml");
        std::fs::write(&config_path, "plan = \"premium\"\n").unwrap();

        let loaded = load_or_create_config(&config_path).unwrap();
        assert_eq!(loaded.config.plan, Plan::Premium);
        assert!(!loaded.created);
    }

    #[test]
    fn test_load_or_create_config_not_existing() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("greemls.toml");

        let loaded = load_or_create_config(&config_path).unwrap();
        assert_eq!(loaded.config, Config::default());
        assert!(loaded.created);
        assert!(config_path.exists());

        let reloaded = load_or_create_config(&config_path).unwrap();
        assert!(!reloaded.created);
        assert_eq!(reloaded.config, Config::default());

        let content = std::fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[intro]"));
        assert!(content.contains("char_delay_ms"));
    }

    #[test]
    fn test_load_or_create_config_invalid() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("greemls.toml");
        std::fs::write(&config_path, "invalid toml").unwrap();

        assert!(load_or_create_config(&config_path).is_err());
    }

    #[test]
    fn test_logging_config_silences_stderr_for_intro_with_file() {
        let mut config = Config::default();
        config.logging.file.enabled = true;

        assert!(!logging_config(&config, &Commands::Intro, false).stderr);
        assert!(logging_config(&config, &Commands::Config, false).stderr);
    }

    #[test]
    fn test_logging_config_keeps_stderr_without_file() {
        let config = Config::default();
        let logging = logging_config(&config, &Commands::Intro, true);
        assert!(logging.stderr);
        assert_eq!(logging.level, "debug");
    }

    #[test]
    fn test_build_filter() {
        let filter = build_filter(Some("boot".to_string()), Some("threat"), Some("all")).unwrap();
        assert_eq!(filter.search, "boot");
        assert_eq!(filter.kind, Some(LogKind::Threat));
        assert_eq!(filter.severity, None);
    }

    #[test]
    fn test_build_filter_rejects_unknown_type() {
        let err = build_filter(None, Some("virus"), None).unwrap_err();
        assert!(err.to_string().contains("--type"));
    }

    #[test]
    fn test_resolve_export_path() {
        let temp = TempDir::new().unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();

        let in_dir = resolve_export_path(temp.path().to_path_buf(), date);
        assert_eq!(in_dir, temp.path().join("greemls_forensic_report_2026-03-14.json"));

        let explicit = temp.path().join("report.json");
        assert_eq!(resolve_export_path(explicit.clone(), date), explicit);
    }

    #[test]
    fn test_cmd_logs_list() {
        assert!(cmd_logs(&LogFilter::new(), None, false, now()).is_ok());
        assert!(cmd_logs(&LogFilter::new().with_search("nothing matches"), None, false, now()).is_ok());
    }

    #[test]
    fn test_cmd_logs_export() {
        let temp = TempDir::new().unwrap();
        let filter = LogFilter::new().with_kind(LogKind::Threat);

        cmd_logs(&filter, Some(temp.path().to_path_buf()), false, now()).unwrap();

        let path = temp.path().join("greemls_forensic_report_2026-03-14.json");
        let report = read_report(&path);
        assert_eq!(report.total_events, 1);
        assert_eq!(report.critical_threats, 1);
        assert_eq!(report.logs[0].kind, LogKind::Threat);
    }

    #[test]
    fn test_cmd_verify_match_and_mismatch() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("greemls.iso");
        std::fs::write(&file, b"hello").unwrap();

        assert!(cmd_verify(&file, Some(hash_bytes(b"hello").to_uppercase())).is_ok());
        assert!(cmd_verify(&file, None).is_ok());

        let err = cmd_verify(&file, Some(hash_bytes(b"other"))).unwrap_err();
        assert!(err.to_string().contains("mismatch"));
    }

    #[test]
    fn test_cmd_verify_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(cmd_verify(&temp.path().join("missing.iso"), None).is_err());
    }

    fn read_report(path: &Path) -> ForensicReport {
        let content = std::fs::read_to_string(path).unwrap();
        serde_json::from_str(&content).unwrap()
    }
}
