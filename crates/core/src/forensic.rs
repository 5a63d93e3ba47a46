//! Forensic log viewer model: sample entries, filtering and report export.
//!
//! The entries are fixed demonstration data; nothing here collects evidence.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const GREEMLS_VERSION: &str = "1.0.0";
pub const SCAN_ENGINE: &str = "Advanced Heuristic v2.1";
pub const PROTECTION_LEVEL: &str = "Paranoid";

/// Category of a forensic event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Threat,
    Scan,
    Protection,
    Access,
    Modification,
}

impl LogKind {
    pub const VALUES: &[LogKind] =
        &[LogKind::Threat, LogKind::Scan, LogKind::Protection, LogKind::Access, LogKind::Modification];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogKind::Threat => "threat",
            LogKind::Scan => "scan",
            LogKind::Protection => "protection",
            LogKind::Access => "access",
            LogKind::Modification => "modification",
        }
    }
}

impl std::fmt::Display for LogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LogKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        LogKind::VALUES
            .iter()
            .find(|kind| kind.as_str() == s.to_lowercase())
            .copied()
            .ok_or_else(|| crate::Error::Validation(format!("invalid log type: {}", s)))
    }
}

/// Severity of a forensic event, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const VALUES: &[Severity] = &[Severity::Low, Severity::Medium, Severity::High, Severity::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = crate::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Severity::VALUES
            .iter()
            .find(|severity| severity.as_str() == s.to_lowercase())
            .copied()
            .ok_or_else(|| crate::Error::Validation(format!("invalid severity: {}", s)))
    }
}

/// Optional details attached to an event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// A single forensic event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForensicLog {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: LogKind,
    pub severity: Severity,
    pub source: String,
    pub description: String,
    pub details: LogDetails,
    pub evidence: Vec<String>,
}

fn owned(s: &str) -> Option<String> {
    Some(s.to_string())
}

/// The three demonstration entries, newest first
pub fn sample_logs(now: DateTime<Utc>) -> Vec<ForensicLog> {
    vec![
        ForensicLog {
            id: "1".to_string(),
            timestamp: now,
            kind: LogKind::Threat,
            severity: Severity::Critical,
            source: "USB Device (E:)".to_string(),
            description: "Rootkit signature detected in boot sector".to_string(),
            details: LogDetails {
                hash: owned("SHA256: a1b2c3d4e5f6..."),
                location: owned("E:\\boot\\bootmgr"),
                process: owned("Unknown"),
                user: None,
                action: owned("Blocked and quarantined"),
            },
            evidence: vec![
                "boot_sector_dump.bin".to_string(),
                "memory_snapshot.dmp".to_string(),
                "registry_changes.reg".to_string(),
            ],
        },
        ForensicLog {
            id: "2".to_string(),
            timestamp: now - Duration::minutes(5),
            kind: LogKind::Protection,
            severity: Severity::High,
            source: "Greemls Protection Engine".to_string(),
            description: "Write protection activated - Unauthorized modification attempt".to_string(),
            details: LogDetails {
                hash: None,
                location: owned("E:\\System32\\drivers\\"),
                process: owned("malicious.exe"),
                user: owned("SYSTEM"),
                action: owned("Write blocked"),
            },
            evidence: vec!["process_dump.exe".to_string(), "network_traffic.pcap".to_string()],
        },
        ForensicLog {
            id: "3".to_string(),
            timestamp: now - Duration::minutes(10),
            kind: LogKind::Scan,
            severity: Severity::Medium,
            source: "Deep Scanner".to_string(),
            description: "Suspicious file behavior detected".to_string(),
            details: LogDetails {
                hash: owned("MD5: 5d41402abc4b2a76b9719d911017c592"),
                location: owned("E:\\temp\\suspicious.dll"),
                process: owned("explorer.exe"),
                user: None,
                action: owned("Flagged for review"),
            },
            evidence: vec!["file_analysis.json".to_string(), "behavioral_log.txt".to_string()],
        },
    ]
}

/// Search and facet filter over forensic logs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    /// Case-insensitive substring of the description or source
    pub search: String,
    /// `None` matches every type
    pub kind: Option<LogKind>,
    /// `None` matches every severity
    pub severity: Option<Severity>,
}

impl LogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_kind(mut self, kind: LogKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn matches(&self, log: &ForensicLog) -> bool {
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            if !log.description.to_lowercase().contains(&needle) && !log.source.to_lowercase().contains(&needle) {
                return false;
            }
        }

        self.kind.is_none_or(|kind| log.kind == kind) && self.severity.is_none_or(|severity| log.severity == severity)
    }

    /// Matching logs in their original order
    pub fn apply<'a>(&self, logs: &'a [ForensicLog]) -> Vec<&'a ForensicLog> {
        logs.iter().filter(|log| self.matches(log)).collect()
    }
}

/// Static description of the scanning system embedded in reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub greemls_version: String,
    pub scan_engine: String,
    pub protection_level: String,
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self {
            greemls_version: GREEMLS_VERSION.to_string(),
            scan_engine: SCAN_ENGINE.to_string(),
            protection_level: PROTECTION_LEVEL.to_string(),
        }
    }
}

/// JSON export of a filtered log list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForensicReport {
    pub generated: DateTime<Utc>,
    pub total_events: usize,
    pub critical_threats: usize,
    pub high_severity: usize,
    pub logs: Vec<ForensicLog>,
    pub system_info: SystemInfo,
}

impl ForensicReport {
    pub fn new<'a>(generated: DateTime<Utc>, logs: impl IntoIterator<Item = &'a ForensicLog>) -> Self {
        let logs: Vec<ForensicLog> = logs.into_iter().cloned().collect();
        let count = |severity: Severity| logs.iter().filter(|log| log.severity == severity).count();

        Self {
            generated,
            total_events: logs.len(),
            critical_threats: count(Severity::Critical),
            high_severity: count(Severity::High),
            system_info: SystemInfo::default(),
            logs,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the pretty JSON report to `path`
    pub fn write_to(&self, path: &std::path::Path) -> Result<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        tracing::info!(path = %crate::logging::sanitize_path(path), events = self.total_events, "forensic report written");
        Ok(())
    }
}

/// Default file name for a report generated on `date`
pub fn report_file_name(date: NaiveDate) -> String {
    format!("greemls_forensic_report_{}.json", date.format("%Y-%m-%d"))
}

/// Parse an optional facet value where `"all"` means no restriction
pub fn parse_facet<T>(value: Option<&str>) -> Result<Option<T>>
where
    T: std::str::FromStr<Err = crate::Error>,
{
    match value {
        None => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        Some(v) => v.parse().map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_sample_logs_shape() {
        let logs = sample_logs(now());
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[0].severity, Severity::Critical);
        assert_eq!(logs[1].timestamp, now() - Duration::minutes(5));
        assert_eq!(logs[2].timestamp, now() - Duration::minutes(10));
        assert_eq!(logs[0].evidence.len(), 3);
        assert_eq!(logs[1].details.user.as_deref(), Some("SYSTEM"));
    }

    #[test]
    fn test_filter_default_matches_all() {
        let logs = sample_logs(now());
        assert_eq!(LogFilter::new().apply(&logs).len(), 3);
    }

    #[test]
    fn test_filter_search_is_case_insensitive_over_description_and_source() {
        let logs = sample_logs(now());

        let by_description = LogFilter::new().with_search("ROOTKIT").apply(&logs);
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].id, "1");

        let by_source = LogFilter::new().with_search("deep scan").apply(&logs);
        assert_eq!(by_source.len(), 1);
        assert_eq!(by_source[0].id, "3");

        let by_process = LogFilter::new().with_search("malicious.exe").apply(&logs);
        assert!(by_process.is_empty());
    }

    #[test]
    fn test_filter_facets_combine() {
        let logs = sample_logs(now());

        let threats = LogFilter::new().with_kind(LogKind::Threat).apply(&logs);
        assert_eq!(threats.len(), 1);

        let high = LogFilter::new().with_severity(Severity::High).apply(&logs);
        assert_eq!(high[0].id, "2");

        let none = LogFilter::new().with_kind(LogKind::Threat).with_severity(Severity::Low).apply(&logs);
        assert!(none.is_empty());

        let access = LogFilter::new().with_kind(LogKind::Access).apply(&logs);
        assert!(access.is_empty());
    }

    #[test]
    fn test_filter_keeps_order() {
        let logs = sample_logs(now());
        let ids: Vec<&str> = LogFilter::new().with_search("e").apply(&logs).iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_report_counts() {
        let logs = sample_logs(now());
        let report = ForensicReport::new(now(), &logs);
        assert_eq!(report.total_events, 3);
        assert_eq!(report.critical_threats, 1);
        assert_eq!(report.high_severity, 1);
        assert_eq!(report.system_info.protection_level, "Paranoid");

        let filtered = LogFilter::new().with_severity(Severity::Medium).apply(&logs);
        let report = ForensicReport::new(now(), filtered);
        assert_eq!(report.total_events, 1);
        assert_eq!(report.critical_threats, 0);
    }

    #[test]
    fn test_report_json_field_names() {
        let logs = sample_logs(now());
        let json = ForensicReport::new(now(), &logs).to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["total_events"], 3);
        assert_eq!(value["system_info"]["greemls_version"], "1.0.0");
        assert_eq!(value["system_info"]["scan_engine"], "Advanced Heuristic v2.1");
        assert_eq!(value["logs"][0]["type"], "threat");
        assert_eq!(value["logs"][0]["severity"], "critical");
        assert!(value["logs"][0]["details"].get("user").is_none());
        assert_eq!(value["logs"][1]["details"]["user"], "SYSTEM");
    }

    #[test]
    fn test_report_write_to() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(report_file_name(now().date_naive()));
        let logs = sample_logs(now());

        ForensicReport::new(now(), &logs).write_to(&path).unwrap();
        let parsed: ForensicReport = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.logs, logs);
    }

    #[test]
    fn test_report_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(report_file_name(date), "greemls_forensic_report_2026-01-05.json");
    }

    #[test]
    fn test_parse_facet() {
        assert_eq!(parse_facet::<LogKind>(None).unwrap(), None);
        assert_eq!(parse_facet::<LogKind>(Some("all")).unwrap(), None);
        assert_eq!(parse_facet::<LogKind>(Some("Scan")).unwrap(), Some(LogKind::Scan));
        assert_eq!(parse_facet::<Severity>(Some("CRITICAL")).unwrap(), Some(Severity::Critical));
        assert!(parse_facet::<Severity>(Some("urgent")).is_err());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::Low < Severity::Medium);
    }
}
