//! Logging module for casthi-lint
//!
//! Provides structured logging of lint runs to a file in JSON Lines format
//! for later analysis.

use crate::models::{LintResult, Severity};
use crate::noqa::offset_to_line;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// A single log entry representing one lint run
#[derive(Debug, Serialize, Deserialize)]
pub struct LintLogEntry {
    /// Unix timestamp of when the lint was run
    pub timestamp: u64,
    /// ISO 8601 formatted date string
    pub datetime: String,
    /// Target Casthi versions configured for this run
    pub target_versions: Vec<String>,
    /// Total number of files scanned
    pub files_scanned: usize,
    /// Total number of violations found
    pub total_violations: usize,
    /// Number of errors
    pub error_count: usize,
    /// Number of warnings
    pub warning_count: usize,
    /// Number of info messages
    pub info_count: usize,
    /// Violations dropped by the target-version gate
    pub gate_suppressed: usize,
    /// Gate warnings, one per malformed-target evaluation
    pub gate_warnings: Vec<String>,
    /// Individual violations
    pub violations: Vec<ViolationLogEntry>,
    /// Enabled rules for this run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_rules: Option<Vec<String>>,
}

/// Log entry for a single violation
#[derive(Debug, Serialize, Deserialize)]
pub struct ViolationLogEntry {
    /// Rule ID (e.g., CAS001)
    pub rule_id: String,
    /// File path where the violation was found
    pub file_path: String,
    /// Line number
    pub line: usize,
    /// Severity level
    pub severity: String,
    /// Violation message
    pub message: String,
}

impl LintLogEntry {
    /// Create a new log entry from lint results
    pub fn from_results(
        results: &[LintResult],
        target_versions: &[String],
        enabled_rules: Option<Vec<String>>,
    ) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let timestamp = now.as_secs();
        let datetime = format_datetime(timestamp);

        let mut violations = Vec::new();
        let mut error_count = 0;
        let mut warning_count = 0;
        let mut info_count = 0;
        let mut gate_suppressed = 0;
        let mut gate_warnings = Vec::new();

        for result in results {
            gate_suppressed += result.gate_suppressed;
            gate_warnings.extend(result.gate_warnings.iter().cloned());

            for v in &result.violations {
                let line = get_line_from_offset(&result.file_path, v.offset);

                match v.severity {
                    Severity::Error => error_count += 1,
                    Severity::Warning => warning_count += 1,
                    Severity::Info => info_count += 1,
                }

                violations.push(ViolationLogEntry {
                    rule_id: v.rule_id.clone(),
                    file_path: v.file_path.clone(),
                    line,
                    severity: format!("{}", v.severity),
                    message: v.message.clone(),
                });
            }
        }

        let files_scanned = results.len();
        let total_violations = violations.len();

        Self {
            timestamp,
            datetime,
            target_versions: target_versions.to_vec(),
            files_scanned,
            total_violations,
            error_count,
            warning_count,
            info_count,
            gate_suppressed,
            gate_warnings,
            violations,
            enabled_rules,
        }
    }
}

/// Logger that writes lint results to a file
pub struct LintLogger {
    writer: Option<BufWriter<File>>,
    log_path: String,
}

impl LintLogger {
    /// Create a new logger that writes to the specified file
    /// If the file exists, it will be appended to; otherwise created
    pub fn new(log_path: &str) -> std::io::Result<Self> {
        let path = Path::new(log_path);

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            log_path: log_path.to_string(),
        })
    }

    /// Log a lint run to the file
    pub fn log(&mut self, entry: &LintLogEntry) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(entry)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Get the path of the log file
    pub fn log_path(&self) -> &str {
        &self.log_path
    }
}

/// Format a unix timestamp as ISO 8601 datetime string
fn format_datetime(timestamp: u64) -> String {
    use std::time::Duration;
    let d = UNIX_EPOCH + Duration::from_secs(timestamp);
    let datetime: chrono::DateTime<chrono::Utc> = chrono::DateTime::from(d);
    datetime.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Get line number from byte offset
fn get_line_from_offset(file_path: &str, offset: usize) -> usize {
    if let Ok(content) = std::fs::read_to_string(file_path) {
        offset_to_line(&content, offset)
    } else {
        1
    }
}
