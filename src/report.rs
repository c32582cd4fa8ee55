//! Terminal and JSON report output

use crate::models::{LintResult, Severity};
use crate::noqa::offset_to_line;
use colored::*;
use std::collections::BTreeMap;

/// Violation info for grouping
struct ViolationInfo {
    file_path: String,
    line: usize,
    severity: Severity,
    message: String,
    source_line: String,
}

/// Rule metadata shown in the grouped report header
struct RuleInfo {
    name: &'static str,
    description: &'static str,
    fix: &'static str,
}

fn get_rule_info(rule_id: &str) -> RuleInfo {
    match rule_id {
        "CAS001" => RuleInfo {
            name: "Environment Manage",
            description: "api.Environment.manage() is a no-op since Casthi 15.0.",
            fix: "Delete the `with api.Environment.manage():` wrapper and dedent its body.",
        },
        "CAS002" => RuleInfo {
            name: "Print Used",
            description: "print() bypasses the framework logging configuration.",
            fix: "Use `_logger = logging.getLogger(__name__)` and `_logger.info(...)`.",
        },
        "CAS003" => RuleInfo {
            name: "Sudo With Argument",
            description: "sudo() with a user argument is deprecated.",
            fix: "Use `records.with_user(uid)` to switch user, `sudo()` only to escalate.",
        },
        "CAS004" => RuleInfo {
            name: "String Exception",
            description: "A bare Exception hides the failure class from callers.",
            fix: "Raise `UserError` or `ValidationError` from casthi.exceptions.",
        },
        _ => RuleInfo {
            name: "Unknown Rule",
            description: "Unknown rule violation.",
            fix: "Check the documentation for more information.",
        },
    }
}

/// Read a specific line from a file
fn read_source_line(file_path: &str, line_num: usize) -> String {
    if let Ok(content) = std::fs::read_to_string(file_path) {
        content
            .lines()
            .nth(line_num.saturating_sub(1))
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    } else {
        String::new()
    }
}

fn get_line_from_offset(file_path: &str, offset: usize) -> usize {
    if let Ok(content) = std::fs::read_to_string(file_path) {
        offset_to_line(&content, offset)
    } else {
        1
    }
}

/// Print gate warnings to stderr, each distinct text once.
///
/// The per-evaluation warnings stay in the results (and the run log); the
/// terminal only needs to name a malformed target version a single time.
pub fn print_gate_warnings(results: &[LintResult]) {
    let mut seen = std::collections::HashSet::new();
    for result in results {
        for warning in &result.gate_warnings {
            if seen.insert(warning.as_str()) {
                eprintln!("{} {}", "warning:".yellow().bold(), warning);
            }
        }
    }
}

/// Print the grouped text report to stdout.
pub fn print_text_grouped(results: &[LintResult]) {
    // Group violations by rule ID
    let mut grouped: BTreeMap<String, Vec<ViolationInfo>> = BTreeMap::new();

    for result in results {
        if let Some(error) = &result.error {
            eprintln!("{}: {}", result.file_path.red(), error);
            continue;
        }

        for v in &result.violations {
            let line = get_line_from_offset(&result.file_path, v.offset);
            let source_line = read_source_line(&v.file_path, line);
            grouped
                .entry(v.rule_id.clone())
                .or_default()
                .push(ViolationInfo {
                    file_path: v.file_path.clone(),
                    line,
                    severity: v.severity,
                    message: v.message.clone(),
                    source_line,
                });
        }
    }

    for (rule_id, violations) in &grouped {
        let rule_info = get_rule_info(rule_id);
        let count = violations.len();

        let severity = violations
            .first()
            .map(|v| v.severity)
            .unwrap_or(Severity::Warning);
        let header_color = match severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info => "info".blue().bold(),
        };

        println!(
            "\n{} {} - {} ({} occurrence{})",
            header_color,
            rule_id.cyan().bold(),
            rule_info.name.white().bold(),
            count,
            if count == 1 { "" } else { "s" }
        );
        println!("{}", "─".repeat(80).dimmed());
        println!("  {} {}", "What:".bright_white(), rule_info.description);
        println!("  {}  {}", "Fix:".bright_green(), rule_info.fix);
        println!();

        for v in violations {
            println!(
                "    {}:{}  {}",
                v.file_path.dimmed(),
                v.line.to_string().yellow(),
                v.message
            );
            if !v.source_line.is_empty() {
                println!("      {}", v.source_line.bright_white());
            }
        }
    }
}

/// Print the JSON report to stdout.
pub fn print_json(results: &[LintResult]) {
    let mut grouped: BTreeMap<String, Vec<serde_json::Value>> = BTreeMap::new();

    for result in results {
        for v in &result.violations {
            let line = get_line_from_offset(&result.file_path, v.offset);
            let source_line = read_source_line(&v.file_path, line);
            grouped
                .entry(v.rule_id.clone())
                .or_default()
                .push(serde_json::json!({
                    "file": v.file_path,
                    "line": line,
                    "severity": format!("{}", v.severity),
                    "message": v.message,
                    "source": source_line,
                }));
        }
    }

    let gate_suppressed: usize = results.iter().map(|r| r.gate_suppressed).sum();
    let gate_warnings: Vec<&str> = results
        .iter()
        .flat_map(|r| r.gate_warnings.iter().map(String::as_str))
        .collect();

    let rules: Vec<serde_json::Value> = grouped
        .into_iter()
        .map(|(rule_id, violations)| {
            let rule_info = get_rule_info(&rule_id);
            serde_json::json!({
                "rule": rule_id,
                "name": rule_info.name,
                "description": rule_info.description,
                "fix": rule_info.fix,
                "count": violations.len(),
                "violations": violations,
            })
        })
        .collect();

    let output = serde_json::json!({
        "rules": rules,
        "gate_suppressed": gate_suppressed,
        "gate_warnings": gate_warnings,
    });

    println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
}
