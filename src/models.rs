//! Core data models for casthi-lint

use rustpython_ast::{Mod, Stmt};

/// A violation detected by a lint rule
#[derive(Debug, Clone)]
pub struct Violation {
    pub rule_id: String,
    pub message: String,
    pub offset: usize,
    pub file_path: String,
    pub severity: Severity,
}

/// Severity level of a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Violation {
    pub fn new(
        rule_id: String,
        message: String,
        offset: usize,
        file_path: String,
        severity: Severity,
    ) -> Self {
        Self {
            rule_id,
            message,
            offset,
            file_path,
            severity,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Context passed to each rule for checking
pub struct RuleContext<'a> {
    pub stmt: &'a Stmt,
    pub file_path: &'a str,
    pub source: &'a str,
    pub ast: &'a Mod,
}

/// Result of linting a single file
#[derive(Debug, Default)]
pub struct LintResult {
    pub file_path: String,
    pub violations: Vec<Violation>,
    pub error: Option<String>,
    /// Operator warnings from the version gate (malformed target version).
    pub gate_warnings: Vec<String>,
    /// Violations dropped because their rule is outside the target range.
    pub gate_suppressed: usize,
}

impl LintResult {
    pub fn new(file_path: String) -> Self {
        Self {
            file_path,
            ..Default::default()
        }
    }

    pub fn with_error(file_path: String, error: String) -> Self {
        Self {
            file_path,
            error: Some(error),
            ..Default::default()
        }
    }
}
