//! casthi-lint: a linter for Casthi addon code with target-version gating
//!
//! Rules may declare the Casthi version range they apply to; when the run
//! is configured with a single target version, diagnostics from rules
//! outside that range are dropped before they reach the report.

pub mod config;
pub mod constraint;
pub mod gate;
pub mod logging;
pub mod models;
pub mod noqa;
pub mod report;
pub mod rules;
pub mod utils;
pub mod version;

use constraint::ConstraintRegistry;
use gate::GatedEmitter;
use models::{LintResult, RuleContext, Violation};
use noqa::{offset_to_line, NoqaDirectives};
use rayon::prelude::*;
use rules::base::LintRule;
use rules::RuleIndex;
use rustpython_ast::{Mod, Stmt};
use rustpython_parser::{parse, Mode};
use std::path::Path;
use walkdir::WalkDir;

/// An immutable lint run: the rule set, the configured target versions,
/// and the gating tables derived from the rules. Built once, then shared
/// by reference across files (and threads).
pub struct Linter {
    rules: Vec<Box<dyn LintRule>>,
    target_versions: Vec<String>,
    index: RuleIndex,
    registry: ConstraintRegistry,
}

impl Linter {
    pub fn new(rules: Vec<Box<dyn LintRule>>, target_versions: Vec<String>) -> Self {
        let index = RuleIndex::from_rules(&rules);
        let registry = rules::build_constraint_registry(&rules);
        Self {
            rules,
            target_versions,
            index,
            registry,
        }
    }

    pub fn rules(&self) -> &[Box<dyn LintRule>] {
        &self.rules
    }

    pub fn target_versions(&self) -> &[String] {
        &self.target_versions
    }

    /// Lint a single file and return the results
    pub fn lint_file(&self, file_path: &Path) -> LintResult {
        let path_str = file_path.to_string_lossy().to_string();

        let source = match std::fs::read_to_string(file_path) {
            Ok(s) => s,
            Err(e) => {
                return LintResult::with_error(path_str, format!("Failed to read file: {}", e))
            }
        };

        self.lint_source(&path_str, &source)
    }

    /// Lint source code and return the results
    pub fn lint_source(&self, file_path: &str, source: &str) -> LintResult {
        let ast = match parse(source, Mode::Module, file_path) {
            Ok(ast) => ast,
            Err(e) => {
                return LintResult::with_error(
                    file_path.to_string(),
                    format!("Parse error: {}", e),
                )
            }
        };

        let noqa = NoqaDirectives::parse(source);
        let mut result = LintResult::new(file_path.to_string());

        let mut violations: Vec<Violation> = Vec::new();
        let mut emitter = GatedEmitter::new(
            &mut violations,
            &self.target_versions,
            &self.index,
            &self.registry,
        );

        if let Mod::Module(module) = &ast {
            for stmt in &module.body {
                self.check_stmt_recursive(stmt, file_path, source, &ast, &noqa, &mut emitter);
            }
        }

        result.gate_suppressed = emitter.suppressed();
        result.gate_warnings = emitter.take_warnings();
        result.violations = violations;
        result
    }

    fn check_stmt_recursive(
        &self,
        stmt: &Stmt,
        file_path: &str,
        source: &str,
        ast: &Mod,
        noqa: &NoqaDirectives,
        emitter: &mut GatedEmitter<'_>,
    ) {
        let context = RuleContext {
            stmt,
            file_path,
            source,
            ast,
        };

        for rule in &self.rules {
            for v in rule.check(&context) {
                let line = offset_to_line(source, v.offset);
                if !noqa.is_suppressed(line, &v.rule_id) {
                    emitter.emit(v);
                }
            }
        }

        // Recursively check nested statements
        match stmt {
            Stmt::ClassDef(class_def) => {
                for s in &class_def.body {
                    self.check_stmt_recursive(s, file_path, source, ast, noqa, emitter);
                }
            }
            Stmt::FunctionDef(func) => {
                for s in &func.body {
                    self.check_stmt_recursive(s, file_path, source, ast, noqa, emitter);
                }
            }
            Stmt::AsyncFunctionDef(func) => {
                for s in &func.body {
                    self.check_stmt_recursive(s, file_path, source, ast, noqa, emitter);
                }
            }
            Stmt::If(if_stmt) => {
                for s in &if_stmt.body {
                    self.check_stmt_recursive(s, file_path, source, ast, noqa, emitter);
                }
                for s in &if_stmt.orelse {
                    self.check_stmt_recursive(s, file_path, source, ast, noqa, emitter);
                }
            }
            Stmt::While(while_stmt) => {
                for s in &while_stmt.body {
                    self.check_stmt_recursive(s, file_path, source, ast, noqa, emitter);
                }
            }
            Stmt::For(for_stmt) => {
                for s in &for_stmt.body {
                    self.check_stmt_recursive(s, file_path, source, ast, noqa, emitter);
                }
            }
            Stmt::With(with_stmt) => {
                for s in &with_stmt.body {
                    self.check_stmt_recursive(s, file_path, source, ast, noqa, emitter);
                }
            }
            Stmt::Try(try_stmt) => {
                for s in &try_stmt.body {
                    self.check_stmt_recursive(s, file_path, source, ast, noqa, emitter);
                }
                for handler in &try_stmt.handlers {
                    if let rustpython_ast::ExceptHandler::ExceptHandler(h) = handler {
                        for s in &h.body {
                            self.check_stmt_recursive(s, file_path, source, ast, noqa, emitter);
                        }
                    }
                }
                for s in &try_stmt.orelse {
                    self.check_stmt_recursive(s, file_path, source, ast, noqa, emitter);
                }
                for s in &try_stmt.finalbody {
                    self.check_stmt_recursive(s, file_path, source, ast, noqa, emitter);
                }
            }
            _ => {}
        }
    }

    /// Lint multiple files in parallel
    pub fn lint_files_parallel(&self, files: &[std::path::PathBuf]) -> Vec<LintResult> {
        files.par_iter().map(|file| self.lint_file(file)).collect()
    }
}

/// Collect Python files from paths
pub fn collect_python_files(
    paths: &[String],
    exclude_patterns: &[String],
) -> Vec<std::path::PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        let p = Path::new(path);
        if p.is_file() {
            if p.extension().map_or(false, |e| e == "py") {
                files.push(p.to_path_buf());
            }
        } else if p.is_dir() {
            for entry in WalkDir::new(p)
                .into_iter()
                .filter_entry(|e| !should_exclude(e.path(), exclude_patterns))
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if path.is_file() && path.extension().map_or(false, |e| e == "py") {
                    files.push(path.to_path_buf());
                }
            }
        }
    }

    files
}

fn should_exclude(path: &Path, patterns: &[String]) -> bool {
    for pattern in patterns {
        if let Some(name) = path.file_name() {
            if let Some(name_str) = name.to_str() {
                if name_str == pattern || name_str.contains(pattern) {
                    return true;
                }
            }
        }
        // Check if any path component matches
        for component in path.components() {
            if let Some(comp_str) = component.as_os_str().to_str() {
                if comp_str == pattern {
                    return true;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linter(targets: &[&str]) -> Linter {
        Linter::new(
            rules::get_all_rules(),
            targets.iter().map(|t| t.to_string()).collect(),
        )
    }

    const MIGRATION: &str = r#"
def migrate(cr, version):
    with api.Environment.manage():
        env = api.Environment(cr, SUPERUSER_ID, {})
        env.ref("xmlid").sudo(SUPERUSER_ID).unlink()
"#;

    #[test]
    fn test_all_rules_fire_without_target_version() {
        let result = linter(&[]).lint_source("migration.py", MIGRATION);
        let ids: Vec<_> = result.violations.iter().map(|v| v.rule_id.as_str()).collect();
        assert!(ids.contains(&"CAS001"));
        assert!(ids.contains(&"CAS003"));
        assert_eq!(result.gate_suppressed, 0);
        assert!(result.gate_warnings.is_empty());
    }

    #[test]
    fn test_gate_drops_out_of_range_rules() {
        // 12.0 predates both environment-manage (min 15.0) and
        // sudo-with-argument (min 13.0).
        let result = linter(&["12.0.0.0.0"]).lint_source("migration.py", MIGRATION);
        let ids: Vec<_> = result.violations.iter().map(|v| v.rule_id.as_str()).collect();
        assert!(!ids.contains(&"CAS001"));
        assert!(!ids.contains(&"CAS003"));
        assert_eq!(result.gate_suppressed, 2);
    }

    #[test]
    fn test_gate_keeps_in_range_rules() {
        let result = linter(&["16.0.0.0.0"]).lint_source("migration.py", MIGRATION);
        let ids: Vec<_> = result.violations.iter().map(|v| v.rule_id.as_str()).collect();
        assert!(ids.contains(&"CAS001"));
        assert!(ids.contains(&"CAS003"));
    }

    #[test]
    fn test_malformed_target_fails_open_with_warnings() {
        let result = linter(&["bad.version"]).lint_source("migration.py", MIGRATION);
        let ids: Vec<_> = result.violations.iter().map(|v| v.rule_id.as_str()).collect();
        assert!(ids.contains(&"CAS001"));
        assert!(!result.gate_warnings.is_empty());
        for w in &result.gate_warnings {
            assert!(w.contains("bad.version"));
        }
    }

    #[test]
    fn test_noqa_applies_before_gate() {
        let source = "self.sudo(uid)  # noqa: CAS003\n";
        let result = linter(&["14.0.0.0.0"]).lint_source("test.py", source);
        assert!(result.violations.is_empty());
        // Suppressed by noqa, not by the gate.
        assert_eq!(result.gate_suppressed, 0);
    }

    #[test]
    fn test_parse_error_reported() {
        let result = linter(&[]).lint_source("bad.py", "def broken(:\n");
        assert!(result.error.is_some());
    }
}
