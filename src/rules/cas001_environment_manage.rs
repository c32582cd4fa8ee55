//! CAS001: environment-manage
//!
//! `api.Environment.manage()` became a no-op in Casthi 15.0; code still
//! wrapping work in it is carrying dead weight. Only reported when the
//! target version is 15.0 or later.

use crate::constraint::VersionConstraint;
use crate::models::{RuleContext, Severity, Violation};
use crate::rules::base::LintRule;
use crate::utils::is_call_to;
use rustpython_ast::{Expr, Stmt};

const MANAGE_CALLS: &[&str] = &["api.Environment.manage", "Environment.manage"];

pub struct EnvironmentManageRule;

impl EnvironmentManageRule {
    pub fn new() -> Self {
        Self
    }

    fn report(&self, expr: &Expr, context: &RuleContext, violations: &mut Vec<Violation>) {
        if let Expr::Call(call) = expr {
            if MANAGE_CALLS.iter().any(|target| is_call_to(expr, target)) {
                violations.push(Violation::new(
                    self.rule_id().to_string(),
                    "api.Environment.manage() is a no-op since Casthi 15.0 and should be removed."
                        .to_string(),
                    call.range.start().to_usize(),
                    context.file_path.to_string(),
                    Severity::Warning,
                ));
            }
        }
    }
}

impl LintRule for EnvironmentManageRule {
    fn rule_id(&self) -> &str {
        "CAS001"
    }

    fn symbol(&self) -> &str {
        "environment-manage"
    }

    fn description(&self) -> &str {
        "api.Environment.manage() is a no-op and should be removed"
    }

    fn version_constraint(&self) -> Option<VersionConstraint> {
        Some(VersionConstraint::min("15.0.0.0.0"))
    }

    fn check(&self, context: &RuleContext) -> Vec<Violation> {
        let mut violations = Vec::new();

        match context.stmt {
            Stmt::With(with_stmt) => {
                for item in &with_stmt.items {
                    self.report(&item.context_expr, context, &mut violations);
                }
            }
            Stmt::Expr(expr_stmt) => {
                self.report(&expr_stmt.value, context, &mut violations);
            }
            _ => {}
        }

        violations
    }
}
