//! CAS004: string-exception
//!
//! Raising a bare `Exception("...")` hides the failure class from callers;
//! addon code should raise the framework's UserError/ValidationError.

use crate::models::{RuleContext, Severity, Violation};
use crate::rules::base::LintRule;
use rustpython_ast::{Expr, Stmt};

pub struct StringExceptionRule;

impl StringExceptionRule {
    pub fn new() -> Self {
        Self
    }
}

impl LintRule for StringExceptionRule {
    fn rule_id(&self) -> &str {
        "CAS004"
    }

    fn symbol(&self) -> &str {
        "string-exception"
    }

    fn description(&self) -> &str {
        "Raise UserError/ValidationError instead of a bare Exception"
    }

    fn check(&self, context: &RuleContext) -> Vec<Violation> {
        let mut violations = Vec::new();

        if let Stmt::Raise(raise_stmt) = context.stmt {
            if let Some(exc) = &raise_stmt.exc {
                if let Expr::Call(call) = &**exc {
                    if let Expr::Name(name) = &*call.func {
                        if name.id.as_str() == "Exception" {
                            violations.push(Violation::new(
                                self.rule_id().to_string(),
                                "Bare Exception raised. \
                                 Raise UserError or ValidationError instead."
                                    .to_string(),
                                call.range.start().to_usize(),
                                context.file_path.to_string(),
                                Severity::Warning,
                            ));
                        }
                    }
                }
            }
        }

        violations
    }
}
