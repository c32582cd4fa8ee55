//! CAS002: print-used
//!
//! Addon code should log through the framework logger, not `print()`.

use crate::models::{RuleContext, Severity, Violation};
use crate::rules::base::LintRule;
use rustpython_ast::{Expr, Stmt};

pub struct PrintUsedRule;

impl PrintUsedRule {
    pub fn new() -> Self {
        Self
    }
}

impl LintRule for PrintUsedRule {
    fn rule_id(&self) -> &str {
        "CAS002"
    }

    fn symbol(&self) -> &str {
        "print-used"
    }

    fn description(&self) -> &str {
        "Use the framework logger instead of print()"
    }

    fn check(&self, context: &RuleContext) -> Vec<Violation> {
        let mut violations = Vec::new();

        if let Stmt::Expr(expr_stmt) = context.stmt {
            if let Expr::Call(call) = &*expr_stmt.value {
                if let Expr::Name(name) = &*call.func {
                    if name.id.as_str() == "print" {
                        violations.push(Violation::new(
                            self.rule_id().to_string(),
                            "print() used. Use logging.getLogger(__name__) instead."
                                .to_string(),
                            call.range.start().to_usize(),
                            context.file_path.to_string(),
                            Severity::Warning,
                        ));
                    }
                }
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::tests::check_code;

    #[test]
    fn test_print_call() {
        let code = r#"
def migrate(cr, version):
    print("migrating")
"#;
        let violations = check_code(&PrintUsedRule::new(), code);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_logger_ok() {
        let code = r#"
_logger.info("migrating")
"#;
        let violations = check_code(&PrintUsedRule::new(), code);
        assert_eq!(violations.len(), 0);
    }
}
