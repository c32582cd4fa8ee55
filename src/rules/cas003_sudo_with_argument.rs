//! CAS003: sudo-with-argument
//!
//! `recordset.sudo(uid)` with a user argument was replaced by
//! `with_user(uid)` in Casthi 13.0 and the argument form was dropped after
//! 17.0, so the rule is scoped to that range.

use crate::constraint::VersionConstraint;
use crate::models::{RuleContext, Severity, Violation};
use crate::rules::base::LintRule;
use rustpython_ast::{Expr, Stmt};

pub struct SudoWithArgumentRule;

impl SudoWithArgumentRule {
    pub fn new() -> Self {
        Self
    }

    fn check_expr(expr: &Expr, violations: &mut Vec<Violation>, file_path: &str) {
        match expr {
            Expr::Call(call) => {
                if let Expr::Attribute(attr) = &*call.func {
                    if attr.attr.as_str() == "sudo" && !call.args.is_empty() {
                        violations.push(Violation::new(
                            "CAS003".to_string(),
                            "sudo() with a user argument is deprecated. \
                             Use with_user(uid) instead."
                                .to_string(),
                            call.range.start().to_usize(),
                            file_path.to_string(),
                            Severity::Warning,
                        ));
                    }
                }
                Self::check_expr(&call.func, violations, file_path);
                for arg in &call.args {
                    Self::check_expr(arg, violations, file_path);
                }
            }
            Expr::Attribute(attr) => {
                Self::check_expr(&attr.value, violations, file_path);
            }
            Expr::Subscript(subscript) => {
                Self::check_expr(&subscript.value, violations, file_path);
                Self::check_expr(&subscript.slice, violations, file_path);
            }
            Expr::BinOp(binop) => {
                Self::check_expr(&binop.left, violations, file_path);
                Self::check_expr(&binop.right, violations, file_path);
            }
            Expr::Compare(compare) => {
                Self::check_expr(&compare.left, violations, file_path);
                for comparator in &compare.comparators {
                    Self::check_expr(comparator, violations, file_path);
                }
            }
            _ => {}
        }
    }
}

impl LintRule for SudoWithArgumentRule {
    fn rule_id(&self) -> &str {
        "CAS003"
    }

    fn symbol(&self) -> &str {
        "sudo-with-argument"
    }

    fn description(&self) -> &str {
        "sudo() with a user argument is deprecated in favor of with_user()"
    }

    fn version_constraint(&self) -> Option<VersionConstraint> {
        Some(VersionConstraint::range("13.0.0.0.0", "17.0.0.0.0"))
    }

    fn check(&self, context: &RuleContext) -> Vec<Violation> {
        let mut violations = Vec::new();

        match context.stmt {
            Stmt::Expr(expr_stmt) => {
                Self::check_expr(&expr_stmt.value, &mut violations, context.file_path);
            }
            Stmt::Assign(assign) => {
                Self::check_expr(&assign.value, &mut violations, context.file_path);
            }
            Stmt::AnnAssign(ann_assign) => {
                if let Some(value) = &ann_assign.value {
                    Self::check_expr(value, &mut violations, context.file_path);
                }
            }
            Stmt::Return(ret) => {
                if let Some(value) = &ret.value {
                    Self::check_expr(value, &mut violations, context.file_path);
                }
            }
            _ => {}
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::tests::check_code;

    #[test]
    fn test_sudo_with_uid() {
        let code = r#"
records = env["res.partner"].sudo(uid).search([])
"#;
        let violations = check_code(&SudoWithArgumentRule::new(), code);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("with_user"));
    }

    #[test]
    fn test_bare_sudo_ok() {
        let code = r#"
records = env["res.partner"].sudo().search([])
"#;
        let violations = check_code(&SudoWithArgumentRule::new(), code);
        assert_eq!(violations.len(), 0);
    }

    #[test]
    fn test_sudo_in_assignment() {
        let code = "user_records = self.sudo(uid)\n";
        let violations = check_code(&SudoWithArgumentRule::new(), code);
        assert_eq!(violations.len(), 1);
    }
}
