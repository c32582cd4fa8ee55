//! Utility functions for AST analysis

use rustpython_ast::Expr;

/// Flatten an attribute chain into its dotted name, if the chain is made of
/// plain names and attributes only (`api.Environment.manage` -> that text).
pub fn dotted_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Name(name) => Some(name.id.as_str().to_string()),
        Expr::Attribute(attr) => {
            let base = dotted_name(&attr.value)?;
            Some(format!("{}.{}", base, attr.attr))
        }
        _ => None,
    }
}

/// True when the expression is a call whose callee flattens to `target`.
pub fn is_call_to(expr: &Expr, target: &str) -> bool {
    if let Expr::Call(call) = expr {
        if let Some(name) = dotted_name(&call.func) {
            return name == target;
        }
    }
    false
}
