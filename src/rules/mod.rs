//! Lint rules for casthi-lint

pub mod base;

// Rule implementations
pub mod cas001_environment_manage;
pub mod cas002_print_used;
pub mod cas003_sudo_with_argument;
pub mod cas004_string_exception;

use crate::constraint::ConstraintRegistry;
use crate::gate::SymbolResolver;
use base::LintRule;
use std::collections::HashMap;

/// Get all available rules
pub fn get_all_rules() -> Vec<Box<dyn LintRule>> {
    vec![
        Box::new(cas001_environment_manage::EnvironmentManageRule::new()),
        Box::new(cas002_print_used::PrintUsedRule::new()),
        Box::new(cas003_sudo_with_argument::SudoWithArgumentRule::new()),
        Box::new(cas004_string_exception::StringExceptionRule::new()),
    ]
}

/// Get all available rule IDs
pub fn get_all_rule_ids() -> Vec<String> {
    get_all_rules()
        .iter()
        .map(|rule| rule.rule_id().to_string())
        .collect()
}

/// Get rules filtered by enabled IDs
pub fn get_enabled_rules(enabled_ids: Option<&[String]>) -> Vec<Box<dyn LintRule>> {
    let all_rules = get_all_rules();

    match enabled_ids {
        Some(ids) => all_rules
            .into_iter()
            .filter(|rule| ids.contains(&rule.rule_id().to_string()))
            .collect(),
        None => all_rules,
    }
}

/// Build the constraint registry from the rules' declared version ranges.
pub fn build_constraint_registry(rules: &[Box<dyn LintRule>]) -> ConstraintRegistry {
    let mut registry = ConstraintRegistry::new();
    for rule in rules {
        if let Some(constraint) = rule.version_constraint() {
            registry.declare(rule.symbol(), constraint);
        }
    }
    registry
}

/// Canonicalizes rule IDs and symbols to the rule's symbol.
///
/// Accepts either spelling (`CAS001` or `environment-manage`); anything the
/// rule set does not know stays unresolved, which the gate treats as
/// "never filter".
#[derive(Debug, Default)]
pub struct RuleIndex {
    symbols: HashMap<String, String>,
}

impl RuleIndex {
    pub fn from_rules(rules: &[Box<dyn LintRule>]) -> Self {
        let mut symbols = HashMap::new();
        for rule in rules {
            symbols.insert(rule.rule_id().to_string(), rule.symbol().to_string());
            symbols.insert(rule.symbol().to_string(), rule.symbol().to_string());
        }
        Self { symbols }
    }
}

impl SymbolResolver for RuleIndex {
    fn resolve_symbol(&self, id_or_symbol: &str) -> Option<&str> {
        self.symbols.get(id_or_symbol).map(String::as_str)
    }
}
