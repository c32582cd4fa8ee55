//! Base trait for all lint rules

use crate::constraint::VersionConstraint;
use crate::models::{RuleContext, Violation};

/// Base trait that all lint rules must implement
pub trait LintRule: Send + Sync {
    /// The unique identifier for this rule (e.g., "CAS001")
    fn rule_id(&self) -> &str;

    /// The canonical dashed symbol for this rule (e.g., "environment-manage")
    fn symbol(&self) -> &str;

    /// Short description of what the rule checks
    fn description(&self) -> &str;

    /// The Casthi version range this rule applies to.
    /// `None` means the rule applies to every target version.
    fn version_constraint(&self) -> Option<VersionConstraint> {
        None
    }

    /// Perform the lint check on a statement
    fn check(&self, context: &RuleContext) -> Vec<Violation>;
}
