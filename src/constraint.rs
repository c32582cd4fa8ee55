//! Per-rule target-version constraints
//!
//! A rule may declare the Casthi version range it applies to. The registry
//! maps rule symbols to those declarations and substitutes the full-range
//! sentinels for anything left unset, so an unconstrained rule can never be
//! filtered out.

use crate::version::{EARLIEST_VERSION, LATEST_VERSION};
use std::collections::HashMap;

/// The version range a rule declares itself valid for.
///
/// Both ends are optional version texts, authored at rule-definition time
/// and immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionConstraint {
    pub min: Option<String>,
    pub max: Option<String>,
}

impl VersionConstraint {
    pub fn min(text: &str) -> Self {
        Self {
            min: Some(text.to_string()),
            max: None,
        }
    }

    pub fn max(text: &str) -> Self {
        Self {
            min: None,
            max: Some(text.to_string()),
        }
    }

    pub fn range(min: &str, max: &str) -> Self {
        Self {
            min: Some(min.to_string()),
            max: Some(max.to_string()),
        }
    }
}

/// Read-only map from rule symbol to its declared constraint.
///
/// Built once when the rule set is assembled and passed by reference into
/// every gate evaluation.
#[derive(Debug, Default)]
pub struct ConstraintRegistry {
    constraints: HashMap<String, VersionConstraint>,
}

impl ConstraintRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rule's declared constraint under its canonical symbol.
    pub fn declare(&mut self, symbol: &str, constraint: VersionConstraint) {
        self.constraints.insert(symbol.to_string(), constraint);
    }

    /// Resolve the effective (min, max) version texts for a symbol.
    ///
    /// An absent entry, or an unset side of a present entry, falls back to
    /// the process-wide sentinel for that side.
    pub fn resolve(&self, symbol: &str) -> (&str, &str) {
        match self.constraints.get(symbol) {
            Some(c) => (
                c.min.as_deref().unwrap_or(EARLIEST_VERSION),
                c.max.as_deref().unwrap_or(LATEST_VERSION),
            ),
            None => (EARLIEST_VERSION, LATEST_VERSION),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Version;

    #[test]
    fn test_resolve_absent_symbol_falls_back_to_sentinels() {
        let registry = ConstraintRegistry::new();
        let (min, max) = registry.resolve("no-such-rule");
        assert_eq!(min, EARLIEST_VERSION);
        assert_eq!(max, LATEST_VERSION);
    }

    #[test]
    fn test_resolve_partial_constraint() {
        let mut registry = ConstraintRegistry::new();
        registry.declare("environment-manage", VersionConstraint::min("15.0.0.0.0"));

        let (min, max) = registry.resolve("environment-manage");
        assert_eq!(min, "15.0.0.0.0");
        assert_eq!(max, LATEST_VERSION);
    }

    #[test]
    fn test_resolve_full_constraint() {
        let mut registry = ConstraintRegistry::new();
        registry.declare(
            "sudo-with-argument",
            VersionConstraint::range("13.0.0.0.0", "17.0.0.0.0"),
        );

        let (min, max) = registry.resolve("sudo-with-argument");
        assert_eq!(min, "13.0.0.0.0");
        assert_eq!(max, "17.0.0.0.0");
    }

    #[test]
    fn test_sentinel_texts_parse_and_order() {
        let registry = ConstraintRegistry::new();
        let (min, max) = registry.resolve("anything");
        let lo = Version::parse(min).unwrap();
        let hi = Version::parse(max).unwrap();
        assert!(lo <= hi);
    }
}
