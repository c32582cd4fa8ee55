//! Target-version gating of diagnostics
//!
//! Decides, per rule, whether the configured target Casthi version falls
//! inside the rule's declared version range. Every ambiguous or malformed
//! input resolves to "enabled": this machinery exists only to cut noise
//! from rules known not to apply, so showing a diagnostic is always the
//! safe side of any doubt.

use crate::constraint::ConstraintRegistry;
use crate::models::Violation;
use crate::version::Version;

/// Resolves a rule ID or symbol to the canonical rule symbol.
///
/// Narrow seam over the host rule registry; the gate only consumes it.
pub trait SymbolResolver {
    fn resolve_symbol(&self, id_or_symbol: &str) -> Option<&str>;
}

/// The machinery a gated emission ultimately forwards to.
pub trait DiagnosticSink {
    fn record(&mut self, violation: Violation);
}

impl DiagnosticSink for Vec<Violation> {
    fn record(&mut self, violation: Violation) {
        self.push(violation);
    }
}

/// Outcome of a single gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub enabled: bool,
    /// Operator-visible warning, set only for a malformed target version.
    pub warning: Option<String>,
}

impl Verdict {
    fn enabled() -> Self {
        Self {
            enabled: true,
            warning: None,
        }
    }

    fn disabled() -> Self {
        Self {
            enabled: false,
            warning: None,
        }
    }
}

/// Decide whether a rule applies under the configured target versions.
///
/// Filtering is meaningful only when exactly one target version is
/// configured; zero or several entries disable filtering entirely. An
/// unresolvable rule identifier is never filtered. A target version that
/// fails to parse yields an enabled verdict carrying a warning, since it
/// points at a misconfiguration worth surfacing.
pub fn is_rule_enabled(
    rule_id: &str,
    target_versions: &[String],
    resolver: &dyn SymbolResolver,
    registry: &ConstraintRegistry,
) -> Verdict {
    if target_versions.len() != 1 {
        // Exactly one target version must be configured for filtering.
        return Verdict::enabled();
    }

    let symbol = match resolver.resolve_symbol(rule_id) {
        Some(symbol) => symbol,
        None => return Verdict::enabled(),
    };

    let target_text = &target_versions[0];
    let target = match Version::parse(target_text) {
        Some(target) => target,
        None => {
            return Verdict {
                enabled: true,
                warning: Some(format!(
                    "Invalid target version format {}. \
                     It was not possible to suppress checks based on a particular Casthi version",
                    target_text
                )),
            };
        }
    };

    let (min_text, max_text) = registry.resolve(symbol);
    // Authored bounds; an unparseable one is a bug in the rule, not a
    // runtime condition. Fall back to the unconstrained side silently.
    let min = Version::parse(min_text);
    let max = Version::parse(max_text);

    let below_min = min.map_or(false, |min| target < min);
    let above_max = max.map_or(false, |max| target > max);

    if below_min || above_max {
        Verdict::disabled()
    } else {
        Verdict::enabled()
    }
}

/// Wraps a [`DiagnosticSink`], consulting the gate before every emission.
///
/// Gated-out violations are dropped silently; warnings from malformed
/// target versions accumulate here, one per evaluation, undeduplicated.
pub struct GatedEmitter<'a> {
    sink: &'a mut dyn DiagnosticSink,
    target_versions: &'a [String],
    resolver: &'a dyn SymbolResolver,
    registry: &'a ConstraintRegistry,
    warnings: Vec<String>,
    suppressed: usize,
}

impl<'a> GatedEmitter<'a> {
    pub fn new(
        sink: &'a mut dyn DiagnosticSink,
        target_versions: &'a [String],
        resolver: &'a dyn SymbolResolver,
        registry: &'a ConstraintRegistry,
    ) -> Self {
        Self {
            sink,
            target_versions,
            resolver,
            registry,
            warnings: Vec::new(),
            suppressed: 0,
        }
    }

    /// Forward a violation to the sink unless its rule is gated out.
    pub fn emit(&mut self, violation: Violation) {
        let verdict = is_rule_enabled(
            &violation.rule_id,
            self.target_versions,
            self.resolver,
            self.registry,
        );
        if let Some(warning) = verdict.warning {
            self.warnings.push(warning);
        }
        if verdict.enabled {
            self.sink.record(violation);
        } else {
            self.suppressed += 1;
        }
    }

    /// Number of violations dropped by the gate so far.
    pub fn suppressed(&self) -> usize {
        self.suppressed
    }

    /// Take the accumulated operator warnings.
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::VersionConstraint;
    use crate::models::Severity;
    use std::collections::HashMap;

    struct MapResolver(HashMap<String, String>);

    impl MapResolver {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            )
        }
    }

    impl SymbolResolver for MapResolver {
        fn resolve_symbol(&self, id_or_symbol: &str) -> Option<&str> {
            self.0.get(id_or_symbol).map(String::as_str)
        }
    }

    fn constrained_registry() -> ConstraintRegistry {
        let mut registry = ConstraintRegistry::new();
        registry.declare(
            "environment-manage",
            VersionConstraint::range("14.0.1.0.0", "15.0.0.0.0"),
        );
        registry
    }

    fn resolver() -> MapResolver {
        MapResolver::new(&[
            ("CAS001", "environment-manage"),
            ("environment-manage", "environment-manage"),
            ("CAS002", "print-used"),
        ])
    }

    fn targets(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_target_inside_range_enabled() {
        let verdict = is_rule_enabled(
            "CAS001",
            &targets(&["14.5.0.0.0"]),
            &resolver(),
            &constrained_registry(),
        );
        assert!(verdict.enabled);
        assert!(verdict.warning.is_none());
    }

    #[test]
    fn test_target_below_min_disabled() {
        let verdict = is_rule_enabled(
            "CAS001",
            &targets(&["13.9.9.9.9"]),
            &resolver(),
            &constrained_registry(),
        );
        assert!(!verdict.enabled);
        assert!(verdict.warning.is_none());
    }

    #[test]
    fn test_target_above_max_disabled() {
        let verdict = is_rule_enabled(
            "CAS001",
            &targets(&["15.0.0.0.1"]),
            &resolver(),
            &constrained_registry(),
        );
        assert!(!verdict.enabled);
    }

    #[test]
    fn test_boundaries_inclusive() {
        let registry = constrained_registry();
        for boundary in ["14.0.1.0.0", "15.0.0.0.0"] {
            let verdict =
                is_rule_enabled("CAS001", &targets(&[boundary]), &resolver(), &registry);
            assert!(verdict.enabled, "boundary {} should be enabled", boundary);
        }
    }

    #[test]
    fn test_empty_target_config_disables_filtering() {
        let verdict = is_rule_enabled("CAS001", &[], &resolver(), &constrained_registry());
        assert!(verdict.enabled);
        assert!(verdict.warning.is_none());
    }

    #[test]
    fn test_multiple_target_versions_disable_filtering() {
        let verdict = is_rule_enabled(
            "CAS001",
            &targets(&["13.0.0.0.0", "14.0.0.0.0"]),
            &resolver(),
            &constrained_registry(),
        );
        assert!(verdict.enabled);
        assert!(verdict.warning.is_none());
    }

    #[test]
    fn test_unresolvable_rule_enabled_without_warning() {
        let verdict = is_rule_enabled(
            "CAS999",
            &targets(&["14.5.0.0.0"]),
            &resolver(),
            &constrained_registry(),
        );
        assert!(verdict.enabled);
        assert!(verdict.warning.is_none());
    }

    #[test]
    fn test_malformed_target_enabled_with_warning() {
        let verdict = is_rule_enabled(
            "CAS001",
            &targets(&["bad.version"]),
            &resolver(),
            &constrained_registry(),
        );
        assert!(verdict.enabled);
        let warning = verdict.warning.unwrap();
        assert!(warning.contains("bad.version"));
    }

    #[test]
    fn test_wrong_arity_target_enabled_with_warning() {
        let verdict = is_rule_enabled(
            "CAS001",
            &targets(&["14.0"]),
            &resolver(),
            &constrained_registry(),
        );
        assert!(verdict.enabled);
        assert!(verdict.warning.unwrap().contains("14.0"));
    }

    #[test]
    fn test_unconstrained_rule_enabled_for_any_valid_target() {
        let registry = constrained_registry();
        for target in ["0.0.0.0.0", "13.9.9.9.9", "99.0.0.0.0"] {
            let verdict =
                is_rule_enabled("CAS002", &targets(&[target]), &resolver(), &registry);
            assert!(verdict.enabled, "target {} should be enabled", target);
        }
    }

    #[test]
    fn test_symbol_accepted_in_place_of_id() {
        let verdict = is_rule_enabled(
            "environment-manage",
            &targets(&["13.0.0.0.0"]),
            &resolver(),
            &constrained_registry(),
        );
        assert!(!verdict.enabled);
    }

    #[test]
    fn test_malformed_authored_bound_falls_open() {
        let mut registry = ConstraintRegistry::new();
        registry.declare("environment-manage", VersionConstraint::min("15.x"));

        let verdict = is_rule_enabled(
            "CAS001",
            &targets(&["13.0.0.0.0"]),
            &resolver(),
            &registry,
        );
        assert!(verdict.enabled);
        assert!(verdict.warning.is_none());
    }

    fn violation(rule_id: &str) -> Violation {
        Violation::new(
            rule_id.to_string(),
            "test".to_string(),
            0,
            "test.py".to_string(),
            Severity::Warning,
        )
    }

    #[test]
    fn test_emitter_forwards_enabled_and_drops_disabled() {
        let registry = constrained_registry();
        let resolver = resolver();
        let targets = targets(&["13.0.0.0.0"]);
        let mut sink: Vec<Violation> = Vec::new();

        let mut emitter = GatedEmitter::new(&mut sink, &targets, &resolver, &registry);
        emitter.emit(violation("CAS001")); // gated out below min
        emitter.emit(violation("CAS002")); // unconstrained, forwarded

        assert_eq!(emitter.suppressed(), 1);
        assert!(emitter.take_warnings().is_empty());
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].rule_id, "CAS002");
    }

    #[test]
    fn test_emitter_one_warning_per_malformed_evaluation() {
        let registry = constrained_registry();
        let resolver = resolver();
        let targets = targets(&["bad.version"]);
        let mut sink: Vec<Violation> = Vec::new();

        let mut emitter = GatedEmitter::new(&mut sink, &targets, &resolver, &registry);
        emitter.emit(violation("CAS001"));
        emitter.emit(violation("CAS001"));
        let warnings = emitter.take_warnings();
        drop(emitter);

        // Fail-open: both forwarded, one warning per evaluation.
        assert_eq!(warnings.len(), 2);
        assert_eq!(sink.len(), 2);
    }
}
