//! noqa comment parsing and handling
//!
//! Supports inline comments to suppress lint rules:
//! - `# noqa` - suppress all rules on this line
//! - `# noqa: CAS001` - suppress specific rule
//! - `# noqa: CAS001, CAS003` - suppress multiple rules

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

static NOQA_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#\s*noqa(?:\s*:\s*([A-Z0-9,\s]+))?").unwrap()
});

/// Parsed noqa directives for a file
#[derive(Debug, Default)]
pub struct NoqaDirectives {
    /// Lines where all rules are suppressed
    pub suppress_all: HashSet<usize>,
    /// Lines where specific rules are suppressed: line -> set of rule IDs
    pub suppress_rules: HashMap<usize, HashSet<String>>,
}

impl NoqaDirectives {
    /// Parse noqa directives from source code
    pub fn parse(source: &str) -> Self {
        let mut directives = NoqaDirectives::default();

        for (line_num, line) in source.lines().enumerate() {
            let line_number = line_num + 1; // 1-indexed

            if let Some(caps) = NOQA_REGEX.captures(line) {
                if let Some(rules_match) = caps.get(1) {
                    // Specific rules: # noqa: CAS001, CAS003
                    let rules: HashSet<String> = rules_match
                        .as_str()
                        .split(',')
                        .map(|s| s.trim().to_uppercase())
                        .filter(|s| !s.is_empty())
                        .collect();

                    if !rules.is_empty() {
                        directives
                            .suppress_rules
                            .entry(line_number)
                            .or_default()
                            .extend(rules);
                    }
                } else {
                    // Suppress all: # noqa
                    directives.suppress_all.insert(line_number);
                }
            }
        }

        directives
    }

    /// Check if a rule is suppressed at a given line
    pub fn is_suppressed(&self, line: usize, rule_id: &str) -> bool {
        if self.suppress_all.contains(&line) {
            return true;
        }

        if let Some(rules) = self.suppress_rules.get(&line) {
            if rules.contains(rule_id) {
                return true;
            }
        }

        false
    }
}

/// Convert byte offset to line number (1-indexed)
pub fn offset_to_line(source: &str, offset: usize) -> usize {
    source[..offset.min(source.len())]
        .chars()
        .filter(|&c| c == '\n')
        .count()
        + 1
}
