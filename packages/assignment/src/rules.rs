//! Matches roster items against ordered assignment rules.
//!
//! A rule applies when every condition it specifies holds. Unspecified
//! conditions are wildcards, but a condition that needs data the item does
//! not have (distance from the anchor, a previous visit) fails rather than
//! passing.

use std::collections::BTreeSet;
use std::path::Path;

use beat_roster_assignment_models::{AssignmentRule, RosterItem};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::AssignmentError;

/// Whether `rule` applies to `item`, measuring staleness against `now`.
#[must_use]
pub fn rule_matches(rule: &AssignmentRule, item: &RosterItem, now: DateTime<Utc>) -> bool {
    let conditions = &rule.conditions;

    if conditions
        .score_min
        .is_some_and(|min| item.vulnerability_score < min)
    {
        return false;
    }
    if conditions
        .score_max
        .is_some_and(|max| item.vulnerability_score > max)
    {
        return false;
    }
    if conditions
        .priority_set
        .as_ref()
        .is_some_and(|priorities| !priorities.contains(&item.priority))
    {
        return false;
    }
    // Unknown distance or a never-visited citizen cannot satisfy these.
    if let Some(max) = conditions.distance_max {
        match item.distance_from_anchor {
            Some(distance) if distance <= max => {}
            _ => return false,
        }
    }
    if let Some(min_days) = conditions.stale_days_min {
        match item.last_visit_at {
            Some(last_visit) if (now - last_visit).num_days() >= i64::from(min_days) => {}
            _ => return false,
        }
    }

    true
}

/// Every rule that applies to `item`, lowest `priority` first.
///
/// Rules with equal priority keep their configured order.
#[must_use]
pub fn matching_rules<'a>(
    item: &RosterItem,
    rules: &'a [AssignmentRule],
    now: DateTime<Utc>,
) -> Vec<&'a AssignmentRule> {
    let mut matched: Vec<&AssignmentRule> = rules
        .iter()
        .filter(|rule| rule_matches(rule, item, now))
        .collect();
    matched.sort_by_key(|rule| rule.priority);
    matched
}

/// The highest-precedence rule that applies to `item`, if any.
#[must_use]
pub fn select_rule<'a>(
    item: &RosterItem,
    rules: &'a [AssignmentRule],
    now: DateTime<Utc>,
) -> Option<&'a AssignmentRule> {
    rules
        .iter()
        .filter(|rule| rule_matches(rule, item, now))
        .min_by_key(|rule| rule.priority)
}

#[derive(Deserialize)]
struct RuleFile {
    #[serde(default)]
    rules: Vec<AssignmentRule>,
}

/// A validated rule list, held in evaluation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<AssignmentRule>,
}

impl RuleSet {
    /// Sorts `rules` into evaluation order.
    #[must_use]
    pub fn new(mut rules: Vec<AssignmentRule>) -> Self {
        rules.sort_by_key(|rule| rule.priority);
        Self { rules }
    }

    /// Parses a `[[rules]]` TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed, a rule id repeats, or a
    /// rule's score bounds are inverted or above 100.
    pub fn from_toml(toml_str: &str) -> Result<Self, AssignmentError> {
        let file: RuleFile = toml::from_str(toml_str)?;
        validate(&file.rules)?;
        Ok(Self::new(file.rules))
    }

    /// Loads a rule file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails
    /// [`RuleSet::from_toml`].
    pub fn load(path: &Path) -> Result<Self, AssignmentError> {
        let rules = Self::from_toml(&std::fs::read_to_string(path)?)?;
        log::info!(
            "Loaded {} assignment rules from {}",
            rules.len(),
            path.display()
        );
        Ok(rules)
    }

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[AssignmentRule] {
        &self.rules
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules, in which case nothing is ever assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// See [`matching_rules`].
    #[must_use]
    pub fn matching_rules(&self, item: &RosterItem, now: DateTime<Utc>) -> Vec<&AssignmentRule> {
        matching_rules(item, &self.rules, now)
    }

    /// See [`select_rule`].
    #[must_use]
    pub fn select_rule(&self, item: &RosterItem, now: DateTime<Utc>) -> Option<&AssignmentRule> {
        self.rules.iter().find(|rule| rule_matches(rule, item, now))
    }
}

fn validate(rules: &[AssignmentRule]) -> Result<(), AssignmentError> {
    let mut seen = BTreeSet::new();

    for rule in rules {
        if !seen.insert(rule.id.as_str()) {
            return Err(AssignmentError::Config {
                message: format!("duplicate rule id '{}'", rule.id),
            });
        }

        let conditions = &rule.conditions;
        if let (Some(min), Some(max)) = (conditions.score_min, conditions.score_max) {
            if min > max {
                return Err(AssignmentError::Config {
                    message: format!("rule '{}' has scoreMin {min} above scoreMax {max}", rule.id),
                });
            }
        }
        if let Some(score) = conditions
            .score_min
            .into_iter()
            .chain(conditions.score_max)
            .find(|score| *score > 100)
        {
            return Err(AssignmentError::Config {
                message: format!("rule '{}' has score bound {score} above 100", rule.id),
            });
        }
    }

    Ok(())
}
