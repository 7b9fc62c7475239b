//! Single-pass auto-assignment of the unassigned backlog.
//!
//! Items are taken in backlog order, so earlier items claim capacity
//! first. Each matching item goes to the first beat (in beat-list order)
//! that still has room. Proximity plays no part at this stage.

use beat_roster_assignment_models::{AssignmentRule, Beat, RosterItem, RosterStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::AssignmentError;
use crate::capacity::CapacityTracker;
use crate::config::SchedulerConfig;
use crate::rules::RuleSet;

/// Counts from one scheduling pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    /// Unassigned items examined.
    pub considered: usize,
    /// Items given a beat.
    pub assigned: usize,
    /// Items left unassigned because no rule matched.
    pub no_matching_rule: usize,
    /// Items left unassigned because every beat was full.
    pub no_capacity: usize,
    /// Items that were not unassigned and were returned untouched.
    pub passed_through: usize,
}

/// Result of a scheduling pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOutcome {
    /// Every input item, in input order, with assignments applied.
    pub items: Vec<RosterItem>,
    /// Every input beat, in input order, with updated `currentAssigned`.
    pub beats: Vec<Beat>,
    /// What happened during the pass.
    pub summary: ScheduleSummary,
}

/// Assigns unassigned roster items to beats under a fixed rule set.
#[derive(Debug, Clone, Default)]
pub struct AutoAssignScheduler {
    rules: RuleSet,
    config: SchedulerConfig,
}

impl AutoAssignScheduler {
    #[must_use]
    pub const fn new(rules: RuleSet, config: SchedulerConfig) -> Self {
        Self { rules, config }
    }

    #[must_use]
    pub const fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Runs one pass over a snapshot of items and beats.
    ///
    /// The inputs are not modified. The same snapshot and `now` always
    /// produce the same outcome; running again against beats that already
    /// include this pass's commits will not.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::Config`] if the configuration is out of
    /// range or `now` plus the visit offset is not a representable time.
    /// Nothing is assigned in that case.
    pub fn schedule_with_outcome(
        &self,
        items: &[RosterItem],
        beats: &[Beat],
        now: DateTime<Utc>,
    ) -> Result<ScheduleOutcome, AssignmentError> {
        self.config.validate()?;
        let scheduled_at = now
            .checked_add_signed(self.config.visit_offset())
            .ok_or_else(|| AssignmentError::Config {
                message: format!(
                    "visit time {now} + {}h is out of range",
                    self.config.visit_offset_hours
                ),
            })?;

        let mut tracker = CapacityTracker::from_beats(beats);
        let mut summary = ScheduleSummary::default();

        log::debug!(
            "Scheduling {} items over {} beats ({} with capacity) using {} rules",
            items.len(),
            beats.len(),
            tracker.len(),
            self.rules.len()
        );

        let mut scheduled = Vec::with_capacity(items.len());

        for item in items {
            if item.status != RosterStatus::Unassigned {
                summary.passed_through += 1;
                scheduled.push(item.clone());
                continue;
            }
            summary.considered += 1;

            let Some(rule) = self.rules.select_rule(item, now) else {
                log::debug!("Roster item {}: no matching rule", item.id);
                summary.no_matching_rule += 1;
                scheduled.push(item.clone());
                continue;
            };

            let Some((index, beat)) = tracker.first_available() else {
                log::debug!(
                    "Roster item {}: rule {} matched but no beat has capacity",
                    item.id,
                    rule.id
                );
                summary.no_capacity += 1;
                scheduled.push(item.clone());
                continue;
            };

            let assigned = assign(item, beat, rule, scheduled_at, now);
            let beat_id = beat.id.clone();
            tracker.commit_at(index);

            log::debug!(
                "Roster item {} -> beat {beat_id} (rule {})",
                item.id,
                rule.id
            );
            summary.assigned += 1;
            scheduled.push(assigned);
        }

        log::info!(
            "Scheduled {} of {} unassigned items ({} no matching rule, {} no capacity, {} passed through)",
            summary.assigned,
            summary.considered,
            summary.no_matching_rule,
            summary.no_capacity,
            summary.passed_through
        );

        Ok(ScheduleOutcome {
            items: scheduled,
            beats: tracker.apply_to(beats),
            summary,
        })
    }
}

/// Copy of `item` placed on `beat` under `rule`.
fn assign(
    item: &RosterItem,
    beat: &Beat,
    rule: &AssignmentRule,
    scheduled_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> RosterItem {
    RosterItem {
        status: RosterStatus::Assigned,
        beat_id: Some(beat.id.clone()),
        post_id: Some(beat.post_id.clone()),
        priority: rule.actions.set_priority.unwrap_or(item.priority),
        shift: rule.actions.set_shift.or(item.shift),
        scheduled_at: Some(scheduled_at),
        assigned_rule_id: Some(rule.id.clone()),
        updated_at: Some(now),
        ..item.clone()
    }
}

/// Assigns the unassigned items with the default scheduler configuration
/// and returns the updated item list.
///
/// # Errors
///
/// Returns an error if `now` is too close to the end of the representable
/// time range to add the visit offset.
pub fn schedule(
    items: &[RosterItem],
    beats: &[Beat],
    rules: &[AssignmentRule],
    now: DateTime<Utc>,
) -> Result<Vec<RosterItem>, AssignmentError> {
    AutoAssignScheduler::new(RuleSet::new(rules.to_vec()), SchedulerConfig::default())
        .schedule_with_outcome(items, beats, now)
        .map(|outcome| outcome.items)
}
