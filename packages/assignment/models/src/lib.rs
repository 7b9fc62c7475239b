#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Beat capacity, roster item and assignment rule types.
//!
//! A [`RosterItem`] is one senior citizen's pending welfare visit. The
//! scheduler attaches items to [`Beat`]s subject to each beat's capacity,
//! driven by the configured [`AssignmentRule`]s.

use beat_roster_geography_models::Coordinate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Visit priority of a roster item.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VisitPriority {
    /// Visit within the next duty cycle.
    High,
    /// Routine visit.
    Medium,
    /// Visit when capacity allows.
    Low,
}

/// Lifecycle of a roster item.
///
/// `Completed` is only ever set by the field app after the visit.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RosterStatus {
    /// Waiting in the backlog.
    Unassigned,
    /// Attached to a beat, visit planned.
    Assigned,
    /// Officer is on the visit.
    InProgress,
    /// Visit done.
    Completed,
}

/// Duty shift a visit is planned for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Shift {
    Morning,
    Afternoon,
    Evening,
    Night,
}

/// A beat and its assignment capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beat {
    /// Beat identifier.
    pub id: String,
    /// Human-readable beat name.
    pub name: String,
    /// Owning police station.
    pub station_id: String,
    /// Police post the beat reports to.
    pub post_id: String,
    /// Maximum number of citizens that may be assigned to the beat.
    pub max_capacity: u32,
    /// Citizens currently assigned. Legacy data may exceed `max_capacity`.
    pub current_assigned: u32,
    /// Officers on the beat's duty roster.
    pub available_officers: u32,
}

impl Beat {
    /// Whether another citizen can be assigned without exceeding capacity.
    #[must_use]
    pub const fn has_capacity(&self) -> bool {
        self.current_assigned < self.max_capacity
    }

    /// Slots left before the beat is full. Zero for oversubscribed beats.
    #[must_use]
    pub const fn remaining_capacity(&self) -> u32 {
        self.max_capacity.saturating_sub(self.current_assigned)
    }
}

/// One citizen's pending-visit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterItem {
    /// Roster item identifier.
    pub id: String,
    /// Senior citizen this visit is for.
    pub citizen_id: String,
    /// Citizen's registered residence.
    pub location: Coordinate,
    /// Risk rating, 0 (lowest) to 100 (highest).
    pub vulnerability_score: u8,
    /// Visit priority.
    pub priority: VisitPriority,
    /// When the citizen was last visited. `None` if never.
    #[serde(default)]
    pub last_visit_at: Option<DateTime<Utc>>,
    /// Distance in kilometres from the anchor facility, when known.
    #[serde(default)]
    pub distance_from_anchor: Option<f64>,
    /// Lifecycle status.
    pub status: RosterStatus,
    /// Assigned beat.
    #[serde(default)]
    pub beat_id: Option<String>,
    /// Police post of the assigned beat.
    #[serde(default)]
    pub post_id: Option<String>,
    /// Planned visit time.
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Planned duty shift.
    #[serde(default)]
    pub shift: Option<Shift>,
    /// Rule that produced the current assignment.
    #[serde(default)]
    pub assigned_rule_id: Option<String>,
    /// Last time the scheduler changed this item.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Conditions an item must satisfy for a rule to apply.
///
/// Every `None` field is a wildcard. All bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConditions {
    /// Minimum vulnerability score.
    #[serde(default)]
    pub score_min: Option<u8>,
    /// Maximum vulnerability score.
    #[serde(default)]
    pub score_max: Option<u8>,
    /// Priorities the item must have one of.
    #[serde(default)]
    pub priority_set: Option<Vec<VisitPriority>>,
    /// Maximum distance from the anchor facility, in kilometres. Items with
    /// no known distance never satisfy this.
    #[serde(default)]
    pub distance_max: Option<f64>,
    /// Minimum whole days since the last visit. Never-visited items never
    /// satisfy this.
    #[serde(default)]
    pub stale_days_min: Option<u32>,
}

/// Changes applied to an item assigned under a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleActions {
    /// Overrides the item's priority.
    #[serde(default)]
    pub set_priority: Option<VisitPriority>,
    /// Plans the visit for a duty shift.
    #[serde(default)]
    pub set_shift: Option<Shift>,
}

/// A static assignment rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRule {
    /// Rule identifier.
    pub id: String,
    /// Human-readable rule name.
    pub name: String,
    /// Evaluation order. Lower numbers are evaluated first.
    pub priority: i32,
    /// Conditions the item must meet.
    #[serde(default)]
    pub conditions: RuleConditions,
    /// Changes applied on assignment.
    #[serde(default)]
    pub actions: RuleActions,
}
