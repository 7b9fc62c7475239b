#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Rule-based, capacity-constrained assignment of welfare visits to beats.
//!
//! Turns a backlog of unassigned [`RosterItem`]s into beat assignments in a
//! single synchronous pass. Items are matched against ordered
//! [`AssignmentRule`]s and placed on the first beat that still has
//! capacity. The pass works on an in-memory snapshot; isolating that
//! snapshot, persisting the result atomically and keeping two runs from
//! racing on the same beat are the caller's job.
//!
//! [`RosterItem`]: beat_roster_assignment_models::RosterItem
//! [`AssignmentRule`]: beat_roster_assignment_models::AssignmentRule

pub mod capacity;
pub mod config;
pub mod registry;
pub mod rules;
pub mod scheduler;

pub use capacity::CapacityTracker;
pub use config::SchedulerConfig;
pub use rules::{RuleSet, matching_rules, rule_matches, select_rule};
pub use scheduler::{AutoAssignScheduler, ScheduleOutcome, ScheduleSummary, schedule};

use thiserror::Error;

/// Errors that can occur while loading assignment configuration.
#[derive(Debug, Error)]
pub enum AssignmentError {
    /// Reading a configuration file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The configuration parsed but is not usable.
    #[error("Invalid configuration: {message}")]
    Config {
        /// Description of what went wrong.
        message: String,
    },
}
