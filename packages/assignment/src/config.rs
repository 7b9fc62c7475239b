//! Scheduler configuration, read from TOML.
//!
//! ```toml
//! [scheduler]
//! visit_offset_hours = 24
//! ```

use std::path::Path;

use chrono::TimeDelta;
use serde::Deserialize;

use crate::AssignmentError;

/// Default gap between an assignment and the planned visit.
pub const DEFAULT_VISIT_OFFSET_HOURS: u32 = 24;

/// Largest accepted visit offset: one leap year.
pub const MAX_VISIT_OFFSET_HOURS: u32 = 366 * 24;

/// Tunables for [`crate::AutoAssignScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Hours after the run at which assigned visits are scheduled.
    pub visit_offset_hours: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            visit_offset_hours: DEFAULT_VISIT_OFFSET_HOURS,
        }
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    scheduler: SchedulerConfig,
}

impl SchedulerConfig {
    /// Offset added to the run time to get `scheduledAt`.
    #[must_use]
    pub fn visit_offset(&self) -> TimeDelta {
        TimeDelta::hours(i64::from(self.visit_offset_hours))
    }

    /// Parses the `[scheduler]` table of a TOML document. Missing keys take
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed, a value has the wrong
    /// type, or the offset is above [`MAX_VISIT_OFFSET_HOURS`].
    pub fn from_toml(toml_str: &str) -> Result<Self, AssignmentError> {
        let file: ConfigFile = toml::from_str(toml_str)?;
        file.scheduler.validate()?;
        Ok(file.scheduler)
    }

    /// Checks that the values are within their accepted ranges.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::Config`] if `visit_offset_hours` is above
    /// [`MAX_VISIT_OFFSET_HOURS`].
    pub fn validate(&self) -> Result<(), AssignmentError> {
        if self.visit_offset_hours > MAX_VISIT_OFFSET_HOURS {
            return Err(AssignmentError::Config {
                message: format!(
                    "visit_offset_hours {} is above the maximum of {MAX_VISIT_OFFSET_HOURS}",
                    self.visit_offset_hours
                ),
            });
        }
        Ok(())
    }

    /// Loads the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails
    /// [`SchedulerConfig::from_toml`].
    pub fn load(path: &Path) -> Result<Self, AssignmentError> {
        let config = Self::from_toml(&std::fs::read_to_string(path)?)?;
        log::debug!("Scheduler config from {}: {config:?}", path.display());
        Ok(config)
    }
}
