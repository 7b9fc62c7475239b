//! Reads roster and beat snapshots for the `schedule` command.

use std::path::Path;

use beat_roster_assignment_models::{Beat, RosterItem};
use beat_roster_geography_models::Coordinate;
use chrono::{DateTime, Utc};

/// Builds a query point from `--lat`/`--lng`.
///
/// # Errors
///
/// Returns an error if either value is not finite or is outside the valid
/// latitude/longitude range.
pub fn coordinate(lat: f64, lng: f64) -> Result<Coordinate, String> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(format!("latitude {lat} is not between -90 and 90"));
    }
    if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
        return Err(format!("longitude {lng} is not between -180 and 180"));
    }
    Ok(Coordinate::new(lat, lng))
}

/// Loads a JSON array of roster items.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_roster(path: &Path) -> Result<Vec<RosterItem>, Box<dyn std::error::Error>> {
    Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
}

/// Loads a JSON array of beats.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_beats(path: &Path) -> Result<Vec<Beat>, Box<dyn std::error::Error>> {
    Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
}

/// Parses `--now`, falling back to the wall clock.
///
/// # Errors
///
/// Returns an error if the value is not RFC 3339.
pub fn parse_now(value: Option<&str>) -> Result<DateTime<Utc>, chrono::ParseError> {
    value.map_or_else(
        || Ok(Utc::now()),
        |s| DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc)),
    )
}
