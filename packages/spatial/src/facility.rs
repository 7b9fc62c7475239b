//! Nearest police station / post lookups.
//!
//! Every query scans the whole facility list, which is fine for the few
//! hundred stations and posts of a single commissionerate but grows
//! linearly beyond that.

use std::path::Path;

use beat_roster_geography_models::{Coordinate, Facility};
use serde::Serialize;

use crate::SpatialError;
use crate::geomath::distance_km;

/// A facility together with its distance from the query point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestFacility<'a> {
    /// The matched facility.
    pub facility: &'a Facility,
    /// Great-circle distance from the query point, in kilometres.
    pub distance_km: f64,
}

/// Finds the facility closest to `point`.
///
/// Ties go to the facility listed first. Facilities whose distance cannot
/// be computed (a `NaN` coordinate on either side) are skipped. Returns
/// `None` for an empty list.
#[must_use]
pub fn nearest(point: Coordinate, facilities: &[Facility]) -> Option<NearestFacility<'_>> {
    let mut best: Option<NearestFacility<'_>> = None;

    for facility in facilities {
        let distance = distance_km(point, facility.coordinates);
        if distance.is_nan() {
            continue;
        }
        match best {
            Some(current) if distance >= current.distance_km => {}
            _ => {
                best = Some(NearestFacility {
                    facility,
                    distance_km: distance,
                });
            }
        }
    }

    best
}

/// All facilities within `radius_km` of `point`, closest first.
///
/// Facilities at equal distance keep their list order.
#[must_use]
pub fn within_radius(
    point: Coordinate,
    facilities: &[Facility],
    radius_km: f64,
) -> Vec<NearestFacility<'_>> {
    let mut found: Vec<NearestFacility<'_>> = facilities
        .iter()
        .map(|facility| NearestFacility {
            facility,
            distance_km: distance_km(point, facility.coordinates),
        })
        .filter(|candidate| candidate.distance_km <= radius_km)
        .collect();

    found.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    found
}

/// Loads a JSON array of facilities.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array of
/// `{id, name, coordinates: {lat, lng}}` objects.
pub fn load_facilities(path: &Path) -> Result<Vec<Facility>, SpatialError> {
    let facilities: Vec<Facility> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    log::info!(
        "Loaded {} facilities from {}",
        facilities.len(),
        path.display()
    );
    Ok(facilities)
}
