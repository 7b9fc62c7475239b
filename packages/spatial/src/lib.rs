#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Jurisdiction resolution for beat assignment.
//!
//! Resolves a coordinate to the station, beat, district, sub-division and
//! range polygons that contain it, and finds the nearest police facility to
//! a point. Boundary layers are loaded once from `GeoJSON` and shared
//! read-only by every caller.
//!
//! Lookups are linear scans in collection order. There is no spatial index,
//! so this is sized for city-scale layers (a few hundred features per
//! layer), not national datasets.

pub mod facility;
pub mod geojson;
pub mod geomath;
pub mod jurisdiction;
pub mod polygon;

pub use facility::{NearestFacility, load_facilities, nearest, within_radius};
pub use geomath::{EARTH_RADIUS_KM, distance_km};
pub use jurisdiction::{JurisdictionIndex, JurisdictionMatch};
pub use polygon::{find_containing_feature, point_in_polygon, point_in_ring};

use thiserror::Error;

/// Errors that can occur while loading boundary or facility data.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// Reading a data file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
