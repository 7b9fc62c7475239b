#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Coordinate, facility and jurisdiction boundary types.
//!
//! These are the immutable reference data the jurisdiction engine works
//! over: police stations and posts as point facilities, and the
//! administrative boundary layers (station, beat, district, sub-division,
//! range) as polygon features.
//!
//! Boundary rings keep the `GeoJSON` `[lng, lat]` position order, while
//! [`Coordinate`] is `{lat, lng}`. Every crossing between the two goes
//! through [`Coordinate::from_lng_lat`] or [`Coordinate::to_lng_lat`].

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A `[lng, lat]` position as it appears in `GeoJSON` ring data.
pub type LngLat = [f64; 2];

/// A closed ring of `[lng, lat]` positions.
pub type Ring = Vec<LngLat>;

/// A geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90).
    pub lat: f64,
    /// Longitude in degrees (-180 to 180).
    pub lng: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Converts a `GeoJSON` `[lng, lat]` position into a coordinate.
    #[must_use]
    pub const fn from_lng_lat(position: LngLat) -> Self {
        Self {
            lat: position[1],
            lng: position[0],
        }
    }

    /// Returns this coordinate as a `GeoJSON` `[lng, lat]` position.
    #[must_use]
    pub const fn to_lng_lat(self) -> LngLat {
        [self.lng, self.lat]
    }
}

/// A police station or post, located by a single point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    /// Facility identifier (e.g. `"PS-014"`).
    pub id: String,
    /// Human-readable facility name.
    pub name: String,
    /// Location of the facility.
    pub coordinates: Coordinate,
}

/// Polygonal geometry of a boundary feature.
///
/// Each polygon is a list of rings; the first ring is the outer boundary
/// and any further rings are holes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum BoundaryGeometry {
    /// A single polygon.
    Polygon(Vec<Ring>),
    /// Several polygons forming one feature (e.g. a beat split by a river).
    MultiPolygon(Vec<Vec<Ring>>),
}

impl BoundaryGeometry {
    /// Iterates the constituent polygons, in order.
    pub fn polygons(&self) -> impl Iterator<Item = &[Ring]> {
        let (single, multi): (Option<&[Ring]>, &[Vec<Ring>]) = match self {
            Self::Polygon(rings) => (Some(rings.as_slice()), &[]),
            Self::MultiPolygon(polygons) => (None, polygons.as_slice()),
        };
        single.into_iter().chain(multi.iter().map(Vec::as_slice))
    }
}

/// A single administrative boundary polygon with its properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryFeature {
    /// Feature identifier, if the source provided one.
    pub id: Option<String>,
    /// Raw `GeoJSON` properties (names, parent station codes, ...).
    pub properties: serde_json::Map<String, serde_json::Value>,
    /// Polygon geometry. The outer ring is assumed closed; this is not
    /// validated.
    pub geometry: BoundaryGeometry,
}

impl BoundaryFeature {
    /// Returns a string property, if present.
    #[must_use]
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(serde_json::Value::as_str)
    }
}

/// The independent boundary layers a coordinate is resolved against.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BoundaryLayer {
    /// Police station jurisdiction.
    Station,
    /// Beat, the smallest patrol unit.
    Beat,
    /// Police district.
    District,
    /// Sub-division grouping several stations.
    SubDivision,
    /// Range grouping several districts.
    Range,
}

impl BoundaryLayer {
    /// Returns all layers in resolution order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Station,
            Self::Beat,
            Self::District,
            Self::SubDivision,
            Self::Range,
        ]
    }

    /// File name this layer is loaded from inside a boundaries directory.
    #[must_use]
    pub fn file_name(self) -> String {
        format!("{self}.geojson")
    }
}
