//! Resolves a coordinate to its containing jurisdiction polygons.

use std::collections::BTreeMap;
use std::path::Path;

use beat_roster_geography_models::{BoundaryFeature, BoundaryLayer, Coordinate};
use serde::Serialize;

use crate::SpatialError;
use crate::geojson::parse_feature_collection;
use crate::polygon::find_containing_feature;

/// Boundary layers held for jurisdiction lookups.
///
/// Each layer is resolved on its own. A beat found in the beat layer is not
/// checked against the station found in the station layer, so a point near
/// a border can resolve to a beat whose parent station differs from the
/// resolved station.
#[derive(Debug, Clone, Default)]
pub struct JurisdictionIndex {
    layers: BTreeMap<BoundaryLayer, Vec<BoundaryFeature>>,
}

/// Features containing a point, one slot per layer. `None` means the point
/// lies outside every feature of that layer (or the layer is empty).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JurisdictionMatch<'a> {
    /// Containing police station polygon.
    pub station: Option<&'a BoundaryFeature>,
    /// Containing beat polygon.
    pub beat: Option<&'a BoundaryFeature>,
    /// Containing district polygon.
    pub district: Option<&'a BoundaryFeature>,
    /// Containing sub-division polygon.
    pub sub_division: Option<&'a BoundaryFeature>,
    /// Containing range polygon.
    pub range: Option<&'a BoundaryFeature>,
}

impl JurisdictionMatch<'_> {
    /// Whether no layer contained the point.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.station.is_none()
            && self.beat.is_none()
            && self.district.is_none()
            && self.sub_division.is_none()
            && self.range.is_none()
    }
}

impl JurisdictionIndex {
    /// Creates an index with no layers loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the features of one layer, keeping their order.
    #[must_use]
    pub fn with_layer(mut self, layer: BoundaryLayer, features: Vec<BoundaryFeature>) -> Self {
        self.layers.insert(layer, features);
        self
    }

    /// Loads every layer that has a `<layer>.geojson` file in `dir`.
    ///
    /// Layers without a file stay empty and resolve to `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if a layer file exists but cannot be read or is not
    /// a JSON feature collection.
    pub fn load_dir(dir: &Path) -> Result<Self, SpatialError> {
        let mut index = Self::new();

        for layer in BoundaryLayer::all() {
            let path = dir.join(layer.file_name());
            if !path.is_file() {
                log::info!("No {layer} boundaries at {}", path.display());
                continue;
            }

            let features = parse_feature_collection(&std::fs::read_to_string(&path)?)?;
            log::info!("Loaded {} {layer} boundaries", features.len());
            index.layers.insert(*layer, features);
        }

        Ok(index)
    }

    /// Features of one layer in load order.
    #[must_use]
    pub fn features(&self, layer: BoundaryLayer) -> &[BoundaryFeature] {
        self.layers
            .get(&layer)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Resolves a single layer. First containing feature wins.
    #[must_use]
    pub fn resolve_layer(&self, layer: BoundaryLayer, point: Coordinate) -> Option<&BoundaryFeature> {
        find_containing_feature(point, self.features(layer))
    }

    /// Resolves every layer independently.
    #[must_use]
    pub fn resolve(&self, point: Coordinate) -> JurisdictionMatch<'_> {
        let result = JurisdictionMatch {
            station: self.resolve_layer(BoundaryLayer::Station, point),
            beat: self.resolve_layer(BoundaryLayer::Beat, point),
            district: self.resolve_layer(BoundaryLayer::District, point),
            sub_division: self.resolve_layer(BoundaryLayer::SubDivision, point),
            range: self.resolve_layer(BoundaryLayer::Range, point),
        };

        if result.is_empty() {
            log::debug!("({}, {}) is outside every boundary layer", point.lat, point.lng);
        }

        result
    }
}
