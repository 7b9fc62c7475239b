//! Normalizes raw `GeoJSON` feature collections into [`BoundaryFeature`]s.
//!
//! Boundary exports from different GIS tools disagree on where they put
//! the feature id and occasionally carry non-polygon or broken geometry,
//! so each feature is inspected as a plain [`serde_json::Value`] rather
//! than deserialized strictly. A broken ring becomes an empty ring, which
//! contains nothing, instead of failing the whole layer.

use beat_roster_geography_models::{BoundaryFeature, BoundaryGeometry, LngLat, Ring};
use serde::Deserialize;

use crate::SpatialError;

#[derive(Deserialize)]
struct RawFeatureCollection {
    #[serde(default)]
    features: Vec<serde_json::Value>,
}

/// Parses a `GeoJSON` `FeatureCollection` string into boundary features.
///
/// # Errors
///
/// Returns an error if the input is not a JSON object with a `features`
/// array.
pub fn parse_feature_collection(json: &str) -> Result<Vec<BoundaryFeature>, SpatialError> {
    let raw: RawFeatureCollection = serde_json::from_str(json)?;
    Ok(normalize_features(&raw.features))
}

/// Normalizes a list of raw `GeoJSON` features, preserving their order.
///
/// Skips features with missing, null or non-polygonal geometry.
#[must_use]
pub fn normalize_features(features: &[serde_json::Value]) -> Vec<BoundaryFeature> {
    features
        .iter()
        .enumerate()
        .filter_map(|(index, feature)| {
            let normalized = normalize_feature(feature);
            if normalized.is_none() {
                log::warn!("Skipping boundary feature #{index}: no polygon geometry");
            }
            normalized
        })
        .collect()
}

/// Normalizes a single `GeoJSON` feature.
fn normalize_feature(feature: &serde_json::Value) -> Option<BoundaryFeature> {
    let geometry = parse_geometry(feature.get("geometry")?)?;

    let properties = feature
        .get("properties")
        .and_then(serde_json::Value::as_object)
        .cloned()
        .unwrap_or_default();

    let id = feature
        .get("id")
        .and_then(id_string)
        .or_else(|| properties.get("id").and_then(id_string));

    Some(BoundaryFeature {
        id,
        properties,
        geometry,
    })
}

/// Feature ids may be strings or numbers.
fn id_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_geometry(geometry: &serde_json::Value) -> Option<BoundaryGeometry> {
    let coordinates = geometry.get("coordinates")?.as_array()?;

    match geometry.get("type")?.as_str()? {
        "Polygon" => Some(BoundaryGeometry::Polygon(parse_polygon(coordinates))),
        "MultiPolygon" => Some(BoundaryGeometry::MultiPolygon(
            coordinates
                .iter()
                .map(|polygon| polygon.as_array().map(|p| parse_polygon(p)).unwrap_or_default())
                .collect(),
        )),
        _ => None,
    }
}

fn parse_polygon(rings: &[serde_json::Value]) -> Vec<Ring> {
    rings.iter().map(parse_ring).collect()
}

/// Any malformed position invalidates the whole ring.
fn parse_ring(ring: &serde_json::Value) -> Ring {
    ring.as_array()
        .and_then(|positions| positions.iter().map(parse_position).collect())
        .unwrap_or_default()
}

fn parse_position(position: &serde_json::Value) -> Option<LngLat> {
    let position = position.as_array()?;
    let lng = position.first()?.as_f64()?;
    let lat = position.get(1)?.as_f64()?;
    Some([lng, lat])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_polygon_and_multipolygon() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "id": "beat-1",
                    "properties": { "name": "Beat 1" },
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0, 0], [0, 10], [10, 10], [10, 0], [0, 0]]]
                    }
                },
                {
                    "type": "Feature",
                    "id": 7,
                    "properties": {},
                    "geometry": {
                        "type": "MultiPolygon",
                        "coordinates": [
                            [[[20, 20], [20, 21], [21, 21], [20, 20]]],
                            [[[30, 30], [30, 31], [31, 31], [30, 30]]]
                        ]
                    }
                }
            ]
        }"#;

        let features = parse_feature_collection(json).unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].id.as_deref(), Some("beat-1"));
        assert_eq!(features[0].property_str("name"), Some("Beat 1"));
        assert_eq!(features[1].id.as_deref(), Some("7"));
        assert_eq!(features[1].geometry.polygons().count(), 2);
    }

    #[test]
    fn skips_non_polygon_and_null_geometry() {
        let features = normalize_features(&[
            serde_json::json!({ "properties": {}, "geometry": null }),
            serde_json::json!({
                "properties": {},
                "geometry": { "type": "Point", "coordinates": [1, 2] }
            }),
            serde_json::json!({ "properties": {} }),
        ]);
        assert!(features.is_empty());
    }

    #[test]
    fn falls_back_to_property_id() {
        let features = normalize_features(&[serde_json::json!({
            "properties": { "id": "PS-3" },
            "geometry": { "type": "Polygon", "coordinates": [] }
        })]);
        assert_eq!(features[0].id.as_deref(), Some("PS-3"));
    }

    #[test]
    fn malformed_ring_becomes_empty() {
        let features = normalize_features(&[serde_json::json!({
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0, 0], ["x", 1], [1, 1], [0, 0]]]
            }
        })]);
        assert_eq!(
            features[0].geometry,
            BoundaryGeometry::Polygon(vec![Vec::new()])
        );
    }

    #[test]
    fn drops_altitude_from_positions() {
        let features = normalize_features(&[serde_json::json!({
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0, 0, 5], [0, 1, 5], [1, 1, 5], [0, 0, 5]]]
            }
        })]);
        assert_eq!(
            features[0].geometry,
            BoundaryGeometry::Polygon(vec![vec![[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.0, 0.0]]])
        );
    }

    #[test]
    fn rejects_non_collection() {
        assert!(parse_feature_collection(r#""features""#).is_err());
    }
}
