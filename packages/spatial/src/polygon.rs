//! Ray-casting point-in-polygon tests over `[lng, lat]` ring data.
//!
//! Only the outer ring of each polygon is tested. Holes are not
//! subtracted, so a point inside a hole still counts as contained.

use beat_roster_geography_models::{BoundaryFeature, Coordinate, Ring};

/// Even-odd ray-casting test against a single closed ring.
///
/// Rings with fewer than three positions contain nothing. Points lying
/// exactly on an edge or vertex may land on either side.
#[must_use]
pub fn point_in_ring(point: Coordinate, ring: &[[f64; 2]]) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let [x, y] = point.to_lng_lat();
    let mut inside = false;
    let mut j = ring.len() - 1;

    for i in 0..ring.len() {
        let [xi, yi] = ring[i];
        let [xj, yj] = ring[j];

        // `yi != yj` whenever the first clause holds, so the division is safe.
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Tests a polygon given as a list of rings. Only `rings[0]` is used.
#[must_use]
pub fn point_in_polygon(point: Coordinate, rings: &[Ring]) -> bool {
    rings
        .first()
        .is_some_and(|outer| point_in_ring(point, outer))
}

/// Returns the first feature, in collection order, whose geometry contains
/// the point.
///
/// When boundaries overlap or share edges the earlier feature wins.
#[must_use]
pub fn find_containing_feature(
    point: Coordinate,
    features: &[BoundaryFeature],
) -> Option<&BoundaryFeature> {
    features.iter().find(|feature| {
        feature
            .geometry
            .polygons()
            .any(|rings| point_in_polygon(point, rings))
    })
}

#[cfg(test)]
mod tests {
    use beat_roster_geography_models::BoundaryGeometry;

    use super::*;

    fn square(min: f64, max: f64) -> Ring {
        vec![[min, min], [min, max], [max, max], [max, min], [min, min]]
    }

    fn feature(id: &str, geometry: BoundaryGeometry) -> BoundaryFeature {
        BoundaryFeature {
            id: Some(id.to_string()),
            properties: serde_json::Map::new(),
            geometry,
        }
    }

    #[test]
    fn point_inside_and_outside_square() {
        let ring = square(0.0, 10.0);
        assert!(point_in_ring(Coordinate::from_lng_lat([5.0, 5.0]), &ring));
        assert!(!point_in_ring(Coordinate::from_lng_lat([20.0, 20.0]), &ring));
    }

    #[test]
    fn concave_ring() {
        // U shape open to the north.
        let ring = vec![
            [0.0, 0.0],
            [0.0, 10.0],
            [3.0, 10.0],
            [3.0, 3.0],
            [7.0, 3.0],
            [7.0, 10.0],
            [10.0, 10.0],
            [10.0, 0.0],
            [0.0, 0.0],
        ];
        assert!(point_in_ring(Coordinate::from_lng_lat([1.5, 8.0]), &ring));
        assert!(point_in_ring(Coordinate::from_lng_lat([5.0, 1.5]), &ring));
        assert!(!point_in_ring(Coordinate::from_lng_lat([5.0, 8.0]), &ring));
    }

    #[test]
    fn axes_are_not_swapped() {
        // Tall thin strip: lng 0..1, lat 0..10.
        let ring = vec![[0.0, 0.0], [0.0, 10.0], [1.0, 10.0], [1.0, 0.0], [0.0, 0.0]];
        assert!(point_in_ring(Coordinate::new(5.0, 0.5), &ring));
        assert!(!point_in_ring(Coordinate::new(0.5, 5.0), &ring));
    }

    #[test]
    fn far_outside_bounding_box() {
        let ring = square(0.0, 10.0);
        for lng_lat in [[-50.0, 5.0], [5.0, 80.0], [170.0, -80.0], [-0.1, -0.1]] {
            assert!(
                !point_in_ring(Coordinate::from_lng_lat(lng_lat), &ring),
                "{lng_lat:?} reported inside"
            );
        }
    }

    #[test]
    fn degenerate_rings_contain_nothing() {
        let p = Coordinate::from_lng_lat([0.5, 0.5]);
        assert!(!point_in_ring(p, &[]));
        assert!(!point_in_ring(p, &[[0.0, 0.0], [1.0, 1.0]]));
        assert!(!point_in_polygon(p, &[]));
        assert!(!point_in_polygon(p, &[Vec::new()]));
    }

    #[test]
    fn holes_are_not_subtracted() {
        let rings = vec![square(0.0, 10.0), square(4.0, 6.0)];
        assert!(point_in_polygon(Coordinate::from_lng_lat([5.0, 5.0]), &rings));
    }

    #[test]
    fn first_containing_feature_wins() {
        let features = vec![
            feature("far", BoundaryGeometry::Polygon(vec![square(50.0, 60.0)])),
            feature("big", BoundaryGeometry::Polygon(vec![square(0.0, 10.0)])),
            feature("small", BoundaryGeometry::Polygon(vec![square(4.0, 6.0)])),
        ];
        let found = find_containing_feature(Coordinate::from_lng_lat([5.0, 5.0]), &features);
        assert_eq!(found.and_then(|f| f.id.as_deref()), Some("big"));
    }

    #[test]
    fn multipolygon_tests_every_part() {
        let features = vec![feature(
            "split",
            BoundaryGeometry::MultiPolygon(vec![
                vec![square(0.0, 1.0)],
                vec![square(20.0, 21.0)],
            ]),
        )];
        let found = find_containing_feature(Coordinate::from_lng_lat([20.5, 20.5]), &features);
        assert!(found.is_some());
        assert!(find_containing_feature(Coordinate::from_lng_lat([10.0, 10.0]), &features).is_none());
    }

    #[test]
    fn empty_collection_finds_nothing() {
        assert!(find_containing_feature(Coordinate::new(0.0, 0.0), &[]).is_none());
    }
}
