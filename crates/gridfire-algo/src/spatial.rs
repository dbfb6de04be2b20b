//! Spatial Matcher: batched nearest-neighbour search over environmental
//! point-sets.
//!
//! Points are embedded on the unit sphere and bulk-loaded into an
//! `rstar` R-tree. Chord distance is monotone in great-circle distance, so
//! the argmin found on chords is the true nearest observation; reported
//! distances are great-circle kilometres.
//!
//! Build once per point-set (O(n log n)), query once per feeder batch
//! (O(m log n)) — never rebuilt per feeder.

use gridfire_core::geo::chord_to_arc_km;
use gridfire_core::{EnvironmentalPoint, GeoPoint, RiskError, RiskResult};
use rstar::primitives::GeomWithData;
use rstar::RTree;

/// Nearest observation for one query: index into the point sequence the
/// matcher was built from, plus great-circle distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestMatch {
    pub index: usize,
    pub distance_km: f64,
}

/// R-tree entry: unit-sphere embedding tagged with the point's position in
/// the source sequence.
type IndexedPoint = GeomWithData<[f64; 3], usize>;

/// An R-tree over one factor's point-set.
#[derive(Debug)]
pub struct SpatialMatcher {
    tree: RTree<IndexedPoint>,
}

impl SpatialMatcher {
    /// Build the index. An empty point-set is a fatal configuration error:
    /// a matcher with nothing to match against cannot produce an argmin.
    pub fn build(points: &[EnvironmentalPoint]) -> RiskResult<Self> {
        Self::from_coordinates(points.iter().map(|p| p.coordinate))
    }

    /// Build from bare coordinates (the point-sets hand in pre-filtered,
    /// finite coordinates; a non-finite one here is a pipeline bug).
    pub fn from_coordinates(coords: impl IntoIterator<Item = GeoPoint>) -> RiskResult<Self> {
        let mut entries = Vec::new();
        for (index, coord) in coords.into_iter().enumerate() {
            if !coord.is_finite() {
                return Err(RiskError::Validation(format!(
                    "non-finite coordinate at index {index} reached the spatial matcher"
                )));
            }
            entries.push(IndexedPoint::new(coord.to_unit_vector(), index));
        }
        if entries.is_empty() {
            return Err(RiskError::EmptyIndex(
                "cannot build a spatial matcher over an empty point-set".into(),
            ));
        }
        Ok(SpatialMatcher {
            tree: RTree::bulk_load(entries),
        })
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Nearest indexed point to one query coordinate.
    pub fn nearest(&self, query: GeoPoint) -> NearestMatch {
        let q = query.to_unit_vector();
        // the tree is never empty: build rejects empty point-sets
        let found = self
            .tree
            .nearest_neighbor(&q)
            .expect("spatial matcher holds at least one point");
        NearestMatch {
            index: found.data,
            distance_km: chord_to_arc_km(chord_sq(found.geom(), &q).sqrt()),
        }
    }

    /// Batched query: one nearest match per query coordinate.
    pub fn query_batch(&self, queries: &[GeoPoint]) -> Vec<NearestMatch> {
        queries.iter().map(|q| self.nearest(*q)).collect()
    }
}

fn chord_sq(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}

/// Per-feeder nearest observations, one per factor kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchedTriplet {
    pub soil: NearestMatch,
    pub lightning: NearestMatch,
    pub vegetation: NearestMatch,
}

/// Build one matcher per factor kind and answer the whole feeder batch.
///
/// Any empty point-set aborts with [`RiskError::EmptyIndex`].
pub fn match_environment(
    feeder_coords: &[GeoPoint],
    soil: &[EnvironmentalPoint],
    lightning: &[EnvironmentalPoint],
    vegetation: &[EnvironmentalPoint],
) -> RiskResult<Vec<MatchedTriplet>> {
    let soil_matcher = build_named(soil, "soil moisture")?;
    let lightning_matcher = build_named(lightning, "lightning")?;
    let vegetation_matcher = build_named(vegetation, "vegetation")?;

    let soil_matches = soil_matcher.query_batch(feeder_coords);
    let lightning_matches = lightning_matcher.query_batch(feeder_coords);
    let vegetation_matches = vegetation_matcher.query_batch(feeder_coords);

    Ok(soil_matches
        .into_iter()
        .zip(lightning_matches)
        .zip(vegetation_matches)
        .map(|((soil, lightning), vegetation)| MatchedTriplet {
            soil,
            lightning,
            vegetation,
        })
        .collect())
}

fn build_named(points: &[EnvironmentalPoint], name: &str) -> RiskResult<SpatialMatcher> {
    match SpatialMatcher::build(points) {
        Err(RiskError::EmptyIndex(_)) => Err(RiskError::EmptyIndex(format!(
            "{name} point-set has no entries"
        ))),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridfire_core::{haversine_km, FactorKind};

    fn point(lat: f64, lon: f64) -> EnvironmentalPoint {
        EnvironmentalPoint {
            factor_kind: FactorKind::SoilMoisture,
            coordinate: GeoPoint::new(lat, lon),
            risk_score: 1.0,
            time_tag: None,
        }
    }

    #[test]
    fn empty_point_set_is_fatal() {
        let err = SpatialMatcher::build(&[]).unwrap_err();
        assert!(matches!(err, RiskError::EmptyIndex(_)));
    }

    #[test]
    fn non_finite_coordinate_is_a_validation_error() {
        let err =
            SpatialMatcher::from_coordinates([GeoPoint::new(f64::NAN, -121.0)]).unwrap_err();
        assert!(matches!(err, RiskError::Validation(_)));
    }

    #[test]
    fn coincident_point_matches_exactly_at_distance_zero() {
        let points = vec![point(36.5, -121.5), point(37.0, -121.0), point(38.0, -119.0)];
        let matcher = SpatialMatcher::build(&points).unwrap();
        let result = matcher.nearest(GeoPoint::new(37.0, -121.0));
        assert_eq!(result.index, 1);
        assert_eq!(result.distance_km, 0.0);
    }

    #[test]
    fn matches_brute_force_argmin() {
        // deterministic scatter over the region
        let mut points = Vec::new();
        for i in 0..40 {
            let lat = 36.0 + (i as f64 * 0.37) % 3.0;
            let lon = -122.0 + (i as f64 * 0.73) % 4.0;
            points.push(point(lat, lon));
        }
        let matcher = SpatialMatcher::build(&points).unwrap();
        assert_eq!(matcher.len(), 40);
        let queries = [
            GeoPoint::new(36.2, -121.7),
            GeoPoint::new(37.9, -118.4),
            GeoPoint::new(38.6, -120.1),
        ];
        for q in queries {
            let found = matcher.nearest(q);
            let brute = points
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| {
                    haversine_km(q, a.coordinate)
                        .partial_cmp(&haversine_km(q, b.coordinate))
                        .unwrap()
                })
                .map(|(i, _)| i)
                .unwrap();
            assert_eq!(found.index, brute);
            let expected = haversine_km(q, points[brute].coordinate);
            assert!((found.distance_km - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn batch_query_preserves_order() {
        let points = vec![point(36.5, -121.5), point(38.5, -118.5)];
        let matcher = SpatialMatcher::build(&points).unwrap();
        let queries = [GeoPoint::new(38.4, -118.6), GeoPoint::new(36.6, -121.4)];
        let matches = matcher.query_batch(&queries);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].index, 1);
        assert_eq!(matches[1].index, 0);
    }

    #[test]
    fn match_environment_supports_different_lengths() {
        let soil = vec![point(37.0, -121.0)];
        let lightning = vec![point(36.5, -121.5), point(37.5, -120.5)];
        let vegetation = vec![point(36.2, -121.8), point(37.2, -120.2), point(38.2, -119.2)];
        let feeders = [GeoPoint::new(37.1, -120.4)];
        let triplets = match_environment(&feeders, &soil, &lightning, &vegetation).unwrap();
        assert_eq!(triplets.len(), 1);
        assert_eq!(triplets[0].soil.index, 0);
        assert_eq!(triplets[0].lightning.index, 1);
        assert_eq!(triplets[0].vegetation.index, 1);
    }

    #[test]
    fn match_environment_names_the_empty_set() {
        let some = vec![point(37.0, -121.0)];
        let err = match_environment(&[GeoPoint::new(37.0, -121.0)], &some, &[], &some).unwrap_err();
        match err {
            RiskError::EmptyIndex(msg) => assert!(msg.contains("lightning")),
            other => panic!("expected EmptyIndex, got {other}"),
        }
    }
}
