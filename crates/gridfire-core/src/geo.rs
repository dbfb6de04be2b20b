//! Geographic primitives: WGS84 points, great-circle distances, and the
//! unit-sphere embedding used by the spatial matcher.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic point in WGS84 decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Sentinel assigned to feeders absent from the coordinate lookup:
    /// a fixed mid-Pacific point far outside any deployment's bounding
    /// region, so unresolved feeders are visibly matched to distant
    /// observations instead of failing the run.
    pub const UNRESOLVED: GeoPoint = GeoPoint {
        lat: 0.0,
        lon: -140.0,
    };

    pub const fn new(lat: f64, lon: f64) -> Self {
        GeoPoint { lat, lon }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Embed onto the unit sphere. Euclidean (chord) distance between two
    /// embedded points is monotone in their great-circle distance, so
    /// nearest-neighbour argmins computed on chords are exact.
    pub fn to_unit_vector(&self) -> [f64; 3] {
        let lat = deg2rad(self.lat);
        let lon = deg2rad(self.lon);
        [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
    }
}

/// Convert degrees to radians.
fn deg2rad(d: f64) -> f64 {
    d * PI / 180.0
}

/// Compute haversine distance between two points in kilometres.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let dlat = deg2rad(b.lat - a.lat);
    let dlon = deg2rad(b.lon - a.lon);
    let lat1 = deg2rad(a.lat);
    let lat2 = deg2rad(b.lat);

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Convert a unit-sphere chord length to the corresponding great-circle
/// distance in kilometres.
pub fn chord_to_arc_km(chord: f64) -> f64 {
    let half = (chord / 2.0).clamp(-1.0, 1.0);
    2.0 * EARTH_RADIUS_KM * half.asin()
}
