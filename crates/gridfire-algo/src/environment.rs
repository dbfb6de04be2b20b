//! Environmental Observation Index: raw soil, lightning, and vegetation
//! datasets into three independent, NaN-free point-sets.
//!
//! Each builder filters non-finite values and out-of-window scores before
//! anything reaches the spatial matcher; dropped counts are an expected
//! rate, reported in the [`IndexSummary`], not an error condition.

use gridfire_core::{
    BoundingRegion, EcosystemSite, EcosystemState, EcosystemType, EnvironmentalPoint, FactorKind,
    GeoPoint, LeafHabit, LightningGrid, SoilObservation, TimeTag,
};

/// Acceptance window for factor scores. Nominal scale is 0-10; the open
/// upper bound leaves headroom for denser-than-reference lightning cells.
const SCORE_WINDOW_MAX: f64 = 11.0;

/// Normalization reference for flash density: 0.05 flashes/km²/day maps to
/// a score of 10.
pub const FLASH_DENSITY_NORM: f64 = 0.05;

/// Number of monthly blend steps applied per vegetation site.
const VEGETATION_MONTHS: u8 = 11;

/// Kept/dropped counts from building one factor's point-set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexSummary {
    pub kept: usize,
    pub dropped: usize,
}

fn score_in_window(score: f64) -> bool {
    score.is_finite() && score >= 0.0 && score < SCORE_WINDOW_MAX
}

/// Build the soil-moisture point-set: `score = (1 - moisture) × 10`.
///
/// Fully saturated soil (moisture 1.0) scores 0; bone-dry soil scores 10.
pub fn soil_moisture_points(
    observations: &[SoilObservation],
    region: &BoundingRegion,
) -> (Vec<EnvironmentalPoint>, IndexSummary) {
    let mut points = Vec::with_capacity(observations.len());
    let mut summary = IndexSummary::default();

    for obs in observations {
        let score = (1.0 - obs.moisture_fraction) * 10.0;
        if !obs.coordinate.is_finite()
            || !obs.moisture_fraction.is_finite()
            || !score_in_window(score)
            || !region.contains(obs.coordinate)
        {
            summary.dropped += 1;
            continue;
        }
        points.push(EnvironmentalPoint {
            factor_kind: FactorKind::SoilMoisture,
            coordinate: obs.coordinate,
            risk_score: score,
            time_tag: obs.observed_at.map(TimeTag::Timestamp),
        });
        summary.kept += 1;
    }
    (points, summary)
}

/// Build the lightning point-set from the flash-density grid.
///
/// Every grid cell whose coordinate falls within the bounding region
/// (inclusive edges) contributes one point per calendar month on the grid's
/// axis, scored `density / 0.05 × 10`. In-region cells with non-finite or
/// out-of-window scores are dropped and counted.
pub fn lightning_points(
    grid: &LightningGrid,
    region: &BoundingRegion,
) -> (Vec<EnvironmentalPoint>, IndexSummary) {
    let mut points = Vec::new();
    let mut summary = IndexSummary::default();

    for &month in grid.months() {
        for (lat_idx, &lat) in grid.latitudes().iter().enumerate() {
            for (lon_idx, &lon) in grid.longitudes().iter().enumerate() {
                let coordinate = GeoPoint::new(lat, lon);
                if !coordinate.is_finite() || !region.contains(coordinate) {
                    continue;
                }
                let Some(density) = grid.density(month, lat_idx, lon_idx) else {
                    summary.dropped += 1;
                    continue;
                };
                let score = density / FLASH_DENSITY_NORM * 10.0;
                if !score_in_window(score) {
                    summary.dropped += 1;
                    continue;
                }
                points.push(EnvironmentalPoint {
                    factor_kind: FactorKind::Lightning,
                    coordinate,
                    risk_score: score,
                    time_tag: Some(TimeTag::Month(month as u8)),
                });
                summary.kept += 1;
            }
        }
    }
    (points, summary)
}

fn disturbance_score(state: EcosystemState) -> f64 {
    match state {
        EcosystemState::Managed => 0.0,
        EcosystemState::Unmanaged => 10.0,
        EcosystemState::Natural => 5.0,
    }
}

fn ecosystem_type_score(ecosystem_type: EcosystemType) -> f64 {
    match ecosystem_type {
        EcosystemType::Desert => 10.0,
        EcosystemType::Savanna => 9.0,
        EcosystemType::Grassland => 8.0,
        EcosystemType::Shrubland => 7.0,
        EcosystemType::Forest => 3.0,
        EcosystemType::Agriculture => 2.0,
        EcosystemType::Unknown => 0.0,
    }
}

/// Monthly flammability adjustment. Deciduous stands spike during the
/// September-November leaf drop; evergreen (and anything else) holds a
/// constant mid-scale adjustment.
fn leaf_habit_adjustment(leaf_habit: LeafHabit, month: u8) -> f64 {
    match leaf_habit {
        LeafHabit::Deciduous if (9..=11).contains(&month) => 5.0,
        LeafHabit::Deciduous => 3.0,
        LeafHabit::Evergreen => 5.0,
    }
}

/// One step of the running vegetation score: two parts carried state, one
/// part current month's adjustment.
fn blend_monthly(running: f64, adjustment: f64) -> f64 {
    (running * 2.0 + adjustment) / 3.0
}

/// Build the vegetation point-set.
///
/// Per site: seed `running = (disturbance + ecosystem_type) / 2`, then for
/// each month in increasing order apply [`blend_monthly`] and emit the
/// post-update value as one point tagged with that month. The recursion is
/// deterministic and order-dependent; the same site always reproduces the
/// same monthly sequence bit-for-bit.
pub fn vegetation_points(
    sites: &[EcosystemSite],
    region: &BoundingRegion,
) -> (Vec<EnvironmentalPoint>, IndexSummary) {
    let mut points = Vec::with_capacity(sites.len() * VEGETATION_MONTHS as usize);
    let mut summary = IndexSummary::default();

    for site in sites {
        if !site.coordinate.is_finite() || !region.contains(site.coordinate) {
            summary.dropped += 1;
            continue;
        }
        let base =
            (disturbance_score(site.state) + ecosystem_type_score(site.ecosystem_type)) / 2.0;
        let mut running = base;
        for month in 1..=VEGETATION_MONTHS {
            running = blend_monthly(running, leaf_habit_adjustment(site.leaf_habit, month));
            if !score_in_window(running) {
                summary.dropped += 1;
                continue;
            }
            points.push(EnvironmentalPoint {
                factor_kind: FactorKind::Vegetation,
                coordinate: site.coordinate,
                risk_score: running,
                time_tag: Some(TimeTag::Month(month)),
            });
            summary.kept += 1;
        }
    }
    (points, summary)
}
