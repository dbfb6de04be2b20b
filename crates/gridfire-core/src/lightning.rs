//! Monthly lightning flash-density climatology grid.
//!
//! The source product is a 3-D grid of mean flash density (flashes/km²/day)
//! indexed by (month, latitude, longitude). The month axis carries 1-indexed
//! calendar months while the storage array is 0-indexed; [`LightningGrid`]
//! owns that re-basing so callers only ever speak calendar months.

use crate::error::{RiskError, RiskResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightningGrid {
    /// Calendar months present on the grid, 1-indexed (January = 1).
    months: Vec<u32>,
    latitude: Vec<f64>,
    longitude: Vec<f64>,
    /// Month-major density array: `density[month_pos][lat_idx][lon_idx]`,
    /// where `month_pos` is the 0-indexed position on the `months` axis.
    flash_density: Vec<Vec<Vec<f64>>>,
}

impl LightningGrid {
    /// Build a grid, validating axis/array dimensions and month values.
    pub fn new(
        months: Vec<u32>,
        latitude: Vec<f64>,
        longitude: Vec<f64>,
        flash_density: Vec<Vec<Vec<f64>>>,
    ) -> RiskResult<Self> {
        if months.is_empty() || latitude.is_empty() || longitude.is_empty() {
            return Err(RiskError::Validation(
                "lightning grid axes must be non-empty".into(),
            ));
        }
        if let Some(bad) = months.iter().find(|m| **m < 1 || **m > 12) {
            return Err(RiskError::Validation(format!(
                "lightning grid month axis value {bad} outside 1-12"
            )));
        }
        if flash_density.len() != months.len() {
            return Err(RiskError::Validation(format!(
                "lightning grid has {} month slices but {} months on the axis",
                flash_density.len(),
                months.len()
            )));
        }
        for (pos, slice) in flash_density.iter().enumerate() {
            if slice.len() != latitude.len() {
                return Err(RiskError::Validation(format!(
                    "month slice {pos} has {} latitude rows, expected {}",
                    slice.len(),
                    latitude.len()
                )));
            }
            if let Some(row) = slice.iter().find(|row| row.len() != longitude.len()) {
                return Err(RiskError::Validation(format!(
                    "month slice {pos} has a row of {} longitudes, expected {}",
                    row.len(),
                    longitude.len()
                )));
            }
        }
        Ok(LightningGrid {
            months,
            latitude,
            longitude,
            flash_density,
        })
    }

    /// Calendar months on the grid, 1-indexed.
    pub fn months(&self) -> &[u32] {
        &self.months
    }

    pub fn latitudes(&self) -> &[f64] {
        &self.latitude
    }

    pub fn longitudes(&self) -> &[f64] {
        &self.longitude
    }

    /// Flash density for a 1-indexed calendar month at the given axis
    /// indices. `None` when the month is absent from the axis.
    pub fn density(&self, calendar_month: u32, lat_idx: usize, lon_idx: usize) -> Option<f64> {
        let month_pos = self.months.iter().position(|m| *m == calendar_month)?;
        self.flash_density
            .get(month_pos)
            .and_then(|slice| slice.get(lat_idx))
            .and_then(|row| row.get(lon_idx))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_month_grid() -> LightningGrid {
        LightningGrid::new(
            vec![1, 2],
            vec![36.5, 37.5],
            vec![-121.0],
            vec![
                vec![vec![0.01], vec![0.02]],
                vec![vec![0.03], vec![0.04]],
            ],
        )
        .unwrap()
    }

    #[test]
    fn calendar_month_rebased_to_storage_index() {
        let grid = two_month_grid();
        // calendar month 1 lives at storage position 0, month 2 at position 1
        assert_eq!(grid.density(1, 0, 0), Some(0.01));
        assert_eq!(grid.density(2, 1, 0), Some(0.04));
        assert_eq!(grid.density(3, 0, 0), None);
    }

    #[test]
    fn rejects_month_axis_outside_calendar() {
        let err = LightningGrid::new(
            vec![0],
            vec![36.5],
            vec![-121.0],
            vec![vec![vec![0.01]]],
        );
        assert!(matches!(err, Err(RiskError::Validation(_))));
    }

    #[test]
    fn rejects_mismatched_dimensions() {
        let err = LightningGrid::new(
            vec![1, 2],
            vec![36.5],
            vec![-121.0],
            vec![vec![vec![0.01]]],
        );
        assert!(matches!(err, Err(RiskError::Validation(_))));

        let err = LightningGrid::new(
            vec![1],
            vec![36.5],
            vec![-121.0, -120.0],
            vec![vec![vec![0.01]]],
        );
        assert!(matches!(err, Err(RiskError::Validation(_))));
    }
}
