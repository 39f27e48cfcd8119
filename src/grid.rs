//! Gridded (time, latitude, longitude) data with a validity mask
//!
//! The loader hands this crate one [`Grid`] per (source, quantity) pair.
//! Units are trusted to be pre-normalised (LST fields already in Kelvin);
//! no unit conversion happens here.
//!
//! The mask is an explicit tri-state rather than an array-or-scalar union:
//! satellite products deliver a per-cell cloud mask for most scenes, but a
//! scene can also be entirely clear or entirely cloudy, in which case the
//! file carries a single boolean instead of a mask array.

use crate::errors::{LstError, LstResult};
use crate::timeseries::{FloatValue, TimeAxis};
use ndarray::{Array3, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Per-cell validity information for a [`Grid`]
///
/// `true` in a per-cell mask marks a missing cell, matching the masked-array
/// convention of the source files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Mask {
    /// No cell is missing
    AllValid,
    /// Every cell is missing
    AllMissing,
    /// Per-cell mask over (time, lat, lon); `true` = missing
    PerCell(Array3<bool>),
}

/// A named, units-tagged array over (time, latitude, longitude)
///
/// Immutable once constructed; the only permitted relabelling is
/// [`Grid::with_time_axis`], which substitutes the time coordinate without
/// touching the data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    name: String,
    units: String,
    values: Array3<FloatValue>,
    mask: Mask,
    time_axis: Arc<TimeAxis>,
}

impl Grid {
    /// Create a new grid
    ///
    /// # Panics
    ///
    /// Panics if the time axis length does not match the leading dimension of
    /// `values`, or if a per-cell mask has a different shape to `values`.
    pub fn new(
        name: &str,
        units: &str,
        values: Array3<FloatValue>,
        mask: Mask,
        time_axis: Arc<TimeAxis>,
    ) -> Self {
        assert_eq!(
            values.len_of(Axis(0)),
            time_axis.len(),
            "Time axis length must match the leading dimension of the data"
        );
        if let Mask::PerCell(mask_values) = &mask {
            assert_eq!(
                mask_values.shape(),
                values.shape(),
                "Per-cell mask must have the same shape as the data"
            );
        }
        Self {
            name: name.to_string(),
            units: units.to_string(),
            values,
            mask,
            time_axis,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units(&self) -> &str {
        &self.units
    }

    pub fn values(&self) -> &Array3<FloatValue> {
        &self.values
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    pub fn time_axis(&self) -> &Arc<TimeAxis> {
        &self.time_axis
    }

    pub fn n_times(&self) -> usize {
        self.values.len_of(Axis(0))
    }

    pub fn n_lat(&self) -> usize {
        self.values.len_of(Axis(1))
    }

    pub fn n_lon(&self) -> usize {
        self.values.len_of(Axis(2))
    }

    /// Number of spatial cells in one time step
    pub fn cells_per_step(&self) -> usize {
        self.n_lat() * self.n_lon()
    }

    /// The spatial field at one time step
    pub fn step(&self, time_index: usize) -> ArrayView2<'_, FloatValue> {
        self.values.index_axis(Axis(0), time_index)
    }

    /// Whether the cell at (time, lat, lon) is missing
    pub fn is_missing(&self, time_index: usize, lat_index: usize, lon_index: usize) -> bool {
        match &self.mask {
            Mask::AllValid => false,
            Mask::AllMissing => true,
            Mask::PerCell(mask) => mask[[time_index, lat_index, lon_index]],
        }
    }

    /// Whether two grids are co-registered cell-for-cell on the same axis
    pub fn same_time_axis(&self, other: &Grid) -> bool {
        self.time_axis.as_ref() == other.time_axis.as_ref()
    }

    /// Replace the time axis with another of the same length
    pub fn with_time_axis(&self, time_axis: Arc<TimeAxis>) -> LstResult<Self> {
        if time_axis.len() != self.n_times() {
            return Err(LstError::MisalignedTimeAxis);
        }
        Ok(Self {
            name: self.name.clone(),
            units: self.units.clone(),
            values: self.values.clone(),
            mask: self.mask.clone(),
            time_axis,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array3};

    fn axis(n: usize) -> Arc<TimeAxis> {
        Arc::new(TimeAxis::from_values(
            ndarray::Array::range(0.0, n as f64, 1.0),
        ))
    }

    #[test]
    fn grid_shape_accessors() {
        let values = Array3::zeros((2, 3, 4));
        let grid = Grid::new("ts", "K", values, Mask::AllValid, axis(2));
        assert_eq!(grid.n_times(), 2);
        assert_eq!(grid.n_lat(), 3);
        assert_eq!(grid.n_lon(), 4);
        assert_eq!(grid.cells_per_step(), 12);
    }

    #[test]
    #[should_panic(expected = "Time axis length")]
    fn grid_time_axis_mismatch() {
        Grid::new("ts", "K", Array3::zeros((2, 2, 2)), Mask::AllValid, axis(3));
    }

    #[test]
    #[should_panic(expected = "same shape")]
    fn grid_mask_shape_mismatch() {
        Grid::new(
            "ts",
            "K",
            Array3::zeros((2, 2, 2)),
            Mask::PerCell(Array3::from_elem((2, 2, 3), false)),
            axis(2),
        );
    }

    #[test]
    fn tri_state_mask() {
        let values = Array3::zeros((1, 2, 2));

        let all_valid = Grid::new("ts", "K", values.clone(), Mask::AllValid, axis(1));
        assert!(!all_valid.is_missing(0, 0, 0));

        let all_missing = Grid::new("ts", "K", values.clone(), Mask::AllMissing, axis(1));
        assert!(all_missing.is_missing(0, 1, 1));

        let mut mask = Array3::from_elem((1, 2, 2), false);
        mask[[0, 0, 1]] = true;
        let per_cell = Grid::new("ts", "K", values, Mask::PerCell(mask), axis(1));
        assert!(per_cell.is_missing(0, 0, 1));
        assert!(!per_cell.is_missing(0, 1, 1));
    }

    #[test]
    fn step_view() {
        let values =
            Array3::from_shape_vec((2, 2, 2), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0])
                .unwrap();
        let grid = Grid::new("ts", "K", values, Mask::AllValid, axis(2));
        assert_eq!(grid.step(1), array![[5.0, 6.0], [7.0, 8.0]]);
    }
}
