//! Valid/missing cell counts per time step
//!
//! The propagation equations weight spatial means by the number of usable
//! (cloud-free) pixels in each scene. Those counts come from the primary
//! quantity's mask, not from the uncertainty fields themselves.

use crate::grid::{Grid, Mask};
use ndarray::{Array1, Axis};
use serde::{Deserialize, Serialize};

/// Per-time-step counts of missing and valid cells for a grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coverage {
    n_missing: Array1<usize>,
    n_valid: Array1<usize>,
}

impl Coverage {
    /// Count missing and valid cells for every time step of the grid
    ///
    /// All three mask representations are handled: no mask information means
    /// every cell is usable, a scene-wide missing flag counts every cell as
    /// missing, and a per-cell mask is summed per time step.
    pub fn from_grid(grid: &Grid) -> Self {
        let total = grid.cells_per_step();
        let n_missing: Array1<usize> = match grid.mask() {
            Mask::AllValid => Array1::zeros(grid.n_times()),
            Mask::AllMissing => Array1::from_elem(grid.n_times(), total),
            Mask::PerCell(mask) => mask
                .axis_iter(Axis(0))
                .map(|step| step.iter().filter(|&&missing| missing).count())
                .collect(),
        };
        let n_valid = n_missing.mapv(|n| total - n);
        Self { n_missing, n_valid }
    }

    pub fn n_missing(&self) -> &Array1<usize> {
        &self.n_missing
    }

    pub fn n_valid(&self) -> &Array1<usize> {
        &self.n_valid
    }

    /// Total number of cells at a time step
    pub fn n_total(&self, time_index: usize) -> usize {
        self.n_missing[time_index] + self.n_valid[time_index]
    }

    pub fn len(&self) -> usize {
        self.n_missing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_missing.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeseries::TimeAxis;
    use ndarray::Array3;
    use std::sync::Arc;

    fn grid_with_mask(mask: Mask) -> Grid {
        Grid::new(
            "ts",
            "K",
            Array3::zeros((3, 2, 2)),
            mask,
            Arc::new(TimeAxis::from_values(ndarray::array![0.0, 1.0, 2.0])),
        )
    }

    #[test]
    fn all_valid_counts_zero_missing() {
        let coverage = Coverage::from_grid(&grid_with_mask(Mask::AllValid));
        assert!(coverage.n_missing().iter().all(|&n| n == 0));
        assert!(coverage.n_valid().iter().all(|&n| n == 4));
    }

    #[test]
    fn all_missing_counts_every_cell() {
        let coverage = Coverage::from_grid(&grid_with_mask(Mask::AllMissing));
        assert!(coverage.n_missing().iter().all(|&n| n == 4));
        assert!(coverage.n_valid().iter().all(|&n| n == 0));
    }

    #[test]
    fn per_cell_mask_counted_per_step() {
        let mut mask = Array3::from_elem((3, 2, 2), false);
        mask[[0, 0, 0]] = true;
        mask[[2, 0, 1]] = true;
        mask[[2, 1, 1]] = true;

        let coverage = Coverage::from_grid(&grid_with_mask(Mask::PerCell(mask)));
        assert_eq!(coverage.n_missing().to_vec(), vec![1, 0, 2]);
        assert_eq!(coverage.n_valid().to_vec(), vec![3, 4, 2]);
        assert_eq!(coverage.n_total(0), 4);
    }
}
