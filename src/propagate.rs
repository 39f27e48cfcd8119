//! The uncertainty propagation equations
//!
//! Implements the closed-form reductions from the CCI LST uncertainty
//! characterisation (ATBD/E3UB numbering kept in the function docs):
//!
//! - [`arithmetic_mean`] (eq 1): spatial mean per time step
//! - [`weighted_sqrt_mean`] (eq 7): spatial mean weighted by
//!   $1/\sqrt{n_{valid}}$
//! - [`correlation_with_biome`] (E3UB eq 5.34, "method 2"): block-and-biome
//!   stratified mean
//! - [`random_with_sampling`] (eq 4): random uncertainty combined with the
//!   cloud-gap sampling term
//! - [`sum_in_quadrature`] (eq 9): $\sqrt{\sum_i x_i^2}$ over aligned series
//!
//! Every equation is a pure function from grids already limited to one
//! diurnal phase to a new [`Timeseries`]. Missing cells are ignored by all
//! means; a time step with no valid data anywhere yields NaN, which is
//! surfaced to the caller rather than silently filled.

use crate::coverage::Coverage;
use crate::errors::{LstError, LstResult};
use crate::grid::Grid;
use crate::timeseries::{FloatValue, Timeseries};
use ndarray::Array1;
use std::collections::BTreeMap;

/// Spatial mean at one time step, ignoring missing cells
///
/// Returns the mean and the number of cells it was taken over. A fully
/// masked step yields `(NaN, 0)`.
fn masked_mean(grid: &Grid, time_index: usize) -> (FloatValue, usize) {
    let step = grid.step(time_index);
    let mut sum = 0.0;
    let mut count = 0usize;
    for ((i, j), &value) in step.indexed_iter() {
        if !grid.is_missing(time_index, i, j) {
            sum += value;
            count += 1;
        }
    }
    if count == 0 {
        (FloatValue::NAN, 0)
    } else {
        (sum / count as FloatValue, count)
    }
}

/// Spatial sample variance (ddof = 1) at one time step, ignoring missing cells
///
/// NaN when fewer than two valid cells remain.
fn masked_variance(grid: &Grid, time_index: usize) -> FloatValue {
    let (mean, count) = masked_mean(grid, time_index);
    if count < 2 {
        return FloatValue::NAN;
    }
    let step = grid.step(time_index);
    let mut sum_sq = 0.0;
    for ((i, j), &value) in step.indexed_iter() {
        if !grid.is_missing(time_index, i, j) {
            sum_sq += (value - mean) * (value - mean);
        }
    }
    sum_sq / (count - 1) as FloatValue
}

/// Arithmetic mean across latitude and longitude, per time step
///
/// ATBD eq 1. Used for the primary LST field itself and for the systematic
/// uncertainty, which has no spatial propagation.
pub fn arithmetic_mean(grid: &Grid) -> Timeseries {
    let values: Array1<FloatValue> = (0..grid.n_times())
        .map(|t| masked_mean(grid, t).0)
        .collect();
    Timeseries::new(values, grid.time_axis().clone(), grid.units())
}

/// Spatial mean divided by the square root of the usable cell count
///
/// ATBD eq 7. `coverage` carries the usable-pixel counts, normally derived
/// from the primary quantity's cloud mask rather than from `grid` itself.
///
/// A time step with no usable cells fails with
/// [`LstError::InvalidCoverage`] before any output is produced.
pub fn weighted_sqrt_mean(grid: &Grid, coverage: &Coverage) -> LstResult<Timeseries> {
    assert_eq!(
        coverage.len(),
        grid.n_times(),
        "Coverage length must match the grid time dimension"
    );

    let mut values = Array1::zeros(grid.n_times());
    for t in 0..grid.n_times() {
        let n_valid = coverage.n_valid()[t];
        if n_valid == 0 {
            return Err(LstError::InvalidCoverage { time_index: t });
        }
        values[t] = masked_mean(grid, t).0 / (n_valid as FloatValue).sqrt();
    }
    Ok(Timeseries::new(values, grid.time_axis().clone(), grid.units()))
}

/// Biome-stratified propagation of locally correlated uncertainty
///
/// E3UB eq 5.34 ("method 2", the one used by CCI). Each time step is split
/// into `block_size`-by-`block_size` spatial blocks; within a block,
/// uncertainty cells are grouped by the co-located land cover code rounded
/// to the nearest integer, and three levels of unweighted means follow:
/// per biome group, across biome groups (block value), across blocks
/// (time-step value).
///
/// Blocks at the grid edge may be smaller than the nominal size and reduce
/// over the cells they actually contain. Cells where either the uncertainty
/// or the land cover value is missing are ignored; blocks with no usable
/// cells do not contribute to the time-step mean.
///
/// # Panics
///
/// Panics if `block_size` is zero or the biome grid is not co-registered
/// cell-for-cell with the uncertainty grid.
pub fn correlation_with_biome(
    grid: &Grid,
    biome: &Grid,
    block_size: usize,
) -> LstResult<Timeseries> {
    assert!(block_size > 0, "Block size must be non-zero");
    assert_eq!(
        grid.values().shape(),
        biome.values().shape(),
        "Biome grid must be co-registered with the uncertainty grid"
    );
    if !grid.same_time_axis(biome) {
        return Err(LstError::MisalignedTimeAxis);
    }

    let (n_lat, n_lon) = (grid.n_lat(), grid.n_lon());
    let mut values = Array1::zeros(grid.n_times());

    for t in 0..grid.n_times() {
        let unc_step = grid.step(t);
        let biome_step = biome.step(t);

        let mut block_sum = 0.0;
        let mut block_count = 0usize;

        for lat_start in (0..n_lat).step_by(block_size) {
            let lat_end = (lat_start + block_size).min(n_lat);
            for lon_start in (0..n_lon).step_by(block_size) {
                let lon_end = (lon_start + block_size).min(n_lon);

                // (sum, count) of uncertainty cells per rounded biome code
                let mut groups: BTreeMap<i64, (FloatValue, usize)> = BTreeMap::new();
                for i in lat_start..lat_end {
                    for j in lon_start..lon_end {
                        if grid.is_missing(t, i, j) || biome.is_missing(t, i, j) {
                            continue;
                        }
                        let code = biome_step[[i, j]].round() as i64;
                        let entry = groups.entry(code).or_insert((0.0, 0));
                        entry.0 += unc_step[[i, j]];
                        entry.1 += 1;
                    }
                }
                if groups.is_empty() {
                    continue;
                }

                let group_mean_sum: FloatValue = groups
                    .values()
                    .map(|&(sum, count)| sum / count as FloatValue)
                    .sum();
                block_sum += group_mean_sum / groups.len() as FloatValue;
                block_count += 1;
            }
        }

        values[t] = if block_count == 0 {
            FloatValue::NAN
        } else {
            block_sum / block_count as FloatValue
        };
    }

    Ok(Timeseries::new(values, grid.time_axis().clone(), grid.units()))
}

/// Random uncertainty propagated together with the sampling uncertainty
///
/// ATBD eq 4, two parts per time step:
///
/// 1. sampling uncertainty
///    $u_s = \frac{n_{missing}}{n_{total} - 1} \, \mathrm{var}(LST)$
///    with the spatial sample variance of the primary quantity;
/// 2. combined random uncertainty
///    $\sqrt{\overline{u_{ran}}^2 + u_s}$ where $\overline{u_{ran}}$ is the
///    weighted root-mean (eq 7) of the random uncertainty grid.
///
/// Returns `(combined, sampling)`. With no missing cells the sampling term
/// is exactly zero and the combined series equals the weighted root-mean.
///
/// Fails with [`LstError::DivideByZero`] when a time step has a single cell
/// in total, and with [`LstError::InvalidCoverage`] when it has no usable
/// cells.
pub fn random_with_sampling(
    unc_ran: &Grid,
    primary: &Grid,
    coverage: &Coverage,
) -> LstResult<(Timeseries, Timeseries)> {
    if !unc_ran.same_time_axis(primary) {
        return Err(LstError::MisalignedTimeAxis);
    }
    assert_eq!(
        coverage.len(),
        primary.n_times(),
        "Coverage length must match the grid time dimension"
    );

    let mut sampling = Array1::zeros(primary.n_times());
    for t in 0..primary.n_times() {
        let n_total = coverage.n_total(t);
        if n_total <= 1 {
            return Err(LstError::DivideByZero { time_index: t });
        }
        let n_missing = coverage.n_missing()[t];
        sampling[t] = if n_missing == 0 {
            // no cloud gaps, no sampling error
            0.0
        } else {
            let factor = n_missing as FloatValue / (n_total - 1) as FloatValue;
            factor * masked_variance(primary, t)
        };
    }

    let ran_mean = weighted_sqrt_mean(unc_ran, coverage)?;
    let combined: Array1<FloatValue> = ran_mean
        .values()
        .iter()
        .zip(sampling.iter())
        .map(|(&mean, &samp)| (mean * mean + samp).sqrt())
        .collect();

    let sampling_units = format!("{}^2", primary.units());
    Ok((
        Timeseries::new(combined, unc_ran.time_axis().clone(), unc_ran.units()),
        Timeseries::new(sampling, primary.time_axis().clone(), &sampling_units),
    ))
}

/// Sum in quadrature of aligned time series
///
/// ATBD eq 9: $\sqrt{\sum_i x_i^2}$ elementwise. All inputs must share an
/// identical time axis; a mismatch fails with
/// [`LstError::MisalignedTimeAxis`] and produces no partial result.
///
/// # Panics
///
/// Panics if `series` is empty.
pub fn sum_in_quadrature(series: &[&Timeseries]) -> LstResult<Timeseries> {
    assert!(!series.is_empty(), "Quadrature sum needs at least one input");

    let first = series[0];
    for other in &series[1..] {
        if !first.same_time_axis(other) {
            return Err(LstError::MisalignedTimeAxis);
        }
    }

    let mut sum_sq = Array1::<FloatValue>::zeros(first.len());
    for ts in series {
        sum_sq += &ts.values().mapv(|v| v * v);
    }
    let values = sum_sq.mapv(FloatValue::sqrt);
    Ok(Timeseries::new(
        values,
        first.time_axis().clone(),
        first.units(),
    ))
}
