//! Uncertainty propagation for ESA CCI LST grids
//!
//! This crate propagates per-pixel land surface temperature (LST) uncertainty
//! fields from the ESA CCI LST satellite product into regional time series,
//! one uncertainty component at a time, and combines the components in
//! quadrature into a total uncertainty for each diurnal phase (day/night).
//!
//! # Module Organisation
//!
//! - `grid`: gridded (time, lat, lon) data with a tri-state validity mask
//! - `collection`: lookup of loaded grids by (source, quantity)
//! - `coverage`: per-time-step valid/missing cell counts
//! - `propagate`: the propagation equations (arithmetic mean, weighted
//!   root-mean, biome-stratified correlation, random-with-sampling,
//!   quadrature sum)
//! - `phase`: per-phase orchestration producing the component mapping
//!   consumed by plotting code
//!
//! Loading NetCDF files and rendering plots are handled by external tooling;
//! this crate only deals with in-memory arrays.

pub mod collection;
pub mod config;
pub mod coverage;
pub mod grid;
pub mod phase;
pub mod plot_style;
pub mod propagate;
pub mod quantities;
pub mod timeseries;

pub mod errors;
