//! Lookup of loaded grids by source and quantity
//!
//! The loader produces one grid per dataset and short name (e.g.
//! `("ESACCI-LST", "ts_day")`). A flat map keyed on the pair avoids the
//! nested per-source dictionaries of the reference implementation.

use crate::errors::{LstError, LstResult};
use crate::grid::Grid;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A collection of loaded grids, keyed by (source, quantity)
///
/// Grids are immutable once added; the propagation equations read from the
/// collection and produce new time series.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridCollection {
    grids: HashMap<(String, String), Grid>,
}

impl GridCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a grid for a (source, quantity) pair
    ///
    /// Panics if the pair is already present in the collection
    pub fn add_grid(&mut self, source: &str, quantity: &str, grid: Grid) {
        info!("Loading quantity {} for source {}", quantity, source);
        let key = (source.to_string(), quantity.to_string());
        assert!(
            !self.grids.contains_key(&key),
            "grid {}/{} already exists",
            source,
            quantity
        );
        self.grids.insert(key, grid);
    }

    /// Look up a grid, failing with `MissingQuantity` if it was not loaded
    pub fn get(&self, source: &str, quantity: &str) -> LstResult<&Grid> {
        self.grids
            .get(&(source.to_string(), quantity.to_string()))
            .ok_or_else(|| LstError::MissingQuantity {
                source: source.to_string(),
                quantity: quantity.to_string(),
            })
    }

    pub fn contains(&self, source: &str, quantity: &str) -> bool {
        self.grids
            .contains_key(&(source.to_string(), quantity.to_string()))
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(String, String), &Grid)> {
        self.grids.iter()
    }
}
