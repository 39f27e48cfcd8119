//! Time series with an explicit, shared time axis
//!
//! A [`Timeseries`] is the output shape of every propagation equation:
//! one value per time step, tagged with physical units. The time axis is
//! reference counted so that the many series produced for a phase can share
//! a single axis and be compared cheaply for alignment.

use crate::errors::{LstError, LstResult};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub type FloatValue = f64;
pub type Time = f64;

/// A strictly increasing set of time points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAxis {
    values: Array1<Time>,
}

impl TimeAxis {
    /// Create a time axis from its point values
    ///
    /// # Panics
    ///
    /// Panics if the values are not strictly monotonically increasing
    pub fn from_values(values: Array1<Time>) -> Self {
        let monotonic = values.windows(2).into_iter().all(|w| w[0] < w[1]);
        assert!(monotonic, "Time axis must be strictly increasing");
        Self { values }
    }

    pub fn values(&self) -> &Array1<Time> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn at(&self, index: usize) -> Option<Time> {
        self.values.get(index).copied()
    }
}

/// A units-tagged series of values over a [`TimeAxis`]
///
/// Propagated uncertainty components are immutable once created; combining
/// components always produces a new series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeseries {
    values: Array1<FloatValue>,
    time_axis: Arc<TimeAxis>,
    units: String,
}

impl Timeseries {
    /// Create a new timeseries
    ///
    /// # Panics
    ///
    /// Panics if the number of values does not match the time axis length
    pub fn new(values: Array1<FloatValue>, time_axis: Arc<TimeAxis>, units: &str) -> Self {
        assert_eq!(
            values.len(),
            time_axis.len(),
            "Values length must match time axis length"
        );
        Self {
            values,
            time_axis,
            units: units.to_string(),
        }
    }

    /// Convenience constructor taking raw time points
    pub fn from_values(values: Array1<FloatValue>, time: Array1<Time>, units: &str) -> Self {
        Self::new(values, Arc::new(TimeAxis::from_values(time)), units)
    }

    pub fn values(&self) -> &Array1<FloatValue> {
        &self.values
    }

    pub fn time_axis(&self) -> &Arc<TimeAxis> {
        &self.time_axis
    }

    pub fn units(&self) -> &str {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replace the time axis with another of the same length
    ///
    /// Used to reconcile sources whose calendars differ (e.g. a 360-day model
    /// calendar relabelled onto the observation axis) before combination.
    pub fn with_time_axis(&self, time_axis: Arc<TimeAxis>) -> LstResult<Self> {
        if time_axis.len() != self.values.len() {
            return Err(LstError::MisalignedTimeAxis);
        }
        Ok(Self {
            values: self.values.clone(),
            time_axis,
            units: self.units.clone(),
        })
    }

    /// Test whether another series shares this series' time axis exactly
    pub fn same_time_axis(&self, other: &Timeseries) -> bool {
        self.time_axis.as_ref() == other.time_axis.as_ref()
    }
}
