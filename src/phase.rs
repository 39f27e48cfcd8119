//! Per-phase orchestration of the propagation equations
//!
//! Day and night retrievals are independent observations with independent
//! cloud masks, so each phase is propagated on its own: coverage counts from
//! the primary LST mask, one equation per uncertainty component, and a
//! quadrature sum over the four components for the total. Nothing is shared
//! between phases.

use crate::collection::GridCollection;
use crate::config::PropagationConfig;
use crate::coverage::Coverage;
use crate::errors::LstResult;
use crate::propagate::{
    arithmetic_mean, correlation_with_biome, random_with_sampling, sum_in_quadrature,
    weighted_sqrt_mean,
};
use crate::quantities;
use crate::timeseries::Timeseries;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Diurnal phase of the satellite overpass
#[derive(Copy, Clone, PartialOrd, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Phase {
    Day,
    Night,
}

impl Phase {
    pub const ALL: [Phase; 2] = [Phase::Day, Phase::Night];

    /// The suffix the loader appends to quantity names for this phase
    pub fn suffix(&self) -> &'static str {
        match self {
            Phase::Day => "day",
            Phase::Night => "night",
        }
    }

    /// Full quantity name for this phase, e.g. `ts_day`
    pub fn quantity(&self, base: &str) -> String {
        format!("{}_{}", base, self.suffix())
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// One named uncertainty contribution in the propagated output
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ComponentKind {
    LocallyCorrelatedAtmosphere,
    Systematic,
    LocallyCorrelatedSurface,
    Random,
    Sampling,
    Total,
}

impl ComponentKind {
    /// The four components combined in quadrature into the total
    pub const COMBINED: [ComponentKind; 4] = [
        ComponentKind::LocallyCorrelatedAtmosphere,
        ComponentKind::Systematic,
        ComponentKind::LocallyCorrelatedSurface,
        ComponentKind::Random,
    ];

    /// Output key, without the phase suffix
    pub fn key(&self) -> &'static str {
        match self {
            ComponentKind::LocallyCorrelatedAtmosphere => "lst_unc_loc_atm",
            ComponentKind::Systematic => "lst_unc_sys",
            ComponentKind::LocallyCorrelatedSurface => "lst_unc_loc_sfc",
            ComponentKind::Random => "lst_unc_ran",
            ComponentKind::Sampling => "lst_sampling",
            ComponentKind::Total => "lst_total_unc",
        }
    }

    /// Legend label used by the plotting scripts
    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::LocallyCorrelatedAtmosphere => "Locally Correlated (Atm)",
            ComponentKind::Systematic => "Systematic",
            ComponentKind::LocallyCorrelatedSurface => "Locally Correlated (Sfc)",
            ComponentKind::Random => "Random",
            ComponentKind::Sampling => "Sampling",
            ComponentKind::Total => "Total",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The propagated components for one phase
///
/// Read-only view handed to the plotting layer: the regional mean LST
/// series plus a mapping from component kind to its propagated time series.
/// Every series shares the phase's time axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseComponents {
    phase: Phase,
    lst_mean: Timeseries,
    components: HashMap<ComponentKind, Timeseries>,
}

impl PhaseComponents {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Regional mean LST the uncertainty band is drawn around
    pub fn lst_mean(&self) -> &Timeseries {
        &self.lst_mean
    }

    pub fn get(&self, kind: ComponentKind) -> Option<&Timeseries> {
        self.components.get(&kind)
    }

    /// The combined total uncertainty (always present)
    pub fn total(&self) -> &Timeseries {
        &self.components[&ComponentKind::Total]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentKind, &Timeseries)> {
        self.components.iter().map(|(kind, ts)| (*kind, ts))
    }
}

/// Propagate all uncertainty components for one source and phase
///
/// Looks up the phase-suffixed quantities for `source`, derives coverage
/// counts from the primary LST mask, runs one propagation equation per
/// component and combines the four components in quadrature:
///
/// - locally correlated (atm): weighted root-mean (eq 7)
/// - systematic: arithmetic mean (eq 1, no spatial propagation)
/// - locally correlated (sfc): biome stratification (E3UB method 2)
/// - random: combined with sampling uncertainty (eq 4)
///
/// Fails on the first precondition violation without producing any partial
/// output for the phase.
pub fn propagate_phase(
    collection: &GridCollection,
    source: &str,
    phase: Phase,
    config: &PropagationConfig,
) -> LstResult<PhaseComponents> {
    info!("Propagating {} uncertainties for {}", phase, source);

    let lst = collection.get(source, &phase.quantity(quantities::LST.name))?;
    let unc_loc_atm = collection.get(source, &phase.quantity(quantities::UNC_LOC_ATM.name))?;
    let unc_sys = collection.get(source, &phase.quantity(quantities::UNC_SYS.name))?;
    let unc_loc_sfc = collection.get(source, &phase.quantity(quantities::UNC_LOC_SFC.name))?;
    let unc_ran = collection.get(source, &phase.quantity(quantities::UNC_RAN.name))?;
    let land_cover = collection.get(source, &phase.quantity(quantities::LAND_COVER.name))?;

    let coverage = Coverage::from_grid(lst);
    if !coverage.is_empty() {
        debug!(
            "{} usable cells at first step: {} of {}",
            phase,
            coverage.n_valid()[0],
            coverage.n_total(0)
        );
    }

    let loc_atm = weighted_sqrt_mean(unc_loc_atm, &coverage)?;
    let sys = arithmetic_mean(unc_sys);
    let loc_sfc = correlation_with_biome(unc_loc_sfc, land_cover, config.block_size)?;
    let (ran, sampling) = random_with_sampling(unc_ran, lst, &coverage)?;

    let total = sum_in_quadrature(&[&loc_atm, &sys, &loc_sfc, &ran])?;
    let lst_mean = arithmetic_mean(lst);

    let mut components = HashMap::new();
    components.insert(ComponentKind::LocallyCorrelatedAtmosphere, loc_atm);
    components.insert(ComponentKind::Systematic, sys);
    components.insert(ComponentKind::LocallyCorrelatedSurface, loc_sfc);
    components.insert(ComponentKind::Random, ran);
    components.insert(ComponentKind::Sampling, sampling);
    components.insert(ComponentKind::Total, total);

    Ok(PhaseComponents {
        phase,
        lst_mean,
        components,
    })
}
