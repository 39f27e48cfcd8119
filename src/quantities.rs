//! Standard quantity definitions for the ESA CCI LST product
//!
//! These are the short names the preprocessor writes for each source, one
//! per diurnal phase (`ts_day`, `ts_night`, ...). Using the constants rather
//! than string literals keeps component wiring and loader expectations in
//! sync.
//!
//! # Available Quantities
//!
//! - [`LST`] - land surface temperature, the primary observed quantity
//! - [`UNC_LOC_ATM`] - locally correlated uncertainty, atmospheric scales
//! - [`UNC_SYS`] - systematic uncertainty
//! - [`UNC_LOC_SFC`] - locally correlated uncertainty, surface scales
//! - [`UNC_RAN`] - random uncertainty
//! - [`LAND_COVER`] - integer-coded land cover classification

/// Definition of a named quantity expected from the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityDef {
    /// Short name, without the phase suffix
    pub name: &'static str,
    /// Units the loader is expected to deliver
    pub unit: &'static str,
    pub description: &'static str,
}

pub const LST: QuantityDef = QuantityDef {
    name: "ts",
    unit: "K",
    description: "Land surface temperature",
};

pub const UNC_LOC_ATM: QuantityDef = QuantityDef {
    name: "lst_unc_loc_atm",
    unit: "K",
    description: "Locally correlated LST uncertainty on atmospheric length scales",
};

pub const UNC_SYS: QuantityDef = QuantityDef {
    name: "lst_unc_sys",
    unit: "K",
    description: "Systematic LST uncertainty",
};

pub const UNC_LOC_SFC: QuantityDef = QuantityDef {
    name: "lst_unc_loc_sfc",
    unit: "K",
    description: "Locally correlated LST uncertainty on surface length scales",
};

pub const UNC_RAN: QuantityDef = QuantityDef {
    name: "lst_unc_ran",
    unit: "K",
    description: "Random LST uncertainty",
};

pub const LAND_COVER: QuantityDef = QuantityDef {
    name: "lcc",
    unit: "1",
    description: "Integer-coded land cover classification, co-registered with the LST grid",
};

/// Quantities a source must provide for one phase of propagation
pub const REQUIRED_QUANTITIES: [QuantityDef; 6] =
    [LST, UNC_LOC_ATM, UNC_SYS, UNC_LOC_SFC, UNC_RAN, LAND_COVER];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_quantities_are_distinct() {
        for (i, a) in REQUIRED_QUANTITIES.iter().enumerate() {
            for b in &REQUIRED_QUANTITIES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn temperature_quantities_are_kelvin() {
        for def in [LST, UNC_LOC_ATM, UNC_SYS, UNC_LOC_SFC, UNC_RAN] {
            assert_eq!(def.unit, "K");
        }
    }
}
