//! Read-only styling tables for the plotting scripts
//!
//! The renderer lives outside this crate; it consumes these tables together
//! with the per-phase component mapping. Initialised once, never mutated.

/// Colour scheme for component lines
///
/// blue, cyan, green, yellow, red, purple, grey
pub const COLOUR_LIST: [&str; 7] = [
    "#4477aa", "#66ccee", "#228833", "#ccbb44", "#ee6677", "#aa3377", "#bbbbbb",
];

/// Line and font sizing shared across all plots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotParams {
    pub linewidth: u32,
    pub ticksize: u32,
    pub labelsize: u32,
    pub legendsize: u32,
}

pub const PLOT_PARAMS: PlotParams = PlotParams {
    linewidth: 4,
    ticksize: 24,
    labelsize: 28,
    legendsize: 20,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colours_are_hex_codes() {
        for colour in COLOUR_LIST {
            assert!(colour.starts_with('#'));
            assert_eq!(colour.len(), 7);
        }
    }
}
