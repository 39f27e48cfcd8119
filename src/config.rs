//! Propagation configuration
//!
//! The only tunable is the block edge length used by the biome-stratified
//! correlation: the ratio between the product resolution (0.05 degrees for
//! CCI LST v3) and the coarser reference resolution the correlation is
//! assessed on. It is a configuration value because other products carry a
//! different ratio.

use crate::errors::LstResult;
use serde::{Deserialize, Serialize};

/// Parameters controlling the propagation equations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropagationConfig {
    /// Edge length, in cells, of the blocks used for biome stratification
    pub block_size: usize,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self { block_size: 5 }
    }
}

impl PropagationConfig {
    /// Parse a configuration from TOML
    pub fn from_toml(content: &str) -> LstResult<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_cci_resolution_ratio() {
        assert_eq!(PropagationConfig::default().block_size, 5);
    }

    #[test]
    fn from_toml() {
        let config = PropagationConfig::from_toml("block_size = 10").unwrap();
        assert_eq!(config.block_size, 10);
    }

    #[test]
    fn from_toml_defaults_missing_fields() {
        let config = PropagationConfig::from_toml("").unwrap();
        assert_eq!(config, PropagationConfig::default());
    }

    #[test]
    fn from_toml_rejects_garbage() {
        assert!(PropagationConfig::from_toml("block_size = \"five\"").is_err());
    }

    #[test]
    fn roundtrips_through_serde() {
        let config = PropagationConfig { block_size: 25 };
        let json = serde_json::to_string(&config).unwrap();
        let back: PropagationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
