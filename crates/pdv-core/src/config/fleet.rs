//! Fleet addressing configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Fleet;

/// Where the fleet lives on the network
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    /// First three octets of every host address, e.g. `172.23.153`
    pub network_prefix: String,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            network_prefix: "172.23.153".to_string(),
        }
    }
}

impl FleetConfig {
    /// Parse the prefix into a [`Fleet`]
    pub fn fleet(&self) -> Result<Fleet, ConfigError> {
        let octets: Vec<&str> = self.network_prefix.trim().split('.').collect();
        if octets.len() != 3 {
            return Err(ConfigError::Invalid(format!(
                "network_prefix must have three octets, got {:?}",
                self.network_prefix
            )));
        }

        let mut prefix = [0u8; 3];
        for (slot, octet) in prefix.iter_mut().zip(octets) {
            *slot = octet.parse().map_err(|_| {
                ConfigError::Invalid(format!(
                    "network_prefix has an invalid octet {:?}",
                    octet
                ))
            })?;
        }

        Ok(Fleet::new(prefix))
    }
}
