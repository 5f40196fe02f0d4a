//! Chain ID to donation contract table.

use alloy::primitives::Address;
use serde::Serialize;

use crate::config::NetworkConfig;

/// Built-in deployments, used when the config has no `[[networks]]`.
pub fn default_networks() -> Vec<NetworkConfig> {
    vec![
        NetworkConfig {
            chain_id: 80001,
            name: "Polygon Mumbai".to_string(),
            contract_address: "0x99eb4FA25e0a3a4Eb8E7b53370D74ca76AF4b575".to_string(),
        },
        NetworkConfig {
            chain_id: 11_155_111,
            name: "Sepolia".to_string(),
            contract_address: "0x203A36744dD130f1De981EC72c2144862aECE6AA".to_string(),
        },
    ]
}

/// A resolved table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Network {
    pub chain_id: u64,
    pub name: String,
    pub contract_address: Address,
}

/// Static lookup of the donation contract per chain.
#[derive(Debug, Clone, Default)]
pub struct NetworkRegistry {
    networks: Vec<Network>,
}

impl NetworkRegistry {
    /// Build the registry from config entries.
    ///
    /// Entries with an unparsable address are skipped, so their chain resolves
    /// to nothing and donations stay disabled there.
    pub fn from_config(entries: &[NetworkConfig]) -> Self {
        let mut networks = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry.contract_address.parse::<Address>() {
                Ok(contract_address) => networks.push(Network {
                    chain_id: entry.chain_id,
                    name: entry.name.clone(),
                    contract_address,
                }),
                Err(e) => tracing::warn!(
                    chain_id = entry.chain_id,
                    address = %entry.contract_address,
                    error = %e,
                    "Skipping network with invalid contract address"
                ),
            }
        }
        Self { networks }
    }

    /// Contract address for a chain, if one is deployed there.
    pub fn resolve(&self, chain_id: u64) -> Option<Address> {
        self.networks
            .iter()
            .find(|n| n.chain_id == chain_id)
            .map(|n| n.contract_address)
    }

    /// All known networks.
    pub fn networks(&self) -> &[Network] {
        &self.networks
    }
}
