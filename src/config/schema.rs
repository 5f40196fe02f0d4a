//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::donation::networks::default_networks;
use crate::profile::Profile;

/// Root configuration for the support box service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SupportConfig {
    /// HTTP server settings.
    pub server: ServerConfig,

    /// Blockchain RPC settings.
    pub blockchain: BlockchainConfig,

    /// Chain ID to donation contract table.
    pub networks: Vec<NetworkConfig>,

    /// Donation flow settings.
    pub donation: DonationConfig,

    /// Profile served alongside the widget.
    pub profile: Profile,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            blockchain: BlockchainConfig::default(),
            networks: default_networks(),
            donation: DonationConfig::default(),
            profile: Profile::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// One entry of the chain ID to contract address table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// EIP-155 chain ID.
    pub chain_id: u64,

    /// Human readable network name.
    pub name: String,

    /// Donation contract address on this chain.
    pub contract_address: String,
}

/// Donation flow configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DonationConfig {
    /// Maximum time to wait for a donation receipt, in seconds.
    pub confirmation_timeout_secs: u64,

    /// First receipt poll delay in milliseconds.
    pub poll_base_ms: u64,

    /// Upper bound on the receipt poll delay in milliseconds.
    pub poll_max_ms: u64,

    /// Decimals of the raw USD value returned by the contract.
    pub usd_decimals: u32,

    /// Decimals shown in the USD display string.
    pub display_decimals: u32,

    /// Symbol shown when the RPC does not report one.
    pub native_symbol: String,

    /// Image shown when a donation mints an NFT.
    pub reward_image_url: String,

    /// Width of the reward image in pixels.
    pub reward_image_width: u32,
}

impl Default for DonationConfig {
    fn default() -> Self {
        Self {
            confirmation_timeout_secs: 180,
            poll_base_ms: 1000,
            poll_max_ms: 8000,
            usd_decimals: 8,
            display_decimals: 4,
            native_symbol: "ETHER".to_string(),
            reward_image_url:
                "https://ipfs.io/ipfs/QmPCo5NSM6f9aexc6FAzNLR1M41cJcdR8ZRm8H45jCavnr".to_string(),
            reward_image_width: 200,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Blockchain integration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlockchainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs.
    pub failover_urls: Vec<String>,

    /// Chain ID the RPC is expected to serve (11155111 for Sepolia).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Number of block confirmations required before a receipt counts.
    pub confirmation_blocks: u32,

    /// Gas price multiplier (1.0 = estimated, 1.2 = 20% buffer).
    pub gas_price_multiplier: f64,

    /// Maximum gas price in gwei (protection against spikes).
    pub max_gas_price_gwei: u64,
}

impl Default for BlockchainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            failover_urls: Vec::new(),
            chain_id: 11_155_111,
            rpc_timeout_secs: 10,
            confirmation_blocks: 1,
            gas_price_multiplier: 1.2,
            max_gas_price_gwei: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: SupportConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:8080");
        assert_eq!(config.networks.len(), 2);
        assert_eq!(config.donation.usd_decimals, 8);
        assert_eq!(config.blockchain.confirmation_blocks, 1);
    }

    #[test]
    fn test_networks_replace_defaults() {
        let raw = r#"
            [blockchain]
            rpc_url = "http://127.0.0.1:8545"
            chain_id = 31337

            [[networks]]
            chain_id = 31337
            name = "anvil"
            contract_address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
        "#;
        let config: SupportConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.networks.len(), 1);
        assert_eq!(config.networks[0].name, "anvil");
        assert_eq!(config.blockchain.chain_id, 31337);
        assert_eq!(config.blockchain.rpc_timeout_secs, 10);
    }
}
