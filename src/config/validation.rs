//! Configuration validation.
//!
//! Serde handles syntax; this checks value ranges, addresses and URLs.
//! Every error is collected, not just the first.

use std::collections::HashSet;

use alloy::primitives::Address;
use thiserror::Error;

use crate::config::schema::SupportConfig;
use crate::donation::quote::MAX_USD_DECIMALS;

/// A single semantic configuration problem.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("invalid RPC URL '{0}'")]
    RpcUrl(String),

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("network {chain_id} has invalid contract address '{address}'")]
    ContractAddress { chain_id: u64, address: String },

    #[error("chain {0} is listed more than once in [[networks]]")]
    DuplicateChain(u64),

    #[error("display_decimals ({display}) exceeds usd_decimals ({usd})")]
    DisplayDecimals { display: u32, usd: u32 },

    #[error("usd_decimals ({0}) exceeds {max}", max = MAX_USD_DECIMALS)]
    UsdDecimals(u32),

    #[error("poll_base_ms ({base}) exceeds poll_max_ms ({max})")]
    PollBounds { base: u64, max: u64 },

    #[error("gas_price_multiplier must be at least 1.0, got {0}")]
    GasMultiplier(f64),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &SupportConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.server.bind_address.clone()));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "server.request_timeout_secs" });
    }

    let chain = &config.blockchain;
    for url in std::iter::once(&chain.rpc_url).chain(chain.failover_urls.iter()) {
        if url.parse::<url::Url>().is_err() {
            errors.push(ValidationError::RpcUrl(url.clone()));
        }
    }
    if chain.rpc_timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "blockchain.rpc_timeout_secs" });
    }
    if chain.gas_price_multiplier < 1.0 || chain.gas_price_multiplier.is_nan() {
        errors.push(ValidationError::GasMultiplier(chain.gas_price_multiplier));
    }

    let mut seen = HashSet::new();
    for network in &config.networks {
        if network.contract_address.parse::<Address>().is_err() {
            errors.push(ValidationError::ContractAddress {
                chain_id: network.chain_id,
                address: network.contract_address.clone(),
            });
        }
        if !seen.insert(network.chain_id) {
            errors.push(ValidationError::DuplicateChain(network.chain_id));
        }
    }

    let donation = &config.donation;
    if donation.confirmation_timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "donation.confirmation_timeout_secs" });
    }
    if donation.poll_base_ms == 0 {
        errors.push(ValidationError::Zero { field: "donation.poll_base_ms" });
    }
    if donation.poll_base_ms > donation.poll_max_ms {
        errors.push(ValidationError::PollBounds {
            base: donation.poll_base_ms,
            max: donation.poll_max_ms,
        });
    }
    if donation.usd_decimals > MAX_USD_DECIMALS {
        errors.push(ValidationError::UsdDecimals(donation.usd_decimals));
    }
    if donation.display_decimals > donation.usd_decimals {
        errors.push(ValidationError::DisplayDecimals {
            display: donation.display_decimals,
            usd: donation.usd_decimals,
        });
    }

    let obs = &config.observability;
    if obs.metrics_enabled && obs.metrics_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(ValidationError::MetricsAddress(obs.metrics_address.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
