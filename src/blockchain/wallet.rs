//! Donor signing key.
//!
//! The key comes from `SUPPORT_BOX_PRIVATE_KEY` and is never logged.
//! Nonces are assigned by [`TxBuilder`](crate::blockchain::TxBuilder).

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

pub const PRIVATE_KEY_ENV_VAR: &str = "SUPPORT_BOX_PRIVATE_KEY";

/// Donor signer bound to one chain.
#[derive(Debug, Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
    chain_id: u64,
}

impl Wallet {
    /// Parse a hex key, `0x` prefix optional.
    pub fn from_hex(key: &str, chain_id: u64) -> BlockchainResult<Self> {
        let key = key.trim();
        let signer: PrivateKeySigner = key
            .strip_prefix("0x")
            .unwrap_or(key)
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;

        tracing::info!(donor = %signer.address(), chain_id = chain_id, "Donor wallet loaded");
        Ok(Self { signer, chain_id })
    }

    pub fn from_env(chain_id: u64) -> BlockchainResult<Self> {
        match std::env::var(PRIVATE_KEY_ENV_VAR) {
            Ok(key) => Self::from_hex(&key, chain_id),
            Err(_) => Err(BlockchainError::Wallet(format!("{PRIVATE_KEY_ENV_VAR} is not set"))),
        }
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Signer handed to the provider that broadcasts donations.
    pub fn ethereum_wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}
