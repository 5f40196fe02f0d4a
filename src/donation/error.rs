//! Donation flow errors.

use alloy::primitives::U256;
use thiserror::Error;

use crate::blockchain::BlockchainError;

/// Errors surfaced to the donor.
#[derive(Debug, Error)]
pub enum DonationError {
    /// No contract is deployed on the connected chain; submission is disabled.
    #[error("Donations are not available on chain {0}")]
    UnsupportedNetwork(u64),

    /// The amount field was left blank.
    #[error("Please enter the amount you want to support.")]
    EmptyAmount,

    /// The amount is not a non-negative decimal number of native tokens.
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    /// The amount exceeds the donor's balance.
    #[error("Insufficient balance: {amount} wei requested, {balance} wei available")]
    InsufficientBalance { amount: U256, balance: U256 },

    /// No donation with this transaction hash was submitted here.
    #[error("Unknown donation {0}")]
    UnknownDonation(String),

    /// RPC, signing, or on-chain failure.
    #[error(transparent)]
    Blockchain(#[from] BlockchainError),
}

/// Result type for donation operations.
pub type DonationResult<T> = Result<T, DonationError>;
