//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (private key) + [blockchain] config (RPC URLs)
//!     → wallet.rs (key loading, signing wallet)
//!     → client.rs (RPC connection with timeouts and failover)
//!     → contract.rs (donation contract ABI)
//!     → transaction.rs (build, sign, broadcast, wait for receipt)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod contract;
pub mod transaction;
pub mod types;
pub mod wallet;

#[cfg(test)]
pub(crate) mod testing;

pub use client::BlockchainClient;
pub use transaction::{PollSchedule, TxBuilder};
pub use types::{BlockchainConfig, BlockchainError, BlockchainResult, ChainId};
pub use wallet::Wallet;
