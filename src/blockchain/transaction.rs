//! Transaction building, broadcasting, and receipt monitoring.
//!
//! # Responsibilities
//! - Build donation transactions with a gas price ceiling and gas estimate
//! - Broadcast through the signing provider
//! - Poll for the receipt with backoff until it is deep enough

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, timeout};

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::blockchain::wallet::Wallet;
use crate::resilience::backoff::calculate_backoff;

/// Headroom added on top of the node's gas estimate, in percent.
const GAS_LIMIT_BUFFER_PERCENT: u64 = 20;

/// Receipt polling schedule.
#[derive(Debug, Clone, Copy)]
pub struct PollSchedule {
    /// Delay before the first retry in milliseconds.
    pub base_ms: u64,
    /// Maximum delay between polls in milliseconds.
    pub max_ms: u64,
    /// Total time budget.
    pub timeout: Duration,
}

/// Nonce for the next transaction.
///
/// The node's pending count can lag behind a transaction this process just
/// broadcast, so the local counter never moves backwards.
pub fn next_nonce(pending: u64, last_sent: Option<u64>) -> u64 {
    match last_sent {
        Some(last) => pending.max(last.saturating_add(1)),
        None => pending,
    }
}

/// Transaction builder for donation transfers.
#[derive(Debug, Clone)]
pub struct TxBuilder {
    client: BlockchainClient,
    wallet: Wallet,
    /// Nonce of the last transaction the node accepted from us.
    last_nonce: Arc<Mutex<Option<u64>>>,
}

impl TxBuilder {
    pub fn new(client: BlockchainClient, wallet: Wallet) -> Self {
        Self {
            client,
            wallet,
            last_nonce: Arc::new(Mutex::new(None)),
        }
    }

    /// Build a transaction request with gas estimation.
    ///
    /// # Arguments
    /// * `to` - Destination address
    /// * `value` - Amount of native token to send
    /// * `data` - Call data
    /// * `nonce` - Nonce to sign with
    pub async fn build(
        &self,
        to: Address,
        value: U256,
        data: Bytes,
        nonce: u64,
    ) -> BlockchainResult<TransactionRequest> {
        let gas_price = self.client.get_gas_price().await?;
        let gas_price_gwei = gas_price / 1_000_000_000;

        let config = self.client.config();
        if gas_price_gwei > config.max_gas_price_gwei as u128 {
            return Err(BlockchainError::GasPriceTooHigh {
                current_gwei: gas_price_gwei as u64,
                max_gwei: config.max_gas_price_gwei,
            });
        }

        let adjusted_gas_price = (gas_price as f64 * config.gas_price_multiplier) as u128;

        let estimate_request = TransactionRequest::default()
            .with_from(self.wallet.address())
            .with_to(to)
            .with_value(value)
            .with_input(data.clone());
        let estimated = self.client.estimate_gas(estimate_request).await?;
        let gas_limit = estimated.saturating_add(estimated * GAS_LIMIT_BUFFER_PERCENT / 100);

        let tx = TransactionRequest::default()
            .with_from(self.wallet.address())
            .with_to(to)
            .with_value(value)
            .with_input(data)
            .with_nonce(nonce)
            .with_gas_price(adjusted_gas_price)
            .with_chain_id(self.wallet.chain_id())
            .with_gas_limit(gas_limit);

        tracing::debug!(
            to = %to,
            value = %value,
            nonce = nonce,
            gas_limit = gas_limit,
            gas_price = adjusted_gas_price,
            "Built transaction"
        );

        Ok(tx)
    }

    /// Build, sign and broadcast a transaction.
    ///
    /// Submissions are serialized: the nonce lock is held until the node has
    /// accepted the transaction. A failed broadcast does not consume a nonce.
    pub async fn submit(&self, to: Address, value: U256, data: Bytes) -> BlockchainResult<TxHash> {
        let mut last_nonce = self.last_nonce.lock().await;
        let pending = self.client.get_pending_nonce(self.wallet.address()).await?;
        let nonce = next_nonce(pending, *last_nonce);

        let tx = self.build(to, value, data, nonce).await?;
        let tx_hash = self.client.send_transaction(tx).await?;
        *last_nonce = Some(nonce);
        tracing::info!(tx_hash = %tx_hash, to = %to, value = %value, nonce = nonce, "Transaction broadcast");
        Ok(tx_hash)
    }

    /// Wait until a transaction's receipt is available and confirmed.
    ///
    /// Reverted transactions return [`BlockchainError::Reverted`].
    pub async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        schedule: PollSchedule,
    ) -> BlockchainResult<TransactionReceipt> {
        let required_confirmations = self.client.confirmation_blocks() as u64;

        let result = timeout(schedule.timeout, async {
            let mut attempt = 0u32;

            loop {
                sleep(calculate_backoff(attempt, schedule.base_ms, schedule.max_ms)).await;
                attempt = attempt.saturating_add(1);

                let receipt = match self.client.get_transaction_receipt(tx_hash).await {
                    Ok(Some(r)) => r,
                    Ok(None) => {
                        tracing::debug!(tx_hash = %tx_hash, attempt = attempt, "Transaction pending");
                        continue;
                    }
                    Err(e) => {
                        tracing::warn!(tx_hash = %tx_hash, error = %e, "Receipt lookup failed, polling again");
                        continue;
                    }
                };

                if !receipt.status() {
                    return Err(BlockchainError::Reverted(tx_hash.to_string()));
                }

                let current_block = match self.client.get_block_number().await {
                    Ok(n) => n,
                    Err(e) => {
                        tracing::warn!(tx_hash = %tx_hash, error = %e, "Block number lookup failed, polling again");
                        continue;
                    }
                };
                let tx_block = receipt.block_number.unwrap_or(current_block);
                // The inclusion block counts as the first confirmation.
                let confirmations = current_block.saturating_sub(tx_block) + 1;

                if confirmations >= required_confirmations {
                    return Ok(receipt);
                }

                tracing::debug!(
                    tx_hash = %tx_hash,
                    confirmations = confirmations,
                    required = required_confirmations,
                    "Waiting for confirmations"
                );
            }
        })
        .await;

        match result {
            Ok(receipt) => receipt,
            Err(_) => Err(BlockchainError::ConfirmationTimeout {
                tx_hash: tx_hash.to_string(),
                waited_secs: schedule.timeout.as_secs(),
            }),
        }
    }

    /// Get the client used for RPC calls.
    pub fn client(&self) -> &BlockchainClient {
        &self.client
    }

    /// Get the wallet address.
    pub fn address(&self) -> Address {
        self.wallet.address()
    }
}
