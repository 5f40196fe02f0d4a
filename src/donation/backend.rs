//! Chain access needed by the donation flow.

use alloy::primitives::{Address, TxHash, U256};
use std::future::Future;
use std::time::Duration;

use crate::blockchain::contract;
use crate::blockchain::{BlockchainClient, BlockchainResult, PollSchedule, TxBuilder};
use crate::config::DonationConfig;
use crate::donation::receipt::DonationReceipt;

/// Everything the donation service asks of the chain.
pub trait DonationBackend: Send + Sync + 'static {
    /// Chain the donor is connected to.
    fn chain_id(&self) -> u64;

    /// Donor address.
    fn donor(&self) -> Address;

    /// Donor's native balance in wei.
    fn balance(&self) -> impl Future<Output = BlockchainResult<U256>> + Send;

    /// `calculateBaseAssetAmountInUSD(amount)` on `contract`.
    fn quote_usd(
        &self,
        contract: Address,
        amount: U256,
    ) -> impl Future<Output = BlockchainResult<U256>> + Send;

    /// Send `donate()` with `value` attached.
    fn donate(
        &self,
        contract: Address,
        value: U256,
    ) -> impl Future<Output = BlockchainResult<TxHash>> + Send;

    /// Block until the receipt is confirmed.
    fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
    ) -> impl Future<Output = BlockchainResult<DonationReceipt>> + Send;

    /// Whether the RPC answers.
    fn is_healthy(&self) -> impl Future<Output = bool> + Send;
}

/// [`DonationBackend`] over a JSON-RPC node and a local signing wallet.
#[derive(Debug, Clone)]
pub struct ChainBackend {
    tx_builder: TxBuilder,
    schedule: PollSchedule,
}

impl ChainBackend {
    pub fn new(tx_builder: TxBuilder, config: &DonationConfig) -> Self {
        Self {
            tx_builder,
            schedule: PollSchedule {
                base_ms: config.poll_base_ms,
                max_ms: config.poll_max_ms,
                timeout: Duration::from_secs(config.confirmation_timeout_secs),
            },
        }
    }

    fn client(&self) -> &BlockchainClient {
        self.tx_builder.client()
    }
}

impl DonationBackend for ChainBackend {
    fn chain_id(&self) -> u64 {
        self.client().config().chain_id
    }

    fn donor(&self) -> Address {
        self.tx_builder.address()
    }

    async fn balance(&self) -> BlockchainResult<U256> {
        self.client().get_balance(self.donor()).await
    }

    async fn quote_usd(&self, contract: Address, amount: U256) -> BlockchainResult<U256> {
        let output = self.client().call(contract::quote_call(contract, amount)).await?;
        contract::decode_quote(&output)
    }

    async fn donate(&self, contract: Address, value: U256) -> BlockchainResult<TxHash> {
        self.tx_builder
            .submit(contract, value, contract::donate_calldata())
            .await
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> BlockchainResult<DonationReceipt> {
        let receipt = self.tx_builder.wait_for_receipt(tx_hash, self.schedule).await?;
        Ok(DonationReceipt::from(&receipt))
    }

    async fn is_healthy(&self) -> bool {
        self.client().is_healthy().await
    }
}
