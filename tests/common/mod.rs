//! Shared fixtures for the API integration tests.

use alloy::primitives::{Address, TxHash, B256, U256};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use support_box::blockchain::{BlockchainError, BlockchainResult};
use support_box::config::{DonationConfig, SupportConfig};
use support_box::donation::networks::default_networks;
use support_box::donation::{
    DonationBackend, DonationReceipt, DonationService, NetworkRegistry, ReceiptLog,
};
use support_box::lifecycle::Shutdown;

pub const SEPOLIA: u64 = 11_155_111;

pub fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
}

/// In-memory chain: fixed balance, 3000 USD per ether, receipts with
/// preset topics.
pub struct MockBackend {
    pub chain_id: u64,
    pub balance: U256,
    pub topics: Vec<B256>,
    pub fail_submit: bool,
    pub submitted: Arc<AtomicUsize>,
}

impl MockBackend {
    pub fn new(chain_id: u64, balance: U256) -> Self {
        Self {
            chain_id,
            balance,
            topics: Vec::new(),
            fail_submit: false,
            submitted: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl DonationBackend for MockBackend {
    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn donor(&self) -> Address {
        Address::repeat_byte(0x11)
    }

    async fn balance(&self) -> BlockchainResult<U256> {
        Ok(self.balance)
    }

    async fn quote_usd(&self, _contract: Address, amount: U256) -> BlockchainResult<U256> {
        Ok(amount * U256::from(300_000_000_000u64) / ether(1))
    }

    async fn donate(&self, _contract: Address, _value: U256) -> BlockchainResult<TxHash> {
        if self.fail_submit {
            return Err(BlockchainError::Rpc("insufficient funds for gas".into()));
        }
        self.submitted.fetch_add(1, Ordering::SeqCst);
        Ok(TxHash::repeat_byte(0x42))
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> BlockchainResult<DonationReceipt> {
        Ok(DonationReceipt {
            tx_hash,
            block_number: Some(7),
            success: true,
            logs: self
                .topics
                .iter()
                .map(|t| ReceiptLog {
                    address: Address::repeat_byte(0x22),
                    topics: vec![*t],
                })
                .collect(),
        })
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}

pub fn service(backend: MockBackend) -> DonationService<MockBackend> {
    DonationService::new(
        backend,
        NetworkRegistry::from_config(&default_networks()),
        DonationConfig::default(),
        Arc::new(Shutdown::new()),
    )
}

pub fn config() -> SupportConfig {
    SupportConfig::default()
}
