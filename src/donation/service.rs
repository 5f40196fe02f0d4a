//! Donation flow: quote, validate, submit, wait, classify.
//!
//! # Flow
//! ```text
//! amount ──▶ parse ──▶ balance check ──▶ confirmed? ──no──▶ quote (read call) ──▶ prompt
//!                                           │yes
//!                                           ▼
//! donate() ──▶ tracker: Pending ──▶ [spawned] wait receipt ──▶ classify ──▶ tracker: Confirmed / Failed
//! ```

use alloy::primitives::{Address, TxHash, U256};
use serde::Serialize;
use std::sync::Arc;

use crate::config::DonationConfig;
use crate::donation::amount::DonationForm;
use crate::donation::backend::DonationBackend;
use crate::donation::classifier::classify;
use crate::donation::error::{DonationError, DonationResult};
use crate::donation::networks::{Network, NetworkRegistry};
use crate::donation::notice::{Notice, RewardImage};
use crate::donation::quote::{self, Quote};
use crate::donation::tracker::{DonationRecord, DonationStatus, DonationTracker};
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// Donor balance.
#[derive(Debug, Clone, Serialize)]
pub struct Balance {
    pub address: Address,
    #[serde(serialize_with = "quote::decimal")]
    pub balance_wei: U256,
    pub symbol: String,
}

/// Network table entry with the connected chain marked.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkView {
    #[serde(flatten)]
    pub network: Network,
    pub active: bool,
}

/// A validated donation, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationRequest {
    pub chain_id: u64,
    pub contract_address: Address,
    pub amount_wei: U256,
}

/// Answer to a quote request.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteView {
    pub amount: String,
    /// False when the amount exceeds the balance.
    pub valid: bool,
    #[serde(flatten)]
    pub quote: Option<Quote>,
}

/// Answer to a donation request.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DonateReply {
    /// The donor has to confirm before anything is sent.
    ConfirmationRequired { notice: Notice },
    /// The transaction was broadcast.
    Submitted { tx_hash: TxHash, notice: Notice },
}

/// Orchestrates the donation widget against a [`DonationBackend`].
pub struct DonationService<B> {
    backend: Arc<B>,
    networks: NetworkRegistry,
    config: DonationConfig,
    tracker: DonationTracker,
    shutdown: Arc<Shutdown>,
}

impl<B> Clone for DonationService<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            networks: self.networks.clone(),
            config: self.config.clone(),
            tracker: self.tracker.clone(),
            shutdown: self.shutdown.clone(),
        }
    }
}

impl<B: DonationBackend> DonationService<B> {
    pub fn new(
        backend: B,
        networks: NetworkRegistry,
        config: DonationConfig,
        shutdown: Arc<Shutdown>,
    ) -> Self {
        Self {
            backend: Arc::new(backend),
            networks,
            config,
            tracker: DonationTracker::new(),
            shutdown,
        }
    }

    /// Contract for the connected chain; `None` disables donations.
    pub fn contract(&self) -> Option<Address> {
        self.networks.resolve(self.backend.chain_id())
    }

    pub fn chain_id(&self) -> u64 {
        self.backend.chain_id()
    }

    pub async fn is_healthy(&self) -> bool {
        self.backend.is_healthy().await
    }

    pub fn networks(&self) -> Vec<NetworkView> {
        let active = self.backend.chain_id();
        self.networks
            .networks()
            .iter()
            .map(|n| NetworkView {
                network: n.clone(),
                active: n.chain_id == active,
            })
            .collect()
    }

    pub async fn balance(&self) -> DonationResult<Balance> {
        let balance_wei = self.backend.balance().await?;
        Ok(Balance {
            address: self.backend.donor(),
            balance_wei,
            symbol: self.config.native_symbol.clone(),
        })
    }

    /// Fill a form for `amount` and check it against the balance.
    ///
    /// Also returns the balance the amount was checked against.
    async fn prepare(&self, amount: &str) -> DonationResult<(DonationForm, Option<U256>)> {
        let mut form = DonationForm::new();
        let balance = match self.backend.balance().await {
            Ok(b) => Some(b),
            Err(e) => {
                tracing::warn!(error = %e, "Balance unavailable, treating as zero");
                None
            }
        };
        form.set_amount(amount, balance)?;
        Ok((form, balance))
    }

    /// Read the USD value for a valid amount into the form.
    async fn apply_quote(&self, contract: Address, form: &mut DonationForm) -> DonationResult<()> {
        if form.amount_is_invalid() {
            return Ok(());
        }
        if let Some(wei) = form.amount_wei() {
            let raw = self.backend.quote_usd(contract, wei).await?;
            metrics::record_quote();
            form.apply_quote(Quote::from_raw(
                wei,
                raw,
                self.config.usd_decimals,
                self.config.display_decimals,
            ));
        }
        Ok(())
    }

    /// USD estimate for an amount of native tokens.
    pub async fn quote(&self, amount: &str) -> DonationResult<QuoteView> {
        let contract = self
            .contract()
            .ok_or(DonationError::UnsupportedNetwork(self.backend.chain_id()))?;
        let (mut form, _) = self.prepare(amount).await?;
        self.apply_quote(contract, &mut form).await?;

        Ok(QuoteView {
            amount: form.amount().to_string(),
            valid: !form.amount_is_invalid(),
            quote: form.quote().cloned(),
        })
    }

    /// Validate and, once confirmed, submit a donation.
    ///
    /// The receipt wait runs in the background; poll [`Self::status`].
    pub async fn donate(&self, amount: &str, confirmed: bool) -> DonationResult<DonateReply> {
        let contract = self
            .contract()
            .ok_or(DonationError::UnsupportedNetwork(self.backend.chain_id()))?;
        if amount.trim().is_empty() {
            return Err(DonationError::EmptyAmount);
        }

        let (mut form, balance) = self.prepare(amount).await?;
        let value = form.amount_wei().ok_or(DonationError::EmptyAmount)?;
        if form.amount_is_invalid() {
            return Err(DonationError::InsufficientBalance {
                amount: value,
                balance: balance.unwrap_or(U256::ZERO),
            });
        }

        if !confirmed {
            // The prompt falls back to $0 when the price read fails.
            if let Err(e) = self.apply_quote(contract, &mut form).await {
                tracing::warn!(error = %e, "Quote unavailable for confirmation prompt");
            }
            return Ok(DonateReply::ConfirmationRequired {
                notice: Notice::confirm(form.donation_amount()),
            });
        }

        let request = DonationRequest {
            chain_id: self.backend.chain_id(),
            contract_address: contract,
            amount_wei: value,
        };
        let tx_hash = self.submit(&request).await?;
        let notice = Notice::submitted();
        self.tracker.record_pending(tx_hash, value, notice.clone());
        self.spawn_receipt_wait(tx_hash);

        Ok(DonateReply::Submitted { tx_hash, notice })
    }

    async fn submit(&self, request: &DonationRequest) -> DonationResult<TxHash> {
        let value = request.amount_wei;
        let contract = request.contract_address;
        let tx_hash = match self.backend.donate(contract, value).await {
            Ok(hash) => hash,
            Err(e) => {
                metrics::record_donation_failure("submit");
                tracing::error!(error = %e, amount_wei = %value, "Donation submission failed");
                return Err(e.into());
            }
        };
        metrics::record_donation_submitted();
        tracing::info!(
            tx_hash = %tx_hash,
            chain_id = request.chain_id,
            contract = %contract,
            amount_wei = %value,
            "Donation submitted"
        );
        Ok(tx_hash)
    }

    /// Status of a donation submitted through this service.
    pub fn status(&self, tx_hash: &TxHash) -> DonationResult<DonationRecord> {
        self.tracker
            .get(tx_hash)
            .ok_or_else(|| DonationError::UnknownDonation(tx_hash.to_string()))
    }

    /// Wait for a receipt and record the classified outcome.
    pub async fn confirm(&self, tx_hash: TxHash) -> DonationStatus {
        let (status, notice) = match self.backend.wait_for_receipt(tx_hash).await {
            Ok(receipt) => {
                let outcome = classify(&receipt);
                metrics::record_donation_outcome(outcome);
                tracing::info!(
                    tx_hash = %tx_hash,
                    block_number = ?receipt.block_number,
                    outcome = outcome.as_str(),
                    "Donation confirmed"
                );
                (
                    DonationStatus::Confirmed {
                        block_number: receipt.block_number,
                        outcome,
                    },
                    Notice::confirmed(outcome, &self.reward_image()),
                )
            }
            Err(e) => {
                metrics::record_donation_failure("receipt");
                tracing::error!(tx_hash = %tx_hash, error = %e, "Donation receipt failed");
                let reason = e.to_string();
                (DonationStatus::Failed { reason: reason.clone() }, Notice::error(reason))
            }
        };

        self.tracker.finish(&tx_hash, status.clone(), notice);
        status
    }

    fn spawn_receipt_wait(&self, tx_hash: TxHash) {
        let service = self.clone();
        let mut shutdown = self.shutdown.subscribe();
        tokio::spawn(async move {
            tokio::select! {
                _ = service.confirm(tx_hash) => {}
                _ = shutdown.recv() => {
                    tracing::info!(tx_hash = %tx_hash, "Shutdown while waiting for receipt");
                }
            }
        });
    }

    fn reward_image(&self) -> RewardImage {
        RewardImage {
            url: self.config.reward_image_url.clone(),
            width: self.config.reward_image_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::{BlockchainError, BlockchainResult};
    use alloy::primitives::B256;
    use crate::donation::classifier::{Outcome, LEVEL_UP_TOPIC, TRANSFER_TOPIC};
    use crate::donation::networks::default_networks;
    use crate::donation::notice::NoticeKind;
    use crate::donation::receipt::{DonationReceipt, ReceiptLog};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const SEPOLIA: u64 = 11_155_111;

    fn ether(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
    }

    struct MockBackend {
        chain_id: u64,
        balance: U256,
        /// USD (8 decimals) per whole ether.
        usd_per_ether: U256,
        topics: Vec<B256>,
        quote_fails: bool,
        receipt_fails: bool,
        donations: AtomicUsize,
    }

    impl MockBackend {
        fn new(chain_id: u64, balance: U256) -> Self {
            Self {
                chain_id,
                balance,
                usd_per_ether: U256::from(300_000_000_000u64),
                topics: Vec::new(),
                quote_fails: false,
                receipt_fails: false,
                donations: AtomicUsize::new(0),
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
            if self.quote_fails {
                return Err(BlockchainError::Rpc("price feed stale".into()));
            }
            Ok(amount * self.usd_per_ether / ether(1))
        }

        async fn donate(&self, _contract: Address, _value: U256) -> BlockchainResult<TxHash> {
            self.donations.fetch_add(1, Ordering::SeqCst);
            Ok(TxHash::repeat_byte(0x42))
        }

        async fn wait_for_receipt(&self, tx_hash: TxHash) -> BlockchainResult<DonationReceipt> {
            if self.receipt_fails {
                return Err(BlockchainError::Reverted(tx_hash.to_string()));
            }
            Ok(DonationReceipt {
                tx_hash,
                block_number: Some(100),
                success: true,
                logs: self
                    .topics
                    .iter()
                    .map(|t| ReceiptLog {
                        address: Address::ZERO,
                        topics: vec![*t],
                    })
                    .collect(),
            })
        }

        async fn is_healthy(&self) -> bool {
            true
        }
    }

    fn service(backend: MockBackend) -> DonationService<MockBackend> {
        DonationService::new(
            backend,
            NetworkRegistry::from_config(&default_networks()),
            DonationConfig::default(),
            Arc::new(Shutdown::new()),
        )
    }

    async fn wait_until_final(svc: &DonationService<MockBackend>, hash: &TxHash) -> DonationRecord {
        for _ in 0..100 {
            let record = svc.status(hash).unwrap();
            if record.status != DonationStatus::Pending {
                return record;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("donation never left pending");
    }

    #[tokio::test]
    async fn test_quote_valid_amount() {
        let svc = service(MockBackend::new(SEPOLIA, ether(1)));
        let view = svc.quote("0.5").await.unwrap();
        assert!(view.valid);
        assert_eq!(view.quote.unwrap().display, "1500.0000");
    }

    #[tokio::test]
    async fn test_quote_cleared_above_balance() {
        let svc = service(MockBackend::new(SEPOLIA, ether(1)));
        let view = svc.quote("2").await.unwrap();
        assert!(!view.valid);
        assert!(view.quote.is_none());
        assert_eq!(view.amount, "2");
    }

    #[tokio::test]
    async fn test_unknown_chain_disables_donations() {
        let backend = MockBackend::new(1, ether(10));
        let svc = service(backend);
        assert_eq!(svc.contract(), None);
        assert!(matches!(
            svc.donate("1", true).await,
            Err(DonationError::UnsupportedNetwork(1))
        ));
        assert!(matches!(svc.quote("1").await, Err(DonationError::UnsupportedNetwork(1))));
        assert_eq!(svc.backend.donations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_amount_rejected() {
        let svc = service(MockBackend::new(SEPOLIA, ether(1)));
        let err = svc.donate("  ", true).await.unwrap_err();
        assert!(matches!(err, DonationError::EmptyAmount));
        assert_eq!(err.to_string(), "Please enter the amount you want to support.");
        assert_eq!(svc.backend.donations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_insufficient_balance_rejected() {
        let svc = service(MockBackend::new(SEPOLIA, ether(1)));
        let err = svc.donate("2", true).await.unwrap_err();
        match err {
            DonationError::InsufficientBalance { amount, balance } => {
                assert_eq!(amount, ether(2));
                assert_eq!(balance, ether(1));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unconfirmed_request_prompts() {
        let svc = service(MockBackend::new(SEPOLIA, ether(1)));
        match svc.donate("0.001", false).await.unwrap() {
            DonateReply::ConfirmationRequired { notice } => {
                assert_eq!(notice.kind, NoticeKind::Question);
                assert_eq!(notice.text, "You are about to support $3.0000!");
            }
            other => panic!("unexpected reply {other:?}"),
        }
        assert_eq!(svc.backend.donations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_confirmed_donation_is_classified() {
        let mut backend = MockBackend::new(SEPOLIA, ether(1));
        backend.topics = vec![LEVEL_UP_TOPIC, TRANSFER_TOPIC];
        let svc = service(backend);

        let tx_hash = match svc.donate("0.01", true).await.unwrap() {
            DonateReply::Submitted { tx_hash, notice } => {
                assert_eq!(notice.text, "Your support has been received.");
                tx_hash
            }
            other => panic!("unexpected reply {other:?}"),
        };

        let record = wait_until_final(&svc, &tx_hash).await;
        assert_eq!(
            record.status,
            DonationStatus::Confirmed {
                block_number: Some(100),
                outcome: Outcome::TransferAndLevelUp,
            }
        );
        assert_eq!(record.notice.text, "You've received a new NFT and leveled up!");
        assert_eq!(record.amount_wei, U256::from(10_000_000_000_000_000u64));
    }

    #[tokio::test]
    async fn test_confirmed_donation_skips_quote() {
        let mut backend = MockBackend::new(SEPOLIA, ether(1));
        backend.quote_fails = true;
        let svc = service(backend);

        assert!(matches!(svc.quote("0.1").await, Err(DonationError::Blockchain(_))));

        match svc.donate("0.1", false).await.unwrap() {
            DonateReply::ConfirmationRequired { notice } => {
                assert_eq!(notice.text, "You are about to support $0!");
            }
            other => panic!("unexpected reply {other:?}"),
        }

        let reply = svc.donate("0.1", true).await.unwrap();
        assert!(matches!(reply, DonateReply::Submitted { .. }));
        assert_eq!(svc.backend.donations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_receipt_failure_is_terminal() {
        let mut backend = MockBackend::new(SEPOLIA, ether(1));
        backend.receipt_fails = true;
        let svc = service(backend);

        let status = svc.confirm(TxHash::repeat_byte(1)).await;
        assert!(matches!(status, DonationStatus::Failed { ref reason } if reason.contains("reverted")));
    }

    #[tokio::test]
    async fn test_unknown_donation_status() {
        let svc = service(MockBackend::new(SEPOLIA, ether(1)));
        assert!(matches!(
            svc.status(&TxHash::ZERO),
            Err(DonationError::UnknownDonation(_))
        ));
    }

    #[test]
    fn test_networks_mark_active_chain() {
        let svc = service(MockBackend::new(80001, U256::ZERO));
        let views = svc.networks();
        assert_eq!(views.len(), 2);
        assert!(views.iter().any(|v| v.active && v.network.chain_id == 80001));
        assert!(views.iter().any(|v| !v.active && v.network.chain_id == SEPOLIA));
    }
}
