//! In-memory registry of submitted donations.

use alloy::primitives::{TxHash, U256};
use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::donation::classifier::Outcome;
use crate::donation::notice::Notice;
use crate::donation::quote;

/// Where a submitted donation stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DonationStatus {
    Pending,
    Confirmed { block_number: Option<u64>, outcome: Outcome },
    Failed { reason: String },
}

/// A submitted donation.
#[derive(Debug, Clone, Serialize)]
pub struct DonationRecord {
    pub tx_hash: TxHash,
    #[serde(serialize_with = "quote::decimal")]
    pub amount_wei: U256,
    pub status: DonationStatus,
    /// Dialog for the latest status change.
    pub notice: Notice,
    /// Submission time (seconds since epoch).
    pub submitted_at: u64,
}

/// Thread-safe map of transaction hash to donation record.
#[derive(Debug, Clone, Default)]
pub struct DonationTracker {
    inner: Arc<DashMap<TxHash, DonationRecord>>,
}

impl DonationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly broadcast donation.
    pub fn record_pending(&self, tx_hash: TxHash, amount_wei: U256, notice: Notice) {
        let submitted_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        self.inner.insert(
            tx_hash,
            DonationRecord {
                tx_hash,
                amount_wei,
                status: DonationStatus::Pending,
                notice,
                submitted_at,
            },
        );
    }

    /// Move a donation to its final state. Unknown hashes are ignored.
    pub fn finish(&self, tx_hash: &TxHash, status: DonationStatus, notice: Notice) {
        if let Some(mut record) = self.inner.get_mut(tx_hash) {
            record.status = status;
            record.notice = notice;
        } else {
            tracing::warn!(tx_hash = %tx_hash, "Finished donation was never registered");
        }
    }

    pub fn get(&self, tx_hash: &TxHash) -> Option<DonationRecord> {
        self.inner.get(tx_hash).map(|r| r.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let tracker = DonationTracker::new();
        let hash = TxHash::repeat_byte(0xab);

        assert!(tracker.get(&hash).is_none());

        tracker.record_pending(hash, U256::from(10u64), Notice::submitted());
        let record = tracker.get(&hash).unwrap();
        assert_eq!(record.status, DonationStatus::Pending);

        tracker.finish(
            &hash,
            DonationStatus::Confirmed {
                block_number: Some(42),
                outcome: Outcome::Neither,
            },
            Notice::submitted(),
        );
        assert!(matches!(
            tracker.get(&hash).unwrap().status,
            DonationStatus::Confirmed { block_number: Some(42), .. }
        ));
    }

    #[test]
    fn test_finish_unknown_is_noop() {
        let tracker = DonationTracker::new();
        tracker.finish(
            &TxHash::ZERO,
            DonationStatus::Failed { reason: "x".into() },
            Notice::error("x"),
        );
        assert!(tracker.get(&TxHash::ZERO).is_none());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_value(DonationStatus::Confirmed {
            block_number: Some(7),
            outcome: Outcome::TransferAndLevelUp,
        })
        .unwrap();
        assert_eq!(json["state"], "confirmed");
        assert_eq!(json["outcome"], "transfer_and_level_up");
    }
}
