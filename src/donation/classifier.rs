//! Classifies a confirmed donation by the events its receipt emitted.

use alloy::primitives::{b256, B256};
use serde::{Deserialize, Serialize};

use crate::donation::receipt::{DonationReceipt, ReceiptLog};

/// `Transfer(address,address,uint256)`, emitted when the supporter NFT is minted.
pub const TRANSFER_TOPIC: B256 =
    b256!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef");

/// Emitted when the donor reaches a new supporter level.
pub const LEVEL_UP_TOPIC: B256 =
    b256!("a49b8576e012f713baa7dceadb7d709aaec8773b498ecfe582d8b9c0c8fd074f");

/// What a confirmed donation did besides moving funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    TransferOnly,
    LevelUpOnly,
    TransferAndLevelUp,
    Neither,
}

impl Outcome {
    pub fn from_flags(transfer: bool, level_up: bool) -> Self {
        match (transfer, level_up) {
            (true, true) => Outcome::TransferAndLevelUp,
            (true, false) => Outcome::TransferOnly,
            (false, true) => Outcome::LevelUpOnly,
            (false, false) => Outcome::Neither,
        }
    }

    /// Metric label.
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::TransferOnly => "transfer_only",
            Outcome::LevelUpOnly => "level_up_only",
            Outcome::TransferAndLevelUp => "transfer_and_level_up",
            Outcome::Neither => "neither",
        }
    }

    /// Whether the donor was minted a supporter NFT.
    pub fn received_nft(self) -> bool {
        matches!(self, Outcome::TransferOnly | Outcome::TransferAndLevelUp)
    }
}

/// Classify logs by their first topic. Every log is inspected.
pub fn classify_logs<'a, I>(logs: I) -> Outcome
where
    I: IntoIterator<Item = &'a ReceiptLog>,
{
    let mut transfer = false;
    let mut level_up = false;

    for log in logs {
        match log.signature() {
            Some(topic) if *topic == TRANSFER_TOPIC => transfer = true,
            Some(topic) if *topic == LEVEL_UP_TOPIC => level_up = true,
            _ => {}
        }
    }

    Outcome::from_flags(transfer, level_up)
}

/// Classify a confirmed receipt.
pub fn classify(receipt: &DonationReceipt) -> Outcome {
    classify_logs(&receipt.logs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{keccak256, Address, TxHash};

    fn log(topics: Vec<B256>) -> ReceiptLog {
        ReceiptLog {
            address: Address::ZERO,
            topics,
        }
    }

    fn receipt(logs: Vec<ReceiptLog>) -> DonationReceipt {
        DonationReceipt {
            tx_hash: TxHash::ZERO,
            block_number: Some(1),
            success: true,
            logs,
        }
    }

    #[test]
    fn test_transfer_topic_is_erc721_transfer() {
        assert_eq!(TRANSFER_TOPIC, keccak256("Transfer(address,address,uint256)"));
    }

    #[test]
    fn test_single_transfer() {
        let r = receipt(vec![log(vec![TRANSFER_TOPIC])]);
        assert_eq!(classify(&r), Outcome::TransferOnly);
    }

    #[test]
    fn test_single_level_up() {
        let r = receipt(vec![log(vec![LEVEL_UP_TOPIC, B256::repeat_byte(1)])]);
        assert_eq!(classify(&r), Outcome::LevelUpOnly);
    }

    #[test]
    fn test_both_in_any_order() {
        let other = log(vec![B256::repeat_byte(7)]);
        let orders = [
            vec![log(vec![TRANSFER_TOPIC]), log(vec![LEVEL_UP_TOPIC])],
            vec![log(vec![LEVEL_UP_TOPIC]), log(vec![TRANSFER_TOPIC])],
            vec![other.clone(), log(vec![LEVEL_UP_TOPIC]), other.clone(), log(vec![TRANSFER_TOPIC])],
            vec![log(vec![TRANSFER_TOPIC]), log(vec![TRANSFER_TOPIC]), other, log(vec![LEVEL_UP_TOPIC])],
        ];
        for logs in orders {
            assert_eq!(classify(&receipt(logs)), Outcome::TransferAndLevelUp);
        }
    }

    #[test]
    fn test_neither() {
        assert_eq!(classify(&receipt(vec![])), Outcome::Neither);
        let r = receipt(vec![log(vec![]), log(vec![B256::repeat_byte(9)])]);
        assert_eq!(classify(&r), Outcome::Neither);
    }

    #[test]
    fn test_only_first_topic_counts() {
        // Known signatures in indexed positions are not event signatures.
        let r = receipt(vec![log(vec![B256::repeat_byte(3), TRANSFER_TOPIC, LEVEL_UP_TOPIC])]);
        assert_eq!(classify(&r), Outcome::Neither);
    }

    #[test]
    fn test_from_flags_is_total() {
        assert_eq!(Outcome::from_flags(true, true), Outcome::TransferAndLevelUp);
        assert_eq!(Outcome::from_flags(true, false), Outcome::TransferOnly);
        assert_eq!(Outcome::from_flags(false, true), Outcome::LevelUpOnly);
        assert_eq!(Outcome::from_flags(false, false), Outcome::Neither);
    }
}
