//! Transaction receipt as seen by the donation flow.

use alloy::primitives::{Address, TxHash, B256};
use alloy::rpc::types::TransactionReceipt;
use serde::Serialize;

/// One emitted event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptLog {
    pub address: Address,
    pub topics: Vec<B256>,
}

impl ReceiptLog {
    /// Event signature topic, absent for anonymous events.
    pub fn signature(&self) -> Option<&B256> {
        self.topics.first()
    }
}

/// A confirmed donation receipt with its logs in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DonationReceipt {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub success: bool,
    pub logs: Vec<ReceiptLog>,
}

impl From<&TransactionReceipt> for DonationReceipt {
    fn from(receipt: &TransactionReceipt) -> Self {
        let logs = receipt
            .inner
            .logs()
            .iter()
            .map(|log| ReceiptLog {
                address: log.address(),
                topics: log.topics().to_vec(),
            })
            .collect();

        Self {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            success: receipt.status(),
            logs,
        }
    }
}
