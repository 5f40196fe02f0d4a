//! Donation widget backend.
//!
//! # Data Flow
//! ```text
//! networks.rs   chain ID → contract address
//! amount.rs     parse input, compare with balance, form state
//! quote.rs      USD estimate from the contract read call
//! backend.rs    chain access (balance, quote, donate, receipt)
//! service.rs    the flow, background receipt waits
//! classifier.rs receipt logs → Outcome
//! notice.rs     dialogs for every step
//! tracker.rs    submitted donations by transaction hash
//! ```

pub mod amount;
pub mod backend;
pub mod classifier;
pub mod error;
pub mod networks;
pub mod notice;
pub mod quote;
pub mod receipt;
pub mod service;
pub mod tracker;

pub use backend::{ChainBackend, DonationBackend};
pub use classifier::{classify, Outcome};
pub use error::{DonationError, DonationResult};
pub use networks::NetworkRegistry;
pub use notice::{Notice, NoticeKind};
pub use receipt::{DonationReceipt, ReceiptLog};
pub use service::{DonateReply, DonationService};
pub use tracker::{DonationRecord, DonationStatus};
