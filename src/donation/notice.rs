//! Status dialogs shown to the donor at each step.

use serde::{Deserialize, Serialize};

use crate::donation::classifier::Outcome;

/// Dialog decoration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
    /// Needs an explicit yes/no from the donor.
    Question,
    /// Shows the supporter NFT artwork instead of an icon.
    Reward { image_url: String, image_width: u32 },
}

/// A user-facing dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub text: String,
    pub kind: NoticeKind,
}

/// Reward artwork for NFT outcomes.
#[derive(Debug, Clone)]
pub struct RewardImage {
    pub url: String,
    pub width: u32,
}

impl Notice {
    fn new(title: &str, text: impl Into<String>, kind: NoticeKind) -> Self {
        Self {
            title: title.to_string(),
            text: text.into(),
            kind,
        }
    }

    /// Any failure, with the error message verbatim.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new("Oops!", message, NoticeKind::Error)
    }

    /// Confirmation prompt before anything is sent.
    pub fn confirm(usd_display: &str) -> Self {
        let usd = if usd_display.is_empty() { "0" } else { usd_display };
        Self::new(
            "Are you sure?",
            format!("You are about to support ${usd}!"),
            NoticeKind::Question,
        )
    }

    /// The transaction was accepted by the node.
    pub fn submitted() -> Self {
        Self::new("Thank you!", "Your support has been received.", NoticeKind::Success)
    }

    /// The receipt was confirmed and classified.
    pub fn confirmed(outcome: Outcome, reward: &RewardImage) -> Self {
        let kind = if outcome.received_nft() {
            NoticeKind::Reward {
                image_url: reward.url.clone(),
                image_width: reward.width,
            }
        } else {
            NoticeKind::Success
        };

        let (title, text) = match outcome {
            Outcome::TransferAndLevelUp => {
                ("Congratulations!", "You've received a new NFT and leveled up!")
            }
            Outcome::TransferOnly => ("Thank you!", "You've received a new NFT!"),
            Outcome::LevelUpOnly => ("Congratulations!", "You have leveled up!"),
            Outcome::Neither => ("Thank you!", "Your support has been confirmed."),
        };
        Self::new(title, text, kind)
    }
}
