//! Donation amount parsing, balance validation and the widget form state.

use alloy::primitives::utils::parse_ether;
use alloy::primitives::U256;

use crate::donation::error::{DonationError, DonationResult};
use crate::donation::quote::Quote;

/// Result of comparing an amount with the donor's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountCheck {
    Valid,
    Insufficient,
}

impl AmountCheck {
    pub fn is_valid(self) -> bool {
        self == AmountCheck::Valid
    }
}

/// Amounts above the balance are invalid; spending the whole balance is fine.
pub fn check_amount(amount: U256, balance: U256) -> AmountCheck {
    if amount > balance {
        AmountCheck::Insufficient
    } else {
        AmountCheck::Valid
    }
}

/// Parse a decimal amount of native tokens into wei.
///
/// Returns `Ok(None)` for blank input.
pub fn parse_amount(input: &str) -> DonationResult<Option<U256>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.starts_with('-') || trimmed.starts_with('+') {
        return Err(DonationError::InvalidAmount(trimmed.to_string()));
    }
    parse_ether(trimmed)
        .map(Some)
        .map_err(|_| DonationError::InvalidAmount(trimmed.to_string()))
}

/// State of the donation form: the typed amount and the quote shown for it.
#[derive(Debug, Clone, Default)]
pub struct DonationForm {
    amount: String,
    amount_wei: Option<U256>,
    quote: Option<Quote>,
    amount_is_invalid: bool,
}

impl DonationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the amount. A missing balance counts as zero.
    ///
    /// Any previous quote belongs to the old amount and is dropped. An amount
    /// above the balance marks the form invalid.
    pub fn set_amount(&mut self, input: &str, balance: Option<U256>) -> DonationResult<AmountCheck> {
        self.amount = input.trim().to_string();
        self.quote = None;

        let parsed = match parse_amount(input) {
            Ok(parsed) => parsed,
            Err(e) => {
                self.amount_wei = None;
                self.amount_is_invalid = true;
                return Err(e);
            }
        };
        self.amount_wei = parsed;

        let check = match parsed {
            Some(wei) => check_amount(wei, balance.unwrap_or(U256::ZERO)),
            None => AmountCheck::Valid,
        };
        self.amount_is_invalid = !check.is_valid();
        Ok(check)
    }

    /// Show a quote, unless the amount is invalid or the quote is for a
    /// different amount.
    pub fn apply_quote(&mut self, quote: Option<Quote>) {
        self.quote = match quote {
            Some(q) if !self.amount_is_invalid && Some(q.amount_wei) == self.amount_wei => Some(q),
            _ => None,
        };
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn amount_wei(&self) -> Option<U256> {
        self.amount_wei
    }

    pub fn quote(&self) -> Option<&Quote> {
        self.quote.as_ref()
    }

    pub fn amount_is_invalid(&self) -> bool {
        self.amount_is_invalid
    }

    /// USD display string, empty when there is no quote.
    pub fn donation_amount(&self) -> &str {
        self.quote.as_ref().map(|q| q.display.as_str()).unwrap_or("")
    }
}
