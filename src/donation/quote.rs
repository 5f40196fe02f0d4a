//! USD quotes for a native token amount.

use alloy::primitives::U256;
use serde::{Serialize, Serializer};

/// Largest power of ten that fits in a `U256`.
pub const MAX_USD_DECIMALS: u32 = 77;

/// Serialize wei and fixed-point amounts as decimal strings.
pub fn decimal<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// USD estimate returned by `calculateBaseAssetAmountInUSD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    /// The quoted amount in wei.
    #[serde(serialize_with = "decimal")]
    pub amount_wei: U256,
    /// Raw contract output (fixed point, `usd_decimals` decimals).
    #[serde(serialize_with = "decimal")]
    pub amount_in_usd: U256,
    /// Human readable USD value, e.g. "1.2346".
    pub display: String,
}

impl Quote {
    /// Build a quote from the raw contract output.
    ///
    /// A zero USD value is treated as no quote.
    pub fn from_raw(
        amount_wei: U256,
        amount_in_usd: U256,
        usd_decimals: u32,
        display_decimals: u32,
    ) -> Option<Self> {
        if amount_in_usd.is_zero() {
            return None;
        }
        Some(Self {
            amount_wei,
            amount_in_usd,
            display: format_usd(amount_in_usd, usd_decimals, display_decimals),
        })
    }
}

fn pow10(exp: u32) -> U256 {
    U256::from(10u64).pow(U256::from(exp))
}

/// Format a fixed-point USD value, rounding half up to `display_decimals`.
pub fn format_usd(raw: U256, usd_decimals: u32, display_decimals: u32) -> String {
    let display_decimals = display_decimals.min(usd_decimals);
    let scale = pow10(usd_decimals - display_decimals);
    let rounded = raw.saturating_add(scale / U256::from(2u64)) / scale;

    if display_decimals == 0 {
        return rounded.to_string();
    }

    let unit = pow10(display_decimals);
    let whole = rounded / unit;
    let frac = (rounded % unit).to_string();
    let padding = "0".repeat(display_decimals as usize - frac.len());
    format!("{whole}.{padding}{frac}")
}
