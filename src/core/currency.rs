use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Currencies handled by the exchange desk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Kuwaiti Dinar (3 decimal places, fils)
    KWD,
    /// Kenyan Shilling (2 decimal places, cents)
    KES,
}

impl Currency {
    /// Returns the decimal scale for this currency
    pub fn scale(&self) -> u32 {
        match self {
            Currency::KWD => 3,
            Currency::KES => 2,
        }
    }

    /// Rounds half away from zero to the currency's minor unit
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.scale(), RoundingStrategy::MidpointAwayFromZero)
    }
}
