use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::channel::ChannelType;
use crate::core::{AppError, Result};

/// A contiguous KES amount range charged a single flat fee.
/// Both bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBracket {
    pub channel: ChannelType,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    pub fee: Decimal,
}

impl FeeBracket {
    /// Create a bracket, rejecting inverted ranges and negative values
    pub fn new(
        channel: ChannelType,
        min_amount: Decimal,
        max_amount: Decimal,
        fee: Decimal,
    ) -> Result<Self> {
        if min_amount < Decimal::ZERO {
            return Err(AppError::invalid_argument(format!(
                "Bracket minimum cannot be negative: {}",
                min_amount
            )));
        }
        if min_amount > max_amount {
            return Err(AppError::invalid_argument(format!(
                "Bracket minimum {} exceeds maximum {}",
                min_amount, max_amount
            )));
        }
        if fee < Decimal::ZERO {
            return Err(AppError::invalid_argument(format!(
                "Bracket fee cannot be negative: {}",
                fee
            )));
        }

        Ok(Self {
            channel,
            min_amount,
            max_amount,
            fee,
        })
    }

    /// Closed-interval membership
    pub fn contains(&self, amount: Decimal) -> bool {
        self.min_amount <= amount && amount <= self.max_amount
    }
}

/// Row shape of the `transaction_charges` table
#[derive(Debug, Clone, FromRow)]
pub struct TransactionChargeRow {
    pub transaction_type: String,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    pub charge_amount: Decimal,
}

impl TryFrom<TransactionChargeRow> for FeeBracket {
    type Error = AppError;

    fn try_from(row: TransactionChargeRow) -> Result<Self> {
        let channel: ChannelType = row.transaction_type.parse()?;
        FeeBracket::new(channel, row.min_amount, row.max_amount, row.charge_amount)
    }
}
