use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracing::warn;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::fees::models::ChannelType;

/// Transaction status lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Recorded, awaiting verification
    Pending,
    /// Checked by an operator
    Verified,
    /// Payout disbursed
    Paid,
    /// Refused; excluded from payouts
    Rejected,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Paid => "paid",
            Self::Rejected => "rejected",
        }
    }
}

impl Default for TransactionStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(Self::Pending),
            "verified" => Ok(Self::Verified),
            "paid" => Ok(Self::Paid),
            "rejected" => Ok(Self::Rejected),
            _ => Err(AppError::invalid_argument(format!(
                "Invalid transaction status: {}",
                s
            ))),
        }
    }
}

/// A client's KD → KES exchange
///
/// `amount_kes = round(principal_kd × rate_kes_per_kd, 2)` and
/// `payout_kes = amount_kes + fee_kes`; the fee is paid on top of the
/// converted amount, not deducted from it.
///
/// `channel` is `None` for ledger entries outside M-PESA (bank transfers and
/// the like); `transaction_type` keeps the stored label as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub client_id: Uuid,
    pub principal_kd: Decimal,
    pub rate_kes_per_kd: Decimal,
    pub transaction_type: Option<String>,
    pub channel: Option<ChannelType>,
    pub fee_kes: Decimal,
    pub amount_kes: Decimal,
    pub payout_kes: Decimal,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub status: TransactionStatus,
}

impl Transaction {
    /// New pending transaction with no computed amounts yet
    pub fn new(
        client_id: Uuid,
        principal_kd: Decimal,
        rate_kes_per_kd: Decimal,
        channel: ChannelType,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id,
            principal_kd,
            rate_kes_per_kd,
            transaction_type: Some(channel.label().to_string()),
            channel: Some(channel),
            fee_kes: Decimal::ZERO,
            amount_kes: Decimal::ZERO,
            payout_kes: Decimal::ZERO,
            created_at,
            paid_at: None,
            status: TransactionStatus::Pending,
        }
    }
}

/// Row shape of the `transactions` table
#[derive(Debug, Clone, FromRow)]
pub struct TransactionRow {
    pub id: Uuid,
    pub client_id: Uuid,
    pub amount_kd: Decimal,
    pub rate_kes_per_kd: Decimal,
    #[sqlx(rename = "type")]
    pub transaction_type: Option<String>,
    pub transaction_fee_kes: Decimal,
    pub amount_kes: Decimal,
    pub payout_kes: Decimal,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub status: String,
}

impl Transaction {
    /// Convert fetched rows, skipping rows whose status does not parse
    pub fn from_rows(rows: Vec<TransactionRow>) -> Vec<Self> {
        rows.into_iter()
            .filter_map(|row| {
                let id = row.id;
                match Self::try_from(row) {
                    Ok(tx) => Some(tx),
                    Err(e) => {
                        warn!(transaction_id = %id, error = %e, "Skipping unreadable transaction");
                        None
                    }
                }
            })
            .collect()
    }
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = AppError;

    fn try_from(row: TransactionRow) -> Result<Self> {
        let channel = ChannelType::from_stored(row.transaction_type.as_deref());
        Ok(Self {
            id: row.id,
            client_id: row.client_id,
            principal_kd: row.amount_kd,
            rate_kes_per_kd: row.rate_kes_per_kd,
            transaction_type: row.transaction_type,
            channel,
            fee_kes: row.transaction_fee_kes,
            amount_kes: row.amount_kes,
            payout_kes: row.payout_kes,
            created_at: row.created_at,
            paid_at: row.paid_at,
            status: row.status.parse()?,
        })
    }
}
