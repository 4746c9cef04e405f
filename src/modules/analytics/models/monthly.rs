use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::modules::transactions::models::Transaction;

/// The slice of a transaction the monthly rollups look at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsRecord {
    pub created_at: DateTime<Utc>,
    pub principal_kd: Decimal,
    pub payout_kes: Decimal,
}

impl From<&Transaction> for AnalyticsRecord {
    fn from(tx: &Transaction) -> Self {
        Self {
            created_at: tx.created_at,
            principal_kd: tx.principal_kd,
            payout_kes: tx.payout_kes,
        }
    }
}

/// Totals for one calendar month of the reporting window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsBucket {
    /// e.g. "Jun 2024"
    pub period_label: String,
    pub year: i32,
    pub month: u32,
    pub count: u64,
    pub total_principal_kd: Decimal,
    pub total_payout_kes: Decimal,
    /// Zero for empty months
    pub avg_principal_kd: Decimal,
}

impl AnalyticsBucket {
    pub(crate) fn empty(period_label: String, year: i32, month: u32) -> Self {
        Self {
            period_label,
            year,
            month,
            count: 0,
            total_principal_kd: Decimal::ZERO,
            total_payout_kes: Decimal::ZERO,
            avg_principal_kd: Decimal::ZERO,
        }
    }

    pub(crate) fn add(&mut self, record: &AnalyticsRecord) {
        self.count += 1;
        self.total_principal_kd += record.principal_kd;
        self.total_payout_kes += record.payout_kes;
    }

    pub(crate) fn finalize(&mut self) {
        self.avg_principal_kd = if self.count > 0 {
            self.total_principal_kd / Decimal::from(self.count)
        } else {
            Decimal::ZERO
        };
    }
}

/// Number of clients on the books at the end of a month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientGrowthPoint {
    pub period_label: String,
    pub year: i32,
    pub month: u32,
    pub client_count: u64,
}
