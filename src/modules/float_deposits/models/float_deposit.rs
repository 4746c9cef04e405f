use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::Currency;

/// A batch of KD capital deposited and converted to KES
///
/// Every figure is entered by an operator. `total_kes ≈ total_kd × rate` and
/// `share_total ≈ total_kes × share_percentage / 100` are expectations, not
/// enforced invariants; `profit` has no defined relation to the share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FloatDeposit {
    pub id: Uuid,
    pub date: NaiveDate,
    pub total_kd: Decimal,
    pub transaction_fee: Decimal,
    #[sqlx(rename = "sarah_share_percentage")]
    pub share_percentage: Decimal,
    #[sqlx(rename = "sarah_total")]
    pub share_total: Decimal,
    pub total_kes: Decimal,
    pub rate: Decimal,
    #[sqlx(default)]
    pub profit: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// A stored figure that disagrees with the value derived from its inputs
///
/// `expected` is `None` when the inputs are too large to derive a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloatDepositDiscrepancy {
    pub field: &'static str,
    pub expected: Option<Decimal>,
    pub actual: Decimal,
}

impl FloatDeposit {
    pub fn profit_or_zero(&self) -> Decimal {
        self.profit.unwrap_or(Decimal::ZERO)
    }

    /// `total_kd × rate`, rounded to cents; `None` on overflow
    pub fn expected_total_kes(&self) -> Option<Decimal> {
        self.total_kd
            .checked_mul(self.rate)
            .map(|total| Currency::KES.round(total))
    }

    /// `total_kes × share_percentage / 100`, rounded to cents; `None` on overflow
    pub fn expected_share_total(&self) -> Option<Decimal> {
        self.total_kes
            .checked_mul(self.share_percentage)
            .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
            .map(|share| Currency::KES.round(share))
    }

    /// Figures deviating from their derived value by more than `tolerance`.
    /// Reported for review only; nothing is corrected.
    pub fn discrepancies(&self, tolerance: Decimal) -> Vec<FloatDepositDiscrepancy> {
        let checks = [
            ("total_kes", self.expected_total_kes(), self.total_kes),
            ("share_total", self.expected_share_total(), self.share_total),
        ];

        checks
            .into_iter()
            .filter(|(_, expected, actual)| match expected {
                Some(expected) => expected
                    .checked_sub(*actual)
                    .map_or(true, |delta| delta.abs() > tolerance),
                None => true,
            })
            .map(|(field, expected, actual)| FloatDepositDiscrepancy {
                field,
                expected,
                actual,
            })
            .collect()
    }
}
