use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Headline figures for the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub generated_at: DateTime<Utc>,
    /// Business-local calendar day used for the "today" figures
    pub today: NaiveDate,
    pub total_clients: u64,
    pub total_transactions: u64,
    pub total_kd: Decimal,
    pub total_payout_kes: Decimal,
    pub avg_rate: Decimal,
    pub today_transactions: u64,
    pub today_kd: Decimal,
    pub today_payout_kes: Decimal,
    /// Transactions in the trailing 30 days
    pub recent_transactions: u64,
    pub recent_volume_kd: Decimal,
    pub previous_volume_kd: Decimal,
    /// KD volume change of the trailing 30 days over the 30 days before
    pub volume_trend_percent: Decimal,
    pub float_total_kd: Decimal,
    pub float_total_kes: Decimal,
    pub float_total_profit: Decimal,
    /// Deposits whose stored KES or share figures disagree with their inputs
    pub float_discrepancies: u64,
}
