use chrono::{DateTime, Duration, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use super::aggregator::{percent_change, AnalyticsAggregator};
use crate::core::Currency;
use crate::modules::analytics::models::DashboardSummary;
use crate::modules::float_deposits::models::FloatDeposit;
use crate::modules::transactions::models::Transaction;

const TREND_PERIOD_DAYS: i64 = 30;

/// Rounding slack allowed between a stored KES figure and its derivation
pub const DISCREPANCY_TOLERANCE_KES: Decimal = Decimal::ONE;

impl AnalyticsAggregator {
    /// Headline figures as of `now`
    ///
    /// "Today" is the business-local calendar day containing `now`. The
    /// volume trend compares KD volume in `(now - 30d, ..]` with
    /// `(now - 60d, now - 30d]`.
    pub fn dashboard_summary(
        &self,
        now: DateTime<Utc>,
        transactions: &[Transaction],
        deposits: &[FloatDeposit],
        total_clients: u64,
    ) -> DashboardSummary {
        let today = self.timezone.local_date(now);
        let recent_cutoff = now - Duration::days(TREND_PERIOD_DAYS);
        let previous_cutoff = now - Duration::days(TREND_PERIOD_DAYS * 2);

        let mut summary = DashboardSummary {
            generated_at: now,
            today,
            total_clients,
            total_transactions: transactions.len() as u64,
            total_kd: Decimal::ZERO,
            total_payout_kes: Decimal::ZERO,
            avg_rate: Decimal::ZERO,
            today_transactions: 0,
            today_kd: Decimal::ZERO,
            today_payout_kes: Decimal::ZERO,
            recent_transactions: 0,
            recent_volume_kd: Decimal::ZERO,
            previous_volume_kd: Decimal::ZERO,
            volume_trend_percent: Decimal::ZERO,
            float_total_kd: Decimal::ZERO,
            float_total_kes: Decimal::ZERO,
            float_total_profit: Decimal::ZERO,
            float_discrepancies: 0,
        };

        let mut rate_sum = Decimal::ZERO;
        for tx in transactions {
            summary.total_kd += tx.principal_kd;
            summary.total_payout_kes += tx.payout_kes;
            rate_sum += tx.rate_kes_per_kd;

            if self.timezone.local_date(tx.created_at) == today {
                summary.today_transactions += 1;
                summary.today_kd += tx.principal_kd;
                summary.today_payout_kes += tx.payout_kes;
            }

            if tx.created_at > recent_cutoff {
                summary.recent_transactions += 1;
                summary.recent_volume_kd += tx.principal_kd;
            } else if tx.created_at > previous_cutoff {
                summary.previous_volume_kd += tx.principal_kd;
            }
        }

        if !transactions.is_empty() {
            summary.avg_rate = Currency::KES.round(rate_sum / Decimal::from(transactions.len()));
        }
        summary.volume_trend_percent =
            percent_change(summary.recent_volume_kd, summary.previous_volume_kd)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        for deposit in deposits {
            summary.float_total_kd += deposit.total_kd;
            summary.float_total_kes += deposit.total_kes;
            summary.float_total_profit += deposit.profit_or_zero();
            if !deposit.discrepancies(DISCREPANCY_TOLERANCE_KES).is_empty() {
                summary.float_discrepancies += 1;
            }
        }

        summary
    }
}
