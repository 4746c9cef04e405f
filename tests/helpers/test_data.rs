// Test Data Factory
//
// Builders for domain records with sensible defaults.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use kdconnect::modules::clients::models::Client;
use kdconnect::modules::fees::models::ChannelType;
use kdconnect::modules::float_deposits::models::FloatDeposit;
use kdconnect::modules::schedules::models::{Frequency, ReportSchedule, ReportType};
use kdconnect::modules::transactions::models::Transaction;

pub struct TestDataFactory;

impl TestDataFactory {
    /// Transaction with amounts already filled in as `principal × rate`
    /// plus `fee`
    pub fn transaction(
        principal_kd: Decimal,
        rate: Decimal,
        fee: Decimal,
        created_at: DateTime<Utc>,
    ) -> Transaction {
        let mut tx = Transaction::new(
            Uuid::new_v4(),
            principal_kd,
            rate,
            ChannelType::SendMoney,
            created_at,
        );
        tx.amount_kes = (principal_kd * rate).round_dp(2);
        tx.fee_kes = fee;
        tx.payout_kes = tx.amount_kes + fee;
        tx
    }

    pub fn client(name: &str, created_at: DateTime<Utc>) -> Client {
        Client {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at,
        }
    }

    pub fn float_deposit(date: NaiveDate, total_kd: Decimal, rate: Decimal) -> FloatDeposit {
        let total_kes = (total_kd * rate).round_dp(2);
        FloatDeposit {
            id: Uuid::new_v4(),
            date,
            total_kd,
            transaction_fee: Decimal::ZERO,
            share_percentage: Decimal::from(50),
            share_total: (total_kes / Decimal::from(2)).round_dp(2),
            total_kes,
            rate,
            profit: None,
            created_at: Utc::now(),
        }
    }

    pub fn schedule(
        frequency: Frequency,
        day_of_week: Option<u32>,
        day_of_month: Option<u32>,
        time_of_day: &str,
    ) -> ReportSchedule {
        ReportSchedule {
            id: Uuid::new_v4(),
            report_name: format!("{:?} report", frequency),
            report_type: ReportType::Transactions,
            frequency,
            day_of_week,
            day_of_month,
            time_of_day: time_of_day.to_string(),
            email_recipients: vec!["ops@example.com".to_string()],
            is_active: true,
            last_sent_at: None,
        }
    }
}
