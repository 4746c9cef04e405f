use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::traits::Clock;
use crate::core::{Currency, Result};
use crate::modules::analytics::models::{
    AnalyticsBucket, AnalyticsRecord, ClientGrowthPoint, DashboardSummary, DistributionBucket,
};
use crate::modules::analytics::services::{
    amount_distribution, default_amount_ranges, AnalyticsAggregator,
};
use crate::modules::clients::repositories::ClientRepository;
use crate::modules::float_deposits::repositories::FloatDepositRepository;
use crate::modules::transactions::repositories::TransactionRepository;

/// Monthly analytics page payload
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyAnalytics {
    pub window_months: u32,
    pub buckets: Vec<AnalyticsBucket>,
    pub client_growth: Vec<ClientGrowthPoint>,
    pub amount_distribution: Vec<DistributionBucket>,
}

/// Loads records through the repositories and feeds them to the aggregator
pub struct AnalyticsService {
    transaction_repo: Arc<dyn TransactionRepository>,
    client_repo: Arc<dyn ClientRepository>,
    float_deposit_repo: Arc<dyn FloatDepositRepository>,
    aggregator: AnalyticsAggregator,
    clock: Arc<dyn Clock>,
    default_window_months: u32,
}

impl AnalyticsService {
    pub fn new(
        transaction_repo: Arc<dyn TransactionRepository>,
        client_repo: Arc<dyn ClientRepository>,
        float_deposit_repo: Arc<dyn FloatDepositRepository>,
        aggregator: AnalyticsAggregator,
        clock: Arc<dyn Clock>,
        default_window_months: u32,
    ) -> Self {
        Self {
            transaction_repo,
            client_repo,
            float_deposit_repo,
            aggregator,
            clock,
            default_window_months,
        }
    }

    /// Buckets, client growth and amount distribution for the last
    /// `window_months` months, current month included
    pub async fn monthly(&self, window_months: Option<u32>) -> Result<MonthlyAnalytics> {
        let window_months = window_months.unwrap_or(self.default_window_months);
        let today = self.aggregator.timezone().local_date(self.clock.now());

        let transactions = self.transaction_repo.list_since(None).await?;
        let clients = self.client_repo.list_all().await?;
        debug!(
            window_months,
            transactions = transactions.len(),
            clients = clients.len(),
            "Building monthly analytics"
        );

        let records: Vec<AnalyticsRecord> = transactions.iter().map(AnalyticsRecord::from).collect();
        let client_created_at: Vec<_> = clients.iter().map(|c| c.created_at).collect();

        let mut buckets = self.aggregator.bucket_by_month(&records, window_months, today)?;
        for bucket in &mut buckets {
            bucket.avg_principal_kd = Currency::KWD.round(bucket.avg_principal_kd);
        }
        let client_growth = self
            .aggregator
            .client_growth(&client_created_at, window_months, today)?;

        Ok(MonthlyAnalytics {
            window_months,
            buckets,
            client_growth,
            amount_distribution: amount_distribution(&records, &default_amount_ranges()),
        })
    }

    pub async fn dashboard(&self) -> Result<DashboardSummary> {
        let transactions = self.transaction_repo.list_since(None).await?;
        let deposits = self.float_deposit_repo.list_all().await?;
        let clients = self.client_repo.list_all().await?;

        let summary = self.aggregator.dashboard_summary(
            self.clock.now(),
            &transactions,
            &deposits,
            clients.len() as u64,
        );
        if summary.float_discrepancies > 0 {
            warn!(
                deposits = summary.float_discrepancies,
                "Float deposits with figures inconsistent with their rate or share"
            );
        }

        Ok(summary)
    }
}
