use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::core::Result;
use crate::modules::transactions::models::{Transaction, TransactionRow};

/// Read access to recorded transactions for analytics
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Transactions created at or after `since`, or all when `None`
    async fn list_since(&self, since: Option<DateTime<Utc>>) -> Result<Vec<Transaction>>;
}

pub struct PgTransactionRepository {
    pool: PgPool,
}

impl PgTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepository for PgTransactionRepository {
    async fn list_since(&self, since: Option<DateTime<Utc>>) -> Result<Vec<Transaction>> {
        // status is a Postgres enum; cast so it decodes as text
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT
                id, client_id, amount_kd, rate_kes_per_kd, type,
                transaction_fee_kes, amount_kes, payout_kes,
                created_at, paid_at, status::text AS status
            FROM transactions
            WHERE $1::timestamptz IS NULL OR created_at >= $1
            ORDER BY created_at
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(Transaction::from_rows(rows))
    }
}
