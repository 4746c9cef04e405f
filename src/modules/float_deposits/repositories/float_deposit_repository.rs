use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::Result;
use crate::modules::float_deposits::models::FloatDeposit;

#[async_trait]
pub trait FloatDepositRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<FloatDeposit>>;
}

pub struct PgFloatDepositRepository {
    pool: PgPool,
}

impl PgFloatDepositRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FloatDepositRepository for PgFloatDepositRepository {
    async fn list_all(&self) -> Result<Vec<FloatDeposit>> {
        let deposits = sqlx::query_as::<_, FloatDeposit>(
            r#"
            SELECT
                id, date, total_kd, transaction_fee, sarah_share_percentage,
                sarah_total, total_kes, rate, profit, created_at
            FROM float_deposits
            ORDER BY date
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(deposits)
    }
}
