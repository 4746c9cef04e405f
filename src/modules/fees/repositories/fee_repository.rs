use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;

use crate::core::Result;
use crate::modules::fees::models::{FeeBracket, TransactionChargeRow};
use crate::modules::fees::services::FeeTable;

/// Read access to administrator-maintained fee brackets
#[async_trait]
pub trait FeeRepository: Send + Sync {
    /// All brackets across every channel
    async fn list_brackets(&self) -> Result<Vec<FeeBracket>>;
}

/// Load the fee table from the repository, falling back to the built-in
/// tariff when nothing has been configured yet
pub async fn load_fee_table(repo: &dyn FeeRepository) -> Result<FeeTable> {
    let brackets = repo.list_brackets().await?;
    if brackets.is_empty() {
        warn!("No transaction charges configured, using built-in tariff");
        return Ok(FeeTable::standard());
    }
    Ok(FeeTable::new(brackets))
}

pub struct PgFeeRepository {
    pool: PgPool,
}

impl PgFeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeeRepository for PgFeeRepository {
    async fn list_brackets(&self) -> Result<Vec<FeeBracket>> {
        let rows = sqlx::query_as::<_, TransactionChargeRow>(
            r#"
            SELECT transaction_type, min_amount, max_amount, charge_amount
            FROM transaction_charges
            ORDER BY transaction_type, min_amount
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(FeeBracket::try_from).collect()
    }
}
