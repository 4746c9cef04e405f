use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::Result;
use crate::modules::clients::models::Client;

#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Client>>;
}

pub struct PgClientRepository {
    pool: PgPool,
}

impl PgClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for PgClientRepository {
    async fn list_all(&self) -> Result<Vec<Client>> {
        let clients =
            sqlx::query_as::<_, Client>("SELECT id, name, created_at FROM clients ORDER BY created_at")
                .fetch_all(&self.pool)
                .await?;
        Ok(clients)
    }
}
