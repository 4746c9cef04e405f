use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::schedules::models::{ReportSchedule, ReportScheduleRow};

/// Persistence port for report schedules
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Schedules with `is_active = true`
    async fn list_active(&self) -> Result<Vec<ReportSchedule>>;

    /// Record a successful dispatch
    async fn mark_sent(&self, id: Uuid, sent_at: DateTime<Utc>) -> Result<()>;
}

pub struct PgScheduleRepository {
    pool: PgPool,
}

impl PgScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleRepository for PgScheduleRepository {
    async fn list_active(&self) -> Result<Vec<ReportSchedule>> {
        let rows = sqlx::query_as::<_, ReportScheduleRow>(
            r#"
            SELECT
                id, report_name, report_type, frequency, day_of_week, day_of_month,
                time_of_day::text AS time_of_day,
                COALESCE(email_recipients, '{}') AS email_recipients,
                is_active, last_sent_at
            FROM report_schedules
            WHERE is_active = true
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(ReportSchedule::from_rows(rows))
    }

    async fn mark_sent(&self, id: Uuid, sent_at: DateTime<Utc>) -> Result<()> {
        let result = sqlx::query("UPDATE report_schedules SET last_sent_at = $1 WHERE id = $2")
            .bind(sent_at)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Report schedule {}", id)));
        }

        Ok(())
    }
}
