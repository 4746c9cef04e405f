use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use crate::core::{AppError, Result};
use crate::modules::schedules::models::ReportSchedule;

/// Hands a due schedule to whatever renders and emails the report
#[async_trait]
pub trait ReportDispatcher: Send + Sync {
    /// `now` is the minute the schedule was found due at
    async fn dispatch(&self, schedule: &ReportSchedule, now: DateTime<Utc>) -> Result<()>;
}

/// Calls the hosted report function with the schedule id
pub struct HttpReportDispatcher {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpReportDispatcher {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl ReportDispatcher for HttpReportDispatcher {
    async fn dispatch(&self, schedule: &ReportSchedule, now: DateTime<Utc>) -> Result<()> {
        let (period_start, period_end) = schedule.report_window(now);
        debug!(
            schedule_id = %schedule.id,
            report_type = ?schedule.report_type,
            %period_start,
            %period_end,
            "Sending report dispatch request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&json!({ "scheduleId": schedule.id }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::dispatch(format!(
                "Report function returned {} for schedule {}: {}",
                status, schedule.id, body
            )));
        }

        Ok(())
    }
}
