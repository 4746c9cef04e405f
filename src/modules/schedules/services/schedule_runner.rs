use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Timelike, Utc};
use futures_util::future::join_all;
use serde::Serialize;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::core::traits::Clock;
use crate::core::Result;
use crate::modules::schedules::models::ReportSchedule;
use crate::modules::schedules::repositories::ScheduleRepository;
use crate::modules::schedules::services::{ReportDispatcher, ScheduleMatcher};

/// Result of dispatching one due schedule
#[derive(Debug, Clone, Serialize)]
pub struct DispatchOutcome {
    pub schedule_id: Uuid,
    pub report_name: String,
    pub success: bool,
    pub error: Option<String>,
}

/// Totals for one evaluated minute
#[derive(Debug, Clone, Default, Serialize)]
pub struct DispatchSummary {
    pub due: usize,
    pub sent: usize,
    pub failed: usize,
    pub outcomes: Vec<DispatchOutcome>,
}

/// Background job that dispatches due report schedules
///
/// Ticks every `tick` and evaluates each wall-clock minute at most once.
/// Ticks missed while a dispatch is still running are skipped, not replayed.
pub struct ScheduleRunner {
    schedule_repo: Arc<dyn ScheduleRepository>,
    dispatcher: Arc<dyn ReportDispatcher>,
    matcher: ScheduleMatcher,
    clock: Arc<dyn Clock>,
    tick: Duration,
}

impl ScheduleRunner {
    pub fn new(
        schedule_repo: Arc<dyn ScheduleRepository>,
        dispatcher: Arc<dyn ReportDispatcher>,
        matcher: ScheduleMatcher,
        clock: Arc<dyn Clock>,
        tick: Duration,
    ) -> Self {
        Self {
            schedule_repo,
            dispatcher,
            matcher,
            clock,
            tick,
        }
    }

    /// Active schedules due at the current minute, without dispatching them
    pub async fn due_now(&self) -> Result<Vec<ReportSchedule>> {
        let now = truncate_to_minute(self.clock.now());
        let schedules = self.schedule_repo.list_active().await?;
        Ok(self
            .matcher
            .due_schedules(&schedules, now)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Start the runner loop; spawn this as a tokio task
    pub async fn start(self: Arc<Self>) {
        info!(tick_seconds = self.tick.as_secs(), "Starting report schedule runner");

        let mut ticker = interval(self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_minute: Option<DateTime<Utc>> = None;

        loop {
            ticker.tick().await;

            let minute = truncate_to_minute(self.clock.now());
            if last_minute == Some(minute) {
                continue;
            }
            last_minute = Some(minute);

            match self.run_once(minute).await {
                Ok(summary) => {
                    if summary.due > 0 {
                        info!(
                            due = summary.due,
                            sent = summary.sent,
                            failed = summary.failed,
                            "Scheduled reports processed"
                        );
                    }
                }
                Err(e) => {
                    error!(error = %e, "Error checking report schedules");
                }
            }
        }
    }

    /// Dispatch every schedule due at `now` and stamp the ones that went out
    ///
    /// A failed dispatch leaves `last_sent_at` untouched and does not stop
    /// the remaining schedules.
    pub async fn run_once(&self, now: DateTime<Utc>) -> Result<DispatchSummary> {
        let schedules: Vec<ReportSchedule> = self
            .schedule_repo
            .list_active()
            .await?
            .into_iter()
            .filter(|schedule| match schedule.validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!(schedule_id = %schedule.id, error = %e, "Skipping malformed report schedule");
                    false
                }
            })
            .collect();
        let due = self.matcher.due_schedules(&schedules, now);

        if due.is_empty() {
            debug!(%now, active = schedules.len(), "No report schedules due");
            return Ok(DispatchSummary::default());
        }

        info!(%now, due = due.len(), "Dispatching scheduled reports");

        let results = join_all(due.iter().map(|schedule| async move {
            (*schedule, self.dispatcher.dispatch(schedule, now).await)
        }))
        .await;

        let mut summary = DispatchSummary {
            due: due.len(),
            ..Default::default()
        };

        for (schedule, result) in results {
            let outcome = match result {
                Ok(()) => {
                    summary.sent += 1;
                    if let Err(e) = self.schedule_repo.mark_sent(schedule.id, now).await {
                        warn!(
                            schedule_id = %schedule.id,
                            error = %e,
                            "Report sent but last_sent_at was not recorded"
                        );
                    }
                    info!(schedule_id = %schedule.id, report = %schedule.report_name, "Report dispatched");
                    DispatchOutcome {
                        schedule_id: schedule.id,
                        report_name: schedule.report_name.clone(),
                        success: true,
                        error: None,
                    }
                }
                Err(e) => {
                    summary.failed += 1;
                    error!(schedule_id = %schedule.id, error = %e, "Report dispatch failed");
                    DispatchOutcome {
                        schedule_id: schedule.id,
                        report_name: schedule.report_name.clone(),
                        success: false,
                        error: Some(e.to_string()),
                    }
                }
            };
            summary.outcomes.push(outcome);
        }

        Ok(summary)
    }
}

fn truncate_to_minute(at: DateTime<Utc>) -> DateTime<Utc> {
    at.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(at)
}
