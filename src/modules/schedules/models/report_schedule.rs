use chrono::{DateTime, Duration, Months, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracing::warn;
use uuid::Uuid;

use crate::core::{AppError, Result};

/// How often a report is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl std::str::FromStr for Frequency {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(AppError::invalid_argument(format!("Invalid frequency: {}", s))),
        }
    }
}

/// Which dataset the dispatched report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    Transactions,
    Clients,
    FloatDeposits,
}

impl std::str::FromStr for ReportType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "transactions" => Ok(Self::Transactions),
            "clients" => Ok(Self::Clients),
            "float_deposits" => Ok(Self::FloatDeposits),
            _ => Err(AppError::invalid_argument(format!("Invalid report type: {}", s))),
        }
    }
}

/// A recurring report definition
///
/// `day_of_week` (0 = Sunday) is set only for weekly schedules and
/// `day_of_month` only for monthly ones. `last_sent_at` is written by the
/// dispatcher after a successful send, never by matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSchedule {
    pub id: Uuid,
    pub report_name: String,
    pub report_type: ReportType,
    pub frequency: Frequency,
    pub day_of_week: Option<u32>,
    pub day_of_month: Option<u32>,
    /// "HH:MM" in business-local time
    pub time_of_day: String,
    pub email_recipients: Vec<String>,
    pub is_active: bool,
    pub last_sent_at: Option<DateTime<Utc>>,
}

impl ReportSchedule {
    /// Parsed `time_of_day`; accepts "HH:MM" and the "HH:MM:SS" form a
    /// database `time` column renders
    pub fn time_of_day(&self) -> Option<NaiveTime> {
        let raw = self.time_of_day.trim();
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .ok()
    }

    /// Check the frequency/day invariants and the time format
    pub fn validate(&self) -> Result<()> {
        if self.time_of_day().is_none() {
            return Err(AppError::invalid_argument(format!(
                "time_of_day must be HH:MM, got {:?}",
                self.time_of_day
            )));
        }

        match (self.frequency, self.day_of_week, self.day_of_month) {
            (Frequency::Daily, None, None) => Ok(()),
            (Frequency::Weekly, Some(dow), None) if dow <= 6 => Ok(()),
            (Frequency::Monthly, None, Some(dom)) if (1..=31).contains(&dom) => Ok(()),
            (Frequency::Weekly, Some(dow), None) => Err(AppError::invalid_argument(format!(
                "day_of_week must be 0..=6, got {}",
                dow
            ))),
            (Frequency::Monthly, None, Some(dom)) => Err(AppError::invalid_argument(format!(
                "day_of_month must be 1..=31, got {}",
                dom
            ))),
            (frequency, _, _) => Err(AppError::invalid_argument(format!(
                "{:?} schedule has inconsistent day fields",
                frequency
            ))),
        }
    }

    /// Period covered by a report dispatched at `now`: the previous day,
    /// week or month
    pub fn report_window(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = match self.frequency {
            Frequency::Daily => now - Duration::days(1),
            Frequency::Weekly => now - Duration::days(7),
            Frequency::Monthly => now
                .checked_sub_months(Months::new(1))
                .unwrap_or_else(|| now - Duration::days(30)),
        };
        (start, now)
    }
}

/// Row shape of the `report_schedules` table
#[derive(Debug, Clone, FromRow)]
pub struct ReportScheduleRow {
    pub id: Uuid,
    pub report_name: String,
    pub report_type: String,
    pub frequency: String,
    pub day_of_week: Option<i32>,
    pub day_of_month: Option<i32>,
    pub time_of_day: String,
    pub email_recipients: Vec<String>,
    pub is_active: bool,
    pub last_sent_at: Option<DateTime<Utc>>,
}

impl ReportSchedule {
    /// Convert fetched rows, skipping any that do not parse so one bad
    /// schedule cannot stop the others from running
    pub fn from_rows(rows: Vec<ReportScheduleRow>) -> Vec<Self> {
        rows.into_iter()
            .filter_map(|row| {
                let id = row.id;
                match Self::try_from(row) {
                    Ok(schedule) => Some(schedule),
                    Err(e) => {
                        warn!(schedule_id = %id, error = %e, "Skipping unreadable report schedule");
                        None
                    }
                }
            })
            .collect()
    }
}

impl TryFrom<ReportScheduleRow> for ReportSchedule {
    type Error = AppError;

    fn try_from(row: ReportScheduleRow) -> Result<Self> {
        let day = |value: Option<i32>, field: &str| -> Result<Option<u32>> {
            value
                .map(|v| {
                    u32::try_from(v).map_err(|_| {
                        AppError::invalid_argument(format!("{} cannot be negative: {}", field, v))
                    })
                })
                .transpose()
        };

        Ok(Self {
            id: row.id,
            report_name: row.report_name,
            report_type: row.report_type.parse()?,
            frequency: row.frequency.parse()?,
            day_of_week: day(row.day_of_week, "day_of_week")?,
            day_of_month: day(row.day_of_month, "day_of_month")?,
            time_of_day: row.time_of_day,
            email_recipients: row.email_recipients,
            is_active: row.is_active,
            last_sent_at: row.last_sent_at,
        })
    }
}
