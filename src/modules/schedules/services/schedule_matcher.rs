use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::core::BusinessTimezone;
use crate::modules::schedules::models::{Frequency, ReportSchedule};

/// Decides which report schedules fire at a given minute
///
/// Matching is exact to the minute, with no grace window: a caller that
/// skips a minute skips every schedule configured for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleMatcher {
    timezone: BusinessTimezone,
}

impl ScheduleMatcher {
    pub fn new(timezone: BusinessTimezone) -> Self {
        Self { timezone }
    }

    /// Active schedules whose frequency, day and `HH:MM` match `now`
    pub fn due_schedules<'a>(
        &self,
        schedules: &'a [ReportSchedule],
        now: DateTime<Utc>,
    ) -> Vec<&'a ReportSchedule> {
        schedules.iter().filter(|s| self.is_due(s, now)).collect()
    }

    pub fn is_due(&self, schedule: &ReportSchedule, now: DateTime<Utc>) -> bool {
        if !schedule.is_active {
            return false;
        }
        let Some(time) = schedule.time_of_day() else {
            return false;
        };

        let local = self.timezone.localize(now);
        if local.hour() != time.hour() || local.minute() != time.minute() {
            return false;
        }

        match schedule.frequency {
            Frequency::Daily => true,
            Frequency::Weekly => schedule.day_of_week == Some(local.weekday().num_days_from_sunday()),
            Frequency::Monthly => schedule.day_of_month == Some(local.day()),
        }
    }
}
