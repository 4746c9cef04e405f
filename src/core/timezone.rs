use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};

/// Default business offset: Kuwait and Nairobi both sit at UTC+3
pub const DEFAULT_OFFSET_MINUTES: i32 = 180;

/// The single timezone in which calendar days, months and schedule minutes
/// are evaluated. Timestamps are stored as UTC and converted on comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessTimezone {
    offset: FixedOffset,
}

impl BusinessTimezone {
    /// Build from an offset east of UTC in minutes
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(|offset| Self { offset })
    }

    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Convert a UTC timestamp into business-local time
    pub fn localize(&self, utc_time: DateTime<Utc>) -> DateTime<FixedOffset> {
        utc_time.with_timezone(&self.offset)
    }

    /// Calendar date of a UTC timestamp in business-local time
    pub fn local_date(&self, utc_time: DateTime<Utc>) -> NaiveDate {
        self.localize(utc_time).date_naive()
    }

    /// UTC instant of a business-local wall-clock time
    pub fn to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        match self.offset.from_local_datetime(&local).single() {
            Some(dt) => dt.with_timezone(&Utc),
            // Fixed offsets never produce ambiguous or missing local times
            None => Utc.from_utc_datetime(&(local - self.offset)),
        }
    }

    /// UTC instant at which a business-local day starts
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        self.to_utc(date.and_time(NaiveTime::MIN))
    }
}

impl Default for BusinessTimezone {
    fn default() -> Self {
        Self::from_offset_minutes(DEFAULT_OFFSET_MINUTES).unwrap_or_else(Self::utc)
    }
}

/// Format timestamp as ISO 8601 UTC for API responses
pub fn format_iso8601(utc_time: DateTime<Utc>) -> String {
    utc_time.to_rfc3339()
}
