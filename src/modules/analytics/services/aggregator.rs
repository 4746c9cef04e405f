use std::collections::HashMap;

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::core::{AppError, BusinessTimezone, Result};
use crate::modules::analytics::models::{AnalyticsBucket, AnalyticsRecord, ClientGrowthPoint};

/// Longest reporting window accepted, ten years of months
pub const MAX_WINDOW_MONTHS: u32 = 120;

/// `(current - previous) / previous × 100`, or zero when there is no
/// positive baseline to compare against
pub fn percent_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous > Decimal::ZERO {
        (current - previous) / previous * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

/// Month-bucketed rollups over raw records
///
/// Calendar months and days are evaluated in one business timezone. Results
/// never depend on the order records are supplied in.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticsAggregator {
    pub(crate) timezone: BusinessTimezone,
}

impl AnalyticsAggregator {
    pub fn new(timezone: BusinessTimezone) -> Self {
        Self { timezone }
    }

    pub fn timezone(&self) -> BusinessTimezone {
        self.timezone
    }

    /// One bucket per calendar month, oldest first: the month containing
    /// `reference_date` and the `window_months - 1` months before it. Empty
    /// months are kept; records outside the window are ignored.
    ///
    /// # Errors
    /// `InvalidArgument` when `window_months` is zero or above
    /// [`MAX_WINDOW_MONTHS`]
    pub fn bucket_by_month(
        &self,
        records: &[AnalyticsRecord],
        window_months: u32,
        reference_date: NaiveDate,
    ) -> Result<Vec<AnalyticsBucket>> {
        let months = month_starts(reference_date, window_months)?;
        let index: HashMap<(i32, u32), usize> = months
            .iter()
            .enumerate()
            .map(|(i, m)| ((m.year(), m.month()), i))
            .collect();

        let mut buckets: Vec<AnalyticsBucket> = months
            .iter()
            .map(|m| AnalyticsBucket::empty(period_label(*m), m.year(), m.month()))
            .collect();

        for record in records {
            let local = self.timezone.local_date(record.created_at);
            if let Some(&i) = index.get(&(local.year(), local.month())) {
                buckets[i].add(record);
            }
        }

        for bucket in &mut buckets {
            bucket.finalize();
        }

        Ok(buckets)
    }

    /// Cumulative number of clients created on or before each month end
    pub fn client_growth(
        &self,
        client_created_at: &[DateTime<Utc>],
        window_months: u32,
        reference_date: NaiveDate,
    ) -> Result<Vec<ClientGrowthPoint>> {
        month_starts(reference_date, window_months)?
            .into_iter()
            .map(|month| {
                let next = month
                    .checked_add_months(Months::new(1))
                    .ok_or_else(|| AppError::invalid_argument("Reporting window out of range"))?;
                let cutoff = self.timezone.start_of_day(next);
                let client_count = client_created_at.iter().filter(|c| **c < cutoff).count() as u64;

                Ok(ClientGrowthPoint {
                    period_label: period_label(month),
                    year: month.year(),
                    month: month.month(),
                    client_count,
                })
            })
            .collect()
    }
}

/// First day of each month in the window, oldest first
fn month_starts(reference_date: NaiveDate, window_months: u32) -> Result<Vec<NaiveDate>> {
    if window_months == 0 {
        return Err(AppError::invalid_argument(
            "Reporting window must cover at least one month",
        ));
    }
    if window_months > MAX_WINDOW_MONTHS {
        return Err(AppError::invalid_argument(format!(
            "Reporting window cannot exceed {} months, got {}",
            MAX_WINDOW_MONTHS, window_months
        )));
    }

    let current = NaiveDate::from_ymd_opt(reference_date.year(), reference_date.month(), 1)
        .ok_or_else(|| AppError::invalid_argument("Invalid reference date"))?;

    (0..window_months)
        .rev()
        .map(|back| {
            current
                .checked_sub_months(Months::new(back))
                .ok_or_else(|| AppError::invalid_argument("Reporting window out of range"))
        })
        .collect()
}

fn period_label(month_start: NaiveDate) -> String {
    month_start.format("%b %Y").to_string()
}
