// Property-based tests for month bucketing and trend figures

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use kdconnect::core::BusinessTimezone;
use kdconnect::modules::analytics::models::AnalyticsRecord;
use kdconnect::modules::analytics::services::{
    amount_distribution, default_amount_ranges, percent_change, AnalyticsAggregator,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

/// Records spread over the 400 days before the reference date
fn record_strategy() -> impl Strategy<Value = Vec<AnalyticsRecord>> {
    let reference = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    prop::collection::vec((0i64..=400, 0i64..=1440, 1i64..=500_000), 0..120).prop_map(
        move |entries| {
            entries
                .into_iter()
                .map(|(days_back, minutes, fils)| AnalyticsRecord {
                    created_at: reference - Duration::days(days_back) - Duration::minutes(minutes),
                    principal_kd: Decimal::new(fils, 3),
                    payout_kes: Decimal::new(fils * 420, 3),
                })
                .collect()
        },
    )
}

#[test]
fn test_empty_input_gives_labeled_zero_buckets() {
    let buckets = AnalyticsAggregator::default()
        .bucket_by_month(&[], 6, reference_date())
        .unwrap();

    let labels: Vec<&str> = buckets.iter().map(|b| b.period_label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["Jan 2024", "Feb 2024", "Mar 2024", "Apr 2024", "May 2024", "Jun 2024"]
    );
    assert!(buckets.iter().all(|b| b.count == 0));
    assert!(buckets.iter().all(|b| b.avg_principal_kd == Decimal::ZERO));
}

#[test]
fn test_month_boundary_uses_business_timezone() {
    // 2024-05-31 22:30 UTC is already June 1st at UTC+3
    let record = AnalyticsRecord {
        created_at: Utc.with_ymd_and_hms(2024, 5, 31, 22, 30, 0).unwrap(),
        principal_kd: Decimal::from(10),
        payout_kes: Decimal::from(4200),
    };

    let local = AnalyticsAggregator::new(BusinessTimezone::default())
        .bucket_by_month(&[record], 2, reference_date())
        .unwrap();
    assert_eq!((local[0].count, local[1].count), (0, 1));

    let utc = AnalyticsAggregator::new(BusinessTimezone::utc())
        .bucket_by_month(&[record], 2, reference_date())
        .unwrap();
    assert_eq!((utc[0].count, utc[1].count), (1, 0));
}

#[test]
fn test_zero_window_is_rejected() {
    assert!(AnalyticsAggregator::default()
        .bucket_by_month(&[], 0, reference_date())
        .is_err());
}

proptest! {
    #[test]
    fn test_bucket_count_and_totals(
        window in 1u32..=24,
        entries in prop::collection::vec((0i64..=400, 1i64..=500_000), 0..200)
    ) {
        let aggregator = AnalyticsAggregator::new(BusinessTimezone::utc());
        // Every record falls inside the trailing 400 days ending on the
        // reference date; keep only those the window covers
        let window_start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
            .checked_sub_months(chrono::Months::new(window - 1))
            .unwrap();
        let reference = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        let records: Vec<AnalyticsRecord> = entries
            .iter()
            .map(|&(days_back, fils)| AnalyticsRecord {
                created_at: reference - Duration::days(days_back),
                principal_kd: Decimal::new(fils, 3),
                payout_kes: Decimal::new(fils * 420, 3),
            })
            .filter(|r| r.created_at >= window_start)
            .collect();

        let buckets = aggregator.bucket_by_month(&records, window, reference_date()).unwrap();

        prop_assert_eq!(buckets.len(), window as usize);
        prop_assert_eq!(buckets.iter().map(|b| b.count).sum::<u64>(), records.len() as u64);
        prop_assert_eq!(
            buckets.iter().map(|b| b.total_principal_kd).sum::<Decimal>(),
            records.iter().map(|r| r.principal_kd).sum::<Decimal>()
        );
        for pair in buckets.windows(2) {
            prop_assert!((pair[0].year, pair[0].month) < (pair[1].year, pair[1].month));
        }
    }

    #[test]
    fn test_rollups_ignore_input_order(
        (records, shuffled) in record_strategy()
            .prop_flat_map(|records| (Just(records.clone()), Just(records).prop_shuffle())),
        window in 1u32..=18
    ) {
        let aggregator = AnalyticsAggregator::default();
        let ranges = default_amount_ranges();
        let mut reversed = records.clone();
        reversed.reverse();

        let buckets = aggregator.bucket_by_month(&records, window, reference_date()).unwrap();
        let distribution = amount_distribution(&records, &ranges);
        let created: Vec<_> = records.iter().map(|r| r.created_at).collect();
        let growth = aggregator.client_growth(&created, window, reference_date()).unwrap();

        for other in [&shuffled, &reversed] {
            prop_assert_eq!(
                &aggregator.bucket_by_month(other, window, reference_date()).unwrap(),
                &buckets
            );
            prop_assert_eq!(&amount_distribution(other, &ranges), &distribution);

            let other_created: Vec<_> = other.iter().map(|r| r.created_at).collect();
            prop_assert_eq!(
                &aggregator.client_growth(&other_created, window, reference_date()).unwrap(),
                &growth
            );
        }
    }

    #[test]
    fn test_percent_change_against_zero_is_zero(current in -1_000_000i64..1_000_000) {
        prop_assert_eq!(percent_change(Decimal::new(current, 2), Decimal::ZERO), Decimal::ZERO);
    }
}
