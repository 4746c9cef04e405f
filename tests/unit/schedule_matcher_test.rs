// Property-based tests for exact-minute schedule matching

use chrono::{Datelike, Duration, TimeZone, Timelike, Utc};
use kdconnect::core::BusinessTimezone;
use kdconnect::modules::schedules::models::{Frequency, ReportSchedule, ReportType};
use kdconnect::modules::schedules::services::ScheduleMatcher;
use proptest::prelude::*;
use uuid::Uuid;

fn schedule(frequency: Frequency, dow: Option<u32>, dom: Option<u32>, time: &str) -> ReportSchedule {
    ReportSchedule {
        id: Uuid::new_v4(),
        report_name: "Report".to_string(),
        report_type: ReportType::Clients,
        frequency,
        day_of_week: dow,
        day_of_month: dom,
        time_of_day: time.to_string(),
        email_recipients: vec![],
        is_active: true,
        last_sent_at: None,
    }
}

#[test]
fn test_weekly_monday_scenario() {
    let matcher = ScheduleMatcher::new(BusinessTimezone::utc());
    let weekly = vec![schedule(Frequency::Weekly, Some(1), None, "08:00")];

    // 2024-06-03 is a Monday
    let monday_0800 = Utc.with_ymd_and_hms(2024, 6, 3, 8, 0, 0).unwrap();
    let monday_0801 = Utc.with_ymd_and_hms(2024, 6, 3, 8, 1, 0).unwrap();

    assert_eq!(matcher.due_schedules(&weekly, monday_0800).len(), 1);
    assert!(matcher.due_schedules(&weekly, monday_0801).is_empty());
}

#[test]
fn test_matching_uses_business_local_time() {
    let matcher = ScheduleMatcher::default();
    let daily = vec![schedule(Frequency::Daily, None, None, "08:00")];

    // 05:00 UTC is 08:00 at UTC+3
    assert_eq!(
        matcher
            .due_schedules(&daily, Utc.with_ymd_and_hms(2024, 6, 3, 5, 0, 0).unwrap())
            .len(),
        1
    );
    assert!(matcher
        .due_schedules(&daily, Utc.with_ymd_and_hms(2024, 6, 3, 8, 0, 0).unwrap())
        .is_empty());
}

proptest! {
    #[test]
    fn test_due_only_when_active_and_minute_matches(
        minutes in 0i64..(60 * 24 * 366),
        hour in 0u32..24,
        minute in 0u32..60,
        active in any::<bool>()
    ) {
        let matcher = ScheduleMatcher::new(BusinessTimezone::utc());
        let mut daily = schedule(Frequency::Daily, None, None, &format!("{:02}:{:02}", hour, minute));
        daily.is_active = active;

        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes);
        let due = matcher.is_due(&daily, now);

        prop_assert_eq!(due, active && now.hour() == hour && now.minute() == minute);
    }

    #[test]
    fn test_weekly_and_monthly_need_matching_day(
        days in 0i64..366,
        dow in 0u32..7,
        dom in 1u32..=31
    ) {
        let matcher = ScheduleMatcher::new(BusinessTimezone::utc());
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap() + Duration::days(days);

        let weekly = schedule(Frequency::Weekly, Some(dow), None, "09:30");
        let monthly = schedule(Frequency::Monthly, None, Some(dom), "09:30");

        prop_assert_eq!(matcher.is_due(&weekly, now), now.weekday().num_days_from_sunday() == dow);
        prop_assert_eq!(matcher.is_due(&monthly, now), now.day() == dom);
    }
}
