pub mod aggregator;
pub mod analytics_service;
pub mod dashboard;
pub mod distribution;

pub use aggregator::{percent_change, AnalyticsAggregator, MAX_WINDOW_MONTHS};
pub use analytics_service::{AnalyticsService, MonthlyAnalytics};
pub use distribution::{amount_distribution, default_amount_ranges};
