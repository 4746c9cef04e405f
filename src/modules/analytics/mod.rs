pub mod controllers;
pub mod models;
pub mod services;

pub use models::{AnalyticsBucket, AnalyticsRecord, DashboardSummary};
pub use services::{AnalyticsAggregator, AnalyticsService};
