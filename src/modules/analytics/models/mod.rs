pub mod dashboard;
pub mod distribution;
pub mod monthly;

pub use dashboard::DashboardSummary;
pub use distribution::{DistributionBucket, DistributionRange, OTHER_LABEL};
pub use monthly::{AnalyticsBucket, AnalyticsRecord, ClientGrowthPoint};
