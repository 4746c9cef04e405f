pub mod dispatcher;
pub mod schedule_matcher;
pub mod schedule_runner;

pub use dispatcher::{HttpReportDispatcher, ReportDispatcher};
pub use schedule_matcher::ScheduleMatcher;
pub use schedule_runner::{DispatchOutcome, DispatchSummary, ScheduleRunner};
