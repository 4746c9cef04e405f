pub mod report_schedule;

pub use report_schedule::{Frequency, ReportSchedule, ReportScheduleRow, ReportType};
