pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Frequency, ReportSchedule, ReportType};
pub use services::{ScheduleMatcher, ScheduleRunner};
