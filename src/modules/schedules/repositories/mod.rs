pub mod schedule_repository;

pub use schedule_repository::{PgScheduleRepository, ScheduleRepository};
