pub mod schedule_controller;

pub use schedule_controller::configure;
