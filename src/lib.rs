//! KD Connect back-office core
//!
//! Tiered M-PESA fee lookup, KD→KES payout calculation, monthly analytics
//! and report schedule dispatch.

pub mod app;
pub mod config;
pub mod core;
pub mod modules;

pub use app::AppServices;
pub use modules::analytics;
pub use modules::fees;
pub use modules::schedules;
pub use modules::transactions;
