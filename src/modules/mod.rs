pub mod analytics;
pub mod clients;
pub mod fees;
pub mod float_deposits;
pub mod health;
pub mod schedules;
pub mod transactions;
