pub mod fee_repository;

pub use fee_repository::{load_fee_table, FeeRepository, PgFeeRepository};
