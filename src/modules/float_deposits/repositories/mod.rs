pub mod float_deposit_repository;

pub use float_deposit_repository::{FloatDepositRepository, PgFloatDepositRepository};
