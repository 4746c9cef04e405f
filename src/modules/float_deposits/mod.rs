pub mod models;
pub mod repositories;

pub use models::FloatDeposit;
pub use repositories::FloatDepositRepository;
