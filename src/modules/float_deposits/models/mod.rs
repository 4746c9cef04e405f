pub mod float_deposit;

pub use float_deposit::{FloatDeposit, FloatDepositDiscrepancy};
