pub mod payout_calculator;

pub use payout_calculator::{PayoutBreakdown, PayoutCalculator};
