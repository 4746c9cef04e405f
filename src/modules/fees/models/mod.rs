pub mod channel;
pub mod fee_bracket;

pub use channel::ChannelType;
pub use fee_bracket::{FeeBracket, TransactionChargeRow};
