pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{ChannelType, FeeBracket};
pub use services::{FeeOutcome, FeeResolver, FeeTable};
