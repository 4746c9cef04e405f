pub mod fee_resolver;
pub mod fee_table;

pub use fee_resolver::{FeeOutcome, FeeResolution, FeeResolver};
pub use fee_table::{FeeTable, FeeTableIssue, FeeTableIssueKind};
