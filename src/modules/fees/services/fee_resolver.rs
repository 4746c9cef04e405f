use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::{AppError, Result};
use crate::modules::fees::models::{ChannelType, FeeBracket};
use crate::modules::fees::services::FeeTable;

/// How a fee was arrived at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeeOutcome {
    /// Exactly one bracket contains the amount
    Matched,
    /// Amount is above every bracket; the top bracket's fee applies
    Saturated,
    /// No bracket contains the amount and it is not above the table
    /// (below the first bracket, between two brackets, or an empty table);
    /// fee defaults to zero
    ConfigurationGap,
    /// Several brackets contain the amount; the lowest one was chosen
    Ambiguous { candidates: usize },
}

impl FeeOutcome {
    /// Outcomes that point at bad fee configuration
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::ConfigurationGap | Self::Ambiguous { .. })
    }
}

/// Resolved fee together with the bracket that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeResolution {
    pub fee: Decimal,
    pub outcome: FeeOutcome,
    pub bracket: Option<FeeBracket>,
}

impl FeeResolution {
    fn from_bracket(bracket: &FeeBracket, outcome: FeeOutcome) -> Self {
        Self {
            fee: bracket.fee,
            outcome,
            bracket: Some(bracket.clone()),
        }
    }
}

/// Looks up the flat fee for a KES amount on a channel
///
/// Pure over the injected table: identical inputs always give identical
/// results, so form recalculation and save-time recalculation agree.
#[derive(Debug, Clone)]
pub struct FeeResolver {
    table: Arc<FeeTable>,
}

impl FeeResolver {
    pub fn new(table: Arc<FeeTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &FeeTable {
        &self.table
    }

    /// Fee for `amount` KES on `channel`
    ///
    /// # Errors
    /// `InvalidArgument` when `amount` is negative. Missing configuration is
    /// never an error: it resolves to a zero fee.
    pub fn resolve_fee(&self, amount: Decimal, channel: ChannelType) -> Result<Decimal> {
        self.resolve(amount, channel).map(|resolution| resolution.fee)
    }

    /// Fee for `amount` KES on `channel`, with the outcome explaining it
    pub fn resolve(&self, amount: Decimal, channel: ChannelType) -> Result<FeeResolution> {
        if amount < Decimal::ZERO {
            return Err(AppError::invalid_argument(format!(
                "Fee amount cannot be negative: {}",
                amount
            )));
        }

        let brackets = self.table.brackets_for(channel);

        // Sorted by min_amount, so the first match has the smallest minimum
        let mut matching = brackets.iter().filter(|b| b.contains(amount));
        if let Some(first) = matching.next() {
            let others = matching.count();
            let outcome = if others == 0 {
                FeeOutcome::Matched
            } else {
                FeeOutcome::Ambiguous {
                    candidates: others + 1,
                }
            };
            return Ok(FeeResolution::from_bracket(first, outcome));
        }

        // Only amounts above the whole table take the top bracket's fee
        let top = brackets.iter().max_by(|a, b| a.max_amount.cmp(&b.max_amount));
        match top {
            Some(bracket) if bracket.max_amount < amount => {
                Ok(FeeResolution::from_bracket(bracket, FeeOutcome::Saturated))
            }
            _ => Ok(FeeResolution {
                fee: Decimal::ZERO,
                outcome: FeeOutcome::ConfigurationGap,
                bracket: None,
            }),
        }
    }
}
