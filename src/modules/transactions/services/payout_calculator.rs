use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::{AppError, Currency, Result};
use crate::modules::fees::models::ChannelType;
use crate::modules::fees::services::{FeeOutcome, FeeResolver};
use crate::modules::transactions::models::Transaction;

/// Converted amount, fee and final payout for one transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PayoutBreakdown {
    pub amount_kes: Decimal,
    pub fee_kes: Decimal,
    pub payout_kes: Decimal,
    /// How the fee was obtained; `None` when the fee was entered manually
    pub fee_outcome: Option<FeeOutcome>,
}

/// Combines principal, rate and tiered fee into the payout figures
///
/// Called on every form edit and again before a transaction is stored, so it
/// must stay free of side effects.
#[derive(Debug, Clone)]
pub struct PayoutCalculator {
    resolver: FeeResolver,
}

impl PayoutCalculator {
    pub fn new(resolver: FeeResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &FeeResolver {
        &self.resolver
    }

    /// `amount_kes = round(principal_kd × rate, 2)`, fee looked up on
    /// `amount_kes`, `payout_kes = amount_kes + fee_kes`
    ///
    /// # Errors
    /// `InvalidArgument` unless both `principal_kd` and `rate_kes_per_kd`
    /// are strictly positive
    pub fn compute_payout(
        &self,
        principal_kd: Decimal,
        rate_kes_per_kd: Decimal,
        channel: ChannelType,
    ) -> Result<PayoutBreakdown> {
        self.compute_payout_with_override(principal_kd, rate_kes_per_kd, channel, None)
    }

    /// Same as [`compute_payout`](Self::compute_payout) but a supplied fee
    /// replaces the tiered lookup (e.g. a fee column in an imported CSV)
    pub fn compute_payout_with_override(
        &self,
        principal_kd: Decimal,
        rate_kes_per_kd: Decimal,
        channel: ChannelType,
        fee_override: Option<Decimal>,
    ) -> Result<PayoutBreakdown> {
        if principal_kd <= Decimal::ZERO {
            return Err(AppError::invalid_argument(format!(
                "Principal must be greater than zero, got {}",
                principal_kd
            )));
        }
        if rate_kes_per_kd <= Decimal::ZERO {
            return Err(AppError::invalid_argument(format!(
                "Rate must be greater than zero, got {}",
                rate_kes_per_kd
            )));
        }

        let amount_kes = principal_kd
            .checked_mul(rate_kes_per_kd)
            .map(|amount| Currency::KES.round(amount))
            .ok_or_else(|| {
                AppError::invalid_argument(format!(
                    "Converted amount overflows: {} × {}",
                    principal_kd, rate_kes_per_kd
                ))
            })?;

        let (fee_kes, fee_outcome) = match fee_override {
            Some(fee) if fee < Decimal::ZERO => {
                return Err(AppError::invalid_argument(format!(
                    "Fee override cannot be negative, got {}",
                    fee
                )));
            }
            Some(fee) => (fee, None),
            None => {
                let resolution = self.resolver.resolve(amount_kes, channel)?;
                (resolution.fee, Some(resolution.outcome))
            }
        };

        let payout_kes = amount_kes.checked_add(fee_kes).ok_or_else(|| {
            AppError::invalid_argument(format!(
                "Payout overflows: {} + {}",
                amount_kes, fee_kes
            ))
        })?;

        Ok(PayoutBreakdown {
            amount_kes,
            fee_kes,
            payout_kes,
            fee_outcome,
        })
    }

    /// Recompute and write the KES fields onto a transaction before it is
    /// persisted. A `fee_override` keeps a manually entered fee. Entries
    /// without an M-PESA channel are priced on the send money tariff.
    pub fn apply_to(
        &self,
        transaction: &mut Transaction,
        fee_override: Option<Decimal>,
    ) -> Result<PayoutBreakdown> {
        let breakdown = self.compute_payout_with_override(
            transaction.principal_kd,
            transaction.rate_kes_per_kd,
            transaction.channel.unwrap_or_default(),
            fee_override,
        )?;

        transaction.amount_kes = breakdown.amount_kes;
        transaction.fee_kes = breakdown.fee_kes;
        transaction.payout_kes = breakdown.payout_kes;

        Ok(breakdown)
    }
}
