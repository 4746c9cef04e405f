// Property-based tests for tiered fee resolution over the built-in tariff

use std::sync::Arc;

use kdconnect::core::AppError;
use kdconnect::modules::fees::models::{ChannelType, FeeBracket};
use kdconnect::modules::fees::services::{FeeOutcome, FeeResolver, FeeTable};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn resolver() -> FeeResolver {
    FeeResolver::new(Arc::new(FeeTable::standard()))
}

fn channel_strategy() -> impl Strategy<Value = ChannelType> {
    prop_oneof![Just(ChannelType::SendMoney), Just(ChannelType::Paybill)]
}

/// KES amount with up to two decimal places
fn amount_strategy(max_cents: i64) -> impl Strategy<Value = Decimal> {
    (0i64..=max_cents).prop_map(|cents| Decimal::new(cents, 2))
}

#[test]
fn test_send_money_inside_bracket() {
    assert_eq!(resolver().resolve_fee(dec!(300), ChannelType::SendMoney).unwrap(), dec!(7));
}

#[test]
fn test_saturates_at_top_bracket() {
    let resolver = resolver();
    let top = resolver.resolve_fee(dec!(250000), ChannelType::SendMoney).unwrap();
    let above = resolver.resolve(dec!(300000), ChannelType::SendMoney).unwrap();

    assert_eq!(top, dec!(108));
    assert_eq!(above.fee, top);
    assert_eq!(above.outcome, FeeOutcome::Saturated);
}

#[test]
fn test_cents_past_a_tier_boundary_fall_in_the_gap() {
    let resolution = resolver().resolve(dec!(500.55), ChannelType::Paybill).unwrap();
    assert_eq!(resolution.fee, Decimal::ZERO);
    assert_eq!(resolution.outcome, FeeOutcome::ConfigurationGap);
}

#[test]
fn test_negative_amount_is_invalid() {
    let err = resolver().resolve_fee(dec!(-5), ChannelType::SendMoney).unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));
}

#[test]
fn test_synthetic_table_without_backend() {
    let table = FeeTable::new(vec![
        FeeBracket::new(ChannelType::Paybill, dec!(0), dec!(999), dec!(1)).unwrap(),
        FeeBracket::new(ChannelType::Paybill, dec!(1000), dec!(1999), dec!(2)).unwrap(),
    ]);
    let resolver = FeeResolver::new(Arc::new(table));

    assert_eq!(resolver.resolve_fee(dec!(1500), ChannelType::Paybill).unwrap(), dec!(2));
    // No send-money tiers configured
    let gap = resolver.resolve(dec!(1500), ChannelType::SendMoney).unwrap();
    assert_eq!(gap.fee, Decimal::ZERO);
    assert_eq!(gap.outcome, FeeOutcome::ConfigurationGap);
}

proptest! {
    #[test]
    fn test_fee_is_non_negative(
        amount in amount_strategy(40_000_000),
        channel in channel_strategy()
    ) {
        let fee = resolver().resolve_fee(amount, channel).unwrap();
        prop_assert!(fee >= Decimal::ZERO);
    }

    #[test]
    fn test_fee_is_constant_within_bracket(
        index in 0usize..20,
        a in 0u32..=10_000,
        b in 0u32..=10_000,
        channel in channel_strategy()
    ) {
        let resolver = resolver();
        let brackets = resolver.table().brackets_for(channel);
        let bracket = &brackets[index % brackets.len()];
        let span = bracket.max_amount - bracket.min_amount;

        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let at = |step: u32| bracket.min_amount + span * Decimal::from(step) / Decimal::from(10_000);

        let fee_lo = resolver.resolve_fee(at(lo), channel).unwrap();
        let fee_hi = resolver.resolve_fee(at(hi), channel).unwrap();
        prop_assert_eq!(fee_lo, fee_hi);
        prop_assert_eq!(fee_lo, bracket.fee);
    }

    #[test]
    fn test_fee_saturates_above_every_bracket(
        excess in 1i64..10_000_000,
        channel in channel_strategy()
    ) {
        let resolver = resolver();
        let top = resolver.table().brackets_for(channel).last().unwrap().clone();
        let resolution = resolver.resolve(top.max_amount + Decimal::from(excess), channel).unwrap();

        prop_assert_eq!(resolution.fee, top.fee);
        prop_assert_eq!(resolution.outcome, FeeOutcome::Saturated);
    }

    // Whole shillings: the built-in tiers leave no gaps between integers
    #[test]
    fn test_fee_never_decreases_with_amount(
        a in 0i64..=300_000,
        b in 0i64..=300_000,
        channel in channel_strategy()
    ) {
        let (a, b) = (Decimal::from(a), Decimal::from(b));
        let resolver = resolver();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            resolver.resolve_fee(lo, channel).unwrap() <= resolver.resolve_fee(hi, channel).unwrap()
        );
    }

    #[test]
    fn test_amount_between_tiers_is_zero_fee_gap(
        index in 0usize..20,
        cents in 1i64..=99,
        channel in channel_strategy()
    ) {
        let resolver = resolver();
        let brackets = resolver.table().brackets_for(channel);
        let i = index % (brackets.len() - 1);
        let amount = brackets[i].max_amount + Decimal::new(cents, 2);
        prop_assume!(amount < brackets[i + 1].min_amount);

        let resolution = resolver.resolve(amount, channel).unwrap();
        prop_assert_eq!(resolution.fee, Decimal::ZERO);
        prop_assert_eq!(resolution.outcome, FeeOutcome::ConfigurationGap);
    }
}
