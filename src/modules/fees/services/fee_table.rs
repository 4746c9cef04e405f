use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::modules::fees::models::{ChannelType, FeeBracket};

/// Published tariffs bound tiers on whole shillings (1-49, 50-100, ...)
const TIER_STEP: Decimal = Decimal::ONE;

/// Ordered fee brackets per channel
///
/// The table is plain data handed to the resolver; there is no global
/// instance. Brackets within a channel are kept sorted by `min_amount`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeTable {
    brackets: BTreeMap<ChannelType, Vec<FeeBracket>>,
}

/// Kind of data-quality problem between two neighbouring brackets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeTableIssueKind {
    Overlap,
    Gap,
}

/// A problem between two neighbouring brackets of one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeTableIssue {
    pub channel: ChannelType,
    pub kind: FeeTableIssueKind,
    pub lower: FeeBracket,
    pub upper: FeeBracket,
}

impl FeeTable {
    pub fn new(brackets: impl IntoIterator<Item = FeeBracket>) -> Self {
        let mut table: BTreeMap<ChannelType, Vec<FeeBracket>> = BTreeMap::new();
        for bracket in brackets {
            table.entry(bracket.channel).or_default().push(bracket);
        }
        for list in table.values_mut() {
            list.sort_by(|a, b| {
                a.min_amount
                    .cmp(&b.min_amount)
                    .then(a.max_amount.cmp(&b.max_amount))
            });
        }
        Self { brackets: table }
    }

    /// Brackets for a channel, ascending by `min_amount`. Unknown channels
    /// yield an empty slice.
    pub fn brackets_for(&self, channel: ChannelType) -> &[FeeBracket] {
        self.brackets
            .get(&channel)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.brackets.values().all(Vec::is_empty)
    }

    pub fn len(&self) -> usize {
        self.brackets.values().map(Vec::len).sum()
    }

    /// Overlaps and gaps between neighbouring brackets. Never fails: the
    /// resolver copes with both, these are reported for the settings screen.
    pub fn validate(&self) -> Vec<FeeTableIssue> {
        let mut issues = Vec::new();
        for (channel, list) in &self.brackets {
            for pair in list.windows(2) {
                let (lower, upper) = (&pair[0], &pair[1]);
                let kind = if upper.min_amount <= lower.max_amount {
                    FeeTableIssueKind::Overlap
                } else if upper.min_amount - lower.max_amount > TIER_STEP {
                    FeeTableIssueKind::Gap
                } else {
                    continue;
                };
                issues.push(FeeTableIssue {
                    channel: *channel,
                    kind,
                    lower: lower.clone(),
                    upper: upper.clone(),
                });
            }
        }
        issues
    }

    /// Built-in M-PESA tariff
    pub fn standard() -> Self {
        const SEND_MONEY: &[(i64, i64, i64)] = &[
            (1, 49, 0),
            (50, 100, 0),
            (101, 500, 7),
            (501, 1000, 13),
            (1001, 1500, 23),
            (1501, 2500, 33),
            (2501, 3500, 53),
            (3501, 5000, 57),
            (5001, 7500, 78),
            (7501, 10000, 90),
            (10001, 15000, 100),
            (15001, 20000, 105),
            (20001, 35000, 108),
            (35001, 50000, 108),
            (50001, 250000, 108),
        ];
        const PAYBILL: &[(i64, i64, i64)] = &[
            (1, 49, 0),
            (50, 100, 0),
            (101, 500, 5),
            (501, 1000, 10),
            (1001, 1500, 15),
            (1501, 2500, 20),
            (2501, 3500, 25),
            (3501, 5000, 34),
            (5001, 7500, 42),
            (7501, 10000, 48),
            (10001, 15000, 57),
            (15001, 20000, 62),
            (20001, 25000, 67),
            (25001, 30000, 72),
            (30001, 35000, 83),
            (35001, 40000, 99),
            (40001, 45000, 103),
            (45001, 50000, 108),
            (50001, 70000, 108),
            (70001, 250000, 108),
        ];

        let tiers = |channel: ChannelType, rows: &'static [(i64, i64, i64)]| {
            rows.iter().map(move |&(min, max, fee)| FeeBracket {
                channel,
                min_amount: Decimal::from(min),
                max_amount: Decimal::from(max),
                fee: Decimal::from(fee),
            })
        };

        Self::new(
            tiers(ChannelType::SendMoney, SEND_MONEY).chain(tiers(ChannelType::Paybill, PAYBILL)),
        )
    }
}
