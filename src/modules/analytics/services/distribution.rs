use rust_decimal::Decimal;

use crate::modules::analytics::models::{
    AnalyticsRecord, DistributionBucket, DistributionRange, OTHER_LABEL,
};

/// Ranges around the common link amounts shown on the dashboard
pub fn default_amount_ranges() -> Vec<DistributionRange> {
    vec![
        DistributionRange::new("10 KD", Decimal::from(9), Some(Decimal::from(11))),
        DistributionRange::new("25 KD", Decimal::from(24), Some(Decimal::from(26))),
        DistributionRange::new("50 KD", Decimal::from(49), Some(Decimal::from(51))),
        DistributionRange::new("100 KD", Decimal::from(99), Some(Decimal::from(101))),
        DistributionRange::new("200+ KD", Decimal::from(200), None),
    ]
}

/// Count records per named principal range
///
/// A record goes to the first range containing its principal, otherwise to
/// the trailing "Other" bucket, so the counts always add up to
/// `records.len()`.
pub fn amount_distribution(
    records: &[AnalyticsRecord],
    ranges: &[DistributionRange],
) -> Vec<DistributionBucket> {
    let mut counts = vec![0u64; ranges.len() + 1];

    for record in records {
        let slot = ranges
            .iter()
            .position(|r| r.contains(record.principal_kd))
            .unwrap_or(ranges.len());
        counts[slot] += 1;
    }

    ranges
        .iter()
        .map(|r| (r.name.clone(), Some(r.min), r.max))
        .chain(std::iter::once((OTHER_LABEL.to_string(), None, None)))
        .zip(counts)
        .map(|((name, min, max), count)| DistributionBucket {
            name,
            min,
            max,
            count,
        })
        .collect()
}
