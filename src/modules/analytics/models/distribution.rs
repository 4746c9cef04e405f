use rust_decimal::Decimal;
use serde::Serialize;

/// Label of the bucket collecting amounts outside every named range
pub const OTHER_LABEL: &str = "Other";

/// A named principal range, inclusive on both ends; `max: None` is open-ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionRange {
    pub name: String,
    pub min: Decimal,
    pub max: Option<Decimal>,
}

impl DistributionRange {
    pub fn new(name: impl Into<String>, min: Decimal, max: Option<Decimal>) -> Self {
        Self {
            name: name.into(),
            min,
            max,
        }
    }

    pub fn contains(&self, amount: Decimal) -> bool {
        amount >= self.min && self.max.map_or(true, |max| amount <= max)
    }
}

/// Count of records falling in one named range (or in "Other")
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionBucket {
    pub name: String,
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
    pub count: u64,
}
