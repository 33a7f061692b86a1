use super::derive::WEIGHT_PER_BAG_KG;
use super::model::DerivedRecord;

/// Headline numbers for a set of records. Missing values count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AggregateSummary {
    pub records: usize,
    pub total_bags: f64,
    pub total_am: f64,
    pub total_pm: f64,
    pub total_weight: f64,
    pub weight_am: f64,
    pub weight_pm: f64,
}

impl AggregateSummary {
    /// Morning share of the AM/PM split, in `[0, 1]`. Zero when both are zero.
    pub fn am_share(&self) -> f64 {
        share(self.total_am, self.total_am + self.total_pm)
    }

    pub fn pm_share(&self) -> f64 {
        share(self.total_pm, self.total_am + self.total_pm)
    }
}

fn share(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole
    } else {
        0.0
    }
}

/// Sum counts over present values and convert to weights.
pub fn summarize(records: &[DerivedRecord]) -> AggregateSummary {
    let sum = |f: fn(&DerivedRecord) -> Option<f64>| -> f64 { records.iter().filter_map(f).sum() };

    let total_bags = sum(|r| r.total_bags);
    let total_am = sum(|r| r.record.collection_am);
    let total_pm = sum(|r| r.record.collection_pm);

    AggregateSummary {
        records: records.len(),
        total_bags,
        total_am,
        total_pm,
        total_weight: total_bags * WEIGHT_PER_BAG_KG,
        weight_am: total_am * WEIGHT_PER_BAG_KG,
        weight_pm: total_pm * WEIGHT_PER_BAG_KG,
    }
}
