use super::model::{DerivedRecord, RawRecord};

/// Fixed conversion factor: one bag weighs 20 kg.
pub const WEIGHT_PER_BAG_KG: f64 = 20.0;

/// Bag count to kilograms. Missing stays missing.
pub fn bags_to_kg(bags: Option<f64>) -> Option<f64> {
    bags.map(|b| b * WEIGHT_PER_BAG_KG)
}

/// Total bags for a record: the supplied total when present, otherwise
/// AM + PM when both shifts are known.
pub fn resolve_total(record: &RawRecord) -> Option<f64> {
    record.total.or_else(|| match (record.collection_am, record.collection_pm) {
        (Some(am), Some(pm)) => Some(am + pm),
        _ => None,
    })
}

/// Attach the weight fields to a cleaned record.
pub fn derive(record: RawRecord) -> DerivedRecord {
    let total_bags = resolve_total(&record);
    DerivedRecord {
        weight_am: bags_to_kg(record.collection_am),
        weight_pm: bags_to_kg(record.collection_pm),
        weight_total: bags_to_kg(total_bags),
        total_bags,
        record,
    }
}

pub fn derive_all(records: impl IntoIterator<Item = RawRecord>) -> Vec<DerivedRecord> {
    records.into_iter().map(derive).collect()
}
