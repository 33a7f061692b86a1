use std::collections::BTreeSet;

use super::model::DerivedRecord;

// ---------------------------------------------------------------------------
// FilterSelection – which periods the user has ticked
// ---------------------------------------------------------------------------

/// Set of selected period labels. Empty means "nothing selected", which
/// hides every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    periods: BTreeSet<String>,
}

impl FilterSelection {
    /// Select every given period (the dashboard default).
    pub fn all<I, S>(periods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            periods: periods.into_iter().map(Into::into).collect(),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn contains(&self, period: &str) -> bool {
        self.periods.contains(period)
    }

    /// Flip one period in or out of the selection.
    pub fn toggle(&mut self, period: &str) {
        if !self.periods.remove(period) {
            self.periods.insert(period.to_string());
        }
    }

    pub fn set(&mut self, period: &str, selected: bool) {
        if selected {
            self.periods.insert(period.to_string());
        } else {
            self.periods.remove(period);
        }
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

/// Distinct period labels in first-appearance order, for the filter control.
pub fn distinct_periods(records: &[DerivedRecord]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.period()))
        .map(|r| r.period().to_string())
        .collect()
}

/// Records whose period is selected, in their original relative order.
pub fn filter(records: &[DerivedRecord], selection: &FilterSelection) -> Vec<DerivedRecord> {
    records
        .iter()
        .filter(|r| selection.contains(r.period()))
        .cloned()
        .collect()
}
