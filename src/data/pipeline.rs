use std::path::Path;

use crate::config::SourceOptions;
use crate::error::{FieldCoercionWarning, Result};

use super::clean::clean_reporting;
use super::derive::derive_all;
use super::filter::{distinct_periods, filter, FilterSelection};
use super::loader::load_file;
use super::model::{DerivedRecord, RawTable};
use super::summary::{summarize, AggregateSummary};

// ---------------------------------------------------------------------------
// Pipeline outputs
// ---------------------------------------------------------------------------

/// Everything the dashboard needs from one input file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Cleaned and derived records, in source order.
    pub records: Vec<DerivedRecord>,
    /// Distinct periods in first-appearance order.
    pub periods: Vec<String>,
    /// Trimmed column headers found in the file, in source order.
    pub headers: Vec<String>,
    pub warnings: Vec<FieldCoercionWarning>,
}

impl Dataset {
    pub fn from_table(table: &RawTable, total_marker: &str) -> Self {
        let cleaned = clean_reporting(table, total_marker);
        let records = derive_all(cleaned.records);
        let periods = distinct_periods(&records);
        Dataset {
            records,
            periods,
            headers: table.headers.clone(),
            warnings: cleaned.warnings,
        }
    }

    /// Every period selected.
    pub fn default_selection(&self) -> FilterSelection {
        FilterSelection::all(self.periods.iter().cloned())
    }

    /// Filter and summarize for the given selection.
    pub fn view(&self, selection: &FilterSelection) -> DashboardView {
        let records = filter(&self.records, selection);
        let summary = summarize(&records);
        DashboardView { records, summary }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The filtered records and their totals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    pub records: Vec<DerivedRecord>,
    pub summary: AggregateSummary,
}

// ---------------------------------------------------------------------------
// CollectionDataPipeline
// ---------------------------------------------------------------------------

/// Load → clean → derive. Stateless apart from its source options, so it is
/// simply re-run whenever a new file is opened.
#[derive(Debug, Clone, Default)]
pub struct CollectionDataPipeline {
    pub options: SourceOptions,
}

impl CollectionDataPipeline {
    pub fn new(options: SourceOptions) -> Self {
        Self { options }
    }

    pub fn load(&self, path: &Path) -> Result<RawTable> {
        load_file(path, &self.options)
    }

    /// Run the whole pipeline. Fails before producing any records when the
    /// file is unreadable or lacks the period column.
    pub fn run(&self, path: &Path) -> Result<Dataset> {
        let table = self.load(path)?;
        let dataset = Dataset::from_table(&table, &self.options.total_marker);
        if !dataset.warnings.is_empty() {
            log::warn!(
                "{} numeric cell(s) in {} could not be parsed",
                dataset.warnings.len(),
                path.display()
            );
        }
        log::info!(
            "{} records across {} periods",
            dataset.len(),
            dataset.periods.len()
        );
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnNames;
    use crate::data::model::CellValue;
    use crate::data::schema::build_table;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn num(v: f64) -> CellValue {
        CellValue::Number(v)
    }

    fn jan_feb_total() -> Dataset {
        let table = build_table(
            ["Mês", "Coleta AM", "Coleta PM", "Total de Sacos"],
            vec![
                vec![text("Jan"), num(10.0), num(5.0), num(15.0)],
                vec![text("Feb"), num(8.0), num(12.0), num(20.0)],
                vec![text("Total"), num(18.0), num(17.0), num(35.0)],
            ],
            &ColumnNames::default(),
        )
        .unwrap();
        Dataset::from_table(&table, "Total")
    }

    #[test]
    fn jan_feb_scenario() {
        let ds = jan_feb_total();
        assert_eq!(ds.periods, vec!["Jan", "Feb"]);
        assert_eq!(ds.headers, vec!["Mês", "Coleta AM", "Coleta PM", "Total de Sacos"]);

        let view = ds.view(&FilterSelection::all(["Jan", "Feb"]));
        let s = view.summary;
        assert_eq!(s.total_am, 18.0);
        assert_eq!(s.total_pm, 17.0);
        assert_eq!(s.total_bags, 35.0);
        assert_eq!(s.weight_am, 360.0);
        assert_eq!(s.weight_pm, 340.0);
        assert_eq!(s.total_weight, 700.0);
    }

    #[test]
    fn headers_are_trimmed_and_keep_extra_columns() {
        let table = build_table(
            [" Mês", "Observação ", "Coleta AM"],
            vec![vec![text("Jan"), text("chuva"), num(3.0)]],
            &ColumnNames::default(),
        )
        .unwrap();
        let ds = Dataset::from_table(&table, "Total");
        assert_eq!(ds.headers, vec!["Mês", "Observação", "Coleta AM"]);
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn default_selection_shows_everything() {
        let ds = jan_feb_total();
        let view = ds.view(&ds.default_selection());
        assert_eq!(view.records, ds.records);
    }

    #[test]
    fn empty_selection_scenario() {
        let ds = jan_feb_total();
        let view = ds.view(&FilterSelection::none());
        assert!(view.records.is_empty());
        assert_eq!(view.summary, AggregateSummary::default());
    }

    #[test]
    fn non_numeric_am_scenario() {
        let table = build_table(
            ["Mês", "Coleta AM", "Coleta PM", "Total de Sacos"],
            vec![
                vec![text("Jan"), text("n/a"), num(5.0), num(15.0)],
                vec![text("Feb"), num(8.0), num(12.0), num(20.0)],
            ],
            &ColumnNames::default(),
        )
        .unwrap();
        let ds = Dataset::from_table(&table, "Total");
        assert_eq!(ds.records[0].weight_am, None);
        assert_eq!(ds.warnings.len(), 1);

        let s = ds.view(&ds.default_selection()).summary;
        assert_eq!(s.total_am, 8.0);
        assert_eq!(s.total_pm, 17.0);
    }
}
