use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::data::model::{format_number, DerivedRecord};
use crate::data::{AggregateSummary, DashboardView};

/// Column headers of the cleaned table, shared by the report and the UI.
pub const TABLE_HEADERS: [&str; 7] = [
    "Month",
    "AM (bags)",
    "PM (bags)",
    "Total (bags)",
    "AM (kg)",
    "PM (kg)",
    "Total (kg)",
];

/// Arrow batch of the cleaned table, one row per record.
pub fn records_to_batch(records: &[DerivedRecord]) -> Result<RecordBatch, ArrowError> {
    let number_col = |f: fn(&DerivedRecord) -> Option<f64>| -> ArrayRef {
        Arc::new(Float64Array::from(records.iter().map(f).collect::<Vec<_>>()))
    };

    let fields: Vec<Field> = TABLE_HEADERS
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let ty = if i == 0 { DataType::Utf8 } else { DataType::Float64 };
            Field::new(*name, ty, i != 0)
        })
        .collect();

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(
            records.iter().map(|r| r.period()).collect::<Vec<_>>(),
        )),
        number_col(|r| r.record.collection_am),
        number_col(|r| r.record.collection_pm),
        number_col(|r| r.total_bags),
        number_col(|r| r.weight_am),
        number_col(|r| r.weight_pm),
        number_col(|r| r.weight_total),
    ];

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
}

/// The three headline metrics, one per line.
pub fn headline(summary: &AggregateSummary) -> String {
    format!(
        "Total bags: {}\nTotal weight: {} kg\nAM / PM: {} AM / {} PM",
        format_number(summary.total_bags),
        format_number(summary.total_weight),
        format_number(summary.total_am),
        format_number(summary.total_pm),
    )
}

/// Plain-text report: headline metrics followed by the cleaned table.
pub fn render(view: &DashboardView) -> Result<String, ArrowError> {
    let mut out = headline(&view.summary);
    out.push_str("\n\n");
    if view.records.is_empty() {
        out.push_str("(no records selected)\n");
        return Ok(out);
    }
    let batch = records_to_batch(&view.records)?;
    out.push_str(&format!("{}\n", pretty_format_batches(&[batch])?));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::derive::derive_all;
    use crate::data::model::RawRecord;
    use crate::data::summary::summarize;

    fn view() -> DashboardView {
        let records = derive_all(vec![
            RawRecord {
                period: "Jan".into(),
                collection_am: Some(10.0),
                collection_pm: Some(5.0),
                total: Some(15.0),
            },
            RawRecord {
                period: "Feb".into(),
                collection_am: None,
                collection_pm: Some(12.0),
                total: Some(20.0),
            },
        ]);
        let summary = summarize(&records);
        DashboardView { records, summary }
    }

    #[test]
    fn batch_has_one_row_per_record() {
        let v = view();
        let batch = records_to_batch(&v.records).unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), TABLE_HEADERS.len());
        assert_eq!(batch.column(4).null_count(), 1);
    }

    #[test]
    fn report_lists_metrics_and_rows() {
        let text = render(&view()).unwrap();
        assert!(text.contains("Total bags: 35"), "{text}");
        assert!(text.contains("Total weight: 700 kg"), "{text}");
        assert!(text.contains("AM / PM: 10 AM / 17 PM"), "{text}");
        assert!(text.contains("Jan"));
        assert!(text.contains("Feb"));
    }

    #[test]
    fn table_follows_the_metrics() {
        let text = render(&view()).unwrap();
        let metrics_end = text.find("\n\n").unwrap();
        assert!(text[metrics_end..].contains("Month"), "{text}");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn empty_view_reports_zeros() {
        let text = render(&DashboardView::default()).unwrap();
        assert!(text.starts_with("Total bags: 0\nTotal weight: 0 kg"), "{text}");
        assert!(text.contains("no records selected"));
    }
}
