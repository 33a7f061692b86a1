use crate::config::ColumnNames;
use crate::error::FieldCoercionWarning;

use super::model::{CellValue, RawRecord, RawTable};
use super::schema::ColumnMap;

/// Records that survived cleaning, plus the numeric cells that did not parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cleaned {
    pub records: Vec<RawRecord>,
    pub warnings: Vec<FieldCoercionWarning>,
}

/// Turn table rows into typed records, in source order.
///
/// Rows without a period label, or labelled `total_marker`, are dropped.
/// Unparseable numeric cells become `None`.
pub fn clean(table: &RawTable, total_marker: &str) -> Vec<RawRecord> {
    clean_reporting(table, total_marker).records
}

/// Like [`clean`], but also returns a warning per unparseable numeric cell.
pub fn clean_reporting(table: &RawTable, total_marker: &str) -> Cleaned {
    let marker = total_marker.trim();
    let cols = table.columns;
    let mut out = Cleaned::default();

    for row in 0..table.len() {
        let Some(period) = table.cell(row, Some(cols.period)).as_label() else {
            continue;
        };
        if period == marker {
            continue;
        }

        let mut number = |col: Option<usize>| -> Option<f64> {
            match table.cell(row, col).coerce_number() {
                Ok(v) => v,
                Err(text) => {
                    let warning = FieldCoercionWarning {
                        row,
                        column: table.header(col).to_string(),
                        text,
                    };
                    log::warn!("{warning}; treating as missing");
                    out.warnings.push(warning);
                    None
                }
            }
        };

        let record = RawRecord {
            collection_am: number(cols.collection_am),
            collection_pm: number(cols.collection_pm),
            total: number(cols.total),
            period,
        };
        out.records.push(record);
    }

    out
}

/// Rebuild a table from typed records, e.g. to re-run [`clean`] on its own
/// output. Headers are the canonical names from `names`.
pub fn table_from_records(records: &[RawRecord], names: &ColumnNames) -> RawTable {
    let num = |v: Option<f64>| v.map(CellValue::Number).unwrap_or(CellValue::Empty);
    RawTable {
        headers: vec![
            names.period.trim().to_string(),
            names.collection_am.trim().to_string(),
            names.collection_pm.trim().to_string(),
            names.total.trim().to_string(),
        ],
        columns: ColumnMap {
            period: 0,
            collection_am: Some(1),
            collection_pm: Some(2),
            total: Some(3),
        },
        rows: records
            .iter()
            .map(|r| {
                vec![
                    CellValue::Text(r.period.clone()),
                    num(r.collection_am),
                    num(r.collection_pm),
                    num(r.total),
                ]
            })
            .collect(),
    }
}
