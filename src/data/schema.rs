use crate::config::ColumnNames;
use crate::error::{PipelineError, Result};

use super::model::{CellValue, RawTable};

/// Positions of the canonical fields in the source header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub period: usize,
    pub collection_am: Option<usize>,
    pub collection_pm: Option<usize>,
    pub total: Option<usize>,
}

impl ColumnMap {
    /// Look up every canonical field in already-normalized headers.
    /// Only the period column is required.
    pub fn resolve(headers: &[String], names: &ColumnNames) -> Result<Self> {
        let find = |name: &str| {
            let name = name.trim();
            headers.iter().position(|h| h == name)
        };

        let period = find(&names.period).ok_or_else(|| PipelineError::SchemaMissing {
            column: names.period.trim().to_string(),
            found: headers.to_vec(),
        })?;

        let map = ColumnMap {
            period,
            collection_am: find(&names.collection_am),
            collection_pm: find(&names.collection_pm),
            total: find(&names.total),
        };
        for (name, idx) in [
            (&names.collection_am, map.collection_am),
            (&names.collection_pm, map.collection_pm),
            (&names.total, map.total),
        ] {
            if idx.is_none() {
                log::warn!("column '{}' not found; its values are treated as missing", name.trim());
            }
        }
        Ok(map)
    }
}

/// Trim surrounding whitespace from every header.
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter().map(|h| h.as_ref().trim().to_string()).collect()
}

/// Normalize headers once, resolve the column map and assemble the table.
pub fn build_table<I, S>(
    raw_headers: I,
    rows: Vec<Vec<CellValue>>,
    names: &ColumnNames,
) -> Result<RawTable>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let headers = normalize_headers(raw_headers);
    let columns = ColumnMap::resolve(&headers, names)?;
    Ok(RawTable {
        headers,
        columns,
        rows,
    })
}
