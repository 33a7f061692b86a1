use std::path::Path;

use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use calamine::{open_workbook_auto, Data, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use crate::config::SourceOptions;
use crate::error::{PipelineError, Result};

use super::model::{CellValue, RawTable};
use super::schema::build_table;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Spreadsheet extensions read through calamine.
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// Extensions accepted by [`load_file`], for file dialogs.
pub const SUPPORTED_EXTENSIONS: &[&str] =
    &["xlsx", "xlsm", "xls", "xlsb", "ods", "csv", "json", "parquet", "pq"];

/// Load a collection table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xls` / `.xlsb` / `.ods` – first row is the header; the
///   configured sheet is read, or the first one
/// * `.csv`     – header row followed by data rows
/// * `.json`    – `[{ "Mês": "Jan", "Coleta AM": 10, ... }, ...]`
/// * `.parquet` – one column per header
///
/// Headers are whitespace-normalized here and the period column must exist.
pub fn load_file(path: &Path, opts: &SourceOptions) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let (headers, rows) = match ext.as_str() {
        e if SPREADSHEET_EXTENSIONS.contains(&e) => read_spreadsheet(path, opts.sheet.as_deref())?,
        "csv" => read_csv(path)?,
        "json" => read_json(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => {
            return Err(PipelineError::unavailable(
                path,
                format!("unsupported file extension: .{other}"),
            ))
        }
    };

    let table = build_table(headers, rows, &opts.columns)?;
    log::info!(
        "Loaded {} rows from {} (columns {:?})",
        table.len(),
        path.display(),
        table.headers
    );
    Ok(table)
}

type Sheet = (Vec<String>, Vec<Vec<CellValue>>);

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

fn read_spreadsheet(path: &Path, sheet: Option<&str>) -> Result<Sheet> {
    let mut workbook = open_workbook_auto(path).map_err(|e| PipelineError::unavailable(path, e))?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| PipelineError::unavailable(path, "workbook has no sheets"))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| PipelineError::unavailable(path, format!("sheet '{sheet_name}': {e}")))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .unwrap_or_default();
    let rows: Vec<Vec<CellValue>> = rows
        .map(|r| r.iter().map(spreadsheet_cell).collect())
        .collect();

    Ok((headers, rows))
}

fn spreadsheet_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn read_csv(path: &Path) -> Result<Sheet> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| PipelineError::unavailable(path, e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| PipelineError::unavailable(path, e))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| PipelineError::unavailable(path, format!("CSV row {row_no}: {e}")))?;
        rows.push(record.iter().map(guess_cell).collect());
    }

    Ok((headers, rows))
}

fn guess_cell(s: &str) -> CellValue {
    let t = s.trim();
    if t.is_empty() {
        return CellValue::Empty;
    }
    match t.parse::<f64>() {
        Ok(v) if v.is_finite() => CellValue::Number(v),
        _ => CellValue::Text(s.to_string()),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`). Headers are the
/// union of keys across all objects.
fn read_json(path: &Path) -> Result<Sheet> {
    let text = std::fs::read_to_string(path).map_err(|e| PipelineError::unavailable(path, e))?;
    let root: JsonValue =
        serde_json::from_str(&text).map_err(|e| PipelineError::unavailable(path, e))?;

    let records = root
        .as_array()
        .ok_or_else(|| PipelineError::unavailable(path, "expected a top-level JSON array"))?;

    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| PipelineError::unavailable(path, format!("row {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows: Vec<Vec<CellValue>> = records
        .iter()
        .filter_map(JsonValue::as_object)
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map(json_cell).unwrap_or(CellValue::Empty))
                .collect()
        })
        .collect();

    Ok((headers, rows))
}

fn json_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::Null => CellValue::Empty,
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => n
            .as_f64()
            .map(CellValue::Number)
            .unwrap_or_else(|| CellValue::Text(n.to_string())),
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Numeric columns become numbers; every other type is cast to text.
fn read_parquet(path: &Path) -> Result<Sheet> {
    let file = std::fs::File::open(path).map_err(|e| PipelineError::unavailable(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| PipelineError::unavailable(path, format!("reading parquet metadata: {e}")))?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder
        .build()
        .map_err(|e| PipelineError::unavailable(path, e))?;

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for batch_result in reader {
        let batch = batch_result.map_err(|e| PipelineError::unavailable(path, e))?;
        let columns = batch
            .columns()
            .iter()
            .map(|col| arrow_column_cells(col.as_ref()))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| PipelineError::unavailable(path, e))?;

        for row in 0..batch.num_rows() {
            rows.push(columns.iter().map(|c| c[row].clone()).collect());
        }
    }

    Ok((headers, rows))
}

fn arrow_column_cells(col: &dyn Array) -> std::result::Result<Vec<CellValue>, arrow::error::ArrowError> {
    if col.data_type().is_numeric() {
        let floats = cast(col, &DataType::Float64)?;
        let floats = floats.as_primitive::<Float64Type>();
        return Ok((0..floats.len())
            .map(|i| {
                if floats.is_null(i) {
                    CellValue::Empty
                } else {
                    CellValue::Number(floats.value(i))
                }
            })
            .collect());
    }

    let text = cast(col, &DataType::Utf8)?;
    let text = text.as_string::<i32>();
    Ok((0..text.len())
        .map(|i| {
            if text.is_null(i) {
                CellValue::Empty
            } else {
                CellValue::Text(text.value(i).to_string())
            }
        })
        .collect())
}
