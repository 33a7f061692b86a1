use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Headers as they appear in the field team's sheet, stray spaces included.
const HEADERS: [&str; 4] = ["Mês ", " Coleta AM", "Coleta PM ", "Total de Sacos"];

const MONTHS: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho", "Julho", "Agosto", "Setembro",
    "Outubro", "Novembro", "Dezembro",
];

/// Deterministic bag counts with a mild seasonal swing.
fn counts(month: usize) -> (f64, f64) {
    let season = ((month as f64) * std::f64::consts::PI / 6.0).sin();
    let am = (120.0 + 35.0 * season + (month * 7 % 11) as f64).round();
    let pm = (90.0 - 20.0 * season + (month * 5 % 13) as f64).round();
    (am, pm)
}

fn main() -> Result<()> {
    let mut periods: Vec<String> = Vec::new();
    let mut am: Vec<Option<f64>> = Vec::new();
    let mut pm: Vec<Option<f64>> = Vec::new();
    let mut total: Vec<Option<f64>> = Vec::new();

    for (i, month) in MONTHS.iter().enumerate() {
        let (a, p) = counts(i);
        periods.push(month.to_string());
        am.push(Some(a));
        pm.push(Some(p));
        total.push(Some(a + p));
    }

    let sum = |v: &[Option<f64>]| v.iter().flatten().sum::<f64>();
    let totals = (sum(&am), sum(&pm), sum(&total));
    periods.push("Total".to_string());
    am.push(Some(totals.0));
    pm.push(Some(totals.1));
    total.push(Some(totals.2));

    // ---- CSV ----
    let csv_path = "sample_collection.csv";
    let mut writer = csv::Writer::from_path(csv_path).context("creating CSV")?;
    writer.write_record(HEADERS)?;
    let cell = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
    for i in 0..periods.len() {
        writer.write_record([
            periods[i].clone(),
            cell(am[i]),
            cell(pm[i]),
            cell(total[i]),
        ])?;
    }
    writer.flush()?;

    // ---- Parquet ----
    let schema = Arc::new(Schema::new(vec![
        Field::new(HEADERS[0], DataType::Utf8, true),
        Field::new(HEADERS[1], DataType::Float64, true),
        Field::new(HEADERS[2], DataType::Float64, true),
        Field::new(HEADERS[3], DataType::Float64, true),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(periods.clone())),
            Arc::new(Float64Array::from(am)),
            Arc::new(Float64Array::from(pm)),
            Arc::new(Float64Array::from(total)),
        ],
    )
    .context("building record batch")?;

    let parquet_path = "sample_collection.parquet";
    let file = std::fs::File::create(parquet_path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch)?;
    writer.close()?;

    println!(
        "Wrote {} months (+ total row) to {csv_path} and {parquet_path}",
        MONTHS.len()
    );
    Ok(())
}
