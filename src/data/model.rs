use std::fmt;

use super::schema::ColumnMap;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the source sheet
// ---------------------------------------------------------------------------

/// A dynamically-typed cell as it comes out of the source file.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(v) => write!(f, "{}", format_number(*v)),
            CellValue::Empty => Ok(()),
        }
    }
}

impl CellValue {
    /// Interpret the cell as a period label. Blank text counts as missing.
    pub fn as_label(&self) -> Option<String> {
        match self {
            CellValue::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            CellValue::Number(v) if v.is_finite() => Some(format_number(*v)),
            _ => None,
        }
    }

    /// Interpret the cell as a number.
    ///
    /// `Ok(None)` is a blank cell; `Err` carries the text that failed to parse.
    pub fn coerce_number(&self) -> Result<Option<f64>, String> {
        match self {
            CellValue::Number(v) if v.is_nan() => Ok(None),
            CellValue::Number(v) => Ok(Some(*v)),
            CellValue::Empty => Ok(None),
            CellValue::Text(s) => {
                let t = s.trim();
                if t.is_empty() {
                    return Ok(None);
                }
                parse_decimal(t).map(Some).ok_or_else(|| s.clone())
            }
        }
    }
}

/// Accepts `12`, `12.5` and the comma-decimal `12,5`.
///
/// A comma followed by exactly three digits (`1,234`) reads as a thousands
/// separator and is rejected, as is any mix of commas and dots.
fn parse_decimal(t: &str) -> Option<f64> {
    let parsed = t.parse::<f64>().ok().or_else(|| {
        let (int, frac) = t.split_once(',')?;
        let looks_grouped = frac.len() == 3 && frac.bytes().all(|b| b.is_ascii_digit());
        if t.contains('.') || frac.contains(',') || looks_grouped {
            return None;
        }
        format!("{int}.{frac}").parse::<f64>().ok()
    })?;
    parsed.is_finite().then_some(parsed)
}

/// Whole numbers print without a fractional part (`12`, not `12.0`).
pub fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

// ---------------------------------------------------------------------------
// RawTable – the loaded sheet after schema normalization
// ---------------------------------------------------------------------------

static EMPTY: CellValue = CellValue::Empty;

/// Header-normalized table with the canonical column mapping resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Trimmed header names, in source order.
    pub headers: Vec<String>,
    pub columns: ColumnMap,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    /// Cell at `(row, col)`; short rows read as empty.
    pub fn cell(&self, row: usize, col: Option<usize>) -> &CellValue {
        col.and_then(|c| self.rows.get(row).and_then(|r| r.get(c)))
            .unwrap_or(&EMPTY)
    }

    pub fn header(&self, col: Option<usize>) -> &str {
        col.and_then(|c| self.headers.get(c))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Typed records
// ---------------------------------------------------------------------------

/// One data row: a period with its morning/afternoon bag counts.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub period: String,
    pub collection_am: Option<f64>,
    pub collection_pm: Option<f64>,
    /// Pre-computed total as supplied by the sheet.
    pub total: Option<f64>,
}

/// A [`RawRecord`] with resolved total and weights in kilograms.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRecord {
    pub record: RawRecord,
    pub total_bags: Option<f64>,
    pub weight_am: Option<f64>,
    pub weight_pm: Option<f64>,
    pub weight_total: Option<f64>,
}

impl DerivedRecord {
    pub fn period(&self) -> &str {
        &self.record.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_from_cells() {
        assert_eq!(CellValue::Text("  Jan ".into()).as_label().as_deref(), Some("Jan"));
        assert_eq!(CellValue::Text("   ".into()).as_label(), None);
        assert_eq!(CellValue::Empty.as_label(), None);
        assert_eq!(CellValue::Number(3.0).as_label().as_deref(), Some("3"));
    }

    #[test]
    fn number_coercion() {
        assert_eq!(CellValue::Number(4.0).coerce_number(), Ok(Some(4.0)));
        assert_eq!(CellValue::Number(f64::NAN).coerce_number(), Ok(None));
        assert_eq!(CellValue::Text(" 12 ".into()).coerce_number(), Ok(Some(12.0)));
        assert_eq!(CellValue::Text("12,5".into()).coerce_number(), Ok(Some(12.5)));
        assert_eq!(CellValue::Text("".into()).coerce_number(), Ok(None));
        assert_eq!(CellValue::Empty.coerce_number(), Ok(None));
        assert_eq!(
            CellValue::Text("n/a".into()).coerce_number(),
            Err("n/a".to_string())
        );
        assert_eq!(
            CellValue::Text("inf".into()).coerce_number(),
            Err("inf".to_string())
        );
        assert!(CellValue::Text("1,234.5".into()).coerce_number().is_err());
    }

    #[test]
    fn grouped_thousands_are_rejected() {
        assert_eq!(
            CellValue::Text("1,234".into()).coerce_number(),
            Err("1,234".to_string())
        );
        assert!(CellValue::Text("1,234,567".into()).coerce_number().is_err());
        assert_eq!(CellValue::Text("1,23".into()).coerce_number(), Ok(Some(1.23)));
        assert_eq!(CellValue::Text("0,5".into()).coerce_number(), Ok(Some(0.5)));
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(360.0), "360");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(CellValue::Number(-2.0).to_string(), "-2");
    }
}
