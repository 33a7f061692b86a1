use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Source / schema configuration
// ---------------------------------------------------------------------------

/// Header names of the canonical fields, matched after trimming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub period: String,
    pub collection_am: String,
    pub collection_pm: String,
    pub total: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            period: "Mês".to_string(),
            collection_am: "Coleta AM".to_string(),
            collection_pm: "Coleta PM".to_string(),
            total: "Total de Sacos".to_string(),
        }
    }
}

/// Everything the pipeline needs to know about the input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceOptions {
    /// Worksheet to read from spreadsheets. `None` reads the first sheet.
    pub sheet: Option<String>,
    pub columns: ColumnNames,
    /// Period label of pre-aggregated rows.
    pub total_marker: String,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            sheet: None,
            columns: ColumnNames::default(),
            total_marker: "Total".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Presentation theme
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

/// Visual styling. Only the UI reads this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub kind: ThemeKind,
    pub title: String,
    /// Hex colour of the morning series, e.g. `#007bff`.
    pub am_color: String,
    /// Hex colour of the afternoon series.
    pub pm_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            kind: ThemeKind::Dark,
            title: "Dashboard - Coleta Centro".to_string(),
            am_color: "#007bff".to_string(),
            pm_color: "#ff8c00".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub source: SourceOptions,
    pub theme: Theme,
}

impl DashboardConfig {
    /// Read a JSON config file. Missing fields fall back to defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
