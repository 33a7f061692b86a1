use std::path::{Path, PathBuf};

use collection_dash::config::DashboardConfig;
use collection_dash::data::{CollectionDataPipeline, DashboardView, Dataset, FilterSelection};

use crate::color::SeriesColors;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,
    pub pipeline: CollectionDataPipeline,
    pub colors: SeriesColors,

    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Dataset>,
    pub source_path: Option<PathBuf>,

    /// Selected periods.
    pub selection: FilterSelection,

    /// Records and totals for the current selection (cached).
    pub view: DashboardView,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            pipeline: CollectionDataPipeline::new(config.source.clone()),
            colors: SeriesColors::from_theme(&config.theme),
            config,
            dataset: None,
            source_path: None,
            selection: FilterSelection::none(),
            view: DashboardView::default(),
            status_message: None,
        }
    }

    /// Run the pipeline on `path`. On failure nothing from the file is kept.
    pub fn open_path(&mut self, path: &Path) {
        match self.pipeline.run(path) {
            Ok(dataset) => {
                self.source_path = Some(path.to_path_buf());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.dataset = None;
                self.source_path = None;
                self.selection = FilterSelection::none();
                self.view = DashboardView::default();
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset with every period selected.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.selection = dataset.default_selection();
        self.status_message = match dataset.warnings.len() {
            0 => None,
            n => Some(format!("{n} value(s) could not be read as numbers and were left blank")),
        };
        self.dataset = Some(dataset);
        self.refilter();
    }

    /// Recompute `view` after a selection change.
    pub fn refilter(&mut self) {
        self.view = match &self.dataset {
            Some(ds) => ds.view(&self.selection),
            None => DashboardView::default(),
        };
    }

    pub fn toggle_period(&mut self, period: &str) {
        self.selection.toggle(period);
        self.refilter();
    }

    pub fn select_all(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection = ds.default_selection();
            self.refilter();
        }
    }

    pub fn select_none(&mut self) {
        self.selection = FilterSelection::none();
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn csv_file(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn opening_a_file_selects_all_periods() {
        let f = csv_file("Mês,Coleta AM,Coleta PM,Total de Sacos\nJan,10,5,15\nFev,8,12,20\nTotal,18,17,35\n");
        let mut state = AppState::new(DashboardConfig::default());
        state.open_path(f.path());

        assert!(state.status_message.is_none());
        assert_eq!(state.selection.len(), 2);
        assert_eq!(state.view.summary.total_bags, 35.0);

        state.toggle_period("Jan");
        assert_eq!(state.view.summary.total_bags, 20.0);

        state.select_none();
        assert!(state.view.records.is_empty());
        assert_eq!(state.view.summary.total_weight, 0.0);

        state.select_all();
        assert_eq!(state.view.records.len(), 2);
    }

    #[test]
    fn failed_load_clears_previous_dataset() {
        let good = csv_file("Mês,Coleta AM\nJan,1\n");
        let bad = csv_file("Month,Coleta AM\nJan,1\n");
        let mut state = AppState::new(DashboardConfig::default());

        state.open_path(good.path());
        assert!(state.dataset.is_some());

        state.open_path(bad.path());
        assert!(state.dataset.is_none());
        assert!(state.view.records.is_empty());
        let msg = state.status_message.unwrap();
        assert!(msg.contains("Mês"), "{msg}");
    }

    #[test]
    fn coercion_warnings_surface_in_status() {
        let f = csv_file("Mês,Coleta AM,Coleta PM\nJan,n/a,5\n");
        let mut state = AppState::new(DashboardConfig::default());
        state.open_path(f.path());
        assert_eq!(state.view.summary.total_pm, 5.0);
        assert!(state.status_message.unwrap().starts_with("1 value(s)"));
    }
}
