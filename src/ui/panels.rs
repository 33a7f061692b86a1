use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use collection_dash::data::loader::{SPREADSHEET_EXTENSIONS, SUPPORTED_EXTENSIONS};
use collection_dash::data::model::format_number;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – month filter
// ---------------------------------------------------------------------------

/// Render the month multi-select and the detected column list.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let (periods, headers) = match &state.dataset {
        Some(ds) => (ds.periods.clone(), ds.headers.clone()),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ui.strong(format!(
        "Months  ({}/{})",
        periods.iter().filter(|p| state.selection.contains(p)).count(),
        periods.len()
    ));
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for period in &periods {
                let mut checked = state.selection.contains(period);
                if ui.checkbox(&mut checked, period.as_str()).changed() {
                    state.toggle_period(period);
                }
            }

            ui.separator();
            egui::CollapsingHeader::new(RichText::new("Columns in file").strong())
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    for h in &headers {
                        ui.label(RichText::new(h).monospace());
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Headline metrics
// ---------------------------------------------------------------------------

/// Total bags, total weight and the AM/PM split.
pub fn metrics(ui: &mut Ui, state: &AppState) {
    let s = &state.view.summary;
    let colors = state.colors;

    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Total bags", |ui: &mut Ui| {
            ui.label(value_text(format_number(s.total_bags)));
        });
        metric(&mut cols[1], "Total weight", |ui: &mut Ui| {
            ui.label(value_text(format!("{} kg", format_number(s.total_weight))));
        });
        metric(&mut cols[2], "AM / PM", |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.label(value_text(format!("{} AM", format_number(s.total_am))).color(colors.am));
                ui.label(value_text("/".to_string()));
                ui.label(value_text(format!("{} PM", format_number(s.total_pm))).color(colors.pm));
            });
        });
    });
}

fn value_text(value: String) -> RichText {
    RichText::new(value).size(26.0).strong()
}

fn metric(ui: &mut Ui, label: &str, add_value: impl FnOnce(&mut Ui)) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).small());
        add_value(ui);
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} visible",
                ds.len(),
                state.view.records.len()
            ));
        }

        if let Some(path) = &state.source_path {
            ui.separator();
            ui.label(RichText::new(path.display().to_string()).weak());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if state.dataset.is_some() {
                Color32::YELLOW
            } else {
                Color32::RED
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open collection data")
        .add_filter("Supported files", SUPPORTED_EXTENSIONS)
        .add_filter("Spreadsheet", SPREADSHEET_EXTENSIONS)
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}
